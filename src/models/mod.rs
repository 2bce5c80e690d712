// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod record;
pub mod stats;
pub mod wire;

pub use record::{Record, Weather};
pub use stats::{MonthlyStat, MountainStat, StatsReport, StatsSummary, WeatherStat};
pub use wire::{ApiEnvelope, CreateRecordPayload, RecordDto};
