// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Hiking-log: statistics and local-to-remote migration for hiking records
//!
//! This crate provides the client-side core of the hiking log: duration
//! parsing, dashboard statistics, and the one-time migration of locally
//! stored records to the backend.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;
