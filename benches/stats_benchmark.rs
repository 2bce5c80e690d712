use criterion::{criterion_group, criterion_main, Criterion};
use hiking_log::models::Record;
use hiking_log::services::duration::parse_to_minutes;
use hiking_log::services::stats::compute_report;
use std::hint::black_box;

const MOUNTAINS: [&str; 8] = ["泰山", "华山", "黄山", "峨眉山", "衡山", "嵩山", "恒山", "庐山"];
const WEATHERS: [&str; 4] = ["晴天", "多云", "阴天", "小雨"];
const DURATIONS: [&str; 4] = ["2h", "1小时30分钟", "45分钟", "3.5h"];

/// Several years of weekly hikes.
fn synthetic_records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let year = 2020 + i / 52;
            let month = 1 + (i / 4) % 12;
            let mut record = Record::new(
                MOUNTAINS[i % MOUNTAINS.len()],
                format!("{}-{:02}-{:02}", year, month, 1 + i % 28),
            );
            record.id = Some(format!("{}", 1_700_000_000_000u64 + i as u64));
            record.weather = Some(WEATHERS[i % WEATHERS.len()].to_string());
            record.distance = Some(format!("{}.{}", 3 + i % 15, i % 10));
            record.duration = Some(DURATIONS[i % DURATIONS.len()].to_string());
            record.photos = vec![format!("cloud://photo_{}.jpg", i); i % 4];
            record
        })
        .collect()
}

fn benchmark_compute_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_report");

    for count in [50, 500] {
        let records = synthetic_records(count);
        group.bench_function(format!("{}_records", count), |b| {
            b.iter(|| compute_report(black_box(&records), 0))
        });
    }

    group.finish();
}

fn benchmark_parse_duration(c: &mut Criterion) {
    c.bench_function("parse_to_minutes", |b| {
        b.iter(|| {
            DURATIONS
                .iter()
                .map(|d| parse_to_minutes(black_box(d)))
                .sum::<u64>()
        })
    });
}

criterion_group!(benches, benchmark_compute_report, benchmark_parse_duration);
criterion_main!(benches);
