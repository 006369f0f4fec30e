//! Benchmarks for chart frame building and rendering
//!
//! Run with: cargo bench

use aiot_dashboard::api::dto::records_to_readings;
use aiot_dashboard::api::ReadingRecord;
use aiot_dashboard::chart::plot::{project, Viewport};
use aiot_dashboard::render::sparkline;
use aiot_dashboard::{ChartFrame, DashboardCharts, DisplayZone, Reading, ReadingOrder};
use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn create_readings(count: usize) -> Vec<Reading> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .rev()
        .map(|i| {
            Reading::new(
                start + Duration::seconds(30 * i as i64),
                20.0 + (i % 7) as f64,
                50.0 + (i % 13) as f64,
            )
        })
        .collect()
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for size in [100, 1000] {
        let records: Vec<ReadingRecord> = (0..size)
            .map(|i| ReadingRecord {
                fecha: format!("2024-01-01T{:02}:{:02}:{:02}.123456", i / 3600 % 24, i / 60 % 60, i % 60),
                temperatura: 21.5,
                humedad: 55.0,
            })
            .collect();
        let body = serde_json::to_string(&records).unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("records_{}", size), |b| {
            b.iter(|| {
                let records: Vec<ReadingRecord> = serde_json::from_str(black_box(&body)).unwrap();
                records_to_readings(records, DisplayZone::Utc).unwrap()
            })
        });
    }

    group.finish();
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");

    for size in [100, 1000] {
        let readings = create_readings(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("from_readings_{}", size), |b| {
            b.iter(|| {
                ChartFrame::from_readings(
                    black_box(&readings),
                    ReadingOrder::NewestFirst,
                    DisplayZone::Utc,
                )
            })
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let readings = create_readings(1000);
    let mut charts = DashboardCharts::init(ChartFrame::from_readings(
        &readings,
        ReadingOrder::NewestFirst,
        DisplayZone::Utc,
    ));
    let viewport = Viewport::new(800.0, 300.0);

    c.bench_function("project_1000", |b| {
        b.iter(|| project(black_box(charts.temperature().state()), &viewport))
    });

    c.bench_function("sparkline_1000", |b| {
        b.iter(|| sparkline(black_box(charts.humidity().state().values()), 60))
    });

    c.bench_function("refresh_1000", |b| {
        b.iter(|| {
            charts.refresh(ChartFrame::from_readings(
                &readings,
                ReadingOrder::NewestFirst,
                DisplayZone::Utc,
            ))
        })
    });
}

criterion_group!(benches, bench_decode, bench_frame, bench_render);
criterion_main!(benches);
