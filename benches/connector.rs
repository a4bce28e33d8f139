use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mzxic::builder::{BuilderConfig, ChromatogramBuilder};
use mzxic::chromatogram::HighestDataPointConnector;
use mzxic::scan::{Scan, ScanBuilder};
use mzxic::tolerance::MzTolerance;

/// Synthetic MS1 run: `ions` eluting analytes plus background peaks per scan
fn create_run(num_scans: usize, ions: usize, background: usize) -> Vec<Scan> {
    (0..num_scans)
        .map(|i| {
            let rt = i as f64 * 0.5;
            let mut builder = ScanBuilder::new(i as i64 + 1).retention_time(rt);
            for j in 0..ions {
                let apex = (j * 37 % num_scans) as f64 * 0.5;
                let z = (rt - apex) / 4.0;
                let intensity = 1e5 * (-0.5 * z * z).exp();
                if intensity > 10.0 {
                    builder = builder.add_peak(200.0 + j as f64 * 0.7, intensity as f32);
                }
            }
            for k in 0..background {
                let mz = 150.0 + ((i * 7919 + k * 104_729) % 140_000) as f64 * 0.01;
                builder = builder.add_peak(mz, 50.0 + (k % 17) as f32);
            }
            builder.build()
        })
        .collect()
}

fn bench_connector(c: &mut Criterion) {
    let mut group = c.benchmark_group("connector");
    let tolerance = MzTolerance::AbsoluteOrPpm {
        absolute: 0.002,
        ppm: 10.0,
    };

    for &peaks in &[100usize, 500, 2000] {
        let scans = create_run(600, peaks / 4, peaks - peaks / 4);
        let total_peaks: usize = scans.iter().map(|s| s.peak_count()).sum();
        group.throughput(Throughput::Elements(total_peaks as u64));

        group.bench_with_input(BenchmarkId::new("add_scan", peaks), &scans, |b, scans| {
            b.iter(|| {
                let mut connector =
                    HighestDataPointConnector::new(2.0, 1e3).with_noise_floor(Some(40.0));
                for scan in scans {
                    connector.add_scan(black_box(scan), &tolerance).unwrap();
                }
                black_box(connector.finish())
            });
        });
    }

    group.finish();
}

fn bench_builder(c: &mut Criterion) {
    let scans = create_run(1200, 200, 800);
    let builder = ChromatogramBuilder::new(BuilderConfig::time_of_flight());

    c.bench_function("builder_full_run", |b| {
        b.iter(|| black_box(builder.build(black_box(&scans)).unwrap()))
    });
}

criterion_group!(benches, bench_connector, bench_builder);
criterion_main!(benches);
