//! Performance benchmarks for the pure hot paths of espfront: output
//! classification and esptool argument assembly.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use espfront::models::{FirmwareManifest, FlashMode, FlashOptions};
use espfront::services::classifier::classify;
use espfront::services::invoker::build_arguments;

fn benchmark_classify(c: &mut Criterion) {
    let progress_chunk = "Writing at 0x0002c000... (73 %)\n";
    let log_chunk = "Compressed 434160 bytes to 237334...\n";

    c.bench_function("classify_progress_chunk", |b| {
        b.iter(|| black_box(classify(black_box(progress_chunk))));
    });

    c.bench_function("classify_log_chunk", |b| {
        b.iter(|| black_box(classify(black_box(log_chunk))));
    });
}

fn benchmark_build_arguments(c: &mut Criterion) {
    let mut manifest = FirmwareManifest::new();
    manifest.add("0x1000", "/build/bootloader.bin");
    manifest.add("0x8000", "/build/partition-table.bin");
    manifest.add("0xe000", "/build/ota_data_initial.bin");
    manifest.add("0x10000", "/build/app.bin");

    let options = FlashOptions {
        serial_port: "/dev/ttyUSB0".to_string(),
        flash_mode: FlashMode::Dio,
        flash_size: "detect".to_string(),
        flash_freq: "40m".to_string(),
        compression: true,
    };

    c.bench_function("build_arguments_four_images", |b| {
        b.iter(|| black_box(build_arguments(black_box(&manifest), black_box(&options))));
    });
}

criterion_group!(benches, benchmark_classify, benchmark_build_arguments);
criterion_main!(benches);
