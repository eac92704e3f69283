//! Benchmarks for the per-frame grading path.
//!
//! Run with: `cargo bench -p camgrade-pipeline`

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use camgrade_color::Config;
use camgrade_core::{BgrFrame, ColorSpaces, ColorTransformParams, Size};
use camgrade_lut::{BlueAxis, LutAtlas, LutBaker, sample_in_place};
use camgrade_pipeline::{FramePipeline, GradeMode, PipelineConfig};

fn test_frame(size: Size) -> BgrFrame {
    BgrFrame::from_fn(size.width, size.height, |x, y| {
        [(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8]
    })
}

/// Full frame: convert, grade, quantize, resize.
fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("process");
    group.sample_size(20);

    let input = Size::new(1280, 720);
    let frame = test_frame(input);
    let params = ColorTransformParams::from_trackbar(130, 90, 110);

    for (label, working) in [("full", input), ("half", Size::new(640, 360))] {
        for mode in [GradeMode::Atlas, GradeMode::Direct] {
            let config = PipelineConfig::new(input, working).with_mode(mode);
            let Ok(mut pipeline) = FramePipeline::new(config, Config::builtin()) else {
                continue;
            };
            group.throughput(Throughput::Elements(working.pixel_count() as u64));
            group.bench_function(BenchmarkId::new(format!("{mode:?}"), label), |b| {
                b.iter(|| pipeline.process(black_box(&frame), &params).map(|o| o.is_some()))
            });
        }
    }

    group.finish();
}

/// Atlas lookup alone.
fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");

    let pixels: Vec<[f32; 3]> = (0..100_000)
        .map(|i| {
            let t = i as f32 / 100_000.0;
            [t, 1.0 - t, (t * 7.0).fract()]
        })
        .collect();
    group.throughput(Throughput::Elements(pixels.len() as u64));

    for size in [17, 32, 64] {
        let Ok(atlas) = LutAtlas::identity(size) else {
            continue;
        };
        for axis in [BlueAxis::Floor, BlueAxis::Linear] {
            group.bench_with_input(BenchmarkId::new(format!("{axis:?}"), size), &atlas, |b, atlas| {
                b.iter(|| {
                    let mut px = pixels.clone();
                    sample_in_place(atlas, &mut px, axis);
                    px
                })
            });
        }
    }

    group.finish();
}

/// Cost of a cache miss.
fn bench_rebake(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebake");
    let spaces = ColorSpaces::default();

    for size in [17, 32, 64] {
        let Ok(mut baker) = LutBaker::new(Config::builtin(), size) else {
            continue;
        };
        let mut gain = 0.2f32;
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| {
                gain = if gain > 0.9 { 0.2 } else { gain + 0.01 };
                let params = ColorTransformParams::default().with_gain(gain);
                baker.bake(black_box(&params), &spaces).map(|a| a.generation())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_process, bench_sample, bench_rebake);
criterion_main!(benches);
