// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the bildpress-document pipeline: the placement
// calculator (pure math, should be nanoseconds) and a full re-encode of a
// small synthetic test image.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, ImageFormat, RgbImage};

use bildpress_core::types::{CompressionLevel, PlacementPolicy, SourceImage};
use bildpress_document::Reencoder;
use bildpress_document::layout::compute_placement;

fn synthetic_source(width: u32, height: u32) -> SourceImage {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([
            ((x * 7 + y * 13) % 256) as u8,
            ((x * 3) % 256) as u8,
            ((y * 5) % 256) as u8,
        ])
    });
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode synthetic image");
    SourceImage::new("bench.png", "image/png", bytes)
}

fn bench_compute_placement(c: &mut Criterion) {
    c.bench_function("compute_placement (fit)", |b| {
        b.iter(|| {
            black_box(compute_placement(
                black_box(170.0),
                black_box(257.0),
                black_box(1920),
                black_box(1080),
                PlacementPolicy::Fit,
            ))
        });
    });
}

/// Re-encode a 100x100 synthetic image at the default quality. Dominated by
/// PNG decode plus JPEG encode — the realistic per-image hot path of a
/// document build.
fn bench_reencode(c: &mut Criterion) {
    let source = synthetic_source(100, 100);

    c.bench_function("reencode (100x100)", |b| {
        b.iter(|| {
            let encoded =
                Reencoder::reencode(black_box(&source), CompressionLevel::MEDIUM).unwrap();
            black_box(encoded.byte_size());
        });
    });
}

criterion_group!(benches, bench_compute_placement, bench_reencode);
criterion_main!(benches);
