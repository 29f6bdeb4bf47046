// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Compression previewer — single-image re-encode with a before/after size
// readout, re-invoked on every quality change.
//
// Each invocation decodes and re-encodes from the original source, never
// from a previous preview, so repeated quality adjustments do not compound
// lossy degradation.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, instrument};

use bildpress_core::error::Result;
use bildpress_core::types::{CompressionLevel, SourceImage};

use crate::image::reencoder::Reencoder;

/// Result of one preview invocation.
#[derive(Debug, Clone)]
pub struct PreviewResult {
    /// The re-encoded JPEG, ready to display or download.
    pub jpeg: Vec<u8>,
    pub original_size: u64,
    pub encoded_size: u64,
    /// `round((original − encoded) / original × 100)`. `None` when the
    /// original size is zero. Negative when re-encoding grew the file.
    pub reduction_percent: Option<i32>,
}

/// Re-encodes one image at a user-adjustable quality and reports sizes.
pub struct CompressionPreviewer;

impl CompressionPreviewer {
    #[instrument(skip(image), fields(name = %image.name, quality = quality.value()))]
    pub fn preview(image: &SourceImage, quality: CompressionLevel) -> Result<PreviewResult> {
        let encoded = Reencoder::reencode(image, quality)?;

        let original_size = image.byte_size();
        let encoded_size = encoded.byte_size();
        let reduction_percent = size_reduction_percent(original_size, encoded_size);

        debug!(original_size, encoded_size, ?reduction_percent, "Preview ready");
        Ok(PreviewResult {
            jpeg: encoded.jpeg,
            original_size,
            encoded_size,
            reduction_percent,
        })
    }
}

/// Size reduction as a rounded percentage; `None` when `original` is zero
/// (no division, no crash).
pub fn size_reduction_percent(original: u64, encoded: u64) -> Option<i32> {
    if original == 0 {
        return None;
    }
    let reduction = (original as f64 - encoded as f64) / original as f64 * 100.0;
    Some(reduction.round() as i32)
}

/// Human-readable byte count, e.g. `153.42 KB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 Bytes".into();
    }
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[exponent])
}

/// Orders overlapping preview invocations.
///
/// Rapid quality changes can have several previews in flight at once; no
/// cancellation is attempted, but a result that completes after a newer one
/// has already been surfaced must be discarded to avoid flicker. Callers
/// take a token from `begin` before starting, and surface the result only
/// if `try_surface` accepts the token.
#[derive(Debug, Default)]
pub struct PreviewSequencer {
    issued: AtomicU64,
    surfaced: AtomicU64,
}

impl PreviewSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a token for an invocation about to start.
    pub fn begin(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// True if the result for `token` is still the freshest completed one
    /// and should be surfaced; false if a newer result already was.
    pub fn try_surface(&self, token: u64) -> bool {
        self.surfaced.fetch_max(token, Ordering::SeqCst) < token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};

    fn test_image(width: u32, height: u32) -> SourceImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([
                ((x * 11 + y * 3) % 256) as u8,
                ((x + y * 7) % 256) as u8,
                ((x * 5) % 256) as u8,
            ])
        });
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        SourceImage::new("preview.png", "image/png", bytes)
    }

    #[test]
    fn preview_reports_both_sizes() {
        let src = test_image(64, 64);
        let result = CompressionPreviewer::preview(&src, CompressionLevel::MEDIUM).unwrap();
        assert_eq!(result.original_size, src.byte_size());
        assert_eq!(result.encoded_size, result.jpeg.len() as u64);
        assert!(result.reduction_percent.is_some());
    }

    #[test]
    fn preview_is_idempotent_for_fixed_inputs() {
        let src = test_image(80, 80);
        let a = CompressionPreviewer::preview(&src, CompressionLevel::HIGH).unwrap();
        let b = CompressionPreviewer::preview(&src, CompressionLevel::HIGH).unwrap();
        assert_eq!(a.encoded_size, b.encoded_size);
    }

    #[test]
    fn lower_quality_does_not_grow_output() {
        let src = test_image(128, 128);
        let low = CompressionPreviewer::preview(&src, CompressionLevel::new(0.1)).unwrap();
        let high = CompressionPreviewer::preview(&src, CompressionLevel::new(0.9)).unwrap();
        assert!(high.encoded_size >= low.encoded_size);
    }

    #[test]
    fn reduction_percentage_is_rounded() {
        assert_eq!(size_reduction_percent(1_000_000, 250_000), Some(75));
        assert_eq!(size_reduction_percent(3, 2), Some(33));
        assert_eq!(size_reduction_percent(100, 100), Some(0));
    }

    #[test]
    fn growth_is_reported_as_negative() {
        assert_eq!(size_reduction_percent(100, 150), Some(-50));
    }

    #[test]
    fn zero_original_size_is_undefined_not_a_crash() {
        assert_eq!(size_reduction_percent(0, 250_000), None);
    }

    #[test]
    fn format_bytes_matches_ui_convention() {
        assert_eq!(format_bytes(0), "0 Bytes");
        assert_eq!(format_bytes(512), "512 Bytes");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1_048_576), "1 MB");
    }

    #[test]
    fn stale_results_are_discarded() {
        let seq = PreviewSequencer::new();
        let older = seq.begin();
        let newer = seq.begin();

        // The newer invocation completes first and is surfaced.
        assert!(seq.try_surface(newer));
        // The older one completes late and must be dropped.
        assert!(!seq.try_surface(older));
    }

    #[test]
    fn in_order_completions_all_surface() {
        let seq = PreviewSequencer::new();
        let a = seq.begin();
        let b = seq.begin();
        assert!(seq.try_surface(a));
        assert!(seq.try_surface(b));
    }
}
