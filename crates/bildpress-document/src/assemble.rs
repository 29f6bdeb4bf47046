// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document assembler — the batch loop that turns an ordered set of images
// into one multi-page document.
//
// Invariant: every input image consumes exactly one page, in input order. A
// failed image still gets its page, carrying a textual error marker instead
// of a picture, so one bad file never aborts or shifts the rest of the batch.

use sha2::{Digest, Sha256};
use tracing::{info, instrument, warn};

use bildpress_core::config::ConvertSettings;
use bildpress_core::error::{BildpressError, Result};
use bildpress_core::types::{BuildId, BuildReport, PageOutcome, SourceImage};

use crate::image::reencoder::Reencoder;
use crate::layout;
use crate::pdf::sink::PageSink;

/// Orchestrates one document build: re-encode, lay out, and place each image
/// on its own page of the injected sink.
pub struct DocumentAssembler;

impl DocumentAssembler {
    /// Build a multi-page document from `images`, strictly in input order.
    ///
    /// Fails only on an empty batch, before any page is created. Per-image
    /// decode/encode/placement errors are caught at the item boundary and
    /// recorded as error-marker pages; the batch always runs to completion
    /// with one page per input image. The finished document is left in the
    /// sink; the returned report lists one outcome per page.
    #[instrument(skip(images, settings, sink), fields(count = images.len()))]
    pub fn build(
        images: &[SourceImage],
        settings: &ConvertSettings,
        sink: &mut dyn PageSink,
    ) -> Result<BuildReport> {
        if images.is_empty() {
            return Err(BildpressError::EmptyBatch);
        }

        // The printable area is fixed for the whole build; margin and page
        // spec never vary per page.
        let (printable_w, printable_h) = layout::printable_area(&settings.page);
        let id = BuildId::new();

        info!(
            %id,
            page = ?settings.page,
            policy = ?settings.policy,
            quality = settings.quality.value(),
            "Starting document build"
        );

        let mut outcomes = Vec::with_capacity(images.len());

        for image in images {
            sink.start_page();

            match Self::place_one(image, settings, printable_w, printable_h, sink) {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    warn!(name = %image.name, error = %err, "Image failed; placing error marker");

                    let reason = match &err {
                        BildpressError::Decode { reason, .. }
                        | BildpressError::Encode { reason, .. } => reason.clone(),
                        other => other.to_string(),
                    };
                    let marker = format!("Error loading image: {}\n{reason}", image.name);
                    if let Err(marker_err) = sink.place_error_text(&marker) {
                        // The marker is best-effort; the page still exists.
                        warn!(name = %image.name, error = %marker_err, "Error marker could not be placed");
                    }
                    outcomes.push(PageOutcome::Failed {
                        name: image.name.clone(),
                        reason,
                    });
                }
            }
        }

        sink.finalize()?;

        let report = BuildReport {
            id,
            created_at: chrono::Utc::now(),
            page: settings.page,
            policy: settings.policy,
            quality: settings.quality,
            outcomes,
        };
        info!(
            %id,
            pages = report.page_count(),
            failed = report.failed_count(),
            "Document build complete"
        );
        Ok(report)
    }

    /// The per-image pipeline: re-encode at the batch quality, measure the
    /// re-encoded result (placement must reflect what is actually placed,
    /// not the original), compute placement, place.
    fn place_one(
        image: &SourceImage,
        settings: &ConvertSettings,
        printable_w: f32,
        printable_h: f32,
        sink: &mut dyn PageSink,
    ) -> Result<PageOutcome> {
        let encoded = Reencoder::reencode(image, settings.quality)?;
        let placed = Reencoder::decode_encoded(&image.name, &encoded)?;
        let placement = layout::compute_placement(
            printable_w,
            printable_h,
            placed.width(),
            placed.height(),
            settings.policy,
        );
        sink.place_image(&placed, &placement)?;

        Ok(PageOutcome::Placed {
            name: image.name.clone(),
            digest: hex::encode(Sha256::digest(&image.bytes)),
            placement,
            encoded_bytes: encoded.byte_size(),
        })
    }
}
