// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bildpress-document — Document composition for the Bildpress converter.
//
// Provides JPEG re-encoding at a caller-chosen quality, the page placement
// calculator (fit/stretch within a margin-inset printable area), the
// multi-page document assembler with per-image failure isolation, and the
// standalone compression previewer.

pub mod assemble;
pub mod image;
pub mod layout;
pub mod pdf;
pub mod preview;

// Re-export the primary types so callers can use `bildpress_document::DocumentAssembler` etc.
pub use assemble::DocumentAssembler;
pub use image::reencoder::{DecodedImage, EncodedImage, Reencoder};
pub use pdf::sink::{PageSink, PdfPageSink};
pub use preview::{CompressionPreviewer, PreviewResult, PreviewSequencer};
