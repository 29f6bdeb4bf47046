// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Bildpress.

use thiserror::Error;

/// Top-level error type for all Bildpress operations.
#[derive(Debug, Error)]
pub enum BildpressError {
    // -- Batch errors --
    /// The document build was invoked with zero images. Raised before any
    /// page is created; the only batch-level failure the assembler surfaces.
    #[error("no images to convert")]
    EmptyBatch,

    // -- Per-image errors --
    #[error("failed to decode image {name}: {reason}")]
    Decode { name: String, reason: String },

    #[error("failed to re-encode image {name}: {reason}")]
    Encode { name: String, reason: String },

    // -- Document output --
    #[error("PDF operation failed: {0}")]
    Pdf(String),

    // -- Ambient --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BildpressError>;
