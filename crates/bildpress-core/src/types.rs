// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Bildpress image-to-PDF composer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one document build invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildId(pub Uuid);

impl BuildId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BuildId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BuildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Standard paper sizes supported by the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    Letter,
    A3,
}

impl PaperSize {
    /// Dimensions in millimetres (width, height), portrait.
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::Letter => (216, 279),
            Self::A3 => (297, 420),
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Paper size plus orientation — determines the page dimensions every page
/// of one document build uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    pub size: PaperSize,
    pub orientation: Orientation,
}

impl PageSpec {
    pub fn new(size: PaperSize, orientation: Orientation) -> Self {
        Self { size, orientation }
    }

    /// Page dimensions in millimetres with the orientation applied
    /// (width/height swapped for landscape).
    pub fn dimensions_mm(&self) -> (f32, f32) {
        let (w, h) = self.size.dimensions_mm();
        match self.orientation {
            Orientation::Portrait => (w as f32, h as f32),
            Orientation::Landscape => (h as f32, w as f32),
        }
    }
}

/// How an image is placed within the printable area of its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementPolicy {
    /// Keeps aspect ratio, scales to the largest size that fits, centred.
    Fit,
    /// Ignores aspect ratio, fills the printable area exactly.
    Stretch,
}

/// Lossy-quality factor for JPEG re-encoding, expected range (0, 1].
///
/// The value is a caller contract: it is never clamped or validated at
/// runtime. Out-of-range values are a contract violation with unspecified
/// encoder behaviour, checked only by a `debug_assert!` in debug builds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompressionLevel(f32);

impl CompressionLevel {
    /// Smallest file size, lower quality.
    pub const HIGH: Self = Self(0.5);
    /// Balanced size and quality.
    pub const MEDIUM: Self = Self(0.75);
    /// Largest file size, best quality.
    pub const LOW: Self = Self(0.92);

    pub fn new(value: f32) -> Self {
        debug_assert!(
            value > 0.0 && value <= 1.0,
            "compression level {value} outside (0, 1]"
        );
        Self(value)
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// The quality factor on the JPEG encoder's 1-100 scale.
    pub fn jpeg_quality(&self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::MEDIUM
    }
}

/// A raw source image as handed over by the caller: file name, declared MIME
/// type, and the undecoded bytes. Immutable once acquired; the pipeline only
/// borrows it for the duration of one decode/re-encode operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceImage {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Original (pre-re-encoding) size in bytes.
    pub fn byte_size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Where an image lands on its page, in page units relative to the top-left
/// corner of the margin-inset printable area (not the full page).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Outcome of one image slot in a document build. Every input image yields
/// exactly one outcome, in input order — a failed image still consumes its
/// page, carrying an error marker instead of a placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PageOutcome {
    Placed {
        name: String,
        /// SHA-256 digest of the source bytes, hex-encoded.
        digest: String,
        placement: Placement,
        encoded_bytes: u64,
    },
    Failed {
        name: String,
        reason: String,
    },
}

impl PageOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, Self::Placed { .. })
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Placed { name, .. } | Self::Failed { name, .. } => name,
        }
    }
}

/// Summary of one completed document build: the settings used and one
/// outcome per input image, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildReport {
    pub id: BuildId,
    pub created_at: DateTime<Utc>,
    pub page: PageSpec,
    pub policy: PlacementPolicy,
    pub quality: CompressionLevel,
    pub outcomes: Vec<PageOutcome>,
}

impl BuildReport {
    /// Number of pages in the produced document. Always equals the number
    /// of input images.
    pub fn page_count(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_placed()).count()
    }
}
