// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion settings.

use serde::{Deserialize, Serialize};

use crate::types::{CompressionLevel, Orientation, PageSpec, PaperSize, PlacementPolicy};

/// Settings for one document build, collected by the caller's settings UI.
/// Immutable for the duration of a build — every page of one document uses
/// the same page spec, policy, and quality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvertSettings {
    pub page: PageSpec,
    pub policy: PlacementPolicy,
    pub quality: CompressionLevel,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            page: PageSpec::new(PaperSize::A4, Orientation::Portrait),
            policy: PlacementPolicy::Fit,
            quality: CompressionLevel::MEDIUM,
        }
    }
}
