// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — decoding raw image bytes and lossy JPEG re-encoding.

pub mod reencoder;

pub use reencoder::{DecodedImage, EncodedImage, Reencoder};
