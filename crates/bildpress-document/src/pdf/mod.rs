// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — the page sink the document assembler writes into.

pub mod sink;

pub use sink::{PageSink, PdfPageSink};
