// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the UI layer.
//
// Every technical error is mapped to plain English with a clear suggestion.
// The severity levels drive how prominently the UI surfaces the problem.

use crate::error::BildpressError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Worth retrying as-is.
    Transient,
    /// User must change something (pick images, swap a file) first.
    ActionRequired,
    /// Cannot be fixed by retrying — the input itself is unusable.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether retrying without changes can help.
    pub retriable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `BildpressError` into a `HumanError` suitable for direct display.
pub fn humanize_error(err: &BildpressError) -> HumanError {
    match err {
        BildpressError::EmptyBatch => HumanError {
            message: "There are no images to convert.".into(),
            suggestion: "Add at least one image, then try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        BildpressError::Decode { name, .. } => HumanError {
            message: format!("{name} couldn't be read as an image."),
            suggestion: "The file may be damaged or in an unsupported format. Try re-exporting it as JPEG or PNG.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        BildpressError::Encode { name, .. } => HumanError {
            message: format!("{name} couldn't be compressed."),
            suggestion: "Try a different quality setting, or convert the image to JPEG or PNG first.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        BildpressError::Pdf(detail) => HumanError {
            message: "The PDF couldn't be assembled.".into(),
            suggestion: format!("Try again. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },

        BildpressError::Io(detail) => HumanError {
            message: "The file couldn't be written.".into(),
            suggestion: format!(
                "Check there is enough disk space and the destination is writable. ({detail})"
            ),
            retriable: true,
            severity: Severity::Transient,
        },

        BildpressError::Serialization(detail) => HumanError {
            message: "The conversion report couldn't be saved.".into(),
            suggestion: format!("The document itself is unaffected. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_batch_is_action_required() {
        let human = humanize_error(&BildpressError::EmptyBatch);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(!human.retriable);
    }

    #[test]
    fn decode_failure_is_permanent_and_names_the_file() {
        let err = BildpressError::Decode {
            name: "holiday.heic".into(),
            reason: "unsupported format".into(),
        };
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Permanent);
        assert!(human.message.contains("holiday.heic"));
    }

    #[test]
    fn io_failure_is_transient() {
        let io = std::io::Error::other("disk full");
        let human = humanize_error(&BildpressError::Io(io));
        assert_eq!(human.severity, Severity::Transient);
        assert!(human.retriable);
    }
}
