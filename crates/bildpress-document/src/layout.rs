// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page layout calculator — pure placement math for one image on one page.
//
// All coordinates are in millimetres relative to the top-left corner of the
// printable area (the page minus a fixed margin on all four sides), y
// growing downward. The PDF sink translates these into page-absolute,
// y-up PDF points.

use bildpress_core::types::{PageSpec, Placement, PlacementPolicy};

/// Fixed margin on all four sides of every page, in millimetres.
pub const PAGE_MARGIN_MM: f32 = 20.0;

/// Printable dimensions (width, height) of a page: the page size with the
/// orientation applied, minus the margin on all sides. Computed once per
/// build and reused for every page — the margin never varies per page.
pub fn printable_area(page: &PageSpec) -> (f32, f32) {
    let (w, h) = page.dimensions_mm();
    (w - 2.0 * PAGE_MARGIN_MM, h - 2.0 * PAGE_MARGIN_MM)
}

/// Compute where an image of `image_width` x `image_height` pixels lands
/// within a printable area of `printable_width` x `printable_height`.
///
/// Stretch fills the printable area exactly, ignoring aspect ratio. Fit
/// scales to the largest aspect-preserving size that stays inside, centred
/// both ways.
///
/// Pure function — deterministic, no side effects. Zero image dimensions are
/// a caller contract violation and are not special-cased here; decoded
/// images always have at least one pixel in both axes.
pub fn compute_placement(
    printable_width: f32,
    printable_height: f32,
    image_width: u32,
    image_height: u32,
    policy: PlacementPolicy,
) -> Placement {
    match policy {
        PlacementPolicy::Stretch => Placement {
            x: 0.0,
            y: 0.0,
            width: printable_width,
            height: printable_height,
        },
        PlacementPolicy::Fit => {
            let img_w = image_width as f32;
            let img_h = image_height as f32;
            let ratio = (printable_width / img_w).min(printable_height / img_h);
            let width = img_w * ratio;
            let height = img_h * ratio;
            Placement {
                x: (printable_width - width) / 2.0,
                y: (printable_height - height) / 2.0,
                width,
                height,
            }
        }
    }
}
