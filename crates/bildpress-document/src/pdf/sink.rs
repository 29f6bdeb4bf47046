// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF page sink — printpdf 0.8 implementation of the document-writing
// capability the assembler depends on.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::path::Path;

use chrono::Utc;
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, RawImage,
    RawImageData, RawImageFormat, TextItem, XObjectTransform,
};
use tracing::{debug, info};

use bildpress_core::error::{BildpressError, Result};
use bildpress_core::types::{PageSpec, Placement};

use crate::image::reencoder::DecodedImage;
use crate::layout::PAGE_MARGIN_MM;

const ERROR_FONT_SIZE_PT: f32 = 11.0;
const ERROR_LINE_HEIGHT_PT: f32 = 14.0;

/// Resolution images are embedded at. Placement math cancels it out — it
/// only fixes the reference frame the XObject transform scales from.
const EMBED_DPI: f32 = 150.0;

/// The document-writing capability the assembler drives, one call sequence
/// per build: `start_page` once per image, then either `place_image` or
/// `place_error_text` for that page, and a single `finalize` at the end.
///
/// Injected explicitly so the assembler stays independently testable with a
/// fake sink.
pub trait PageSink {
    /// Open the page for the next image. The first call opens the document's
    /// initial page; every later call appends a new blank page.
    fn start_page(&mut self);

    /// Place a decoded image on the current page. `placement` is in
    /// millimetres relative to the printable area, y growing downward.
    fn place_image(&mut self, image: &DecodedImage, placement: &Placement) -> Result<()>;

    /// Place a textual error marker at the printable-area origin of the
    /// current page. Lines are separated by `\n`.
    fn place_error_text(&mut self, text: &str) -> Result<()>;

    /// Close the current page and produce the finished document.
    fn finalize(&mut self) -> Result<()>;
}

/// `PageSink` backed by printpdf 0.8.
pub struct PdfPageSink {
    doc: PdfDocument,
    page_w: Mm,
    page_h: Mm,
    pages: Vec<PdfPage>,
    ops: Vec<Op>,
    page_open: bool,
    bytes: Option<Vec<u8>>,
}

impl PdfPageSink {
    /// Create a sink producing pages of the given spec, with `title` stored
    /// in the PDF /Info dictionary.
    pub fn new(page: &PageSpec, title: impl AsRef<str>) -> Self {
        let (w_mm, h_mm) = page.dimensions_mm();
        Self {
            doc: PdfDocument::new(title.as_ref()),
            page_w: Mm(w_mm),
            page_h: Mm(h_mm),
            pages: Vec::new(),
            ops: Vec::new(),
            page_open: false,
            bytes: None,
        }
    }

    /// Suggested output filename, matching the converter's save convention.
    pub fn default_output_name() -> String {
        format!("converted-images-{}.pdf", Utc::now().timestamp_millis())
    }

    /// The serialised document, available after `finalize`.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    /// Consume the sink and return the serialised document.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        self.bytes
            .ok_or_else(|| BildpressError::Pdf("document not finalized".into()))
    }

    /// Write the finalized document to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self
            .bytes
            .as_deref()
            .ok_or_else(|| BildpressError::Pdf("document not finalized".into()))?;
        std::fs::write(path.as_ref(), bytes)?;
        info!("Wrote PDF to {}", path.as_ref().display());
        Ok(())
    }

    fn flush_page(&mut self) {
        if self.page_open {
            self.pages
                .push(PdfPage::new(self.page_w, self.page_h, std::mem::take(&mut self.ops)));
        }
    }
}

impl PageSink for PdfPageSink {
    fn start_page(&mut self) {
        self.flush_page();
        self.page_open = true;
    }

    fn place_image(&mut self, image: &DecodedImage, placement: &Placement) -> Result<()> {
        debug_assert!(self.page_open, "place_image before start_page");

        // printpdf wants raw RGB8 pixel data.
        let rgb = image.as_dynamic().to_rgb8();
        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: image.width() as usize,
            height: image.height() as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let xobject_id = self.doc.add_image(&raw);

        // Printable-area coordinates are y-down from the top-left inside the
        // margin; PDF points are y-up from the bottom-left of the page.
        let x_pt = Mm(PAGE_MARGIN_MM + placement.x).into_pt().0;
        let y_pt = Mm(self.page_h.0 - (PAGE_MARGIN_MM + placement.y + placement.height))
            .into_pt()
            .0;

        let target_w_pt = Mm(placement.width).into_pt().0;
        let target_h_pt = Mm(placement.height).into_pt().0;
        let native_w_pt = image.width() as f32 / EMBED_DPI * 72.0;
        let native_h_pt = image.height() as f32 / EMBED_DPI * 72.0;

        self.ops.push(Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(x_pt)),
                translate_y: Some(Pt(y_pt)),
                scale_x: Some(target_w_pt / native_w_pt),
                scale_y: Some(target_h_pt / native_h_pt),
                dpi: Some(EMBED_DPI),
                rotate: None,
            },
        });

        debug!(
            x_pt,
            y_pt,
            target_w_pt,
            target_h_pt,
            "Image placed on page"
        );
        Ok(())
    }

    fn place_error_text(&mut self, text: &str) -> Result<()> {
        debug_assert!(self.page_open, "place_error_text before start_page");

        let margin_pt = Mm(PAGE_MARGIN_MM).into_pt().0;
        let page_h_pt = self.page_h.into_pt().0;

        for (line_idx, line) in text.lines().enumerate() {
            let y_pt = page_h_pt - margin_pt - (line_idx as f32 * ERROR_LINE_HEIGHT_PT);

            self.ops.push(Op::StartTextSection);
            self.ops.push(Op::SetTextCursor {
                pos: Point {
                    x: Pt(margin_pt),
                    y: Pt(y_pt),
                },
            });
            self.ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(ERROR_FONT_SIZE_PT),
                font: BuiltinFont::Helvetica,
            });
            self.ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(line.to_string())],
                font: BuiltinFont::Helvetica,
            });
            self.ops.push(Op::EndTextSection);
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.flush_page();

        let mut doc = std::mem::replace(&mut self.doc, PdfDocument::new(""));
        doc.with_pages(std::mem::take(&mut self.pages));

        debug!(pages = doc.pages.len(), "Serialising PDF");
        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        self.bytes = Some(doc.save(&PdfSaveOptions::default(), &mut warnings));
        Ok(())
    }
}
