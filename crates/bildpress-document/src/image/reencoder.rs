// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Re-encoder — decodes raw image bytes into an in-memory pixel buffer and
// re-emits them as JPEG at a caller-chosen quality. Shared by the document
// assembler and the compression previewer.

use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;

use bildpress_core::error::{BildpressError, Result};
use bildpress_core::types::{CompressionLevel, SourceImage};
use tracing::{debug, instrument};

/// A decoded pixel buffer at the image's native dimensions. No implicit
/// downscaling happens at decode time; the buffer is sized exactly to what
/// the bytes describe.
#[derive(Debug)]
pub struct DecodedImage {
    image: DynamicImage,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }
}

/// A lossy re-encoding of a source image: JPEG bytes plus their size.
/// Ephemeral — produced, measured or placed on a page, then dropped.
#[derive(Debug)]
pub struct EncodedImage {
    pub jpeg: Vec<u8>,
}

impl EncodedImage {
    pub fn byte_size(&self) -> u64 {
        self.jpeg.len() as u64
    }
}

/// Decodes arbitrary raster images and re-emits them as JPEG.
pub struct Reencoder;

impl Reencoder {
    /// Decode a source image into its native-resolution pixel buffer.
    #[instrument(skip(image), fields(name = %image.name, bytes = image.bytes.len()))]
    pub fn decode(image: &SourceImage) -> Result<DecodedImage> {
        let decoded = decode_bytes(&image.name, &image.bytes)?;
        debug!(
            width = decoded.width(),
            height = decoded.height(),
            "Image decoded"
        );
        Ok(decoded)
    }

    /// Decode the *re-encoded* bytes of an `EncodedImage`. The assembler
    /// lays out what is actually placed on the page, so placement dimensions
    /// come from here rather than from the original source.
    pub fn decode_encoded(name: &str, encoded: &EncodedImage) -> Result<DecodedImage> {
        decode_bytes(name, &encoded.jpeg)
    }

    /// Decode `image` and re-encode it as JPEG at `quality`.
    ///
    /// The full pixel buffer is drawn 1:1 into the encoder's input surface —
    /// quality affects the lossy compression only, never the dimensions.
    /// A quality near 1.0 favours fidelity, near 0.0 favours smaller output.
    #[instrument(skip(image), fields(name = %image.name, quality = quality.value()))]
    pub fn reencode(image: &SourceImage, quality: CompressionLevel) -> Result<EncodedImage> {
        let decoded = Self::decode(image)?;

        let mut buffer = Vec::new();
        let rgb = decoded.image.to_rgb8();
        let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.jpeg_quality());
        rgb.write_with_encoder(encoder)
            .map_err(|err| BildpressError::Encode {
                name: image.name.clone(),
                reason: err.to_string(),
            })?;

        debug!(
            original_bytes = image.bytes.len(),
            encoded_bytes = buffer.len(),
            "Image re-encoded"
        );
        Ok(EncodedImage { jpeg: buffer })
    }
}

fn decode_bytes(name: &str, bytes: &[u8]) -> Result<DecodedImage> {
    let img = image::load_from_memory(bytes).map_err(|err| BildpressError::Decode {
        name: name.to_string(),
        reason: err.to_string(),
    })?;
    Ok(DecodedImage { image: img })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    /// A small synthetic PNG with enough structure that JPEG quality matters.
    fn test_image(name: &str, width: u32, height: u32) -> SourceImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([
                ((x * 7 + y * 13) % 256) as u8,
                ((x * 3) % 256) as u8,
                ((y * 5) % 256) as u8,
            ])
        });
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        SourceImage::new(name, "image/png", bytes)
    }

    #[test]
    fn decode_reports_native_dimensions() {
        let src = test_image("grid.png", 64, 48);
        let decoded = Reencoder::decode(&src).unwrap();
        assert_eq!(decoded.width(), 64);
        assert_eq!(decoded.height(), 48);
    }

    #[test]
    fn reencode_preserves_dimensions() {
        let src = test_image("grid.png", 40, 30);
        let encoded = Reencoder::reencode(&src, CompressionLevel::MEDIUM).unwrap();
        let round = Reencoder::decode_encoded("grid.png", &encoded).unwrap();
        assert_eq!(round.width(), 40);
        assert_eq!(round.height(), 30);
    }

    #[test]
    fn reencode_is_deterministic() {
        let src = test_image("grid.png", 64, 64);
        let a = Reencoder::reencode(&src, CompressionLevel::MEDIUM).unwrap();
        let b = Reencoder::reencode(&src, CompressionLevel::MEDIUM).unwrap();
        assert_eq!(a.byte_size(), b.byte_size());
    }

    #[test]
    fn higher_quality_is_not_smaller() {
        let src = test_image("grid.png", 128, 128);
        let low = Reencoder::reencode(&src, CompressionLevel::new(0.1)).unwrap();
        let high = Reencoder::reencode(&src, CompressionLevel::new(0.9)).unwrap();
        assert!(high.byte_size() >= low.byte_size());
    }

    #[test]
    fn corrupt_bytes_signal_decode_error_with_identity() {
        let src = SourceImage::new("broken.jpg", "image/jpeg", vec![0xFF, 0x00, 0x13, 0x37]);
        let err = Reencoder::decode(&src).unwrap_err();
        match err {
            BildpressError::Decode { name, .. } => assert_eq!(name, "broken.jpg"),
            other => panic!("expected Decode error, got {other:?}"),
        }
    }
}
