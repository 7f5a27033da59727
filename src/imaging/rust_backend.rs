//! Pure Rust codec backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, TIFF, BMP, WebP) | `image::ImageReader`, format sniffed from content |
//! | Decode (AVIF) | [`avif`](super::avif): `avif-parse` + `rav1d`, keyed off the extension |
//! | Encode PNG / JPEG / BMP | `image` encoders via `write_with_encoder` |
//! | Encode GIF | `image::codecs::gif::GifEncoder` (single frame) |
//! | Encode TIFF | `tiff` crate, Deflate compression |

use super::avif;
use super::backend::{BackendError, Decoded, ImageBackend};
use super::format::Encoder;
use image::codecs::bmp::BmpEncoder;
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, Frame, ImageFormat, ImageReader};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use tiff::encoder::compression::{Deflate, DeflateLevel};
use tiff::encoder::{TiffEncoder, colortype};

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Lowercase tag for a sniffed container format.
fn format_tag(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "jpeg".to_string(),
        ImageFormat::Png => "png".to_string(),
        ImageFormat::Gif => "gif".to_string(),
        ImageFormat::Tiff => "tiff".to_string(),
        ImageFormat::Bmp => "bmp".to_string(),
        ImageFormat::WebP => "webp".to_string(),
        other => format!("{other:?}").to_lowercase(),
    }
}

fn decode_general(path: &Path) -> Result<Decoded, BackendError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let Some(format) = reader.format() else {
        return Err(BackendError::ProcessingFailed(
            "unrecognized image format".into(),
        ));
    };
    let image = reader.decode()?;
    Ok(Decoded {
        image,
        format: format_tag(format),
    })
}

/// Encoders below only take 8-bit samples; wider buffers are narrowed.
fn eight_bit(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    match image {
        DynamicImage::ImageLuma8(_)
        | DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageRgb8(_)
        | DynamicImage::ImageRgba8(_) => Cow::Borrowed(image),
        other if other.color().has_alpha() => {
            Cow::Owned(DynamicImage::ImageRgba8(other.to_rgba8()))
        }
        other => Cow::Owned(DynamicImage::ImageRgb8(other.to_rgb8())),
    }
}

fn write_tiff<W: Write + Seek>(image: &DynamicImage, writer: W) -> Result<(), BackendError> {
    let mut tiff = TiffEncoder::new(writer)?;
    let compression = || Deflate::with_level(DeflateLevel::Balanced);
    if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        tiff.write_image_with_compression::<colortype::RGBA8, _>(
            rgba.width(),
            rgba.height(),
            compression(),
            rgba.as_raw(),
        )?;
    } else {
        let rgb = image.to_rgb8();
        tiff.write_image_with_compression::<colortype::RGB8, _>(
            rgb.width(),
            rgb.height(),
            compression(),
            rgb.as_raw(),
        )?;
    }
    Ok(())
}

/// Encode `image` into `writer` with the given encoder.
fn write_encoded<W: Write + Seek>(
    image: &DynamicImage,
    encoder: Encoder,
    writer: &mut W,
) -> Result<(), BackendError> {
    match encoder {
        Encoder::Png => {
            let image = match image {
                DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
                    Cow::Owned(DynamicImage::ImageRgba16(image.to_rgba16()))
                }
                _ => Cow::Borrowed(image),
            };
            image.write_with_encoder(PngEncoder::new(writer))?;
        }
        Encoder::Jpeg { quality } => {
            // JPEG has no alpha channel; the encoder's scale starts at 1
            let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(writer, quality.value().max(1)))?;
        }
        Encoder::Gif => {
            // The GIF trailer is written when the encoder drops
            let mut gif = GifEncoder::new(&mut *writer);
            gif.encode_frame(Frame::new(image.to_rgba8()))?;
        }
        Encoder::Tiff => write_tiff(image, &mut *writer)?,
        Encoder::Bmp => {
            eight_bit(image).write_with_encoder(BmpEncoder::new(writer))?;
        }
    }
    Ok(())
}

/// Removes the file at `path` on drop unless [`commit`](Self::commit)ted.
struct PartialOutput<'a> {
    path: &'a Path,
    committed: bool,
}

impl<'a> PartialOutput<'a> {
    fn new(path: &'a Path) -> Self {
        Self {
            path,
            committed: false,
        }
    }

    fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for PartialOutput<'_> {
    fn drop(&mut self) {
        if !self.committed {
            if let Err(e) = std::fs::remove_file(self.path) {
                log::warn!(
                    "could not remove partial output {}: {}",
                    self.path.display(),
                    e
                );
            } else {
                log::debug!("removed partial output {}", self.path.display());
            }
        }
    }
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<Decoded, BackendError> {
        match extension_of(path).as_str() {
            "avif" => Ok(Decoded {
                image: avif::decode(path)?,
                format: "avif".to_string(),
            }),
            "heic" | "heif" => Err(BackendError::ProcessingFailed(
                "HEIF/HEIC images need an HEVC decoder, which this build does not include".into(),
            )),
            _ => decode_general(path),
        }
    }

    fn encode(
        &self,
        image: &DynamicImage,
        encoder: Encoder,
        output: &Path,
    ) -> Result<(), BackendError> {
        let file = File::create(output)?;
        let guard = PartialOutput::new(output);

        let mut writer = BufWriter::new(file);
        write_encoded(image, encoder, &mut writer)?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);

        guard.commit();
        Ok(())
    }
}
