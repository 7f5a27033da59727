//! Codec backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the seam between the pipeline and the pixel
//! codecs: `decode` turns a file into pixels plus a format tag, `encode`
//! writes pixels with a resolved [`Encoder`]. The pipeline never touches a
//! file itself, so tests swap in [`tests::MockBackend`].
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::format::Encoder;
use image::DynamicImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Image(#[from] image::ImageError),
    #[error("TIFF encoding failed: {0}")]
    Tiff(#[from] tiff::TiffError),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// A decoded image together with the name of the format it was stored in
/// (`jpeg`, `png`, `gif`, `tiff`, `bmp`, `webp`, `avif`).
#[derive(Debug, Clone)]
pub struct Decoded {
    pub image: DynamicImage,
    pub format: String,
}

pub trait ImageBackend {
    /// Read and decode the image at `path`.
    fn decode(&self, path: &Path) -> Result<Decoded, BackendError>;

    /// Encode `image` to `output`.
    ///
    /// A failed call must not leave a partial file at `output`.
    fn encode(&self, image: &DynamicImage, encoder: Encoder, output: &Path)
    -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::Quality;
    use image::GenericImageView;
    use std::sync::Mutex;

    /// Mock backend that hands out a prepared image and records operations
    /// without touching the filesystem.
    pub struct MockBackend {
        pub decoded: Mutex<Option<Decoded>>,
        pub fail_encode: bool,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Decode(String),
        Encode {
            output: String,
            encoder: Encoder,
            width: u32,
            height: u32,
        },
    }

    impl MockBackend {
        /// Backend whose next decode returns `image` tagged as `format`.
        pub fn with_image(image: DynamicImage, format: &str) -> Self {
            Self {
                decoded: Mutex::new(Some(Decoded {
                    image,
                    format: format.to_string(),
                })),
                fail_encode: false,
                operations: Mutex::new(Vec::new()),
            }
        }

        /// Backend with nothing to decode.
        pub fn empty() -> Self {
            Self {
                decoded: Mutex::new(None),
                fail_encode: false,
                operations: Mutex::new(Vec::new()),
            }
        }

        pub fn failing_encode(mut self) -> Self {
            self.fail_encode = true;
            self
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        /// The single recorded encode, if exactly one happened.
        pub fn encoded(&self) -> Option<(Encoder, u32, u32)> {
            let encodes: Vec<_> = self
                .get_operations()
                .into_iter()
                .filter_map(|op| match op {
                    RecordedOp::Encode {
                        encoder,
                        width,
                        height,
                        ..
                    } => Some((encoder, width, height)),
                    RecordedOp::Decode(_) => None,
                })
                .collect();
            match encodes.as_slice() {
                [one] => Some(*one),
                _ => None,
            }
        }
    }

    impl ImageBackend for MockBackend {
        fn decode(&self, path: &Path) -> Result<Decoded, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Decode(path.to_string_lossy().to_string()));

            self.decoded
                .lock()
                .unwrap()
                .take()
                .ok_or_else(|| BackendError::ProcessingFailed("No mock image".to_string()))
        }

        fn encode(
            &self,
            image: &DynamicImage,
            encoder: Encoder,
            output: &Path,
        ) -> Result<(), BackendError> {
            let (width, height) = image.dimensions();
            self.operations.lock().unwrap().push(RecordedOp::Encode {
                output: output.to_string_lossy().to_string(),
                encoder,
                width,
                height,
            });
            if self.fail_encode {
                return Err(BackendError::ProcessingFailed("mock encode failure".into()));
            }
            Ok(())
        }
    }

    #[test]
    fn mock_records_decode() {
        let backend = MockBackend::with_image(DynamicImage::new_rgb8(8, 4), "png");

        let decoded = backend.decode(Path::new("/test/image.png")).unwrap();
        assert_eq!(decoded.format, "png");
        assert_eq!(decoded.image.dimensions(), (8, 4));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Decode(p) if p == "/test/image.png"));
    }

    #[test]
    fn mock_decode_without_image_errors() {
        let backend = MockBackend::empty();
        assert!(backend.decode(Path::new("/missing.png")).is_err());
    }

    #[test]
    fn mock_records_encode() {
        let backend = MockBackend::empty();
        let encoder = Encoder::Jpeg {
            quality: Quality::new(85).unwrap(),
        };
        backend
            .encode(&DynamicImage::new_rgb8(20, 10), encoder, Path::new("/out.jpg"))
            .unwrap();

        assert_eq!(backend.encoded(), Some((encoder, 20, 10)));
    }
}
