use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use tempfile::Builder as TempFileBuilder;
use thiserror::Error;

use crate::shared::frame::Frame;
use crate::video::domain::image_writer::ImageWriter;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("cannot write a {channels}-channel image as RGB")]
    UnsupportedChannels { channels: u8 },
}

/// Writes frames as RGB PNG files using the `image` crate.
///
/// Uses the strongest compression level; barcodes are large flat-color
/// images that compress well.
pub struct PngImageWriter {
    compression: CompressionType,
}

impl PngImageWriter {
    pub fn new() -> Self {
        Self {
            compression: CompressionType::Best,
        }
    }

    pub fn with_compression(mut self, compression: CompressionType) -> Self {
        self.compression = compression;
        self
    }

    fn write_png(&self, path: &Path, frame: &Frame) -> Result<(), WriteError> {
        if frame.channels() != 3 {
            return Err(WriteError::UnsupportedChannels {
                channels: frame.channels(),
            });
        }

        let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => parent,
            None => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|source| WriteError::Io {
            path: parent.to_path_buf(),
            source,
        })?;

        // Encode next to the target and rename into place, so `path` either
        // does not exist or holds a complete image.
        let mut temp = TempFileBuilder::new()
            .prefix(".colorbars_")
            .suffix(".png.part")
            .tempfile_in(parent)
            .map_err(|source| WriteError::Io {
                path: parent.to_path_buf(),
                source,
            })?;

        {
            let mut buffered = BufWriter::new(temp.as_file_mut());
            PngEncoder::new_with_quality(&mut buffered, self.compression, FilterType::Adaptive)
                .write_image(
                    frame.data(),
                    frame.width(),
                    frame.height(),
                    ExtendedColorType::Rgb8,
                )
                .map_err(|source| WriteError::Encode {
                    path: path.to_path_buf(),
                    source,
                })?;
            buffered.flush().map_err(|source| WriteError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }

        temp.persist(path).map_err(|e| WriteError::Io {
            path: path.to_path_buf(),
            source: e.error,
        })?;
        Ok(())
    }
}

impl Default for PngImageWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for PngImageWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        self.write_png(path, frame)?;
        log::debug!("Wrote {}x{} image to {}", frame.width(), frame.height(), path.display());
        Ok(())
    }
}
