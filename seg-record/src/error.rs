//! Error types of record encoding and decoding.

use std::{fmt, io, path::Path, path::PathBuf};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error raised when encoding, writing, reading or decoding records.
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced image or annotation file does not exist.
    #[error("input file '{}' does not exist", .path.display())]
    MissingInput { path: PathBuf },
    /// The image file exists but cannot be decoded.
    #[error("failed to decode image '{}': {source}", .path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// The annotation PNG file exists but cannot be decoded.
    #[error("failed to decode annotation '{}': {source}", .path.display())]
    AnnotationDecode {
        path: PathBuf,
        #[source]
        source: png::DecodingError,
    },
    /// The annotation is not a single channel image of literal class indices.
    #[error("unsupported annotation '{}': {reason}", .path.display())]
    UnsupportedAnnotation { path: PathBuf, reason: String },
    /// The image and its annotation differ in height or width.
    #[error(
        "image '{}' has size {image_hw:?} but annotation '{}' has size {annotation_hw:?}",
        .image_path.display(),
        .annotation_path.display()
    )]
    ShapeMismatch {
        image_path: PathBuf,
        annotation_path: PathBuf,
        image_hw: [usize; 2],
        annotation_hw: [usize; 2],
    },
    /// The container or one of its records is inconsistent.
    #[error("corrupt record: {0}")]
    CorruptRecord(String),
    /// The shape policy is not one of the supported policies.
    #[error(
        "invalid shape policy '{0}', expected one of '2-dim', '3-dim' or '3-dim-squeeze'"
    )]
    InvalidShapePolicy(String),
    /// The record layer failed to write to a container.
    #[error("failed to write records to '{}': {source}", .path.display())]
    RecordWrite {
        path: PathBuf,
        #[source]
        source: tfrecord::Error,
    },
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl AsRef<Path>) -> impl FnOnce(io::Error) -> Self {
        let path = path.as_ref().to_owned();
        move |source| Self::Io { path, source }
    }

    pub(crate) fn record_write(path: impl AsRef<Path>) -> impl FnOnce(tfrecord::Error) -> Self {
        let path = path.as_ref().to_owned();
        move |source| Self::RecordWrite { path, source }
    }

    pub(crate) fn corrupt(reason: impl fmt::Display) -> Self {
        Self::CorruptRecord(reason.to_string())
    }

    /// Returns true if the error is raised by an inconsistent record.
    pub fn is_corrupt_record(&self) -> bool {
        matches!(self, Self::CorruptRecord(_))
    }
}
