//! Conversion of semantic segmentation samples to and from record containers.
//!
//! A container is a TFRecord file of checksummed frames, each carrying one
//! `tensorflow.Example` message with the `height`, `width`, `image_raw` and
//! `mask_raw` features. Files written by this crate can be consumed by
//! TensorFlow's `TFRecordDataset`.

mod common;

pub mod encoder;
pub mod error;
pub mod reader;
pub mod record;
pub mod shape;
pub mod writer;

pub use encoder::{encode_pair, load_annotation, load_image};
pub use error::{Error, Result};
pub use reader::{read_image_annotation_pairs, read_records, ContainerReader, ReaderConfig};
pub use record::Record;
pub use shape::ShapePolicy;
pub use writer::{write_pairs, write_records, ContainerWriter};
