//! Conversion of segmentation datasets to record containers.

mod common;

pub mod config;
pub mod convert;
pub mod inspect;

pub use config::{Config, OutputConfig};
pub use convert::{convert, load_dataset, SplitSummary};
pub use inspect::{inspect, RecordSummary};
