//! Enumeration of image/annotation file pairs of segmentation datasets.

mod common;

pub mod camvid;
pub mod coco;
pub mod dataset;
pub mod pascal;
pub mod utils;

pub use camvid::CamvidDataset;
pub use coco::{CocoOptions, CocoStuffDataset};
pub use dataset::{DatasetFamily, PairDataset, PathPair, Split, SplitPairs};
pub use pascal::PascalSegDataset;
