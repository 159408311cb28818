use crate::common::*;

/// An `(image, annotation)` file path pair.
pub type PathPair = (PathBuf, PathBuf);

/// The supported dataset layouts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DatasetFamily {
    Camvid,
    Coco,
    PascalSeg,
}

impl DatasetFamily {
    pub fn names() -> Vec<&'static str> {
        Self::iter().map(<&'static str>::from).collect()
    }

    /// The dataset directory used when none is given, `/data/<family>`.
    pub fn default_datapath(&self) -> PathBuf {
        Path::new("/data").join(self.to_string())
    }
}

impl Default for DatasetFamily {
    fn default() -> Self {
        Self::Camvid
    }
}

/// The partition a list of pairs belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Split {
    Training,
    Validation,
    Testing,
}

impl Split {
    /// The container file name written for this split.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Training => "training.tfrecords",
            Self::Validation => "validation.tfrecords",
            Self::Testing => "testing.tfrecords",
        }
    }
}

/// The ordered pairs of one split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPairs {
    pub split: Split,
    pub pairs: Vec<PathPair>,
}

/// A dataset enumerated into per-split pair lists.
pub trait PairDataset {
    fn family(&self) -> DatasetFamily;

    /// The splits in the order they are converted.
    fn splits(&self) -> &[SplitPairs];

    fn split(&self, split: Split) -> Option<&SplitPairs> {
        self.splits().iter().find(|pairs| pairs.split == split)
    }

    fn num_pairs(&self) -> usize {
        self.splits().iter().map(|split| split.pairs.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_family_names() {
        assert_eq!(DatasetFamily::names(), vec!["camvid", "coco", "pascal_seg"]);
        for family in DatasetFamily::iter() {
            let name: &str = family.as_ref();
            assert_eq!(name.parse::<DatasetFamily>().unwrap(), family);
            assert_eq!(family.to_string(), name);
        }

        assert!("voc".parse::<DatasetFamily>().is_err());
        assert!("PascalSeg".parse::<DatasetFamily>().is_err());
        assert_eq!(DatasetFamily::default(), DatasetFamily::Camvid);
        assert_eq!(
            DatasetFamily::Coco.default_datapath(),
            PathBuf::from("/data/coco")
        );
    }

    #[test]
    fn dataset_family_serde() {
        let family: DatasetFamily = serde_json::from_str(r#""pascal_seg""#).unwrap();
        assert_eq!(family, DatasetFamily::PascalSeg);
        assert!(serde_json::from_str::<DatasetFamily>(r#""cityscapes""#).is_err());
    }

    #[test]
    fn split_file_names() {
        let names: Vec<_> = Split::iter().map(|split| split.default_file_name()).collect();
        assert_eq!(
            names,
            vec!["training.tfrecords", "validation.tfrecords", "testing.tfrecords"]
        );
        assert_eq!(Split::Validation.to_string(), "validation");
        assert_eq!("testing".parse::<Split>().unwrap(), Split::Testing);
    }
}
