use crate::common::*;
use seg_dataset::{CocoOptions, DatasetFamily, Split};

/// The conversion configuration.
///
/// Every field is optional in configuration files. Unset paths are derived
/// from the dataset family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The dataset to convert.
    #[serde(default)]
    pub dataset_family: DatasetFamily,
    /// The dataset directory, where the containers are written as well.
    #[serde(default)]
    pub datapath: Option<PathBuf>,
    /// The VOC 2012 directory of the PASCAL dataset.
    #[serde(default)]
    pub voc_path: Option<PathBuf>,
    /// Write at most this number of records per container.
    #[serde(default)]
    pub max_records: Option<usize>,
    #[serde(default)]
    pub coco: CocoOptions,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_family: DatasetFamily::default(),
            datapath: None,
            voc_path: None,
            max_records: None,
            coco: CocoOptions::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file '{}'", path.display()))?;
        let config = json5::from_str(&text)
            .with_context(|| format!("unable to parse config file '{}'", path.display()))?;
        Ok(config)
    }

    pub fn datapath(&self) -> PathBuf {
        self.datapath
            .clone()
            .unwrap_or_else(|| self.dataset_family.default_datapath())
    }

    pub fn voc_path(&self) -> PathBuf {
        self.voc_path
            .clone()
            .unwrap_or_else(|| self.datapath().join("VOCdevkit").join("VOC2012"))
    }

    /// The SBD release directory, `<datapath>/benchmark_RELEASE`.
    pub fn sbd_path(&self) -> PathBuf {
        self.datapath().join("benchmark_RELEASE")
    }

    pub fn output_path(&self, split: Split) -> PathBuf {
        self.datapath().join(self.output.file_name(split))
    }
}

/// Container file names per split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_training")]
    pub training: String,
    #[serde(default = "default_validation")]
    pub validation: String,
    #[serde(default = "default_testing")]
    pub testing: String,
}

fn default_training() -> String {
    Split::Training.default_file_name().into()
}

fn default_validation() -> String {
    Split::Validation.default_file_name().into()
}

fn default_testing() -> String {
    Split::Testing.default_file_name().into()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            training: default_training(),
            validation: default_validation(),
            testing: default_testing(),
        }
    }
}

impl OutputConfig {
    pub fn file_name(&self, split: Split) -> &str {
        match split {
            Split::Training => &self.training,
            Split::Validation => &self.validation,
            Split::Testing => &self.testing,
        }
    }
}
