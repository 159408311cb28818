//! The CamVid layout with per-split image and annotation directories.
//!
//! ```text
//! <dataset_dir>/train/*.png   <dataset_dir>/trainannot/*.png
//! <dataset_dir>/val/*.png     <dataset_dir>/valannot/*.png
//! <dataset_dir>/test/*.png    <dataset_dir>/testannot/*.png
//! ```
//!
//! The annotation of an image carries the same file name.

use crate::{
    common::*,
    dataset::{DatasetFamily, PairDataset, Split, SplitPairs},
    utils::{ensure_dir, list_file_names},
};

const SPLIT_DIRS: [(Split, &str); 3] = [
    (Split::Training, "train"),
    (Split::Validation, "val"),
    (Split::Testing, "test"),
];

#[derive(Debug, Clone)]
pub struct CamvidDataset {
    pub dataset_dir: PathBuf,
    pub splits: Vec<SplitPairs>,
}

impl PairDataset for CamvidDataset {
    fn family(&self) -> DatasetFamily {
        DatasetFamily::Camvid
    }

    fn splits(&self) -> &[SplitPairs] {
        &self.splits
    }
}

impl CamvidDataset {
    pub fn load(dataset_dir: impl AsRef<Path>) -> Result<Self> {
        let dataset_dir = dataset_dir.as_ref().to_owned();
        ensure_dir(&dataset_dir, "CamVid dataset")?;

        let splits: Vec<_> = SPLIT_DIRS
            .iter()
            .map(|&(split, dir_name)| -> Result<_> {
                let image_dir = dataset_dir.join(dir_name);
                let annotation_dir = dataset_dir.join(format!("{}annot", dir_name));
                ensure_dir(&image_dir, "CamVid image")?;
                ensure_dir(&annotation_dir, "CamVid annotation")?;

                let pairs: Vec<_> = list_file_names(&image_dir, None)?
                    .into_iter()
                    .map(|name| (image_dir.join(&name), annotation_dir.join(&name)))
                    .collect();
                info!("found {} CamVid {} pairs", pairs.len(), split);

                Ok(SplitPairs { split, pairs })
            })
            .try_collect()?;

        Ok(Self {
            dataset_dir,
            splits,
        })
    }
}
