//! PASCAL VOC 2012 segmentation augmented with the SBD annotations.
//!
//! ```text
//! <voc_path>/ImageSets/Segmentation/{train,val}.txt
//! <voc_path>/JPEGImages/<name>.jpg
//! <voc_path>/SegmentationClass/<name>.png
//! <sbd_path>/dataset/{train,val}.txt
//! <sbd_path>/dataset/cls_png/<name>.png
//! ```
//!
//! The validation split is the VOC validation list. The training split takes
//! every other name found in the VOC training list and both SBD lists.

use crate::{
    common::*,
    dataset::{DatasetFamily, PairDataset, PathPair, Split, SplitPairs},
    utils::{ensure_dir, load_name_list},
};

#[derive(Debug, Clone)]
pub struct PascalSegDataset {
    pub voc_path: PathBuf,
    pub sbd_path: PathBuf,
    pub splits: Vec<SplitPairs>,
}

impl PairDataset for PascalSegDataset {
    fn family(&self) -> DatasetFamily {
        DatasetFamily::PascalSeg
    }

    fn splits(&self) -> &[SplitPairs] {
        &self.splits
    }
}

impl PascalSegDataset {
    pub fn load(voc_path: impl AsRef<Path>, sbd_path: impl AsRef<Path>) -> Result<Self> {
        let voc_path = voc_path.as_ref().to_owned();
        let sbd_path = sbd_path.as_ref().to_owned();
        ensure_dir(&voc_path, "PASCAL VOC")?;
        ensure_dir(&sbd_path, "SBD")?;

        let voc_list_dir = voc_path.join("ImageSets").join("Segmentation");
        let sbd_dataset_dir = sbd_path.join("dataset");
        let voc_train = load_name_list(voc_list_dir.join("train.txt"))?;
        let voc_val = load_name_list(voc_list_dir.join("val.txt"))?;
        let sbd_train = load_name_list(sbd_dataset_dir.join("train.txt"))?;
        let sbd_val = load_name_list(sbd_dataset_dir.join("val.txt"))?;

        let val_names: BTreeSet<&str> = voc_val.iter().map(String::as_str).collect();
        let train_names: BTreeSet<&str> = voc_train
            .iter()
            .chain(&sbd_train)
            .chain(&sbd_val)
            .map(String::as_str)
            .filter(|name| !val_names.contains(name))
            .collect();

        let image_dir = voc_path.join("JPEGImages");
        let voc_annotation_dir = voc_path.join("SegmentationClass");
        let sbd_annotation_dir = sbd_dataset_dir.join("cls_png");

        let is_voc_name = |name: &str| voc_train.contains(name) || voc_val.contains(name);
        let to_pair = |name: &str| -> PathPair {
            let annotation_dir = if is_voc_name(name) {
                &voc_annotation_dir
            } else {
                &sbd_annotation_dir
            };
            (
                image_dir.join(format!("{}.jpg", name)),
                annotation_dir.join(format!("{}.png", name)),
            )
        };

        let num_sbd_only = train_names
            .iter()
            .filter(|&&name| !is_voc_name(name))
            .count();
        if num_sbd_only > 0 {
            ensure!(
                sbd_annotation_dir.is_dir(),
                "{} training samples need SBD annotations in '{}', \
                 convert the SBD .mat class annotations in '{}' to PNG files there first",
                num_sbd_only,
                sbd_annotation_dir.display(),
                sbd_dataset_dir.join("cls").display()
            );
        }
        ensure_dir(&voc_annotation_dir, "PASCAL VOC annotation")?;

        let val_pairs: Vec<_> = val_names.iter().map(|&name| to_pair(name)).collect();
        let train_pairs: Vec<_> = train_names.iter().map(|&name| to_pair(name)).collect();
        info!(
            "PASCAL segmentation has {} training pairs ({} from SBD only) and {} validation pairs",
            train_pairs.len(),
            num_sbd_only,
            val_pairs.len()
        );

        Ok(Self {
            voc_path,
            sbd_path,
            // validation is converted first
            splits: vec![
                SplitPairs {
                    split: Split::Validation,
                    pairs: val_pairs,
                },
                SplitPairs {
                    split: Split::Training,
                    pairs: train_pairs,
                },
            ],
        })
    }
}
