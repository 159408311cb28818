//! The COCO-Stuff layout with pixel label maps next to the COCO images.
//!
//! ```text
//! <imgs_dir>/<split_dir>/<name>.jpg
//! <imgs_dir>/<labels_subfolder>/<split_dir>/<name>.png
//! ```

use crate::{
    common::*,
    dataset::{DatasetFamily, PairDataset, Split, SplitPairs},
    utils::{ensure_dir, list_file_names},
};

/// Directory names of the COCO-Stuff layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CocoOptions {
    #[serde(default = "default_labels_subfolder")]
    pub labels_subfolder: String,
    #[serde(default = "default_train_dir")]
    pub train_dir: String,
    #[serde(default = "default_val_dir")]
    pub val_dir: String,
}

fn default_labels_subfolder() -> String {
    "stuffthings_pixellabels".into()
}

fn default_train_dir() -> String {
    "train2017".into()
}

fn default_val_dir() -> String {
    "val2017".into()
}

impl Default for CocoOptions {
    fn default() -> Self {
        Self {
            labels_subfolder: default_labels_subfolder(),
            train_dir: default_train_dir(),
            val_dir: default_val_dir(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CocoStuffDataset {
    pub imgs_dir: PathBuf,
    pub options: CocoOptions,
    pub splits: Vec<SplitPairs>,
}

impl PairDataset for CocoStuffDataset {
    fn family(&self) -> DatasetFamily {
        DatasetFamily::Coco
    }

    fn splits(&self) -> &[SplitPairs] {
        &self.splits
    }
}

impl CocoStuffDataset {
    pub fn load(imgs_dir: impl AsRef<Path>, options: CocoOptions) -> Result<Self> {
        let imgs_dir = imgs_dir.as_ref().to_owned();
        let labels_dir = imgs_dir.join(&options.labels_subfolder);
        ensure_dir(&imgs_dir, "COCO image")?;
        ensure_dir(&labels_dir, "COCO-Stuff label")?;

        let splits: Vec<_> = [
            (Split::Training, &options.train_dir),
            (Split::Validation, &options.val_dir),
        ]
        .into_iter()
        .map(|(split, split_dir)| -> Result<_> {
            let image_dir = imgs_dir.join(split_dir);
            let label_dir = labels_dir.join(split_dir);
            ensure_dir(&label_dir, "COCO-Stuff label")?;

            // the label list drives the pairs, images are located by name
            let pairs: Vec<_> = list_file_names(&label_dir, Some("png"))?
                .into_iter()
                .map(|name| {
                    let image_path = image_dir.join(name.with_extension("jpg"));
                    (image_path, label_dir.join(name))
                })
                .collect();
            info!("found {} COCO-Stuff {} pairs", pairs.len(), split);

            Ok(SplitPairs { split, pairs })
        })
        .try_collect()?;

        Ok(Self {
            imgs_dir,
            options,
            splits,
        })
    }
}
