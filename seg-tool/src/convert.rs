use crate::{common::*, config::Config};
use seg_dataset::{
    CamvidDataset, CocoStuffDataset, DatasetFamily, PairDataset, PascalSegDataset, Split,
};

/// The outcome of converting one split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSummary {
    pub split: Split,
    pub output_path: PathBuf,
    pub num_pairs: usize,
    pub num_records: usize,
}

/// Enumerate the pairs of the configured dataset.
pub fn load_dataset(config: &Config) -> Result<Box<dyn PairDataset>> {
    let datapath = config.datapath();

    let dataset: Box<dyn PairDataset> = match config.dataset_family {
        DatasetFamily::Camvid => Box::new(CamvidDataset::load(&datapath)?),
        DatasetFamily::Coco => Box::new(CocoStuffDataset::load(&datapath, config.coco.clone())?),
        DatasetFamily::PascalSeg => Box::new(PascalSegDataset::load(
            config.voc_path(),
            config.sbd_path(),
        )?),
    };
    Ok(dataset)
}

/// Convert every split of the configured dataset to a container file.
///
/// Splits are converted one after another. The first failure stops the
/// conversion, containers of earlier splits are kept.
pub fn convert(config: &Config) -> Result<Vec<SplitSummary>> {
    info!(
        "converting {} dataset in '{}'",
        config.dataset_family,
        config.datapath().display()
    );
    let dataset = load_dataset(config)?;

    dataset
        .splits()
        .iter()
        .map(|split_pairs| -> Result<_> {
            let split = split_pairs.split;
            let output_path = config.output_path(split);
            let num_pairs = split_pairs.pairs.len();
            if let Some(max_records) = config.max_records {
                if max_records < num_pairs {
                    warn!(
                        "{} of {} {} pairs are dropped by the record limit",
                        num_pairs - max_records,
                        num_pairs,
                        split
                    );
                }
            }

            let pairs = split_pairs
                .pairs
                .iter()
                .map(|(image_path, annotation_path)| (image_path, annotation_path));
            let num_records = seg_record::write_pairs(pairs, &output_path, config.max_records)
                .with_context(|| {
                    format!(
                        "failed to write {} container '{}'",
                        split,
                        output_path.display()
                    )
                })?;

            Ok(SplitSummary {
                split,
                output_path,
                num_pairs,
                num_records,
            })
        })
        .try_collect()
}
