use crate::common::*;
use seg_record::{ContainerReader, ReaderConfig, ShapePolicy};

/// Properties of one decoded record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub index: usize,
    pub height: usize,
    pub width: usize,
    pub image_shape: Vec<usize>,
    pub annotation_shape: Vec<usize>,
    /// Distinct class indices in ascending order.
    pub class_indices: Vec<u8>,
}

/// Decode every record of a container and summarize it.
pub fn inspect(
    path: impl AsRef<Path>,
    policy: ShapePolicy,
    check_integrity: bool,
) -> Result<Vec<RecordSummary>> {
    let path = path.as_ref();
    let reader = ContainerReader::open_with_config(path, ReaderConfig { check_integrity })
        .with_context(|| format!("unable to open container '{}'", path.display()))?;

    reader
        .decoded(policy)
        .enumerate()
        .map(|(index, pair)| -> Result<_> {
            let (image, annotation) = pair.with_context(|| {
                format!("unable to decode record {} of '{}'", index, path.display())
            })?;
            let (height, width, _) = image.dim();
            let class_indices: Vec<u8> = annotation.iter().copied().unique().sorted().collect();

            Ok(RecordSummary {
                index,
                height,
                width,
                image_shape: image.shape().to_vec(),
                annotation_shape: annotation.shape().to_vec(),
                class_indices,
            })
        })
        .try_collect()
}
