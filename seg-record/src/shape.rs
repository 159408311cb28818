//! Output shapes of decoded annotations.

use crate::common::*;

/// The dimensionality of decoded annotation arrays.
///
/// The policy is not stored in containers. It must be passed to every decoding
/// call that produces policy-shaped annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapePolicy {
    /// Shape annotations as `(height, width)`.
    #[serde(rename = "2-dim")]
    TwoDim,
    /// Shape annotations as `(height, width, 1)`.
    #[serde(rename = "3-dim")]
    ThreeDim,
    /// Shape annotations as `(height, width, 1)` and drop the trailing axis,
    /// resulting in `(height, width)`.
    #[serde(rename = "3-dim-squeeze")]
    ThreeDimSqueezed,
}

impl ShapePolicy {
    pub const ALL: [ShapePolicy; 3] = [Self::TwoDim, Self::ThreeDim, Self::ThreeDimSqueezed];

    /// Build the policy from the number of annotation dimensions and the squeeze flag.
    ///
    /// Only 2 and 3 are accepted as `annotation_dims`. Squeezing a 2-dim
    /// annotation has no trailing axis to remove and yields [ShapePolicy::TwoDim].
    pub fn from_flags(annotation_dims: u32, squeeze_annotation: bool) -> Result<Self> {
        let policy = match (annotation_dims, squeeze_annotation) {
            (2, _) => Self::TwoDim,
            (3, false) => Self::ThreeDim,
            (3, true) => Self::ThreeDimSqueezed,
            (dims, squeeze) => {
                return Err(Error::InvalidShapePolicy(format!(
                    "annotation_dims={}, squeeze_annotation={}",
                    dims, squeeze
                )))
            }
        };
        Ok(policy)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TwoDim => "2-dim",
            Self::ThreeDim => "3-dim",
            Self::ThreeDimSqueezed => "3-dim-squeeze",
        }
    }

    /// The annotation shape produced for an image of the given size.
    pub fn annotation_shape(&self, height: usize, width: usize) -> Vec<usize> {
        match self {
            Self::TwoDim | Self::ThreeDimSqueezed => vec![height, width],
            Self::ThreeDim => vec![height, width, 1],
        }
    }

    /// Reshape a `(height, width)` annotation according to the policy.
    pub fn apply(&self, annotation: Array2<u8>) -> ArrayD<u8> {
        match self {
            Self::TwoDim => annotation.into_dyn(),
            Self::ThreeDim => annotation.insert_axis(Axis(2)).into_dyn(),
            Self::ThreeDimSqueezed => {
                let annotation = annotation.insert_axis(Axis(2));
                annotation.remove_axis(Axis(2)).into_dyn()
            }
        }
    }
}

impl Default for ShapePolicy {
    fn default() -> Self {
        Self::ThreeDim
    }
}

impl FromStr for ShapePolicy {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str() == text)
            .ok_or_else(|| Error::InvalidShapePolicy(text.to_string()))
    }
}

impl fmt::Display for ShapePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
