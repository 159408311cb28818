use crate::{common::*, shape::ShapePolicy};
use tfrecord::{Example, Feature};

pub const HEIGHT_KEY: &str = "height";
pub const WIDTH_KEY: &str = "width";
pub const IMAGE_KEY: &str = "image_raw";
pub const MASK_KEY: &str = "mask_raw";

/// The number of color channels of encoded images.
pub const IMAGE_CHANNELS: usize = 3;

/// One image/annotation sample with its shape.
///
/// Both buffers are row-major with one byte per channel. The image has
/// [IMAGE_CHANNELS] channels per pixel and the mask has one class index per pixel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    pub height: u64,
    pub width: u64,
    pub image_raw: Vec<u8>,
    pub mask_raw: Vec<u8>,
}

impl Record {
    /// Build a record from an `(H, W, 3)` image and a `(H, W)` mask.
    pub fn from_arrays(image: &Array3<u8>, mask: &Array2<u8>) -> Result<Self> {
        let (height, width, channels) = image.dim();
        if channels != IMAGE_CHANNELS {
            return Err(Error::corrupt(format!(
                "expect {} image channels, but get {}",
                IMAGE_CHANNELS, channels
            )));
        }
        if mask.dim() != (height, width) {
            return Err(Error::corrupt(format!(
                "image size {:?} does not match mask size {:?}",
                (height, width),
                mask.dim()
            )));
        }

        Ok(Self {
            height: height as u64,
            width: width as u64,
            image_raw: image.iter().copied().collect(),
            mask_raw: mask.iter().copied().collect(),
        })
    }

    /// Convert to the example stored in containers.
    pub fn to_example(&self) -> Example {
        [
            (HEIGHT_KEY, Feature::Int64List(vec![self.height as i64])),
            (WIDTH_KEY, Feature::Int64List(vec![self.width as i64])),
            (IMAGE_KEY, Feature::BytesList(vec![self.image_raw.clone()])),
            (MASK_KEY, Feature::BytesList(vec![self.mask_raw.clone()])),
        ]
        .into_iter()
        .map(|(key, feature)| (key.to_string(), feature))
        .collect()
    }

    /// Extract a record from an example read from a container.
    ///
    /// All four features must be present with exactly one value each.
    pub fn from_example(mut example: Example) -> Result<Self> {
        let height = take_int64(&mut example, HEIGHT_KEY)?;
        let width = take_int64(&mut example, WIDTH_KEY)?;
        let image_raw = take_bytes(&mut example, IMAGE_KEY)?;
        let mask_raw = take_bytes(&mut example, MASK_KEY)?;

        let to_dim = |key: &str, value: i64| {
            u64::try_from(value)
                .map_err(|_| Error::corrupt(format!("negative '{}' value {}", key, value)))
        };

        Ok(Self {
            height: to_dim(HEIGHT_KEY, height)?,
            width: to_dim(WIDTH_KEY, width)?,
            image_raw,
            mask_raw,
        })
    }

    /// The declared `(height, width)` in `usize`.
    ///
    /// Zero-sized records are rejected since no image can be encoded into them.
    /// So are sizes whose 3-channel image byte count does not fit in `usize`.
    pub fn hw(&self) -> Result<(usize, usize)> {
        let to_usize = |value: u64| {
            usize::try_from(value)
                .map_err(|_| Error::corrupt(format!("dimension {} is too large", value)))
        };
        let height = to_usize(self.height)?;
        let width = to_usize(self.width)?;

        if height == 0 || width == 0 {
            return Err(Error::corrupt(format!(
                "zero-sized record with height {} and width {}",
                height, width
            )));
        }
        height
            .checked_mul(width)
            .and_then(|area| area.checked_mul(IMAGE_CHANNELS))
            .ok_or_else(|| {
                Error::corrupt(format!(
                    "image size {}x{}x{} overflows",
                    height, width, IMAGE_CHANNELS
                ))
            })?;

        Ok((height, width))
    }

    /// Decode into an `(H, W, C)` image and an `(H, W)` mask.
    ///
    /// The channel count `C` is inferred from the image byte count. This tolerates
    /// images with channel counts other than 3 on a best-effort basis; the
    /// container format does not store the channel count.
    pub fn decode_pair(&self) -> Result<(Array3<u8>, Array2<u8>)> {
        let (height, width) = self.hw()?;
        let area = height * width;

        let image_len = self.image_raw.len();
        if image_len == 0 || image_len % area != 0 {
            return Err(Error::corrupt(format!(
                "image byte count {} is not a positive multiple of {}x{}",
                image_len, height, width
            )));
        }
        let channels = image_len / area;

        let image = Array3::from_shape_vec((height, width, channels), self.image_raw.clone())
            .map_err(Error::corrupt)?;
        let mask = self.decode_mask()?;
        Ok((image, mask))
    }

    /// Decode into an `(H, W, 3)` image and an annotation shaped by the policy.
    pub fn decode_with_policy(&self, policy: ShapePolicy) -> Result<(Array3<u8>, ArrayD<u8>)> {
        let (height, width) = self.hw()?;

        let expect_len = height * width * IMAGE_CHANNELS;
        if self.image_raw.len() != expect_len {
            return Err(Error::corrupt(format!(
                "image byte count {} does not match {}x{}x{}",
                self.image_raw.len(),
                height,
                width,
                IMAGE_CHANNELS
            )));
        }

        let image = Array3::from_shape_vec((height, width, IMAGE_CHANNELS), self.image_raw.clone())
            .map_err(Error::corrupt)?;
        let annotation = policy.apply(self.decode_mask()?);
        Ok((image, annotation))
    }

    fn decode_mask(&self) -> Result<Array2<u8>> {
        let (height, width) = self.hw()?;
        if self.mask_raw.len() != height * width {
            return Err(Error::corrupt(format!(
                "mask byte count {} does not match {}x{}",
                self.mask_raw.len(),
                height,
                width
            )));
        }
        Array2::from_shape_vec((height, width), self.mask_raw.clone()).map_err(Error::corrupt)
    }
}

fn take_feature(example: &mut Example, key: &str) -> Result<Feature> {
    example
        .remove(key)
        .ok_or_else(|| Error::corrupt(format!("missing feature '{}'", key)))
}

fn kind_name(feature: &Feature) -> &'static str {
    match feature {
        Feature::BytesList(_) => "bytes_list",
        Feature::FloatList(_) => "float_list",
        Feature::Int64List(_) => "int64_list",
        Feature::None => "empty feature",
    }
}

fn take_int64(example: &mut Example, key: &str) -> Result<i64> {
    match take_feature(example, key)? {
        Feature::Int64List(values) => match values.as_slice() {
            &[value] => Ok(value),
            values => Err(Error::corrupt(format!(
                "feature '{}' has {} values, expect exactly one",
                key,
                values.len()
            ))),
        },
        feature => Err(Error::corrupt(format!(
            "feature '{}' is a {}, expect int64_list",
            key,
            kind_name(&feature)
        ))),
    }
}

fn take_bytes(example: &mut Example, key: &str) -> Result<Vec<u8>> {
    match take_feature(example, key)? {
        Feature::BytesList(mut values) => {
            if values.len() != 1 {
                return Err(Error::corrupt(format!(
                    "feature '{}' has {} values, expect exactly one",
                    key,
                    values.len()
                )));
            }
            Ok(values.remove(0))
        }
        feature => Err(Error::corrupt(format!(
            "feature '{}' is a {}, expect bytes_list",
            key,
            kind_name(&feature)
        ))),
    }
}
