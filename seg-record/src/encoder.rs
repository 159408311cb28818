//! Image and annotation file loading.
//!
//! Annotations are label maps whose pixel values are class indices. PASCAL VOC
//! ships them as palette PNG files, so they must be read without mapping the
//! palette indices to colors. The `image` crate always expands palettes, hence
//! PNG annotations are read with the `png` decoder with all transformations
//! disabled.

use crate::{common::*, record::Record};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Read an image/annotation pair from files and pack it into a record.
pub fn encode_pair(
    image_path: impl AsRef<Path>,
    annotation_path: impl AsRef<Path>,
) -> Result<Record> {
    let image_path = image_path.as_ref();
    let annotation_path = annotation_path.as_ref();

    let image = load_image(image_path)?;
    let annotation = load_annotation(annotation_path)?;

    let (height, width, _) = image.dim();
    let (ann_h, ann_w) = annotation.dim();
    if (height, width) != (ann_h, ann_w) {
        return Err(Error::ShapeMismatch {
            image_path: image_path.to_owned(),
            annotation_path: annotation_path.to_owned(),
            image_hw: [height, width],
            annotation_hw: [ann_h, ann_w],
        });
    }

    Ok(Record {
        height: height as u64,
        width: width as u64,
        image_raw: image.into_raw_vec(),
        mask_raw: annotation.into_raw_vec(),
    })
}

/// Load an image file as an `(H, W, 3)` RGB array.
pub fn load_image(path: impl AsRef<Path>) -> Result<Array3<u8>> {
    let path = path.as_ref();
    ensure_input_file(path)?;

    let image = image::io::Reader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(Error::io(path))?
        .decode()
        .map_err(|source| Error::ImageDecode {
            path: path.to_owned(),
            source,
        })?
        .into_rgb8();

    let (width, height) = image.dimensions();
    let array = Array3::from_shape_vec((height as usize, width as usize, 3), image.into_raw())
        .map_err(|_| Error::ImageDecode {
            path: path.to_owned(),
            source: image::ImageError::Parameter(image::error::ParameterError::from_kind(
                image::error::ParameterErrorKind::DimensionMismatch,
            )),
        })?;
    Ok(array)
}

/// Load an annotation file as an `(H, W)` array of raw class indices.
///
/// PNG files may be palette or grayscale images with up to 8 bits per pixel.
/// Sub-byte samples are unpacked to one byte each without rescaling. Files of
/// other formats must decode to 8-bit grayscale.
pub fn load_annotation(path: impl AsRef<Path>) -> Result<Array2<u8>> {
    let path = path.as_ref();
    ensure_input_file(path)?;
    let bytes = fs::read(path).map_err(Error::io(path))?;

    if bytes.starts_with(&PNG_SIGNATURE) {
        return load_png_annotation(path, &bytes);
    }

    debug!(
        "'{}' is not a PNG file, decoding it as a grayscale image",
        path.display()
    );
    let image = image::load_from_memory(&bytes).map_err(|source| Error::ImageDecode {
        path: path.to_owned(),
        source,
    })?;
    let image = match image {
        image::DynamicImage::ImageLuma8(image) => image,
        other => {
            return Err(Error::UnsupportedAnnotation {
                path: path.to_owned(),
                reason: format!(
                    "expect an 8-bit single channel image, but get {:?}",
                    other.color()
                ),
            })
        }
    };

    let (width, height) = image.dimensions();
    into_annotation_array(path, height as usize, width as usize, image.into_raw())
}

fn load_png_annotation(path: &Path, bytes: &[u8]) -> Result<Array2<u8>> {
    let decode_err = |source| Error::AnnotationDecode {
        path: path.to_owned(),
        source,
    };

    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info().map_err(decode_err)?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let png::OutputInfo {
        width,
        height,
        color_type,
        bit_depth,
        line_size,
    } = reader.next_frame(&mut buf).map_err(decode_err)?;

    match color_type {
        png::ColorType::Indexed | png::ColorType::Grayscale => {}
        other => {
            return Err(Error::UnsupportedAnnotation {
                path: path.to_owned(),
                reason: format!("expect a palette or grayscale PNG, but get {:?}", other),
            })
        }
    }
    let bits = match bit_depth {
        png::BitDepth::One => 1,
        png::BitDepth::Two => 2,
        png::BitDepth::Four => 4,
        png::BitDepth::Eight => 8,
        png::BitDepth::Sixteen => {
            return Err(Error::UnsupportedAnnotation {
                path: path.to_owned(),
                reason: "16-bit class indices are not supported".to_string(),
            })
        }
    };

    let (height, width) = (height as usize, width as usize);
    let mut pixels = Vec::with_capacity(height * width);
    buf.chunks_exact(line_size)
        .take(height)
        .for_each(|row| unpack_row(row, bits, width, &mut pixels));

    into_annotation_array(path, height, width, pixels)
}

/// Unpack one scanline of `bits`-bit samples, most significant bits first.
fn unpack_row(row: &[u8], bits: u8, width: usize, output: &mut Vec<u8>) {
    if bits == 8 {
        output.extend_from_slice(&row[..width]);
        return;
    }

    let per_byte = 8 / bits;
    let mask = (1u8 << bits) - 1;
    let samples = row
        .iter()
        .flat_map(|&byte| (1..=per_byte).map(move |nth| (byte >> (8 - bits * nth)) & mask))
        .take(width);
    output.extend(samples);
}

fn into_annotation_array(
    path: &Path,
    height: usize,
    width: usize,
    pixels: Vec<u8>,
) -> Result<Array2<u8>> {
    Array2::from_shape_vec((height, width), pixels).map_err(|err| Error::UnsupportedAnnotation {
        path: path.to_owned(),
        reason: err.to_string(),
    })
}

fn ensure_input_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(Error::MissingInput {
            path: path.to_owned(),
        });
    }
    Ok(())
}
