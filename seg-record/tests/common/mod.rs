#![allow(dead_code)]

use anyhow::Result;
use image::{GrayImage, Luma, Rgb, RgbImage};
use ndarray::{Array2, Array3};
use rand::prelude::*;
use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

/// The PASCAL VOC "void" label.
pub const VOID_LABEL: u8 = 255;

pub fn random_image(rng: &mut impl Rng, height: usize, width: usize) -> Array3<u8> {
    Array3::from_shape_simple_fn((height, width, 3), || rng.gen())
}

pub fn random_mask(rng: &mut impl Rng, height: usize, width: usize) -> Array2<u8> {
    Array2::from_shape_simple_fn((height, width), || {
        if rng.gen_bool(0.1) {
            VOID_LABEL
        } else {
            rng.gen_range(0..21)
        }
    })
}

/// Save an RGB image in the format implied by the file extension.
pub fn save_image(path: impl AsRef<Path>, image: &Array3<u8>) -> Result<()> {
    let (height, width, _) = image.dim();
    let buffer = RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let (row, col) = (y as usize, x as usize);
        Rgb([
            image[[row, col, 0]],
            image[[row, col, 1]],
            image[[row, col, 2]],
        ])
    });
    buffer.save(path)?;
    Ok(())
}

/// Save a mask as an 8-bit grayscale PNG.
pub fn save_gray_mask(path: impl AsRef<Path>, mask: &Array2<u8>) -> Result<()> {
    let (height, width) = mask.dim();
    let buffer = GrayImage::from_fn(width as u32, height as u32, |x, y| {
        Luma([mask[[y as usize, x as usize]]])
    });
    buffer.save(path)?;
    Ok(())
}

/// Save a mask as an 8-bit palette PNG. The palette maps every index to a
/// color unrelated to the index.
pub fn save_palette_mask(path: impl AsRef<Path>, mask: &Array2<u8>) -> Result<()> {
    let (height, width) = mask.dim();
    let palette: Vec<u8> = (0..=255u8)
        .flat_map(|index| [index.wrapping_mul(37), 255 - index, index ^ 0x5a])
        .collect();

    let writer = BufWriter::new(File::create(path)?);
    let mut encoder = png::Encoder::new(writer, width as u32, height as u32);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(palette);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(mask.as_standard_layout().as_slice().unwrap())?;
    Ok(())
}

/// Save a mask with values below 16 as a 4-bit grayscale PNG.
pub fn save_nibble_mask(path: impl AsRef<Path>, mask: &Array2<u8>) -> Result<()> {
    let (height, width) = mask.dim();
    let data: Vec<u8> = mask
        .outer_iter()
        .flat_map(|row| {
            let row: Vec<u8> = row.iter().copied().collect();
            row.chunks(2)
                .map(|pair| (pair[0] << 4) | pair.get(1).copied().unwrap_or(0))
                .collect::<Vec<_>>()
        })
        .collect();

    let writer = BufWriter::new(File::create(path)?);
    let mut encoder = png::Encoder::new(writer, width as u32, height as u32);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Four);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&data)?;
    Ok(())
}

pub struct Sample {
    pub image: Array3<u8>,
    pub mask: Array2<u8>,
    pub image_path: PathBuf,
    pub annotation_path: PathBuf,
}

/// Generate `count` samples of varying sizes with PNG images and palette PNG masks.
pub fn generate_samples(dir: impl AsRef<Path>, count: usize, seed: u64) -> Result<Vec<Sample>> {
    let dir = dir.as_ref();
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|index| {
            let height = rng.gen_range(1..12);
            let width = rng.gen_range(1..12);
            let image = random_image(&mut rng, height, width);
            let mask = random_mask(&mut rng, height, width);

            let image_path = dir.join(format!("{:05}.png", index));
            let annotation_path = dir.join(format!("{:05}_mask.png", index));
            save_image(&image_path, &image)?;
            save_palette_mask(&annotation_path, &mask)?;

            Ok(Sample {
                image,
                mask,
                image_path,
                annotation_path,
            })
        })
        .collect()
}

pub fn path_pairs(samples: &[Sample]) -> Vec<(PathBuf, PathBuf)> {
    samples
        .iter()
        .map(|sample| (sample.image_path.clone(), sample.annotation_path.clone()))
        .collect()
}
