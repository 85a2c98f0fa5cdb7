//! Builds the gray image from a finished fractal buffer and writes it
//! out as a PNG.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{DynamicImage, GrayImage, ImageBuffer, ImageError, ImageOutputFormat, Luma};
use itertools::iproduct;

use color::{BitDepth, ColorMapper};
use errors::RenderError;
use fractal::Fractal;
use planes::Pixel;

/// Shades every pixel of `fractal` with `mapper` into an image of the
/// requested depth.  Pixel (x, y) of the buffer lands at (x, y) of the
/// image.
pub fn assemble(fractal: &Fractal, mapper: &ColorMapper, depth: BitDepth) -> DynamicImage {
    let (width, height) = (fractal.width() as u32, fractal.height() as u32);
    let pixels = iproduct!(0..height, 0..width).map(|(y, x)| {
        let shade = mapper.intensity(fractal.get(&Pixel(x as usize, y as usize)));
        (x, y, shade)
    });
    match depth {
        BitDepth::Eight => {
            let mut img = GrayImage::new(width, height);
            for (x, y, shade) in pixels {
                // The mapper never exceeds the depth's maximum.
                img.put_pixel(x, y, Luma([shade as u8]));
            }
            DynamicImage::ImageLuma8(img)
        }
        BitDepth::Sixteen => {
            let mut img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::new(width, height);
            for (x, y, shade) in pixels {
                img.put_pixel(x, y, Luma([shade]));
            }
            DynamicImage::ImageLuma16(img)
        }
    }
}

fn encode(output: File, img: &DynamicImage) -> Result<(), ImageError> {
    let mut writer = BufWriter::new(output);
    img.write_to(&mut writer, ImageOutputFormat::Png)?;
    writer.flush().map_err(ImageError::IoError)
}

// Only a regular file at `path` can be a half-written image of ours.
// Symlinks, devices and pipes belong to the caller.
fn is_plain_file(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|meta| meta.file_type().is_file())
        .unwrap_or(false)
}

/// Writes `img` to `path` as a PNG.  If encoding fails and `path` is a
/// regular file, the half-written file is removed, so a regular file at
/// `path` is always a complete image.  Anything else at `path`, such as
/// a symlink or a device, is left in place.
pub fn write_png(path: &Path, img: &DynamicImage) -> Result<(), RenderError> {
    let output = File::create(path).map_err(|cause| RenderError::Create {
        path: path.display().to_string(),
        cause,
    })?;
    if let Err(cause) = encode(output, img) {
        if is_plain_file(path) {
            if let Err(e) = fs::remove_file(path) {
                warn!("could not remove partial image {}: {}", path.display(), e);
            }
        } else {
            debug!("leaving {} in place after a failed write", path.display());
        }
        return Err(RenderError::Encode {
            path: path.display().to_string(),
            cause,
        });
    }
    info!("wrote {}", path.display());
    Ok(())
}
