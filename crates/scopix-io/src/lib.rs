//! scopix-io - Codec boundary
//!
//! Bridges encoded image bytes and [`Raster`] planes through the image
//! crate. Decoding keeps single-channel sources grayscale and collapses
//! everything else to RGB; alpha is dropped at this boundary so the
//! engines only ever see one or three channels.

mod error;

pub use error::{IoError, IoResult};

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, ImageReader, RgbImage};
use scopix_core::{Channels, Raster, RasterMut};

/// Decode encoded image bytes into a raster, guessing the format.
pub fn decode(bytes: &[u8]) -> IoResult<Raster> {
    let dynamic = image::load_from_memory(bytes)?;
    from_dynamic(&dynamic)
}

/// Read and decode an image file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let dynamic = ImageReader::open(path)
        .map_err(image::ImageError::IoError)?
        .decode()?;
    from_dynamic(&dynamic)
}

/// Encode a raster as PNG bytes.
pub fn encode_png(raster: &Raster) -> IoResult<Vec<u8>> {
    let dynamic = to_dynamic(raster);
    let mut out = Cursor::new(Vec::new());
    dynamic.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Encode and write a raster as a PNG file.
pub fn write_png<P: AsRef<Path>>(raster: &Raster, path: P) -> IoResult<()> {
    to_dynamic(raster).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Convert a decoded image into a raster.
///
/// Luma sources stay single-channel (alpha and wide samples are
/// collapsed); every other layout is flattened to 8-bit RGB.
pub fn from_dynamic(dynamic: &DynamicImage) -> IoResult<Raster> {
    match dynamic {
        DynamicImage::ImageLuma8(_)
        | DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_) => {
            let gray = dynamic.to_luma8();
            let mut m = RasterMut::new(gray.width(), gray.height(), Channels::Gray)?;
            for (y, row) in gray.rows().enumerate() {
                let dst = m.row_mut(y as u32);
                for (x, p) in row.enumerate() {
                    dst[x] = p.0[0];
                }
            }
            Ok(m.into())
        }
        other => {
            let rgb = other.to_rgb8();
            let mut m = RasterMut::new(rgb.width(), rgb.height(), Channels::Rgb)?;
            for (y, row) in rgb.rows().enumerate() {
                let dst = m.row_mut(y as u32);
                for (x, p) in row.enumerate() {
                    dst[x * 3..x * 3 + 3].copy_from_slice(&p.0);
                }
            }
            Ok(m.into())
        }
    }
}

/// Convert a raster into an image for encoding.
pub fn to_dynamic(raster: &Raster) -> DynamicImage {
    match raster.channels() {
        Channels::Gray => {
            let mut img = image::GrayImage::new(raster.width(), raster.height());
            for y in 0..raster.height() {
                let src = raster.row(y);
                for x in 0..raster.width() {
                    img.put_pixel(x, y, image::Luma([src[x as usize]]));
                }
            }
            DynamicImage::ImageLuma8(img)
        }
        Channels::Rgb => {
            let mut img = RgbImage::new(raster.width(), raster.height());
            for y in 0..raster.height() {
                let src = raster.row(y);
                for x in 0..raster.width() as usize {
                    img.put_pixel(
                        x as u32,
                        y,
                        image::Rgb([src[x * 3], src[x * 3 + 1], src[x * 3 + 2]]),
                    );
                }
            }
            DynamicImage::ImageRgb8(img)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_round_trip_rgb() {
        let mut m = RasterMut::new(9, 5, Channels::Rgb).unwrap();
        for y in 0..5 {
            for x in 0..9 {
                m.put_rgb(x, y, ((x * 28) as u8, (y * 50) as u8, 200));
            }
        }
        let original: Raster = m.into();

        let bytes = encode_png(&original).unwrap();
        let decoded = decode(&bytes).unwrap();

        assert!(decoded.is_rgb());
        assert!(original.sizes_equal(&decoded));
        assert_eq!(original.samples(), decoded.samples());
    }

    #[test]
    fn test_png_round_trip_gray() {
        let mut m = RasterMut::new(6, 6, Channels::Gray).unwrap();
        for y in 0..6 {
            for x in 0..6 {
                m.put_gray(x, y, (x * 40 + y) as u8);
            }
        }
        let original: Raster = m.into();

        let decoded = decode(&encode_png(&original).unwrap()).unwrap();
        assert!(decoded.is_gray());
        assert_eq!(original.samples(), decoded.samples());
    }

    #[test]
    fn test_rgba_flattens_to_rgb() {
        let mut img = image::RgbaImage::new(4, 4);
        for p in img.pixels_mut() {
            *p = image::Rgba([10, 20, 30, 128]);
        }
        let raster = from_dynamic(&DynamicImage::ImageRgba8(img)).unwrap();
        assert!(raster.is_rgb());
        assert_eq!(raster.rgb_at(0, 0), (10, 20, 30));
    }

    #[test]
    fn test_luma_alpha_stays_gray() {
        let mut img = image::GrayAlphaImage::new(3, 3);
        for p in img.pixels_mut() {
            *p = image::LumaA([200, 50]);
        }
        let raster = from_dynamic(&DynamicImage::ImageLumaA8(img)).unwrap();
        assert!(raster.is_gray());
        assert_eq!(raster.gray_at(1, 1), 200);
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        assert!(matches!(
            decode(b"not an image at all"),
            Err(IoError::Codec(_))
        ));
    }
}
