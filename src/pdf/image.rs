//! Logo image loading and embedding

use std::io::Write;
use std::path::Path;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::DynamicImage;
use lopdf::{dictionary, Document, ObjectId, Stream};
use crate::error::{Error, Result};

/// Decoded logo, stored as 8-bit RGB plus an optional alpha channel
#[derive(Debug, Clone)]
pub struct LogoImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl LogoImage {
    /// Decode a PNG or JPEG logo
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let logo = Self::from_image(image::open(path)?);
        log::info!("Loaded {}x{} logo from {}", logo.width, logo.height, path.display());
        Ok(logo)
    }

    pub fn from_image(img: DynamicImage) -> Self {
        let alpha = img.color().has_alpha().then(|| {
            img.to_rgba8()
                .pixels()
                .map(|p| p.0[3])
                .collect::<Vec<u8>>()
        });

        let rgb = img.to_rgb8();
        Self {
            width: rgb.width(),
            height: rgb.height(),
            rgb: rgb.into_raw(),
            alpha,
        }
    }

    /// Height divided by width
    pub fn aspect(&self) -> f32 {
        if self.width == 0 {
            return 1.0;
        }
        self.height as f32 / self.width as f32
    }

    /// Embed as an image XObject, returning its id
    pub fn embed(&self, doc: &mut Document) -> Result<ObjectId> {
        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => self.width as i64,
            "Height" => self.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        };

        if let Some(alpha) = &self.alpha {
            let mask_id = doc.add_object(
                Stream::new(
                    dictionary! {
                        "Type" => "XObject",
                        "Subtype" => "Image",
                        "Width" => self.width as i64,
                        "Height" => self.height as i64,
                        "ColorSpace" => "DeviceGray",
                        "BitsPerComponent" => 8,
                        "Filter" => "FlateDecode",
                    },
                    deflate(alpha)?,
                )
                .with_compression(false),
            );
            dict.set("SMask", mask_id);
        }

        Ok(doc.add_object(Stream::new(dict, deflate(&self.rgb)?).with_compression(false)))
    }
}

/// Zlib-compress raw sample data for a FlateDecode stream
fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use lopdf::Object;

    #[test]
    fn test_aspect_ratio() {
        let logo = LogoImage::from_image(DynamicImage::ImageRgb8(RgbImage::new(200, 50)));
        assert_eq!(logo.aspect(), 0.25);
        assert!(logo.alpha.is_none());
        assert_eq!(logo.rgb.len(), 200 * 50 * 3);
    }

    #[test]
    fn test_missing_logo() {
        let result = LogoImage::load(Path::new("no/such/logo.jpg"));
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_embed_opaque_logo() {
        let img = RgbImage::from_pixel(4, 2, Rgb([10, 20, 30]));
        let logo = LogoImage::from_image(DynamicImage::ImageRgb8(img));

        let mut doc = Document::with_version("1.7");
        let id = logo.embed(&mut doc).unwrap();

        let stream = doc.get_object(id).unwrap().as_stream().unwrap();
        assert_eq!(stream.dict.get(b"Width").unwrap().as_i64().unwrap(), 4);
        assert_eq!(stream.dict.get(b"Height").unwrap().as_i64().unwrap(), 2);
        assert!(stream.dict.get(b"SMask").is_err());
        assert_eq!(stream.decompressed_content().unwrap(), [10u8, 20, 30].repeat(8));
    }

    #[test]
    fn test_embed_transparent_logo_adds_soft_mask() {
        let img = RgbaImage::from_pixel(3, 3, Rgba([255, 0, 0, 128]));
        let logo = LogoImage::from_image(DynamicImage::ImageRgba8(img));

        let mut doc = Document::with_version("1.7");
        let id = logo.embed(&mut doc).unwrap();

        let stream = doc.get_object(id).unwrap().as_stream().unwrap();
        let mask_id = match stream.dict.get(b"SMask").unwrap() {
            Object::Reference(id) => *id,
            other => panic!("SMask should be a reference, got {:?}", other),
        };
        let mask = doc.get_object(mask_id).unwrap().as_stream().unwrap();
        assert_eq!(mask.decompressed_content().unwrap(), vec![128u8; 9]);
    }
}
