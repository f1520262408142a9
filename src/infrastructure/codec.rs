// SPDX-License-Identifier: MPL-2.0
//! JPEG/PNG codec with EXIF metadata support.
//!
//! Encoding and decoding go through the `image` crate. Metadata is built
//! with `little_exif`, spliced into JPEG bytes with `img-parts`, and read
//! back with `kamadak-exif`.

use crate::application::port::{CodecError, ImageCodec};
use crate::config::defaults::CAPTURE_JPEG_QUALITY;
use crate::domain::media::RawImage;
use crate::domain::metadata::{CaptureMetadata, GpsCoordinates};
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::{DynamicImage, ImageFormat, RgbaImage};
use img_parts::jpeg::Jpeg;
use img_parts::{Bytes, ImageEXIF};
use little_exif::exif_tag::ExifTag;
use little_exif::filetype::FileExtension;
use little_exif::metadata::Metadata;
use little_exif::rational::uR64;
use std::io::Cursor;
use std::panic;

/// Size of the JPEG APP1 header little_exif emits before the TIFF data:
/// marker (2) + length (2) + "Exif\0\0" (6).
const APP1_HEADER_SIZE: usize = 10;

/// [`ImageCodec`] backed by `image`, `little_exif`, `img-parts` and
/// `kamadak-exif`.
#[derive(Debug, Clone, Copy)]
pub struct ExifImageCodec {
    quality: u8,
}

impl Default for ExifImageCodec {
    fn default() -> Self {
        Self {
            quality: CAPTURE_JPEG_QUALITY,
        }
    }
}

impl ExifImageCodec {
    /// Codec encoding JPEG at `quality` (clamped to 1..=100).
    #[must_use]
    pub fn with_quality(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    #[must_use]
    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl ImageCodec for ExifImageCodec {
    fn encode_jpeg(&self, image: &RawImage) -> Result<Vec<u8>, CodecError> {
        encode_jpeg_with_quality(image, self.quality)
    }

    fn merge_metadata(
        &self,
        bytes: &[u8],
        metadata: &CaptureMetadata,
    ) -> Result<Vec<u8>, CodecError> {
        if !metadata.has_exif_fields() {
            return Err(CodecError::MergeFailed("no EXIF fields to write".into()));
        }

        let mut jpeg = Jpeg::from_bytes(Bytes::copy_from_slice(bytes))
            .map_err(|_| CodecError::UnsupportedFormat)?;

        let exif_block = build_exif(metadata)?;
        jpeg.set_exif(Some(exif_block.into()));

        let mut output = Vec::new();
        jpeg.encoder()
            .write_to(&mut output)
            .map_err(|e| CodecError::MergeFailed(e.to_string()))?;
        Ok(output)
    }

    fn decode(&self, bytes: &[u8]) -> Result<RawImage, CodecError> {
        let decoded = image_rs::load_from_memory(bytes)
            .map_err(|e| CodecError::DecodeFailed(e.to_string()))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(RawImage::from_rgba(width, height, rgba.into_raw()))
    }

    fn read_metadata(&self, bytes: &[u8]) -> Option<CaptureMetadata> {
        let exif = exif::Reader::new()
            .read_from_container(&mut Cursor::new(bytes))
            .ok()?;

        let text = |tag: exif::Tag| {
            exif.get_field(tag, exif::In::PRIMARY).map(|field| {
                field
                    .display_value()
                    .to_string()
                    .trim_matches('"')
                    .to_string()
            })
        };

        let mut metadata = CaptureMetadata::new();
        metadata.camera_make = text(exif::Tag::Make);
        metadata.camera_model = text(exif::Tag::Model);
        metadata.lens_model = text(exif::Tag::LensModel);
        metadata.date_taken = text(exif::Tag::DateTimeOriginal);
        metadata.software = text(exif::Tag::Software);
        metadata.orientation = exif
            .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .and_then(|value| u16::try_from(value).ok());
        metadata.gps = read_gps(&exif);

        (!metadata.is_empty()).then_some(metadata)
    }
}

/// Encodes `image` as JPEG. JPEG has no alpha channel, so alpha is dropped.
pub(crate) fn encode_jpeg_with_quality(
    image: &RawImage,
    quality: u8,
) -> Result<Vec<u8>, CodecError> {
    let rgb = DynamicImage::ImageRgba8(to_rgba_image(image)?).to_rgb8();
    let mut output = Vec::new();
    JpegEncoder::new_with_quality(&mut output, quality)
        .encode_image(&rgb)
        .map_err(|e| CodecError::EncodeFailed(e.to_string()))?;
    Ok(output)
}

/// Encodes `image` as lossless PNG.
pub(crate) fn encode_png(image: &RawImage) -> Result<Vec<u8>, CodecError> {
    let mut output = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(to_rgba_image(image)?)
        .write_to(&mut output, ImageFormat::Png)
        .map_err(|e| CodecError::EncodeFailed(e.to_string()))?;
    Ok(output.into_inner())
}

fn to_rgba_image(image: &RawImage) -> Result<RgbaImage, CodecError> {
    RgbaImage::from_raw(image.width(), image.height(), image.rgba_bytes().to_vec())
        .ok_or_else(|| CodecError::EncodeFailed("pixel buffer does not match dimensions".into()))
}

/// Builds the TIFF payload of an APP1 EXIF segment.
fn build_exif(metadata: &CaptureMetadata) -> Result<Vec<u8>, CodecError> {
    let mut exif_metadata = Metadata::new();

    if let Some(make) = &metadata.camera_make {
        exif_metadata.set_tag(ExifTag::Make(make.clone()));
    }
    if let Some(model) = &metadata.camera_model {
        exif_metadata.set_tag(ExifTag::Model(model.clone()));
    }
    if let Some(lens) = &metadata.lens_model {
        exif_metadata.set_tag(ExifTag::LensModel(lens.clone()));
    }
    if let Some(date) = &metadata.date_taken {
        exif_metadata.set_tag(ExifTag::DateTimeOriginal(date.clone()));
    }
    if let Some(orientation) = metadata.orientation {
        exif_metadata.set_tag(ExifTag::Orientation(vec![orientation]));
    }
    if let Some(software) = &metadata.software {
        exif_metadata.set_tag(ExifTag::Software(software.clone()));
    }
    if let Some(gps) = metadata.gps.filter(GpsCoordinates::is_valid) {
        set_gps_coordinates(&mut exif_metadata, gps.latitude(), gps.longitude());
    }

    // little_exif panics on some tag combinations instead of returning an error.
    let encoded = panic::catch_unwind(panic::AssertUnwindSafe(|| {
        exif_metadata.as_u8_vec(FileExtension::JPEG)
    }));

    let full_app1 = match encoded {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => return Err(CodecError::MergeFailed(format!("{e:?}"))),
        Err(_) => return Err(CodecError::MergeFailed("EXIF encoder panicked".into())),
    };

    if full_app1.len() <= APP1_HEADER_SIZE {
        return Err(CodecError::MergeFailed("EXIF data too short".into()));
    }
    Ok(full_app1[APP1_HEADER_SIZE..].to_vec())
}

/// Sets GPS coordinates and their reference directions.
fn set_gps_coordinates(metadata: &mut Metadata, latitude: f64, longitude: f64) {
    let lat_ref = if latitude >= 0.0 { "N" } else { "S" };
    metadata.set_tag(ExifTag::GPSLatitudeRef(lat_ref.to_string()));
    metadata.set_tag(ExifTag::GPSLatitude(decimal_to_dms(latitude.abs())));

    let lon_ref = if longitude >= 0.0 { "E" } else { "W" };
    metadata.set_tag(ExifTag::GPSLongitudeRef(lon_ref.to_string()));
    metadata.set_tag(ExifTag::GPSLongitude(decimal_to_dms(longitude.abs())));
}

/// Decimal degrees to degrees/minutes/seconds rationals (seconds in 1/100).
///
/// Rounding happens once on the total, so 59.999″ carries into the minute.
fn decimal_to_dms(decimal: f64) -> Vec<uR64> {
    const CENTISECONDS_PER_MINUTE: u64 = 60 * 100;
    const CENTISECONDS_PER_DEGREE: u64 = 60 * CENTISECONDS_PER_MINUTE;

    let total = (decimal * CENTISECONDS_PER_DEGREE as f64).round() as u64;
    let degrees = total / CENTISECONDS_PER_DEGREE;
    let minutes = (total % CENTISECONDS_PER_DEGREE) / CENTISECONDS_PER_MINUTE;
    let centiseconds = total % CENTISECONDS_PER_MINUTE;

    vec![
        uR64 {
            nominator: degrees as u32,
            denominator: 1,
        },
        uR64 {
            nominator: minutes as u32,
            denominator: 1,
        },
        uR64 {
            nominator: centiseconds as u32,
            denominator: 100,
        },
    ]
}

fn read_gps(exif: &exif::Exif) -> Option<GpsCoordinates> {
    let coordinate = |value_tag: exif::Tag, ref_tag: exif::Tag, negative: char| {
        let value = exif.get_field(value_tag, exif::In::PRIMARY)?;
        let reference = exif.get_field(ref_tag, exif::In::PRIMARY)?;
        let degrees = match &value.value {
            exif::Value::Rational(parts) if parts.len() >= 3 => {
                parts[0].to_f64() + parts[1].to_f64() / 60.0 + parts[2].to_f64() / 3600.0
            }
            _ => return None,
        };
        let negated = reference.display_value().to_string().contains(negative);
        Some(if negated { -degrees } else { degrees })
    };

    let latitude = coordinate(exif::Tag::GPSLatitude, exif::Tag::GPSLatitudeRef, 'S')?;
    let longitude = coordinate(exif::Tag::GPSLongitude, exif::Tag::GPSLongitudeRef, 'W')?;
    Some(GpsCoordinates::new(latitude, longitude))
}
