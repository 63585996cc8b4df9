//! GeoTIFF container decoding via the `tiff` crate.

use std::io::{Cursor, Read, Seek};

use serde::Serialize;
use tiff::decoder::ifd::Value;
use tiff::decoder::Decoder;
use tiff::tags::Tag;
use tracing::debug;

use crate::error::{GeoTiffError, GeoTiffResult};
use crate::geokeys::GeoKeyDirectory;
use crate::georef::Georeference;
use crate::pixels::PixelBuffer;
use crate::raster::RasterImage;

/// Decode an in-memory GeoTIFF into a raster image.
///
/// Only the first image file directory is read.
pub fn decode_geotiff(bytes: &[u8]) -> GeoTiffResult<RasterImage> {
    let mut decoder = Decoder::new(Cursor::new(bytes))?;
    let (width, height) = decoder.dimensions()?;
    let samples_per_pixel = find_u32s(&mut decoder, Tag::SamplesPerPixel)?
        .and_then(|v| v.first().copied())
        .unwrap_or(1);

    let georef = Georeference::from_tags(
        find_f64s(&mut decoder, Tag::ModelTiepointTag)?.as_deref(),
        find_f64s(&mut decoder, Tag::ModelPixelScaleTag)?.as_deref(),
        find_f64s(&mut decoder, Tag::ModelTransformationTag)?.as_deref(),
    )?;

    let geo_keys = match find_u32s(&mut decoder, Tag::GeoKeyDirectoryTag)? {
        Some(raw) => {
            let directory = raw
                .into_iter()
                .map(|v| {
                    u16::try_from(v).map_err(|_| {
                        GeoTiffError::invalid_geo_keys(format!("value {} exceeds u16", v))
                    })
                })
                .collect::<GeoTiffResult<Vec<u16>>>()?;
            let doubles = find_f64s(&mut decoder, Tag::GeoDoubleParamsTag)?;
            let ascii = match decoder.find_tag(Tag::GeoAsciiParamsTag)? {
                Some(value) => Some(value.into_string()?),
                None => None,
            };
            GeoKeyDirectory::parse(&directory, doubles.as_deref(), ascii.as_deref())?
        }
        None => GeoKeyDirectory::default(),
    };

    let pixels = PixelBuffer::from(decoder.read_image()?);

    debug!(
        width,
        height,
        samples_per_pixel,
        sample_type = pixels.sample_type(),
        geo_keys = geo_keys.len(),
        "Decoded GeoTIFF"
    );

    RasterImage::new(
        width as usize,
        height as usize,
        samples_per_pixel as usize,
        pixels,
        georef,
        geo_keys,
    )
}

/// Baseline TIFF tags of the first image, for metadata dumps.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileDirectorySummary {
    pub image_width: u32,
    pub image_length: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bits_per_sample: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples_per_pixel: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photometric_interpretation: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planar_configuration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_format: Option<Vec<u32>>,
}

impl FileDirectorySummary {
    /// Read the summary without decoding pixel data.
    pub fn read(bytes: &[u8]) -> GeoTiffResult<Self> {
        let mut decoder = Decoder::new(Cursor::new(bytes))?;
        let (image_width, image_length) = decoder.dimensions()?;
        let first = |values: Option<Vec<u32>>| values.and_then(|v| v.first().copied());

        Ok(Self {
            image_width,
            image_length,
            bits_per_sample: find_u32s(&mut decoder, Tag::BitsPerSample)?,
            samples_per_pixel: first(find_u32s(&mut decoder, Tag::SamplesPerPixel)?),
            compression: first(find_u32s(&mut decoder, Tag::Compression)?),
            photometric_interpretation: first(find_u32s(
                &mut decoder,
                Tag::PhotometricInterpretation,
            )?),
            planar_configuration: first(find_u32s(&mut decoder, Tag::PlanarConfiguration)?),
            sample_format: find_u32s(&mut decoder, Tag::SampleFormat)?,
        })
    }
}

/// Integer tag as a list, whether stored as a scalar or an array.
fn find_u32s<R: Read + Seek>(decoder: &mut Decoder<R>, tag: Tag) -> GeoTiffResult<Option<Vec<u32>>> {
    let Some(value) = decoder.find_tag(tag)? else {
        return Ok(None);
    };
    let values = match value {
        Value::List(items) => items
            .into_iter()
            .map(Value::into_u32)
            .collect::<Result<Vec<_>, _>>()?,
        scalar => vec![scalar.into_u32()?],
    };
    Ok(Some(values))
}

/// Floating-point tag as a list, whether stored as a scalar or an array.
fn find_f64s<R: Read + Seek>(decoder: &mut Decoder<R>, tag: Tag) -> GeoTiffResult<Option<Vec<f64>>> {
    let Some(value) = decoder.find_tag(tag)? else {
        return Ok(None);
    };
    let values = match value {
        Value::List(items) => items
            .into_iter()
            .map(Value::into_f64)
            .collect::<Result<Vec<_>, _>>()?,
        scalar => vec![scalar.into_f64()?],
    };
    Ok(Some(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_tiff() {
        let result = decode_geotiff(b"definitely not a tiff");
        assert!(matches!(result, Err(GeoTiffError::Tiff(_))));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(decode_geotiff(&[]).is_err());
        assert!(FileDirectorySummary::read(&[]).is_err());
    }
}
