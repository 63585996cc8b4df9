//! GeoKey directory parsing.
//!
//! The GeoKeyDirectoryTag is a flat array of shorts: a four-short header
//! (version, revision, minor revision, key count) followed by one
//! four-short entry per key (key id, tag location, count, value/offset).
//! A tag location of 0 stores the value inline; otherwise the value lives
//! in the double or ASCII parameter tag at the given offset.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::error::{GeoTiffError, GeoTiffResult};

/// GeoTIFF tag holding double-valued key parameters.
pub const GEO_DOUBLE_PARAMS_TAG: u16 = 34736;
/// GeoTIFF tag holding ASCII key parameters.
pub const GEO_ASCII_PARAMS_TAG: u16 = 34737;

pub const GT_MODEL_TYPE_GEO_KEY: u16 = 1024;
pub const GT_RASTER_TYPE_GEO_KEY: u16 = 1025;
pub const GEOGRAPHIC_TYPE_GEO_KEY: u16 = 2048;
pub const PROJECTED_CS_TYPE_GEO_KEY: u16 = 3072;

/// A single GeoKey value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GeoKeyValue {
    Short(u16),
    Double(Vec<f64>),
    Ascii(String),
}

impl GeoKeyValue {
    /// Integer code, if this is an inline short.
    pub fn as_code(&self) -> Option<u32> {
        match self {
            GeoKeyValue::Short(v) => Some(u32::from(*v)),
            _ => None,
        }
    }
}

/// Parsed GeoKey directory, keyed by numeric key id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoKeyDirectory {
    keys: BTreeMap<u16, GeoKeyValue>,
}

impl GeoKeyDirectory {
    /// Parse the raw directory plus its optional parameter tags.
    pub fn parse(
        directory: &[u16],
        double_params: Option<&[f64]>,
        ascii_params: Option<&str>,
    ) -> GeoTiffResult<Self> {
        if directory.len() < 4 {
            return Err(GeoTiffError::invalid_geo_keys(format!(
                "header needs 4 shorts, got {}",
                directory.len()
            )));
        }

        let key_count = usize::from(directory[3]);
        let entries = &directory[4..];
        if entries.len() < key_count * 4 {
            return Err(GeoTiffError::invalid_geo_keys(format!(
                "directory declares {} keys but holds {}",
                key_count,
                entries.len() / 4
            )));
        }

        let mut keys = BTreeMap::new();
        for entry in entries.chunks_exact(4).take(key_count) {
            let (key_id, location, count, offset) = (
                entry[0],
                entry[1],
                usize::from(entry[2]),
                usize::from(entry[3]),
            );

            let value = match location {
                0 => GeoKeyValue::Short(entry[3]),
                GEO_DOUBLE_PARAMS_TAG => {
                    let doubles = double_params
                        .and_then(|d| d.get(offset..offset + count))
                        .ok_or_else(|| {
                            GeoTiffError::invalid_geo_keys(format!(
                                "key {} points past double params",
                                key_id
                            ))
                        })?;
                    GeoKeyValue::Double(doubles.to_vec())
                }
                GEO_ASCII_PARAMS_TAG => {
                    let text = ascii_params
                        .and_then(|a| a.get(offset..offset + count))
                        .ok_or_else(|| {
                            GeoTiffError::invalid_geo_keys(format!(
                                "key {} points past ascii params",
                                key_id
                            ))
                        })?;
                    GeoKeyValue::Ascii(text.trim_end_matches(&['|', '\0'][..]).to_string())
                }
                other => {
                    tracing::debug!(key_id, location = other, "Skipping GeoKey in unknown tag");
                    continue;
                }
            };

            keys.insert(key_id, value);
        }

        Ok(Self { keys })
    }

    /// Build a directory from explicit values.
    pub fn from_entries(entries: impl IntoIterator<Item = (u16, GeoKeyValue)>) -> Self {
        Self {
            keys: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, key_id: u16) -> Option<&GeoKeyValue> {
        self.keys.get(&key_id)
    }

    /// Integer code stored under `key_id`.
    pub fn code(&self, key_id: u16) -> Option<u32> {
        self.get(key_id).and_then(GeoKeyValue::as_code)
    }

    pub fn projected_cs_type(&self) -> Option<u32> {
        self.code(PROJECTED_CS_TYPE_GEO_KEY)
    }

    pub fn geographic_type(&self) -> Option<u32> {
        self.code(GEOGRAPHIC_TYPE_GEO_KEY)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

/// GeoTIFF name of a key id; unknown ids are rendered as `GeoKey<id>`.
pub fn key_name(key_id: u16) -> String {
    let name = match key_id {
        1024 => "GTModelTypeGeoKey",
        1025 => "GTRasterTypeGeoKey",
        1026 => "GTCitationGeoKey",
        2048 => "GeographicTypeGeoKey",
        2049 => "GeogCitationGeoKey",
        2050 => "GeogGeodeticDatumGeoKey",
        2051 => "GeogPrimeMeridianGeoKey",
        2052 => "GeogLinearUnitsGeoKey",
        2054 => "GeogAngularUnitsGeoKey",
        2056 => "GeogEllipsoidGeoKey",
        2057 => "GeogSemiMajorAxisGeoKey",
        2058 => "GeogSemiMinorAxisGeoKey",
        2059 => "GeogInvFlatteningGeoKey",
        3072 => "ProjectedCSTypeGeoKey",
        3073 => "PCSCitationGeoKey",
        3074 => "ProjectionGeoKey",
        3075 => "ProjCoordTransGeoKey",
        3076 => "ProjLinearUnitsGeoKey",
        4096 => "VerticalCSTypeGeoKey",
        4099 => "VerticalUnitsGeoKey",
        _ => return format!("GeoKey{}", key_id),
    };
    name.to_string()
}

impl Serialize for GeoKeyDirectory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.keys.iter().map(|(id, value)| (key_name(*id), value)))
    }
}
