use crate::error::ModelError;
use serde::Serialize;
use std::fmt;

/// A named geodetic position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Waypoint {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Waypoint {
    /// Builds a waypoint, rejecting blank names, names containing a double
    /// quote (the document format has no string escapes), and out-of-range
    /// coordinates.
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        validate(&name, latitude, longitude)?;
        Ok(Self {
            name,
            latitude,
            longitude,
        })
    }
}

/// The fixed set of POI categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PoiCategory {
    #[serde(rename = "RESTAURANT")]
    Restaurant,
    #[serde(rename = "TOURISTIC")]
    Touristic,
    #[serde(rename = "GASSTATION")]
    GasStation,
    #[serde(rename = "UNIVERSITY")]
    University,
}

impl PoiCategory {
    /// Resolves the on-disk spelling of a category. Unknown spellings fall
    /// back to `University`, matching the historical reader behavior.
    pub fn from_label(label: &str) -> Self {
        match label {
            "RESTAURANT" => PoiCategory::Restaurant,
            "TOURISTIC" => PoiCategory::Touristic,
            "GASSTATION" => PoiCategory::GasStation,
            _ => PoiCategory::University,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PoiCategory::Restaurant => "RESTAURANT",
            PoiCategory::Touristic => "TOURISTIC",
            PoiCategory::GasStation => "GASSTATION",
            PoiCategory::University => "UNIVERSITY",
        }
    }
}

impl fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A point of interest: a waypoint extended with a category and a free-text
/// description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Poi {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "type")]
    pub category: PoiCategory,
    pub description: String,
}

impl Poi {
    /// Builds a POI under the same rules as [`Waypoint::new`]; the
    /// description may be empty but must not contain a double quote either.
    pub fn new(
        category: PoiCategory,
        name: impl Into<String>,
        description: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        validate(&name, latitude, longitude)?;
        let description = description.into();
        if description.contains('"') {
            return Err(ModelError::EmbeddedQuote);
        }
        Ok(Self {
            name,
            latitude,
            longitude,
            category,
            description,
        })
    }
}

/// A validated record emitted by the parser, one variant per catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Waypoint(Waypoint),
    Poi(Poi),
}

fn validate(name: &str, latitude: f64, longitude: f64) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::BlankName);
    }
    if name.contains('"') {
        return Err(ModelError::EmbeddedQuote);
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ModelError::LatitudeOutOfRange(latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ModelError::LongitudeOutOfRange(longitude));
    }
    Ok(())
}
