//! Observation and Hotspot Data
//!
//! Record types for one search's input batch plus loaders for the upstream
//! JSON payloads and CSV exports (Polars).
//!
//! Records are read-only once loaded. Malformed numeric fields degrade to safe
//! defaults instead of failing the whole batch:
//! - count → `BirdCount::Unknown`
//! - coordinates → NaN (distance becomes unknown)

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Missing coordinates: non-finite components, or exactly (0, 0).
    ///
    /// (0, 0) is a real place in the Gulf of Guinea, but upstream payloads use
    /// it for "no location" and ranking order depends on treating it that way.
    pub fn is_missing(&self) -> bool {
        !self.lat.is_finite() || !self.lng.is_finite() || (self.lat == 0.0 && self.lng == 0.0)
    }
}

/// Reported number of birds for one observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BirdCount {
    /// Positive counted number of individuals
    Exact(u32),
    /// Present but not counted (reported as "X")
    Uncounted,
    /// Missing, zero or unparsable
    #[default]
    Unknown,
}

impl BirdCount {
    /// Parse the upstream textual representation ("12", "X", "", ...)
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("x") {
            return BirdCount::Uncounted;
        }
        match raw.parse::<f64>() {
            Ok(n) => Self::from_number(n),
            Err(_) => BirdCount::Unknown,
        }
    }

    fn from_number(n: f64) -> Self {
        if n.is_finite() && n >= 1.0 && n <= u32::MAX as f64 {
            BirdCount::Exact(n.trunc() as u32)
        } else {
            BirdCount::Unknown
        }
    }
}

impl<'de> Deserialize<'de> for BirdCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawCount {
            Number(f64),
            Text(String),
            Other(serde::de::IgnoredAny),
        }

        Ok(match Option::<RawCount>::deserialize(deserializer)? {
            Some(RawCount::Number(n)) => BirdCount::from_number(n),
            Some(RawCount::Text(s)) => BirdCount::parse(&s),
            Some(RawCount::Other(_)) | None => BirdCount::Unknown,
        })
    }
}

/// One reported sighting of a species at a place and time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    #[serde(rename = "speciesCode")]
    pub species_id: String,
    #[serde(rename = "comName", default)]
    pub common_name: String,
    #[serde(rename = "sciName", default)]
    pub scientific_name: String,
    #[serde(rename = "locId", default)]
    pub location_id: String,
    #[serde(rename = "locName", default)]
    pub location_name: String,
    #[serde(rename = "obsDt", deserialize_with = "deserialize_timestamp")]
    pub observed_at: NaiveDateTime,
    #[serde(rename = "howMany", default)]
    pub count: BirdCount,
    #[serde(rename = "lat", default = "missing_degrees", deserialize_with = "deserialize_degrees")]
    pub latitude: f64,
    #[serde(rename = "lng", default = "missing_degrees", deserialize_with = "deserialize_degrees")]
    pub longitude: f64,
    #[serde(rename = "obsValid", default)]
    pub valid: bool,
    #[serde(rename = "obsReviewed", default)]
    pub reviewed: bool,
    #[serde(rename = "locationPrivate", default)]
    pub location_private: bool,
}

impl ObservationRecord {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A named location with a history of observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    #[serde(rename = "locId")]
    pub id: String,
    #[serde(rename = "locName", default)]
    pub name: String,
    #[serde(rename = "lat", default = "missing_degrees", deserialize_with = "deserialize_degrees")]
    pub latitude: f64,
    #[serde(rename = "lng", default = "missing_degrees", deserialize_with = "deserialize_degrees")]
    pub longitude: f64,
    #[serde(rename = "countryCode", default)]
    pub country_code: String,
    #[serde(rename = "subnational1Code", default)]
    pub region_code: String,
    #[serde(rename = "numSpeciesAllTime", default)]
    pub all_time_species_count: Option<u32>,
    #[serde(rename = "latestObsDt", default, deserialize_with = "deserialize_optional_timestamp")]
    pub latest_observation_date: Option<NaiveDateTime>,
}

impl Hotspot {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Parse upstream timestamps: "YYYY-MM-DD HH:MM[:SS]" or date-only "YYYY-MM-DD"
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn deserialize_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid observation timestamp: '{}'", raw)))
}

fn deserialize_optional_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<NaiveDateTime>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

fn missing_degrees() -> f64 {
    f64::NAN
}

fn deserialize_degrees<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f64, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    })
}

/// One search's raw observation records
#[derive(Debug, Clone, Default)]
pub struct ObservationBatch {
    pub records: Vec<ObservationRecord>,
}

impl ObservationBatch {
    pub fn new(records: Vec<ObservationRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Keep only records flagged valid (caller-side pre-filter)
    pub fn valid_only(&self) -> Self {
        Self {
            records: self.records.iter().filter(|r| r.valid).cloned().collect(),
        }
    }

    /// Parse a JSON array of observation records
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<ObservationRecord> = serde_json::from_str(json)
            .with_context(|| "Failed to parse observations JSON")?;
        Ok(Self { records })
    }

    /// Load a JSON array of observation records from disk
    pub fn load_json(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read observations file: {:?}", path))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("Invalid observations file: {:?}", path))
    }

    /// Load observation records from a CSV export
    ///
    /// Columns use the upstream JSON field names. Rows without a species code
    /// or a parsable timestamp are skipped; the remaining fields fall back to
    /// defaults when missing.
    pub fn load_csv(path: &Path) -> Result<Self> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.into()))
            .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
            .finish()
            .with_context(|| format!("Failed to load observations CSV: {:?}", path))?;

        Self::from_dataframe(&df)
    }

    /// Convert a DataFrame with upstream column names into records
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let species = string_column(df, "speciesCode")?
            .with_context(|| "Column 'speciesCode' not found")?;
        let observed = string_column(df, "obsDt")?
            .with_context(|| "Column 'obsDt' not found")?;
        let common = string_column(df, "comName")?;
        let scientific = string_column(df, "sciName")?;
        let loc_id = string_column(df, "locId")?;
        let loc_name = string_column(df, "locName")?;
        let how_many = string_column(df, "howMany")?;
        let valid = string_column(df, "obsValid")?;
        let reviewed = string_column(df, "obsReviewed")?;
        let private = string_column(df, "locationPrivate")?;
        let lat = float_column(df, "lat")?;
        let lng = float_column(df, "lng")?;

        let text = |col: &Option<StringChunked>, idx: usize| -> String {
            col.as_ref()
                .and_then(|c| c.get(idx))
                .unwrap_or_default()
                .to_string()
        };
        let flag = |col: &Option<StringChunked>, idx: usize| -> bool {
            col.as_ref()
                .and_then(|c| c.get(idx))
                .map_or(false, |s| s.trim().eq_ignore_ascii_case("true"))
        };
        let degrees = |col: &Option<Float64Chunked>, idx: usize| -> f64 {
            col.as_ref().and_then(|c| c.get(idx)).unwrap_or(f64::NAN)
        };

        let mut records = Vec::with_capacity(df.height());
        let mut skipped = 0usize;

        for idx in 0..df.height() {
            let species_id = match species.get(idx).map(str::trim) {
                Some(s) if !s.is_empty() => s.to_string(),
                _ => {
                    skipped += 1;
                    continue;
                }
            };
            let Some(observed_at) = observed.get(idx).and_then(parse_timestamp) else {
                skipped += 1;
                continue;
            };

            records.push(ObservationRecord {
                species_id,
                common_name: text(&common, idx),
                scientific_name: text(&scientific, idx),
                location_id: text(&loc_id, idx),
                location_name: text(&loc_name, idx),
                observed_at,
                count: how_many
                    .as_ref()
                    .and_then(|c| c.get(idx))
                    .map_or(BirdCount::Unknown, BirdCount::parse),
                latitude: degrees(&lat, idx),
                longitude: degrees(&lng, idx),
                valid: flag(&valid, idx),
                reviewed: flag(&reviewed, idx),
                location_private: flag(&private, idx),
            });
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} observation rows without species code or timestamp", skipped);
        }

        Ok(Self { records })
    }
}

/// Column cast to String, or None when the column is absent
fn string_column(df: &DataFrame, name: &str) -> Result<Option<StringChunked>> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };
    let cast = column
        .cast(&DataType::String)
        .with_context(|| format!("Column '{}' cannot be read as text", name))?;
    let chunked = cast
        .str()
        .with_context(|| format!("Column '{}' is not string type", name))?
        .clone();
    Ok(Some(chunked))
}

/// Column cast to Float64, or None when the column is absent
fn float_column(df: &DataFrame, name: &str) -> Result<Option<Float64Chunked>> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };
    let cast = column
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' cannot be read as a number", name))?;
    let chunked = cast
        .f64()
        .with_context(|| format!("Column '{}' is not float type", name))?
        .clone();
    Ok(Some(chunked))
}

/// Parse a JSON array of hotspots
pub fn hotspots_from_json_str(json: &str) -> Result<Vec<Hotspot>> {
    serde_json::from_str(json).with_context(|| "Failed to parse hotspots JSON")
}

/// Load a JSON array of hotspots from disk
pub fn load_hotspots_json(path: &Path) -> Result<Vec<Hotspot>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read hotspots file: {:?}", path))?;
    hotspots_from_json_str(&contents)
        .with_context(|| format!("Invalid hotspots file: {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bird_count_parse() {
        assert_eq!(BirdCount::parse("12"), BirdCount::Exact(12));
        assert_eq!(BirdCount::parse("X"), BirdCount::Uncounted);
        assert_eq!(BirdCount::parse("x"), BirdCount::Uncounted);
        assert_eq!(BirdCount::parse(""), BirdCount::Unknown);
        assert_eq!(BirdCount::parse("0"), BirdCount::Unknown);
        assert_eq!(BirdCount::parse("-3"), BirdCount::Unknown);
        assert_eq!(BirdCount::parse("many"), BirdCount::Unknown);
    }

    #[test]
    fn test_observation_json() {
        let json = r#"[
            {"speciesCode": "amerob", "comName": "American Robin", "sciName": "Turdus migratorius",
             "locId": "L1", "locName": "Park", "obsDt": "2024-05-01 08:30", "howMany": 3,
             "lat": 40.1, "lng": -75.2, "obsValid": true, "obsReviewed": false, "locationPrivate": false},
            {"speciesCode": "norcar", "comName": "Northern Cardinal", "sciName": "Cardinalis cardinalis",
             "locId": "L2", "locName": "Yard", "obsDt": "2024-05-02", "howMany": "X",
             "lat": 40.2, "lng": -75.3, "obsValid": false},
            {"speciesCode": "blujay", "obsDt": "2024-05-03 10:00"}
        ]"#;

        let batch = ObservationBatch::from_json_str(json).unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.records[0].count, BirdCount::Exact(3));
        assert_eq!(batch.records[1].count, BirdCount::Uncounted);
        assert_eq!(
            batch.records[1].observed_at,
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap().and_hms_opt(0, 0, 0).unwrap()
        );
        // Missing count and coordinates degrade instead of failing
        assert_eq!(batch.records[2].count, BirdCount::Unknown);
        assert!(batch.records[2].coordinate().is_missing());

        assert_eq!(batch.valid_only().len(), 1);
    }

    #[test]
    fn test_structured_count_is_unknown() {
        let json = r#"[
            {"speciesCode": "amerob", "obsDt": "2024-06-15 08:00", "howMany": {"min": 2}},
            {"speciesCode": "amerob", "obsDt": "2024-06-15 09:00", "howMany": [3]},
            {"speciesCode": "amerob", "obsDt": "2024-06-15 10:00", "howMany": true}
        ]"#;
        let batch = ObservationBatch::from_json_str(json).unwrap();
        assert!(batch.records.iter().all(|r| r.count == BirdCount::Unknown));
    }

    #[test]
    fn test_bad_timestamp_is_error() {
        let json = r#"[{"speciesCode": "amerob", "obsDt": "yesterday"}]"#;
        assert!(ObservationBatch::from_json_str(json).is_err());
    }

    #[test]
    fn test_hotspot_json() {
        let json = r#"[
            {"locId": "L1", "locName": "Marsh", "countryCode": "US", "subnational1Code": "US-PA",
             "lat": 40.0, "lng": -75.0, "latestObsDt": "2024-04-30 07:15", "numSpeciesAllTime": 212},
            {"locId": "L2", "locName": "Lot", "lat": 40.5, "lng": -75.5}
        ]"#;

        let hotspots = hotspots_from_json_str(json).unwrap();
        assert_eq!(hotspots[0].all_time_species_count, Some(212));
        assert!(hotspots[0].latest_observation_date.is_some());
        assert_eq!(hotspots[1].all_time_species_count, None);
        assert_eq!(hotspots[1].latest_observation_date, None);
    }

    #[test]
    fn test_load_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "speciesCode,comName,sciName,locId,locName,obsDt,howMany,lat,lng,obsValid,obsReviewed,locationPrivate").unwrap();
        writeln!(file, "amerob,American Robin,Turdus migratorius,L1,Park,2024-05-01 08:30,4,40.1,-75.2,true,false,false").unwrap();
        writeln!(file, "norcar,Northern Cardinal,Cardinalis cardinalis,L2,Yard,2024-05-02 09:00,X,40.2,-75.3,true,true,false").unwrap();
        writeln!(file, ",Unknown,Unknown,L3,Field,2024-05-02 09:00,1,40.3,-75.4,true,false,false").unwrap();
        file.flush().unwrap();

        let batch = ObservationBatch::load_csv(file.path()).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.records[0].species_id, "amerob");
        assert_eq!(batch.records[0].count, BirdCount::Exact(4));
        assert_eq!(batch.records[1].count, BirdCount::Uncounted);
        assert!(batch.records[1].reviewed);
        assert!((batch.records[0].latitude - 40.1).abs() < 1e-9);
    }

    #[test]
    fn test_zero_coordinate_is_missing() {
        assert!(Coordinate::new(0.0, 0.0).is_missing());
        assert!(Coordinate::new(f64::NAN, 10.0).is_missing());
        assert!(!Coordinate::new(0.0, 10.0).is_missing());
    }
}
