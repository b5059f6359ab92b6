use std::collections::BTreeMap;

use chrono::NaiveDateTime;

/// Breed select value that routes the freeform breed field. The form shows
/// a fixed list plus this sentinel entry.
pub const OTHER_BREED: &str = "other";

/// Field names and values exactly as they arrived in the multipart body.
pub type FormFields = BTreeMap<String, String>;

/// Breed as an explicit choice instead of the sentinel-string pattern:
/// either a known selection from the form's list, or the user's own words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Breed {
    Known(String),
    Other(String),
}

impl Breed {
    /// The string persisted on the report row.
    pub fn into_stored(self) -> String {
        match self {
            Breed::Known(name) | Breed::Other(name) => name,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("Please describe the breed when selecting \"other\"")]
    MissingOtherBreed,
    #[error("Invalid date/time format, please use the date-time picker")]
    BadTimestamp,
}

/// A lost-report submission that passed field validation.
#[derive(Debug, Clone)]
pub struct LostSubmission {
    pub pet_type: String,
    pub breed: Breed,
    pub color: String,
    pub gender: String,
    pub age: Option<String>,
    pub features: String,
    pub lost_time: NaiveDateTime,
    pub lost_location_text: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact_info: String,
    /// True when coordinate text was present but unparseable. The record
    /// still saves with no map pin; the user just gets told.
    pub coords_ignored: bool,
}

/// A found-report submission that passed field validation.
#[derive(Debug, Clone)]
pub struct FoundSubmission {
    pub pet_type: String,
    pub breed: Option<Breed>,
    pub color: String,
    pub gender: String,
    pub features: String,
    pub found_time: NaiveDateTime,
    pub found_location_text: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact_info: String,
    pub coords_ignored: bool,
}

const LOST_REQUIRED: &[&str] = &[
    "pet_type",
    "breed",
    "color",
    "gender",
    "features",
    "lost_time",
    "lost_location_text",
    "contact_info",
];

const FOUND_REQUIRED: &[&str] = &[
    "pet_type",
    "color",
    "gender",
    "features",
    "found_time",
    "found_location_text",
    "contact_info",
];

pub fn validate_lost(fields: &FormFields) -> Result<LostSubmission, FormError> {
    check_required(fields, LOST_REQUIRED)?;

    let breed = resolve_breed(fields)?;
    let lost_time = parse_timestamp(get(fields, "lost_time"))?;
    let (latitude, longitude, coords_ignored) = parse_coordinates(fields);

    Ok(LostSubmission {
        pet_type: get(fields, "pet_type").to_string(),
        breed,
        color: get(fields, "color").to_string(),
        gender: get(fields, "gender").to_string(),
        age: optional(fields, "age"),
        features: get(fields, "features").to_string(),
        lost_time,
        lost_location_text: get(fields, "lost_location_text").to_string(),
        latitude,
        longitude,
        contact_info: get(fields, "contact_info").to_string(),
        coords_ignored,
    })
}

pub fn validate_found(fields: &FormFields) -> Result<FoundSubmission, FormError> {
    check_required(fields, FOUND_REQUIRED)?;

    // Breed is optional on found reports — the finder often cannot tell —
    // but a filled-in value still goes through the sentinel resolution.
    let breed = match optional(fields, "breed") {
        Some(_) => Some(resolve_breed(fields)?),
        None => None,
    };
    let found_time = parse_timestamp(get(fields, "found_time"))?;
    let (latitude, longitude, coords_ignored) = parse_coordinates(fields);

    Ok(FoundSubmission {
        pet_type: get(fields, "pet_type").to_string(),
        breed,
        color: get(fields, "color").to_string(),
        gender: get(fields, "gender").to_string(),
        features: get(fields, "features").to_string(),
        found_time,
        found_location_text: get(fields, "found_location_text").to_string(),
        latitude,
        longitude,
        contact_info: get(fields, "contact_info").to_string(),
        coords_ignored,
    })
}

fn get<'a>(fields: &'a FormFields, key: &str) -> &'a str {
    fields.get(key).map(String::as_str).unwrap_or("").trim()
}

fn optional(fields: &FormFields, key: &str) -> Option<String> {
    let value = get(fields, key);
    (!value.is_empty()).then(|| value.to_string())
}

/// Every missing field is reported at once, not just the first.
fn check_required(fields: &FormFields, required: &[&str]) -> Result<(), FormError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|&&name| get(fields, name).is_empty())
        .map(|&name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(FormError::MissingFields(missing))
    }
}

fn resolve_breed(fields: &FormFields) -> Result<Breed, FormError> {
    let selection = get(fields, "breed");
    if selection == OTHER_BREED {
        match optional(fields, "other_breed") {
            Some(text) => Ok(Breed::Other(text)),
            None => Err(FormError::MissingOtherBreed),
        }
    } else {
        Ok(Breed::Known(selection.to_string()))
    }
}

/// Accepts the browser's `datetime-local` value with or without seconds.
fn parse_timestamp(value: &str) -> Result<NaiveDateTime, FormError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| FormError::BadTimestamp)
}

/// Coordinates are best-effort: empty input means no map pin, unparseable
/// input means no map pin plus a notice to the user.
fn parse_coordinates(fields: &FormFields) -> (Option<f64>, Option<f64>, bool) {
    let mut ignored = false;
    let mut parse = |key: &str| -> Option<f64> {
        let raw = get(fields, key);
        if raw.is_empty() {
            return None;
        }
        match raw.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                ignored = true;
                None
            }
        }
    };
    let latitude = parse("latitude");
    let longitude = parse("longitude");
    (latitude, longitude, ignored)
}
