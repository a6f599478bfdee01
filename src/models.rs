//! Request and response bodies for the HTTP surface.

use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::model::ApplicantProfile;

/// Body of `POST /predict`. Every field is optional; absent fields fall
/// back to 0 for the numeric ones and "" for the text ones.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PredictRequest {
    pub age: Option<LooseInt>,
    pub gender: Option<String>,
    pub occupation: Option<String>,
    pub income: Option<LooseInt>,
    pub location: Option<String>,
}

/// An integer that clients may send as a JSON number or a numeric string.
/// Floats truncate toward zero; non-numeric strings are a client error.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LooseInt {
    Int(i64),
    Float(f64),
    Text(String),
}

impl LooseInt {
    pub fn coerce(&self, field: &'static str) -> Result<i64, ApiError> {
        match self {
            LooseInt::Int(value) => Ok(*value),
            LooseInt::Float(value) if value.is_finite() => Ok(*value as i64),
            LooseInt::Float(value) => Err(ApiError::Validation {
                field,
                reason: format!("{value} is not a finite number"),
            }),
            LooseInt::Text(text) => text.trim().parse::<i64>().map_err(|_| ApiError::Validation {
                field,
                reason: format!("`{text}` is not an integer"),
            }),
        }
    }
}

impl PredictRequest {
    /// Apply defaults, coerce the numeric fields and split `location` into
    /// its type and region halves (first dash wins; no dash means the
    /// whole value is the type and the region is empty).
    pub fn into_profile(self) -> Result<ApplicantProfile, ApiError> {
        let age = match &self.age {
            Some(value) => value.coerce("age")?,
            None => 0,
        };
        let income = match &self.income {
            Some(value) => value.coerce("income")?,
            None => 0,
        };
        let location = self.location.unwrap_or_default();
        let (location_type, location_region) = split_location(&location);
        Ok(ApplicantProfile {
            age,
            gender: self.gender.unwrap_or_default(),
            occupation: self.occupation.unwrap_or_default(),
            income,
            location_type,
            location_region,
        })
    }
}

pub fn split_location(location: &str) -> (String, String) {
    match location.split_once('-') {
        Some((kind, region)) => (kind.to_string(), region.to_string()),
        None => (location.to_string(), String::new()),
    }
}

/// One ranked entry of the prediction response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeScore {
    pub scheme: String,
    pub probability: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub predicted_scheme: String,
    pub top_schemes: Vec<SchemeScore>,
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SchemesResponse {
    pub schemes: Vec<String>,
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LocationsResponse {
    pub locations: Vec<String>,
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_defaults() {
        let request: PredictRequest = serde_json::from_str("{}").unwrap();
        let profile = request.into_profile().unwrap();
        assert_eq!(profile.age, 0);
        assert_eq!(profile.income, 0);
        assert_eq!(profile.gender, "");
        assert_eq!(profile.occupation, "");
        assert_eq!(profile.location_type, "");
        assert_eq!(profile.location_region, "");
    }

    #[test]
    fn coerces_numbers_and_numeric_strings() {
        let request: PredictRequest =
            serde_json::from_str(r#"{"age": 30, "income": "50000"}"#).unwrap();
        let profile = request.into_profile().unwrap();
        assert_eq!(profile.age, 30);
        assert_eq!(profile.income, 50000);
    }

    #[test]
    fn float_age_truncates() {
        let request: PredictRequest = serde_json::from_str(r#"{"age": 30.9}"#).unwrap();
        assert_eq!(request.into_profile().unwrap().age, 30);
    }

    #[test]
    fn padded_numeric_string_parses() {
        assert_eq!(LooseInt::Text(" 42 ".into()).coerce("age").unwrap(), 42);
    }

    #[test]
    fn non_numeric_age_is_validation_error() {
        let request: PredictRequest = serde_json::from_str(r#"{"age": "abc"}"#).unwrap();
        let err = request.into_profile().unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "age", .. }));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn float_string_is_validation_error() {
        assert!(LooseInt::Text("30.5".into()).coerce("income").is_err());
    }

    #[test]
    fn location_splits_on_first_dash() {
        assert_eq!(
            split_location("Rural-Bihar"),
            ("Rural".to_string(), "Bihar".to_string())
        );
        assert_eq!(
            split_location("Semi-Urban-Pune"),
            ("Semi".to_string(), "Urban-Pune".to_string())
        );
    }

    #[test]
    fn dashless_location_has_empty_region() {
        assert_eq!(
            split_location("Mumbai"),
            ("Mumbai".to_string(), String::new())
        );
        assert_eq!(split_location(""), (String::new(), String::new()));
    }
}
