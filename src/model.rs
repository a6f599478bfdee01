//! Loading and inference for the pre-trained scheme classifier.
//!
//! The artifact is a single JSON file produced by the (out-of-scope)
//! training pipeline: a multinomial linear classifier over six applicant
//! columns, with string class labels and the encoding of every column
//! spelled out so the service can build feature rows that match what the
//! model was trained on.

use ndarray::{Array1, Array2};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::errors::ApiError;

/// Fatal artifact problems. Anything in here means the process must not
/// start serving traffic.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),
    #[error("model file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model artifact is invalid: {0}")]
    Invalid(String),
}

/// One applicant profile, already coerced and split at the request
/// boundary. Field order mirrors the training frame: age, gender,
/// occupation, income, location_type, location_region.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicantProfile {
    pub age: i64,
    pub gender: String,
    pub occupation: String,
    pub income: i64,
    pub location_type: String,
    pub location_region: String,
}

/// A trained input column and how to encode it.
#[derive(Debug, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(flatten)]
    pub kind: ColumnKind,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnKind {
    /// Standardized scalar: encodes to `(value - mean) / scale`.
    Numeric { mean: f64, scale: f64 },
    /// One-hot over `categories`; a value outside the list encodes to all
    /// zeros, matching how the training pipeline ignores unknown levels.
    Categorical { categories: Vec<String> },
}

impl ColumnKind {
    fn width(&self) -> usize {
        match self {
            ColumnKind::Numeric { .. } => 1,
            ColumnKind::Categorical { categories } => categories.len(),
        }
    }
}

/// On-disk artifact layout.
#[derive(Debug, Deserialize)]
struct ModelFile {
    #[serde(default)]
    format_version: u32,
    classes: Vec<String>,
    columns: Vec<Column>,
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

const FORMAT_VERSION: u32 = 1;

/// The loaded classifier. Immutable after construction; safe to share
/// across workers behind `web::Data`.
#[derive(Debug)]
pub struct SchemeModel {
    classes: Vec<String>,
    columns: Vec<Column>,
    coefficients: Array2<f64>,
    intercepts: Array1<f64>,
}

impl SchemeModel {
    /// Load and validate the artifact at `path`.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parse and validate an artifact from its JSON text.
    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        let file: ModelFile = serde_json::from_str(raw)?;
        if file.format_version > FORMAT_VERSION {
            return Err(ModelError::Invalid(format!(
                "unsupported format_version {}",
                file.format_version
            )));
        }
        if file.classes.is_empty() {
            return Err(ModelError::Invalid("no classes".into()));
        }
        if file.columns.is_empty() {
            return Err(ModelError::Invalid("no input columns".into()));
        }
        for column in &file.columns {
            match &column.kind {
                ColumnKind::Numeric { scale, .. } if *scale <= 0.0 => {
                    return Err(ModelError::Invalid(format!(
                        "column `{}` has non-positive scale",
                        column.name
                    )));
                }
                ColumnKind::Categorical { categories } if categories.is_empty() => {
                    return Err(ModelError::Invalid(format!(
                        "column `{}` has no categories",
                        column.name
                    )));
                }
                _ => {}
            }
        }

        let n_classes = file.classes.len();
        let n_features: usize = file.columns.iter().map(|c| c.kind.width()).sum();
        if file.coefficients.len() != n_classes {
            return Err(ModelError::Invalid(format!(
                "expected {} coefficient rows, found {}",
                n_classes,
                file.coefficients.len()
            )));
        }
        if let Some(row) = file.coefficients.iter().find(|r| r.len() != n_features) {
            return Err(ModelError::Invalid(format!(
                "coefficient row has {} entries, expected {}",
                row.len(),
                n_features
            )));
        }
        if file.intercepts.len() != n_classes {
            return Err(ModelError::Invalid(format!(
                "expected {} intercepts, found {}",
                n_classes,
                file.intercepts.len()
            )));
        }

        let flat: Vec<f64> = file.coefficients.into_iter().flatten().collect();
        let coefficients = Array2::from_shape_vec((n_classes, n_features), flat)
            .map_err(|e| ModelError::Invalid(e.to_string()))?;

        Ok(SchemeModel {
            classes: file.classes,
            columns: file.columns,
            coefficients,
            intercepts: Array1::from_vec(file.intercepts),
        })
    }

    /// Class labels in the model's native order; probability vectors align
    /// with this list by index.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Best label for the profile. Argmax of the probability
    /// distribution, ties resolving to the lowest class index.
    pub fn predict(&self, profile: &ApplicantProfile) -> Result<&str, ApiError> {
        let probabilities = self.predict_proba(profile)?;
        let best = probabilities
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(index, _)| index)
            .unwrap_or(0);
        Ok(&self.classes[best])
    }

    /// Full probability distribution, one entry per class.
    pub fn predict_proba(&self, profile: &ApplicantProfile) -> Result<Vec<f64>, ApiError> {
        let features = self.encode(profile)?;
        let logits = self.coefficients.dot(&features) + &self.intercepts;
        // Shift by the max so exp stays finite.
        let max = logits.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
        let exp = logits.mapv(|v| (v - max).exp());
        let sum = exp.sum();
        Ok(exp.mapv(|v| v / sum).to_vec())
    }

    fn encode(&self, profile: &ApplicantProfile) -> Result<Array1<f64>, ApiError> {
        let mut features = Vec::with_capacity(self.coefficients.ncols());
        for column in &self.columns {
            match &column.kind {
                ColumnKind::Numeric { mean, scale } => {
                    let value = numeric_field(profile, &column.name)?;
                    features.push((value as f64 - mean) / scale);
                }
                ColumnKind::Categorical { categories } => {
                    let value = text_field(profile, &column.name)?;
                    for category in categories {
                        features.push(if category == value { 1.0 } else { 0.0 });
                    }
                }
            }
        }
        Ok(Array1::from_vec(features))
    }
}

fn numeric_field(profile: &ApplicantProfile, name: &str) -> Result<i64, ApiError> {
    match name {
        "age" => Ok(profile.age),
        "income" => Ok(profile.income),
        "gender" | "occupation" | "location_type" | "location_region" => {
            Err(ApiError::SchemaMismatch(format!(
                "model treats `{name}` as numeric but the request field is text"
            )))
        }
        _ => Err(unknown_column(name)),
    }
}

fn text_field<'a>(profile: &'a ApplicantProfile, name: &str) -> Result<&'a str, ApiError> {
    match name {
        "gender" => Ok(&profile.gender),
        "occupation" => Ok(&profile.occupation),
        "location_type" => Ok(&profile.location_type),
        "location_region" => Ok(&profile.location_region),
        "age" | "income" => Err(ApiError::SchemaMismatch(format!(
            "model treats `{name}` as categorical but the request field is numeric"
        ))),
        _ => Err(unknown_column(name)),
    }
}

fn unknown_column(name: &str) -> ApiError {
    ApiError::SchemaMismatch(format!("model expects unknown input column `{name}`"))
}
