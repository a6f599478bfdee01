//! HTTP handlers for the four endpoints.

use actix_web::{web, HttpResponse, Responder};
use std::cmp::Ordering;

use crate::errors::ApiError;
use crate::locations::LOCATIONS;
use crate::model::SchemeModel;
use crate::models::{
    LocationsResponse, PredictRequest, PredictResponse, SchemeScore, SchemesResponse,
};

/// How many ranked schemes a prediction response carries at most.
const TOP_K: usize = 3;

/// Route table shared by the binary and the integration tests.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(home)))
        .service(web::resource("/predict").route(web::post().to(predict)))
        .service(web::resource("/schemes").route(web::get().to(schemes)))
        .service(web::resource("/locations").route(web::get().to(locations)));
}

pub async fn home() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Government Scheme Predictor API is running!")
}

pub async fn predict(
    model: web::Data<SchemeModel>,
    payload: web::Json<PredictRequest>,
) -> Result<HttpResponse, ApiError> {
    let profile = payload.into_inner().into_profile()?;
    let predicted_scheme = model.predict(&profile)?.to_string();
    let probabilities = model.predict_proba(&profile)?;
    let top_schemes = top_schemes(model.classes(), &probabilities, TOP_K);
    Ok(HttpResponse::Ok().json(PredictResponse {
        predicted_scheme,
        top_schemes,
        success: true,
    }))
}

pub async fn schemes(model: web::Data<SchemeModel>) -> impl Responder {
    HttpResponse::Ok().json(SchemesResponse {
        schemes: model.classes().to_vec(),
        success: true,
    })
}

pub async fn locations() -> impl Responder {
    HttpResponse::Ok().json(LocationsResponse {
        locations: LOCATIONS.iter().map(|s| s.to_string()).collect(),
        success: true,
    })
}

/// Rank classes by probability descending and keep the first `k`. The
/// sort is stable on the probability alone, so ties keep the model's
/// class order.
fn top_schemes(classes: &[String], probabilities: &[f64], k: usize) -> Vec<SchemeScore> {
    let mut ranked: Vec<usize> = (0..probabilities.len()).collect();
    ranked.sort_by(|&a, &b| {
        probabilities[b]
            .partial_cmp(&probabilities[a])
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(k);
    ranked
        .into_iter()
        .map(|index| SchemeScore {
            scheme: classes[index].clone(),
            probability: probabilities[index],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ranks_descending_and_truncates() {
        let classes = classes(&["A", "B", "C", "D"]);
        let top = top_schemes(&classes, &[0.1, 0.4, 0.2, 0.3], 3);
        let names: Vec<&str> = top.iter().map(|s| s.scheme.as_str()).collect();
        assert_eq!(names, ["B", "D", "C"]);
        assert!(top.windows(2).all(|w| w[0].probability >= w[1].probability));
    }

    #[test]
    fn ties_keep_class_order() {
        let classes = classes(&["A", "B", "C"]);
        let top = top_schemes(&classes, &[0.25, 0.5, 0.25], 3);
        let names: Vec<&str> = top.iter().map(|s| s.scheme.as_str()).collect();
        assert_eq!(names, ["B", "A", "C"]);
    }

    #[test]
    fn fewer_classes_than_k() {
        let classes = classes(&["A", "B"]);
        assert_eq!(top_schemes(&classes, &[0.6, 0.4], 3).len(), 2);
    }
}
