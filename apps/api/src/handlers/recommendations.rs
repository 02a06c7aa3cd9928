use crate::{
    error::ApiError,
    models::{IntentRequest, RecommendationRequest, RecommendationResponse},
    services::{insights::chart_data, RecommendationService},
};
use actix_web::{
    web::{self, Json},
    HttpResponse,
};
use log::info;
use uuid::Uuid;

pub fn recommendations_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/recommendations").route(web::post().to(get_recommendations)))
        .service(web::resource("/intent").route(web::post().to(resolve_intent)));
}

/// Rank catalog items against a free-text request
pub async fn get_recommendations(
    request: Json<RecommendationRequest>,
    recommendation_service: web::Data<RecommendationService>,
) -> Result<HttpResponse, ApiError> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(ApiError::InvalidInput("Query cannot be empty".to_string()));
    }

    let request_id = Uuid::new_v4();
    info!("[{}] Recommendation request: '{}'", request_id, query);

    // Non-positive counts ask for nothing
    let top_n = request.top_k.map(|k| usize::try_from(k).unwrap_or(0));

    let catalog = recommendation_service.catalog();
    let outcome = recommendation_service
        .recommend(&catalog, query, top_n)
        .await;

    let message = outcome.message();
    let response = RecommendationResponse {
        request_id,
        charts: chart_data(&outcome.results),
        intent: outcome.intent,
        status: outcome.status,
        message,
        resolved_in_ms: outcome.resolved_in.as_millis() as u64,
        recommendations: outcome.results,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Resolve a free-text request into a structured intent without ranking
pub async fn resolve_intent(
    request: Json<IntentRequest>,
    recommendation_service: web::Data<RecommendationService>,
) -> Result<HttpResponse, ApiError> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(ApiError::InvalidInput("Query cannot be empty".to_string()));
    }

    let intent = recommendation_service.resolve_intent(query).await;
    Ok(HttpResponse::Ok().json(intent))
}
