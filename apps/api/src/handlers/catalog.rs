use crate::{error::ApiError, models::Category, services::RecommendationService};
use actix_web::{web, HttpResponse};
use log::info;
use serde_json::json;

pub fn catalog_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/catalog/stats").route(web::get().to(catalog_stats)))
        .service(web::resource("/catalog/reload").route(web::post().to(reload_catalog)))
        .service(web::resource("/catalog/{category}").route(web::get().to(list_category)));
}

/// Item counts per category
pub async fn catalog_stats(
    recommendation_service: web::Data<RecommendationService>,
) -> Result<HttpResponse, ApiError> {
    let stats = recommendation_service.catalog().stats();
    Ok(HttpResponse::Ok().json(stats))
}

/// All items of one category, in catalog order
pub async fn list_category(
    path: web::Path<String>,
    recommendation_service: web::Data<RecommendationService>,
) -> Result<HttpResponse, ApiError> {
    let category: Category = path
        .into_inner()
        .parse()
        .map_err(ApiError::NotFound)?;

    let catalog = recommendation_service.catalog();
    let items = catalog.items(category).unwrap_or_default();

    Ok(HttpResponse::Ok().json(json!({
        "category": category,
        "label": category.label(),
        "items": items,
    })))
}

/// Re-read the catalog document and start serving the new snapshot
pub async fn reload_catalog(
    recommendation_service: web::Data<RecommendationService>,
) -> Result<HttpResponse, ApiError> {
    info!("Reloading catalog...");
    let stats = recommendation_service.store().reload();

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "catalog": stats,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Catalog, Item};
    use crate::routes::api_routes;
    use crate::services::{CatalogStore, IntentResolver};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;
    use std::io::Write;
    use std::sync::Arc;

    fn restaurant(name: &str) -> Item {
        Item {
            name: name.to_string(),
            region: "集宁区".to_string(),
            category: Category::Food,
            price: 45.0,
            score: 4.4,
            tags: vec!["烧麦".to_string()],
            address: "集宁区新华街".to_string(),
        }
    }

    fn service_with(store: CatalogStore) -> web::Data<RecommendationService> {
        web::Data::new(RecommendationService::new(
            IntentResolver::new(vec![]),
            Arc::new(store),
            5,
        ))
    }

    #[actix_web::test]
    async fn test_stats_and_listing() {
        let catalog = Catalog::new().with_category(Category::Food, vec![restaurant("老绥远烧麦")]);
        let service = service_with(CatalogStore::from_catalog("unused.json", catalog));
        let app = test::init_service(App::new().app_data(service).service(api_routes())).await;

        let req = test::TestRequest::get().uri("/api/catalog/stats").to_request();
        let stats: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats["food"], 1);
        assert_eq!(stats["scenic_spots"], 0);

        let req = test::TestRequest::get().uri("/api/catalog/food").to_request();
        let listing: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listing["label"], "美食");
        assert_eq!(listing["items"][0]["name"], "老绥远烧麦");

        let req = test::TestRequest::get().uri("/api/catalog/museums").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_reload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"homestay\": []}").unwrap();
        let service = service_with(CatalogStore::load(file.path()));
        let app = test::init_service(App::new().app_data(service).service(api_routes())).await;

        std::fs::write(
            file.path(),
            r#"{"homestay": [{"name": "草原人家", "region": "察右中旗", "price": 180, "score": 4.6}]}"#,
        )
        .unwrap();

        let req = test::TestRequest::post().uri("/api/catalog/reload").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["catalog"]["homestay"], 1);

        let req = test::TestRequest::get().uri("/api/catalog/homestay").to_request();
        let listing: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listing["items"][0]["category"], "homestay");
    }
}
