use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use chart::{ChartData, PriceBucket, RatingPoint};
pub use intent::{Intent, PricePreference};
pub use item::{Catalog, CatalogStats, Category, Item, ScoredItem};

mod chart;
mod intent;
mod item;

/// Request structure for trip recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Free-text description of what the traveller is looking for
    pub query: String,
    /// Optional number of recommendations to return; non-positive values yield none
    #[serde(default)]
    pub top_k: Option<i64>,
}

/// Request structure for intent extraction only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRequest {
    pub query: String,
}

/// How a recommendation request concluded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// At least one item survived scoring
    Found,
    /// The request stated constraints and no item met any of them
    NoMatch,
    /// The selected category holds no items
    EmptyCatalog,
}

/// Response structure for trip recommendations
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse<'a> {
    pub request_id: Uuid,
    pub intent: Intent,
    pub status: MatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub resolved_in_ms: u64,
    pub recommendations: Vec<ScoredItem<'a>>,
    pub charts: ChartData,
}

/// Health check response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Current timestamp in RFC3339 format
    pub timestamp: String,
}
