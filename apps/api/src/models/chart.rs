use serde::{Deserialize, Serialize};

/// One bar of the rating comparison chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingPoint {
    pub name: String,
    pub score: f64,
}

/// One slice of a price distribution pie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBucket {
    pub label: String,
    pub count: usize,
    pub percentage: f64,
}

/// Chart-ready series derived from a ranked result list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub ratings: Vec<RatingPoint>,
    /// free / up to 100 / above 100
    pub price_distribution: Vec<PriceBucket>,
    /// free / up to 100 / 100-300 / above 300
    pub price_distribution_detailed: Vec<PriceBucket>,
}
