use crate::models::{ChartData, PriceBucket, RatingPoint, ScoredItem};
use crate::services::recommendation::round1;

/// Upper bounds (inclusive) and labels; a price above every bound falls in `overflow`.
struct BucketScheme {
    free: &'static str,
    bounded: &'static [(f64, &'static str)],
    overflow: &'static str,
}

const COMPACT: BucketScheme = BucketScheme {
    free: "免费",
    bounded: &[(100.0, "100元以下")],
    overflow: "100元以上",
};

const DETAILED: BucketScheme = BucketScheme {
    free: "免费",
    bounded: &[(100.0, "100元以下"), (300.0, "100-300元")],
    overflow: "300元以上",
};

impl BucketScheme {
    fn label_for(&self, price: f64) -> &'static str {
        if price == 0.0 {
            return self.free;
        }
        self.bounded
            .iter()
            .find(|(bound, _)| price <= *bound)
            .map_or(self.overflow, |(_, label)| *label)
    }

    fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.free)
            .chain(self.bounded.iter().map(|(_, label)| *label))
            .chain(std::iter::once(self.overflow))
    }

    /// Counts prices per bucket in display order, omitting empty buckets.
    fn distribute(&self, prices: &[f64]) -> Vec<PriceBucket> {
        let total = prices.len();
        self.labels()
            .filter_map(|label| {
                let count = prices
                    .iter()
                    .filter(|price| self.label_for(**price) == label)
                    .count();
                (count > 0).then(|| PriceBucket {
                    label: label.to_string(),
                    count,
                    percentage: round1(count as f64 * 100.0 / total as f64),
                })
            })
            .collect()
    }
}

/// Builds rating and price-distribution series for a ranked result list.
pub fn chart_data(results: &[ScoredItem<'_>]) -> ChartData {
    let prices: Vec<f64> = results.iter().map(|r| r.item.price).collect();

    ChartData {
        ratings: results
            .iter()
            .map(|r| RatingPoint {
                name: r.item.name.clone(),
                score: r.item.score,
            })
            .collect(),
        price_distribution: COMPACT.distribute(&prices),
        price_distribution_detailed: DETAILED.distribute(&prices),
    }
}
