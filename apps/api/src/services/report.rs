use crate::models::{RatingPoint, ScoredItem};

pub const NO_MATCH_HINT: &str = "抱歉，没有找到匹配的结果，换个说法试试？";

/// Plain-text lines for a ranked list, two per item.
pub fn render_lines(results: &[ScoredItem<'_>]) -> Vec<String> {
    if results.is_empty() {
        return vec![NO_MATCH_HINT.to_string()];
    }

    results
        .iter()
        .enumerate()
        .flat_map(|(idx, scored)| {
            let item = scored.item;
            [
                format!(
                    "{}. {} | {} | 评分:{} | ¥{}",
                    idx + 1,
                    item.name,
                    item.region,
                    item.score,
                    item.price
                ),
                format!("   标签: {}", item.tags.join("、")),
            ]
        })
        .collect()
}

/// Text bar chart of base ratings, one block per quarter point, names padded to align.
pub fn rating_bars(ratings: &[RatingPoint]) -> Vec<String> {
    let width = ratings
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0);

    ratings
        .iter()
        .map(|rating| {
            let padding = " ".repeat(width - rating.name.chars().count());
            let bar = "█".repeat((rating.score.max(0.0) * 4.0).round() as usize);
            format!("{}{} {} {:.1}", rating.name, padding, bar, rating.score)
        })
        .collect()
}
