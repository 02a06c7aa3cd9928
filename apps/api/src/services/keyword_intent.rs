use crate::models::{Category, Intent, PricePreference};
use tracing::debug;

/// Substring → canonical district name, checked in order; first hit wins.
const REGIONS: &[(&str, &str)] = &[
    ("集宁", "集宁区"),
    ("察右后", "察右后旗"),
    ("察右中", "察右中旗"),
    ("四子王", "四子王旗"),
    ("兴和", "兴和县"),
];

const FOOD_TERMS: &[&str] = &["吃", "饭", "餐", "肉", "面"];
const LODGING_TERMS: &[&str] = &["住", "酒店", "民宿", "房"];

/// Tag keywords in scan order. Price keywords are scanned too, so when
/// several appear the last one in this list decides the price.
pub const TAG_KEYWORDS: &[&str] = &["火山", "草原", "亲子", "拍照", "自驾", "免费", "便宜", "贵"];

/// Deterministic keyword matcher used when no model-backed extraction is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordIntentStrategy;

impl KeywordIntentStrategy {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> Intent {
        let region = REGIONS
            .iter()
            .find(|(needle, _)| text.contains(needle))
            .map(|(_, canonical)| canonical.to_string())
            .unwrap_or_default();

        let category = if FOOD_TERMS.iter().any(|t| text.contains(t)) {
            Category::Food
        } else if LODGING_TERMS.iter().any(|t| text.contains(t)) {
            Category::Homestay
        } else {
            Category::ScenicSpots
        };

        let mut tags = Vec::new();
        let mut price = PricePreference::Unspecified;
        for keyword in TAG_KEYWORDS.iter().filter(|k| text.contains(*k)) {
            tags.push(keyword.to_string());
            match *keyword {
                "免费" => price = PricePreference::Free,
                "便宜" => price = PricePreference::Budget,
                "贵" => price = PricePreference::Premium,
                _ => {}
            }
        }

        let intent = Intent {
            region,
            category,
            price,
            tags,
        };
        debug!(?intent, "Keyword extraction result");
        intent
    }
}
