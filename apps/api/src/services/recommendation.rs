use crate::models::{Catalog, Category, Intent, Item, PricePreference, ScoredItem};
use std::collections::HashSet;
use tracing::{debug, info};

const REGION_POINTS: f64 = 3.0;
const PRICE_MATCH_POINTS: f64 = 2.0;
const PRICE_UNRESTRICTED_POINTS: f64 = 1.0;
const POINTS_PER_TAG: f64 = 1.5;
const MAX_TAG_POINTS: f64 = 5.0;

const BUDGET_PRICE_CEILING: f64 = 100.0;
const PREMIUM_PRICE_FLOOR: f64 = 200.0;

const MATCH_WEIGHT: f64 = 0.7;
const RATING_WEIGHT: f64 = 0.3;

pub const DEFAULT_TOP_N: usize = 5;

/// Per-component match points for one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchBreakdown {
    /// 0 or 3
    pub region: f64,
    /// 0, 1 or 2
    pub price: f64,
    /// 0 to 5
    pub tags: f64,
}

impl MatchBreakdown {
    pub fn total(&self) -> f64 {
        self.region + self.price + self.tags
    }
}

fn region_points(item: &Item, intent: &Intent) -> f64 {
    // An empty region is a substring of every region
    if item.region.contains(intent.region.as_str()) {
        REGION_POINTS
    } else {
        0.0
    }
}

fn price_points(item: &Item, intent: &Intent) -> f64 {
    let price = item.price;
    match intent.price {
        PricePreference::Free if price == 0.0 => PRICE_MATCH_POINTS,
        PricePreference::Budget if price > 0.0 && price <= BUDGET_PRICE_CEILING => {
            PRICE_MATCH_POINTS
        }
        PricePreference::Premium if price > PREMIUM_PRICE_FLOOR => PRICE_MATCH_POINTS,
        PricePreference::Unrestricted => PRICE_UNRESTRICTED_POINTS,
        // No stated preference earns nothing, unlike an explicit "不限"
        _ => 0.0,
    }
}

fn tag_points(item: &Item, intent: &Intent) -> f64 {
    let wanted: HashSet<&str> = intent.tags.iter().map(String::as_str).collect();
    let offered: HashSet<&str> = item.tags.iter().map(String::as_str).collect();
    let matched = wanted.intersection(&offered).count();

    (matched as f64 * POINTS_PER_TAG).min(MAX_TAG_POINTS)
}

/// Scores how well `item` fits `intent` on the 0-10 match scale.
pub fn score_match(item: &Item, intent: &Intent) -> MatchBreakdown {
    MatchBreakdown {
        region: region_points(item, intent),
        price: price_points(item, intent),
        tags: tag_points(item, intent),
    }
}

/// Blends match points with the item's own rating.
pub fn final_score(match_score: f64, base_score: f64) -> f64 {
    match_score * MATCH_WEIGHT + base_score * RATING_WEIGHT
}

/// Rounds to one decimal place, ties to even on the exact binary value.
pub fn round1(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// The intent's category when the catalog carries it, scenic spots otherwise.
pub fn select_category(catalog: &Catalog, intent: &Intent) -> Category {
    if catalog.contains(intent.category) {
        intent.category
    } else {
        Category::ScenicSpots
    }
}

/// Scores, gates and ranks one category of the catalog against `intent`.
///
/// When the intent states any constraint, items scoring zero are dropped.
/// The result is sorted by final score, highest first; equal scores keep
/// catalog order.
pub fn recommend<'a>(catalog: &'a Catalog, intent: &Intent, top_n: usize) -> Vec<ScoredItem<'a>> {
    if top_n == 0 {
        return Vec::new();
    }

    let category = select_category(catalog, intent);
    let items = catalog.items(category).unwrap_or_default();
    let has_constraints = intent.has_constraints();

    let mut results: Vec<ScoredItem<'a>> = items
        .iter()
        .filter_map(|item| {
            let match_score = score_match(item, intent).total();

            if has_constraints && match_score == 0.0 {
                debug!("Gated out '{}': no overlap with request", item.name);
                return None;
            }

            Some(ScoredItem {
                item,
                match_score: round1(match_score),
                final_score: round1(final_score(match_score, item.score)),
            })
        })
        .collect();

    // Stable sort keeps catalog order among equal scores
    results.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
    results.truncate(top_n);

    info!(
        "Ranked {} of {} {} items (constraints: {})",
        results.len(),
        items.len(),
        category,
        has_constraints
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_item(name: &str, region: &str, price: f64, score: f64, tags: &[&str]) -> Item {
        Item {
            name: name.to_string(),
            region: region.to_string(),
            category: Category::ScenicSpots,
            price,
            score,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            address: String::new(),
        }
    }

    fn intent(region: &str, price: PricePreference, tags: &[&str]) -> Intent {
        Intent {
            region: region.to_string(),
            category: Category::ScenicSpots,
            price,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn scenic(items: Vec<Item>) -> Catalog {
        Catalog::new().with_category(Category::ScenicSpots, items)
    }

    #[test]
    fn test_region_component() {
        let item = create_test_item("火山", "乌兰察布市察右后旗", 0.0, 4.5, &[]);

        let open = intent("", PricePreference::Unspecified, &[]);
        assert_eq!(score_match(&item, &open).region, 3.0);

        let substring = intent("察右后旗", PricePreference::Unspecified, &[]);
        assert_eq!(score_match(&item, &substring).region, 3.0);

        let elsewhere = intent("集宁区", PricePreference::Unspecified, &[]);
        assert_eq!(score_match(&item, &elsewhere).region, 0.0);
    }

    #[test]
    fn test_price_component() {
        let free = create_test_item("a", "", 0.0, 4.0, &[]);
        let cheap = create_test_item("b", "", 100.0, 4.0, &[]);
        let mid = create_test_item("c", "", 200.0, 4.0, &[]);
        let pricey = create_test_item("d", "", 200.5, 4.0, &[]);

        let points = |item: &Item, pref: PricePreference| score_match(item, &intent("", pref, &[])).price;

        assert_eq!(points(&free, PricePreference::Free), 2.0);
        assert_eq!(points(&cheap, PricePreference::Free), 0.0);

        assert_eq!(points(&cheap, PricePreference::Budget), 2.0);
        assert_eq!(points(&free, PricePreference::Budget), 0.0);
        assert_eq!(points(&mid, PricePreference::Budget), 0.0);

        assert_eq!(points(&pricey, PricePreference::Premium), 2.0);
        assert_eq!(points(&mid, PricePreference::Premium), 0.0);

        assert_eq!(points(&mid, PricePreference::Unrestricted), 1.0);
        assert_eq!(points(&mid, PricePreference::Unspecified), 0.0);
        assert_eq!(
            points(&mid, PricePreference::Unrecognized("随意".into())),
            0.0
        );
    }

    #[test]
    fn test_tag_component_caps_at_five() {
        let item = create_test_item("x", "", 0.0, 4.0, &["火山", "草原", "亲子", "拍照", "自驾"]);

        let expected = [(0, 0.0), (1, 1.5), (2, 3.0), (3, 4.5), (4, 5.0), (5, 5.0)];
        let wanted = ["火山", "草原", "亲子", "拍照", "自驾"];
        for (count, points) in expected {
            let request = intent("", PricePreference::Unspecified, &wanted[..count]);
            assert_eq!(score_match(&item, &request).tags, points, "{} tags", count);
        }
    }

    #[test]
    fn test_tag_component_counts_distinct_tags() {
        let item = create_test_item("x", "", 0.0, 4.0, &["火山", "火山"]);
        let request = intent("", PricePreference::Unspecified, &["火山", "火山"]);
        assert_eq!(score_match(&item, &request).tags, 1.5);
    }

    #[test]
    fn test_volcano_scenario() {
        let catalog = scenic(vec![create_test_item(
            "乌兰哈达火山",
            "察右后旗",
            0.0,
            4.5,
            &["火山"],
        )]);
        let request = intent("察右后旗", PricePreference::Unspecified, &["火山"]);

        let results = recommend(&catalog, &request, DEFAULT_TOP_N);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_score, 4.5);
        assert_eq!(results[0].final_score, 4.5);
    }

    #[test]
    fn test_zero_match_gated_when_constrained() {
        let catalog = scenic(vec![create_test_item("老虎山", "集宁区", 0.0, 5.0, &["公园"])]);
        let request = intent("察右后旗", PricePreference::Unspecified, &["火山"]);

        assert!(recommend(&catalog, &request, DEFAULT_TOP_N).is_empty());
    }

    #[test]
    fn test_open_request_ranks_by_rating_keeping_ties_in_order() {
        let catalog = scenic(vec![
            create_test_item("a", "集宁区", 0.0, 4.0, &[]),
            create_test_item("b", "兴和县", 50.0, 4.8, &[]),
            create_test_item("c", "四子王旗", 300.0, 4.0, &[]),
        ]);
        let open = Intent::default();
        assert!(!open.has_constraints());

        let results = recommend(&catalog, &open, DEFAULT_TOP_N);
        let names: Vec<_> = results.iter().map(|r| r.item.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        // Region points still apply to an open request
        assert_eq!(results[0].match_score, 3.0);
        assert_eq!(results[0].final_score, round1(3.0 * 0.7 + 4.8 * 0.3));
    }

    #[test]
    fn test_unrecognized_price_still_gates() {
        let catalog = scenic(vec![create_test_item("a", "集宁区", 0.0, 4.0, &[])]);
        let request = intent("兴和县", PricePreference::Unrecognized("随意".into()), &[]);
        assert!(recommend(&catalog, &request, DEFAULT_TOP_N).is_empty());
    }

    #[test]
    fn test_top_n_truncates() {
        let items = (0..8)
            .map(|i| create_test_item(&format!("spot-{}", i), "", 0.0, i as f64 / 2.0, &[]))
            .collect();
        let catalog = scenic(items);

        assert_eq!(recommend(&catalog, &Intent::default(), 5).len(), 5);
        assert_eq!(recommend(&catalog, &Intent::default(), 20).len(), 8);
        assert!(recommend(&catalog, &Intent::default(), 0).is_empty());
    }

    #[test]
    fn test_missing_category_defaults_to_scenic_spots() {
        let catalog = scenic(vec![create_test_item("a", "", 0.0, 4.0, &[])]);
        let request = Intent {
            category: Category::Homestay,
            ..Intent::default()
        };

        assert_eq!(select_category(&catalog, &request), Category::ScenicSpots);
        assert_eq!(recommend(&catalog, &request, 5).len(), 1);
    }

    #[test]
    fn test_empty_category_and_empty_catalog() {
        let catalog = Catalog::new().with_category(Category::Food, vec![]);
        let request = Intent {
            category: Category::Food,
            ..Intent::default()
        };
        assert!(recommend(&catalog, &request, 5).is_empty());
        assert!(recommend(&Catalog::new(), &Intent::default(), 5).is_empty());
    }

    #[test]
    fn test_recommend_is_deterministic_and_leaves_catalog_untouched() {
        let catalog = scenic(vec![
            create_test_item("a", "察右后旗", 0.0, 4.5, &["火山"]),
            create_test_item("b", "察右后旗", 80.0, 4.5, &["火山"]),
            create_test_item("c", "察右中旗", 0.0, 4.9, &["草原"]),
        ]);
        let before = catalog.items(Category::ScenicSpots).unwrap().to_vec();
        let request = intent("察右后旗", PricePreference::Free, &["火山"]);

        let first: Vec<_> = recommend(&catalog, &request, 5)
            .into_iter()
            .map(|r| (r.item.name.clone(), r.match_score, r.final_score))
            .collect();
        let second: Vec<_> = recommend(&catalog, &request, 5)
            .into_iter()
            .map(|r| (r.item.name.clone(), r.match_score, r.final_score))
            .collect();

        assert_eq!(first, second);
        assert_eq!(first[0].0, "a");
        assert_eq!(first[0].1, 6.5);
        assert_eq!(catalog.items(Category::ScenicSpots).unwrap(), before.as_slice());
    }

    #[test]
    fn test_round1_ties_to_even() {
        assert_eq!(round1(1.5 * 0.7 + 4.0 * 0.3), 2.2);
        assert_eq!(round1(2.25), 2.2);
        assert_eq!(round1(2.35), 2.4);
        assert_eq!(round1(4.45), 4.5);
        assert_eq!(round1(-0.25), -0.2);
        assert!(round1(f64::NAN).is_nan());
    }

    #[test]
    fn test_single_tag_match_rounds_half_to_even() {
        let catalog = scenic(vec![create_test_item("岱海", "集宁区", 0.0, 4.0, &["火山"])]);
        let request = intent("察右后旗", PricePreference::Unspecified, &["火山"]);

        let results = recommend(&catalog, &request, DEFAULT_TOP_N);
        assert_eq!(results[0].match_score, 1.5);
        assert_eq!(results[0].final_score, 2.2);
    }

    #[test]
    fn test_final_score_bounds() {
        assert_eq!(round1(final_score(0.0, 0.0)), 0.0);
        assert_eq!(round1(final_score(10.0, 5.0)), 8.5);
    }
}
