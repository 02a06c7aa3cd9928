use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The three collections a catalog is partitioned into.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    ScenicSpots,
    Food,
    Homestay,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::ScenicSpots, Category::Food, Category::Homestay];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ScenicSpots => "scenic_spots",
            Category::Food => "food",
            Category::Homestay => "homestay",
        }
    }

    /// Display label used by the front-ends
    pub fn label(&self) -> &'static str {
        match self {
            Category::ScenicSpots => "景点",
            Category::Food => "美食",
            Category::Homestay => "民宿",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "scenic_spots" => Ok(Category::ScenicSpots),
            "food" => Ok(Category::Food),
            "homestay" => Ok(Category::Homestay),
            other => Err(format!("unknown category '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub region: String,
    /// Assigned from the collection the item is loaded under
    #[serde(default)]
    pub category: Category,
    pub price: f64,
    /// Base rating on a 0-5 scale
    pub score: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub address: String,
}

/// Read-only, categorized item collections.
///
/// A category that was never loaded is absent, which is distinct from a
/// category that was loaded with zero items.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: BTreeMap<Category, Vec<Item>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collection, stamping every item with `category`.
    pub fn with_category(mut self, category: Category, items: Vec<Item>) -> Self {
        let items = items
            .into_iter()
            .map(|mut item| {
                item.category = category;
                item
            })
            .collect();
        self.categories.insert(category, items);
        self
    }

    pub fn contains(&self, category: Category) -> bool {
        self.categories.contains_key(&category)
    }

    pub fn items(&self, category: Category) -> Option<&[Item]> {
        self.categories.get(&category).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn stats(&self) -> CatalogStats {
        let count = |category| self.items(category).map_or(0, <[Item]>::len);
        CatalogStats {
            scenic_spots: count(Category::ScenicSpots),
            food: count(Category::Food),
            homestay: count(Category::Homestay),
        }
    }
}

/// Per-category item counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub scenic_spots: usize,
    pub food: usize,
    pub homestay: usize,
}

impl CatalogStats {
    pub fn total(&self) -> usize {
        self.scenic_spots + self.food + self.homestay
    }
}

/// An item annotated with its per-request scores.
///
/// The catalog's items are never mutated; each request builds its own
/// `ScoredItem`s so annotations cannot leak between requests.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredItem<'a> {
    #[serde(flatten)]
    pub item: &'a Item,
    pub match_score: f64,
    pub final_score: f64,
}
