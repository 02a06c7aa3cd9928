use crate::error::{ApiError, Result};
use crate::models::{Catalog, CatalogStats, Category, Item};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{error, info};

/// On-disk catalog layout: one top-level key per category.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    scenic_spots: Option<Vec<Item>>,
    food: Option<Vec<Item>>,
    homestay: Option<Vec<Item>>,
}

impl From<CatalogDocument> for Catalog {
    fn from(document: CatalogDocument) -> Self {
        let collections = [
            (Category::ScenicSpots, document.scenic_spots),
            (Category::Food, document.food),
            (Category::Homestay, document.homestay),
        ];

        collections
            .into_iter()
            .fold(Catalog::new(), |catalog, (category, items)| match items {
                Some(items) => catalog.with_category(category, items),
                None => catalog,
            })
    }
}

/// Parses a catalog document, reporting why it could not be read.
pub fn read_catalog(path: &Path) -> Result<Catalog> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ApiError::CatalogError(format!("cannot read {}: {}", path.display(), e))
    })?;
    let document: CatalogDocument = serde_json::from_str(&raw).map_err(|e| {
        ApiError::CatalogError(format!("{} is not a valid catalog: {}", path.display(), e))
    })?;
    Ok(document.into())
}

/// Holds the current catalog snapshot.
///
/// Requests take an `Arc` snapshot and keep reading it even if a reload
/// swaps in a newer one.
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
    current: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    /// Loads the catalog at `path`; a missing or malformed file yields an empty catalog.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let catalog = load_or_empty(&path);
        Self {
            path,
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// Wraps an already-built catalog; `reload` will read from `path`.
    pub fn from_catalog(path: impl Into<PathBuf>, catalog: Catalog) -> Self {
        Self {
            path: path.into(),
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn snapshot(&self) -> Arc<Catalog> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Re-reads the catalog file and publishes it as the new snapshot.
    pub fn reload(&self) -> CatalogStats {
        let catalog = Arc::new(load_or_empty(&self.path));
        let stats = catalog.stats();

        match self.current.write() {
            Ok(mut guard) => *guard = catalog,
            Err(poisoned) => *poisoned.into_inner() = catalog,
        }

        info!("Catalog reloaded from {}", self.path.display());
        stats
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn load_or_empty(path: &Path) -> Catalog {
    match read_catalog(path) {
        Ok(catalog) => {
            let stats = catalog.stats();
            info!(
                "Loaded catalog: {} scenic spots, {} food, {} homestays",
                stats.scenic_spots, stats.food, stats.homestay
            );
            catalog
        }
        Err(e) => {
            error!("{}", e);
            Catalog::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "scenic_spots": [
            {"name": "乌兰哈达火山", "region": "察右后旗", "price": 0, "score": 4.5,
             "tags": ["火山", "拍照"], "address": "察右后旗乌兰哈达苏木"}
        ],
        "food": []
    }"#;

    fn catalog_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_catalog() {
        let file = catalog_file(SAMPLE);
        let catalog = read_catalog(file.path()).unwrap();

        let spots = catalog.items(Category::ScenicSpots).unwrap();
        assert_eq!(spots.len(), 1);
        assert_eq!(spots[0].category, Category::ScenicSpots);
        assert_eq!(spots[0].tags, vec!["火山", "拍照"]);

        assert!(catalog.contains(Category::Food));
        assert!(!catalog.contains(Category::Homestay));
    }

    #[test]
    fn test_missing_file_yields_empty_catalog() {
        let store = CatalogStore::load("/no/such/tourism_data.json");
        assert!(store.snapshot().is_empty());
        assert_eq!(store.path(), Path::new("/no/such/tourism_data.json"));
    }

    #[test]
    fn test_malformed_file_yields_empty_catalog() {
        let file = catalog_file("{\"scenic_spots\": [ {\"name\": ");
        assert!(matches!(
            read_catalog(file.path()),
            Err(ApiError::CatalogError(_))
        ));

        let store = CatalogStore::load(file.path());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_reload_publishes_new_snapshot() {
        let file = catalog_file("{}");
        let store = CatalogStore::load(file.path());
        let before = store.snapshot();
        assert_eq!(before.stats().total(), 0);

        std::fs::write(file.path(), SAMPLE).unwrap();

        let stats = store.reload();
        assert_eq!(stats.scenic_spots, 1);
        assert_eq!(store.snapshot().stats().scenic_spots, 1);
        // Earlier snapshots are unaffected
        assert_eq!(before.stats().total(), 0);
    }
}
