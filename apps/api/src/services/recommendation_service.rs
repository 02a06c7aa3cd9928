use crate::config::Config;
use crate::error::Result;
use crate::models::{Catalog, Intent, MatchStatus, ScoredItem};
use crate::services::catalog::CatalogStore;
use crate::services::intent_resolver::IntentResolver;
use crate::services::recommendation::{self, select_category};
use crate::services::report::NO_MATCH_HINT;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Result of running one request through the pipeline.
#[derive(Debug, Clone)]
pub struct RecommendationOutcome<'a> {
    pub intent: Intent,
    pub status: MatchStatus,
    pub results: Vec<ScoredItem<'a>>,
    pub resolved_in: Duration,
}

impl RecommendationOutcome<'_> {
    /// User-facing hint for outcomes without results
    pub fn message(&self) -> Option<String> {
        match self.status {
            MatchStatus::Found => None,
            MatchStatus::NoMatch => Some(NO_MATCH_HINT.to_string()),
            MatchStatus::EmptyCatalog => Some("当前分类暂无数据".to_string()),
        }
    }
}

/// Resolve-then-rank pipeline over the shared catalog.
#[derive(Clone)]
pub struct RecommendationService {
    resolver: IntentResolver,
    store: Arc<CatalogStore>,
    default_top_n: usize,
}

impl RecommendationService {
    pub fn new(resolver: IntentResolver, store: Arc<CatalogStore>, default_top_n: usize) -> Self {
        Self {
            resolver,
            store,
            default_top_n,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let resolver = IntentResolver::from_config(config)?;
        let store = Arc::new(CatalogStore::load(&config.catalog_path));
        Ok(Self::new(resolver, store, config.default_top_n))
    }

    /// Current catalog snapshot; hold it for the duration of a request.
    pub fn catalog(&self) -> Arc<Catalog> {
        self.store.snapshot()
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn default_top_n(&self) -> usize {
        self.default_top_n
    }

    pub async fn resolve_intent(&self, text: &str) -> Intent {
        self.resolver.resolve(text.trim()).await
    }

    /// Resolves `text` and ranks `catalog` against it.
    ///
    /// Never fails: unavailable AI extraction degrades to keywords and an
    /// unmatched request is reported through [`MatchStatus`].
    pub async fn recommend<'a>(
        &self,
        catalog: &'a Catalog,
        text: &str,
        top_n: Option<usize>,
    ) -> RecommendationOutcome<'a> {
        let top_n = top_n.unwrap_or(self.default_top_n);

        let started = Instant::now();
        let intent = self.resolve_intent(text).await;
        let resolved_in = started.elapsed();

        let results = recommendation::recommend(catalog, &intent, top_n);

        let category = select_category(catalog, &intent);
        let status = if catalog.items(category).map_or(true, <[_]>::is_empty) {
            MatchStatus::EmptyCatalog
        } else if results.is_empty() && top_n > 0 {
            MatchStatus::NoMatch
        } else {
            MatchStatus::Found
        };

        info!(
            ?status,
            results = results.len(),
            resolved_ms = resolved_in.as_millis() as u64,
            "Recommendation request completed"
        );

        RecommendationOutcome {
            intent,
            status,
            results,
            resolved_in,
        }
    }
}
