pub mod catalog;
pub mod chat_completion;
pub mod insights;
pub mod intent_resolver;
pub mod keyword_intent;
pub mod recommendation;
pub mod recommendation_service;
pub mod report;

// Re-export public types
pub use catalog::CatalogStore;
pub use chat_completion::ChatCompletionClient;
pub use intent_resolver::{AiIntentStrategy, IntentResolver, IntentStrategy};
pub use keyword_intent::KeywordIntentStrategy;
pub use recommendation_service::{RecommendationOutcome, RecommendationService};
