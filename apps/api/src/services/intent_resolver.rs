use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::Intent;
use crate::services::chat_completion::{strip_code_fences, ChatCompletionClient, ChatMessage};
use crate::services::keyword_intent::KeywordIntentStrategy;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

const EXTRACTION_SYSTEM_PROMPT: &str = "你是专业的JSON数据提取助手。";

fn extraction_prompt(text: &str) -> String {
    format!(
        r#"你是一个文旅需求提取助手。请分析用户输入，提取以下字段并严格按 JSON 格式返回：
1. region: 具体的旗/县/区名（如"集宁区", "察右后旗"等）。
2. type: 只能从 ["scenic_spots", "food", "homestay"] 中选一个。
3. price: 价格偏好（"性价比高", "免费", "高价", "不限"）。
4. tags: 提取的关键词列表（如 "火山", "草原", "亲子"）。

用户输入："{}"

要求：只返回纯 JSON 字符串，不要Markdown格式，不要解释。"#,
        text
    )
}

/// One way of turning free text into an [`Intent`].
///
/// Returning `None` hands the request to the next strategy in the chain.
#[async_trait]
pub trait IntentStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn resolve(&self, text: &str) -> Option<Intent>;
}

/// Extraction backed by a chat-completion model.
///
/// Without a credential the strategy is inert and always yields `None`.
pub struct AiIntentStrategy {
    client: Option<ChatCompletionClient>,
}

impl AiIntentStrategy {
    pub fn new(client: Option<ChatCompletionClient>) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = match config.api_key() {
            Some(api_key) => Some(ChatCompletionClient::new(config, api_key)?),
            None => {
                info!("No chat-completion credential configured, AI extraction disabled");
                None
            }
        };
        Ok(Self { client })
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    async fn extract(&self, client: &ChatCompletionClient, text: &str) -> Result<Intent> {
        let content = client
            .complete(vec![
                ChatMessage::system(EXTRACTION_SYSTEM_PROMPT),
                ChatMessage::user(extraction_prompt(text)),
            ])
            .await?;

        parse_intent(&content)
    }
}

#[async_trait]
impl IntentStrategy for AiIntentStrategy {
    fn name(&self) -> &'static str {
        "ai"
    }

    async fn resolve(&self, text: &str) -> Option<Intent> {
        let Some(client) = &self.client else {
            debug!("Skipping AI extraction: no credential");
            return None;
        };

        match self.extract(client, text).await {
            Ok(intent) => Some(intent),
            Err(e) => {
                warn!("AI extraction failed, falling back: {}", e);
                None
            }
        }
    }
}

/// Parses a model reply into an [`Intent`].
///
/// Only a non-empty JSON object counts as a usable answer.
pub fn parse_intent(content: &str) -> Result<Intent> {
    let cleaned = strip_code_fences(content);
    let value: serde_json::Value = serde_json::from_str(&cleaned)?;

    match value.as_object() {
        Some(fields) if !fields.is_empty() => Ok(serde_json::from_value(value)?),
        _ => Err(ApiError::ExternalServiceError(format!(
            "model reply is not a usable intent: {}",
            cleaned
        ))),
    }
}

/// Ordered chain of strategies ending in the keyword matcher.
///
/// `resolve` never fails: if every configured strategy declines, the
/// keyword matcher answers unconditionally.
#[derive(Clone)]
pub struct IntentResolver {
    strategies: Vec<Arc<dyn IntentStrategy>>,
    fallback: KeywordIntentStrategy,
}

impl IntentResolver {
    pub fn new(strategies: Vec<Arc<dyn IntentStrategy>>) -> Self {
        Self {
            strategies,
            fallback: KeywordIntentStrategy::new(),
        }
    }

    /// AI extraction first (when a credential exists), keywords otherwise.
    pub fn from_config(config: &Config) -> Result<Self> {
        let ai: Arc<dyn IntentStrategy> = Arc::new(AiIntentStrategy::from_config(config)?);
        Ok(Self::new(vec![ai]))
    }

    pub async fn resolve(&self, text: &str) -> Intent {
        for strategy in &self.strategies {
            if let Some(intent) = strategy.resolve(text).await {
                info!(strategy = strategy.name(), ?intent, "Resolved intent");
                return intent;
            }
        }

        let intent = self.fallback.extract(text);
        info!(strategy = "keyword", ?intent, "Resolved intent via fallback");
        intent
    }
}
