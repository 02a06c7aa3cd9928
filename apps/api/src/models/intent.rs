use super::item::Category;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNull {
        String(String),
        Null,
    }

    match StringOrNull::deserialize(deserializer)? {
        StringOrNull::String(s) => Ok(s),
        StringOrNull::Null => Ok(String::new()),
    }
}

fn deserialize_lenient_category<'de, D>(deserializer: D) -> Result<Category, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = deserialize_lenient_string(deserializer)?;
    Ok(raw.parse().unwrap_or_default())
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrVec {
        String(String),
        Vec(Vec<String>),
        Null,
    }

    match StringOrVec::deserialize(deserializer)? {
        // Handle comma-separated tags or a single tag
        StringOrVec::String(s) => Ok(s
            .split([',', '，'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()),
        StringOrVec::Vec(v) => Ok(v),
        StringOrVec::Null => Ok(Vec::new()),
    }
}

/// Price preference extracted from a request.
///
/// Serialized as the Chinese label the extraction prompt asks for. Any other
/// non-empty value is kept verbatim: it still counts as a stated constraint
/// but never earns price points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PricePreference {
    #[default]
    Unspecified,
    Free,
    Budget,
    Premium,
    Unrestricted,
    Unrecognized(String),
}

impl PricePreference {
    pub fn as_str(&self) -> &str {
        match self {
            PricePreference::Unspecified => "",
            PricePreference::Free => "免费",
            PricePreference::Budget => "性价比高",
            PricePreference::Premium => "高价",
            PricePreference::Unrestricted => "不限",
            PricePreference::Unrecognized(raw) => raw,
        }
    }

    pub fn is_specified(&self) -> bool {
        !matches!(self, PricePreference::Unspecified)
    }
}

impl From<&str> for PricePreference {
    fn from(raw: &str) -> Self {
        match raw {
            "" => PricePreference::Unspecified,
            "免费" => PricePreference::Free,
            "性价比高" => PricePreference::Budget,
            "高价" => PricePreference::Premium,
            "不限" => PricePreference::Unrestricted,
            other => PricePreference::Unrecognized(other.to_string()),
        }
    }
}

impl Serialize for PricePreference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PricePreference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = deserialize_lenient_string(deserializer)?;
        Ok(PricePreference::from(raw.as_str()))
    }
}

/// Structured form of a free-text request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub region: String,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "deserialize_lenient_category"
    )]
    pub category: Category,
    #[serde(default)]
    pub price: PricePreference,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
}

impl Intent {
    /// True when the request names a region, a price preference or any tag.
    pub fn has_constraints(&self) -> bool {
        !self.region.is_empty() || self.price.is_specified() || !self.tags.is_empty()
    }
}
