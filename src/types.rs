use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category a saved link is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Youtube,
    Twitter,
    Image,
    Audio,
    Medium,
    Instagram,
}

impl ContentType {
    /// Every category, in the order the picker shows them.
    pub const ALL: [ContentType; 6] = [
        ContentType::Youtube,
        ContentType::Twitter,
        ContentType::Image,
        ContentType::Audio,
        ContentType::Medium,
        ContentType::Instagram,
    ];

    /// Wire name used in request bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Youtube => "youtube",
            ContentType::Twitter => "twitter",
            ContentType::Image => "image",
            ContentType::Audio => "audio",
            ContentType::Medium => "medium",
            ContentType::Instagram => "instagram",
        }
    }

    /// Human label: the wire name with its first letter capitalised.
    pub fn label(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown content type: {0}")]
pub struct UnknownContentType(pub String);

impl FromStr for ContentType {
    type Err = UnknownContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        ContentType::ALL
            .into_iter()
            .find(|t| t.as_str() == norm)
            .ok_or_else(|| UnknownContentType(s.to_string()))
    }
}

/// A single saved link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub title: String,
    pub link: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
}

impl ContentItem {
    pub fn new(title: impl Into<String>, link: impl Into<String>, content_type: ContentType) -> Self {
        Self { title: title.into(), link: link.into(), content_type }
    }
}
