//! Target platform capabilities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tag marking a platform with a color display.
pub const COLOR_TAG: &str = "color";

/// Answers capability questions about build platforms.
pub trait PlatformPolicy: Send + Sync {
    /// Whether the platform can show color bitmaps, or `None` if unknown.
    fn supports_color(&self, platform: &str) -> Option<bool>;
}

/// One platform's entry in a [`PlatformTable`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Platform {
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Platform {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Platform name to tag set lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlatformTable {
    pub platforms: BTreeMap<String, Platform>,
}

impl PlatformTable {
    /// The stock watch platforms.
    pub fn builtin() -> Self {
        let entries = [
            ("aplite", &["bw", "rect"][..]),
            ("basalt", &["color", "rect"][..]),
            ("chalk", &["color", "round"][..]),
            ("diorite", &["bw", "rect"][..]),
            ("emery", &["color", "rect"][..]),
        ];

        let platforms = entries
            .iter()
            .map(|(name, tags)| (name.to_string(), Platform::new(tags.iter().copied())))
            .collect();
        Self { platforms }
    }

    pub fn insert(&mut self, name: impl Into<String>, platform: Platform) {
        self.platforms.insert(name.into(), platform);
    }

    pub fn get(&self, name: &str) -> Option<&Platform> {
        self.platforms.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.platforms.keys().map(String::as_str)
    }
}

impl PlatformPolicy for PlatformTable {
    fn supports_color(&self, platform: &str) -> Option<bool> {
        self.get(platform).map(|p| p.has_tag(COLOR_TAG))
    }
}
