use serde::{Deserialize, Serialize};

/// Structured signals extracted from one rendered page.
///
/// Created once per successful navigation and discarded after the audit
/// aggregates it; nothing here is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSignal {
    pub url: String,
    pub title: String,

    /// Body text with navigation/header/footer/script/style content removed
    /// so boilerplate never pollutes similarity comparisons.
    pub text: String,

    pub word_count: usize,

    /// Document headings in DOM order
    #[serde(default)]
    pub headings: Vec<HeadingElement>,

    /// Same-origin links found in the document
    #[serde(default)]
    pub links: Vec<PageLink>,

    pub image_count: usize,

    /// Images with no usable alt attribute
    pub images_missing_alt: usize,

    pub script_count: usize,

    pub meta_description: Option<String>,
}

/// A heading element with its level (1 for h1 .. 6 for h6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadingElement {
    pub level: u8,
    pub text: String,
}

/// An anchor found on a page: resolved href, anchor text, and the text of
/// the enclosing block for context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLink {
    pub href: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub context: String,
}

/// Per-render options for the extractor.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Seconds allowed for navigation plus the load wait
    pub navigation_timeout_secs: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            navigation_timeout_secs: crate::utils::constants::DEFAULT_NAVIGATION_TIMEOUT_SECS,
        }
    }
}

impl PageSignal {
    /// Heading texts at a given level, in document order.
    #[must_use]
    pub fn headings_at(&self, level: u8) -> Vec<&str> {
        self.headings
            .iter()
            .filter(|h| h.level == level)
            .map(|h| h.text.as_str())
            .collect()
    }
}
