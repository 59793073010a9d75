use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a template in the catalog.
///
/// Zero is reserved as "no id" and never names a real template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub u32);

impl TemplateId {
    pub fn get(self) -> u32 {
        self.0
    }

    /// True unless this is the reserved zero id.
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for TemplateId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A purchasable subtitle style.
///
/// Only `id`, `name` and `cost` matter to the store; the rest is display
/// metadata carried through for the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDescriptor {
    pub id: TemplateId,
    pub name: String,
    /// Price in credits. Zero means free.
    pub cost: u64,
    #[serde(default)]
    pub tag: String,
    /// Relative popularity, 0-100.
    #[serde(default = "default_popularity")]
    pub popularity: u8,
    #[serde(default = "default_use_cases")]
    pub use_cases: Vec<String>,
    #[serde(default)]
    pub demo_text: String,
    /// Display accent as `#rrggbb`.
    #[serde(default)]
    pub accent: Option<String>,
}

fn default_popularity() -> u8 {
    80
}

fn default_use_cases() -> Vec<String> {
    vec!["General".to_string()]
}

impl TemplateDescriptor {
    /// Descriptor with default display metadata.
    pub fn new(id: u32, name: impl Into<String>, cost: u64) -> Self {
        let name = name.into();
        Self {
            id: TemplateId(id),
            demo_text: format!("This is {} style", name),
            name,
            cost,
            tag: String::new(),
            popularity: default_popularity(),
            use_cases: default_use_cases(),
            accent: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_accent(mut self, accent: impl Into<String>) -> Self {
        self.accent = Some(accent.into());
        self
    }

    pub fn is_free(&self) -> bool {
        self.cost == 0
    }
}
