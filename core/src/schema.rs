use serde::{Deserialize, Serialize};

/// Value types a node attribute may be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Float,
    String,
}

impl AttributeKind {
    /// Name used for the `type` attribute of a GEXF `<attribute>` declaration.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Float => "float",
            AttributeKind::String => "string",
        }
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSchemaEntry {
    pub id: String,
    pub kind: AttributeKind,
    pub title: String,
}

impl AttributeSchemaEntry {
    pub fn new(id: impl Into<String>, kind: AttributeKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
        }
    }
}

pub const DURATION: &str = "duration";
pub const LIKES: &str = "likes";
pub const DISLIKES: &str = "dislikes";
pub const MULT: &str = "mult";
pub const PUBDATE: &str = "pubdate";
pub const CHANNEL: &str = "channel";

/// Ordered, immutable set of attribute declarations shared by every node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSchema {
    entries: Vec<AttributeSchemaEntry>,
}

impl AttributeSchema {
    pub fn new(entries: Vec<AttributeSchemaEntry>) -> Self {
        Self { entries }
    }

    /// The attribute set carried by crawled video nodes.
    ///
    /// Every title equals its id. Older exports of this graph titled the
    /// `duration` column `likes`; files produced here label it `duration`.
    pub fn video() -> Self {
        Self::new(vec![
            AttributeSchemaEntry::new(DURATION, AttributeKind::Float, DURATION),
            AttributeSchemaEntry::new(LIKES, AttributeKind::Float, LIKES),
            AttributeSchemaEntry::new(DISLIKES, AttributeKind::Float, DISLIKES),
            AttributeSchemaEntry::new(MULT, AttributeKind::Float, MULT),
            AttributeSchemaEntry::new(PUBDATE, AttributeKind::String, PUBDATE),
            AttributeSchemaEntry::new(CHANNEL, AttributeKind::String, CHANNEL),
        ])
    }

    pub fn entries(&self) -> &[AttributeSchemaEntry] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&AttributeSchemaEntry> {
        self.entries.iter().find(|entry| entry.id == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AttributeSchema {
    fn default() -> Self {
        Self::video()
    }
}
