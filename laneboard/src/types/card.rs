//! Card types: CardId, Status, StoredCard, Card

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Stable card identifier.
///
/// The store may hand out numeric or string identifiers while the view only
/// carries text metadata, so both forms normalize to the same textual key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Create an identifier from its textual form
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for CardId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for CardId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Unsigned(n) => Self(n.to_string()),
            Raw::Signed(n) => Self(n.to_string()),
        })
    }
}

/// The lane a card belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Backlog,
    InProgress,
    Complete,
}

impl Status {
    /// All lanes in board order
    pub const ALL: [Status; 3] = [Status::Backlog, Status::InProgress, Status::Complete];

    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::InProgress => "in-progress",
            Self::Complete => "complete",
        }
    }

    /// Parse a wire name. Unrecognized values yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "backlog" => Some(Self::Backlog),
            "in-progress" => Some(Self::InProgress),
            "complete" => Some(Self::Complete),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A card record exactly as the store returns it.
///
/// `status` is kept raw so records with unknown statuses survive the fetch and
/// can be dropped by classification instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCard {
    pub id: CardId,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    /// Everything else (name, description, ...), carried through untouched
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl StoredCard {
    /// Create a record with the given id, raw status and priority
    pub fn new(id: impl Into<CardId>, status: impl Into<String>, priority: i64) -> Self {
        Self {
            id: id.into(),
            status: status.into(),
            priority: Some(priority),
            attributes: Map::new(),
        }
    }

    /// Add a pass-through attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// A card placed in a lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub status: Status,
    /// Dense 1-based position within the lane once planned. `None` for
    /// placeholders and for store priorities that are not positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Card {
    /// Create a card with no attributes
    pub fn new(id: impl Into<CardId>, status: Status, priority: Option<u32>) -> Self {
        Self {
            id: id.into(),
            status,
            priority,
            attributes: Map::new(),
        }
    }

    /// A card known only by identifier, as rebuilt from view order alone
    pub fn placeholder(id: CardId, status: Status) -> Self {
        Self {
            id,
            status,
            priority: None,
            attributes: Map::new(),
        }
    }

    /// Convert a stored record whose status is recognized
    pub fn from_stored(stored: StoredCard) -> Option<Self> {
        let status = Status::parse(&stored.status)?;
        Some(Self {
            id: stored.id,
            status,
            priority: stored.priority.and_then(|p| u32::try_from(p).ok()).filter(|p| *p > 0),
            attributes: stored.attributes,
        })
    }

    /// Convert back into the wire shape
    pub fn into_stored(self) -> StoredCard {
        StoredCard {
            id: self.id,
            status: self.status.as_str().to_string(),
            priority: self.priority.map(i64::from),
            attributes: self.attributes,
        }
    }

    /// Add a pass-through attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Look up a pass-through attribute
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}
