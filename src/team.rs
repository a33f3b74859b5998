use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A club or national side. Two teams are the same team when their short
/// names match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    #[serde(rename = "short name", alias = "short_name")]
    pub short_name: String,
    #[serde(default)]
    pub country: Option<String>,
}

impl Team {
    pub fn new(
        name: &str,
        short_name: &str,
        colors: BTreeMap<String, String>,
        country: Option<String>,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            colors,
            short_name: short_name.trim().to_string(),
            country,
        }
    }

    /// Placeholder for a team only known by its key, e.g. a match naming a
    /// team missing from the tournament roster.
    pub fn from_key(key: &str) -> Self {
        let mut colors = BTreeMap::new();
        colors.insert("primary".to_string(), "#000000".to_string());
        Self::new(key, key, colors, None)
    }
}

impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        self.short_name == other.short_name
    }
}

impl Eq for Team {}

impl Hash for Team {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.short_name.hash(state);
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// How a match record names a team: by directory key or inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamRef {
    Key(String),
    Inline(Team),
}

impl TeamRef {
    pub fn key(&self) -> &str {
        match self {
            TeamRef::Key(key) => key.trim(),
            TeamRef::Inline(team) => &team.short_name,
        }
    }
}
