//! Initialization policy
//!
//! The two page generations disagreed on first paint: one forced the first
//! tab active on load, the other left every pane hidden until the reader
//! picked a topic. Both are kept as an explicit choice.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitPolicy {
    /// Select the first trigger in document order at ready-time
    #[default]
    AutoActivateFirst,
    /// Leave every group unselected until the first interaction
    NoDefault,
}

impl InitPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            InitPolicy::AutoActivateFirst => "auto-activate-first",
            InitPolicy::NoDefault => "no-default",
        }
    }
}

impl std::fmt::Display for InitPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto-activate-first" => Ok(InitPolicy::AutoActivateFirst),
            "no-default" => Ok(InitPolicy::NoDefault),
            _ => Err(format!("Unknown init policy: {}", s)),
        }
    }
}
