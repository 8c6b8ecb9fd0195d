//! Page configuration

use serde::{Deserialize, Serialize};

use marquee_dom::Capabilities;
use marquee_tabs::InitPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// How tab groups come up at ready-time
    pub init_policy: InitPolicy,
    /// Decorative layer toggle. Off reproduces the plain page generation:
    /// tabs only, no feedback or ambient motion.
    pub gamification: bool,
    /// Host feature flags
    pub capabilities: Capabilities,
}

impl Config {
    /// The plain page generation: tab switching and nothing else.
    pub fn plain() -> Self {
        Self {
            gamification: false,
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            init_policy: InitPolicy::default(),
            gamification: true,
            capabilities: Capabilities::default(),
        }
    }
}
