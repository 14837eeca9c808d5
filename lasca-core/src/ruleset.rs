//! Rules - variant configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::STANDARD_SIZE;

/// Which capture chains the mover may pick from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureRule {
    /// Any complete chain is legal
    #[default]
    Free,
    /// Only chains with the most hops are legal
    Longest,
}

/// Variant settings, fixed for the whole game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Board edge length (6 or 7)
    pub size: u8,
    pub capture_rule: CaptureRule,
    /// A side with piles left but no legal action loses
    pub blocked_side_loses: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            size: STANDARD_SIZE,
            capture_rule: CaptureRule::Free,
            blocked_side_loses: true,
        }
    }
}

impl Rules {
    /// Standard rules on a board of `size`
    pub fn with_size(size: u8) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// The 6x6 variant
    pub fn six() -> Self {
        Self::with_size(6)
    }

    pub fn with_capture_rule(mut self, capture_rule: CaptureRule) -> Self {
        self.capture_rule = capture_rule;
        self
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let rules: Rules = serde_json::from_str(&content)?;
        if !crate::board::SUPPORTED_SIZES.contains(&rules.size) {
            anyhow::bail!("unsupported board size {} in {}", rules.size, path.display());
        }
        Ok(rules)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
