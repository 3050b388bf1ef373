//! Duel settings.

use crate::protocol::WinRule;

/// Re-prompts allowed per menu before the duel gives up
pub const DEFAULT_MAX_ATTEMPTS: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DuelConfig {
    /// Which face value wins
    pub win_rule: WinRule,
    /// Replies accepted per menu, help requests included
    pub max_attempts: usize,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            win_rule: WinRule::Higher,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}
