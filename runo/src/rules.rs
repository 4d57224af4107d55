use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HAND_SIZE, DEFAULT_MAX_PLAYERS, DEFAULT_PLAYER_COUNT};

/// House rules for a session.
///
/// Missing fields fall back to their defaults when deserializing, so a rules
/// file only has to mention what it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Seats dealt when the state does not name its players.
    pub player_count: usize,
    pub hand_size: usize,
    pub max_players: usize,
    /// Cards drawn by a player who plays from a two-card hand without
    /// declaring UNO. Zero disables the penalty.
    pub missed_uno_penalty: usize,
    /// Reject any action that is not in the current legal-action set.
    pub enforce_legal_moves: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            player_count: DEFAULT_PLAYER_COUNT,
            hand_size: DEFAULT_HAND_SIZE,
            max_players: DEFAULT_MAX_PLAYERS,
            missed_uno_penalty: 0,
            enforce_legal_moves: true,
        }
    }
}

impl Rules {
    #[must_use]
    pub fn with_player_count(mut self, player_count: usize) -> Self {
        self.player_count = player_count;
        self
    }

    #[must_use]
    pub fn with_missed_uno_penalty(mut self, penalty: usize) -> Self {
        self.missed_uno_penalty = penalty;
        self
    }
}
