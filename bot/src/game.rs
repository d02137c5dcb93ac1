//! Per-game state tracking and the round decision policy
//!
//! This module handles the bot-side bookkeeping for every game multiplexed
//! over the connection, including:
//! - Game record lifecycle (created on `NewGame`, superseded by a later
//!   `NewGame` for the same id, never explicitly deleted)
//! - The local ammunition counter approximating the server's bullet state
//! - The decision policy picking the next action for a round
//!
//! The registry is owned by the dispatcher and touched by exactly one
//! logical thread of execution, so no locking is involved.

use log::info;
use shared::Action;
use std::collections::HashMap;

/// Bot-side state for one game.
///
/// The ammunition counter is only an approximation: the server never
/// confirms bullet counts, so it can desync. The counter may also go
/// negative: a `Shoot` is applied even when the magazine was already
/// empty.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GameRecord {
    /// Bullets the bot believes it has in the magazine.
    pub ammunition: i64,
    /// Most recently issued action, for observability only. The decision
    /// policy never consults it.
    pub last_command: Option<Action>,
}

impl GameRecord {
    /// Creates the record for a freshly started game: empty magazine, no
    /// action issued yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks the next action. Pure function of the ammunition count:
    /// shoot whenever a bullet is (believed to be) available, otherwise
    /// load one.
    ///
    /// Deliberately simple: no magazine capacity, no modelling of the
    /// server's round-length budget.
    pub fn decide(&self) -> Action {
        if self.ammunition > 0 {
            Action::Shoot
        } else {
            Action::Load
        }
    }

    /// Applies an issued action to the local state: records it as the last
    /// command and moves the ammunition counter. Called unconditionally
    /// after every send, including the first `Load` at game creation.
    pub fn apply(&mut self, action: Action) {
        self.last_command = Some(action);
        match action {
            Action::Load => self.ammunition += 1,
            Action::Shoot => self.ammunition -= 1,
        }
    }
}

/// All games currently tracked on this connection, keyed by game id.
///
/// Entries are created or overwritten on `NewGame` and looked up on every
/// other event. Round ends leave the record in place; it goes stale until
/// the server reuses the id.
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: HashMap<u64, GameRecord>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self {
            games: HashMap::new(),
        }
    }

    /// Creates a fresh record for `game_id`, replacing any stale one left
    /// over from an earlier round under the same id.
    pub fn insert_new(&mut self, game_id: u64) -> &mut GameRecord {
        info!("Tracking new game {}", game_id);
        let record = self.games.entry(game_id).or_default();
        *record = GameRecord::new();
        record
    }

    /// Looks up the record for `game_id`. Returns `None` when the server
    /// prompts for a game it never announced, which the caller must treat
    /// as a recoverable fault.
    pub fn get_mut(&mut self, game_id: u64) -> Option<&mut GameRecord> {
        self.games.get_mut(&game_id)
    }

    pub fn get(&self, game_id: u64) -> Option<&GameRecord> {
        self.games.get(&game_id)
    }

    /// Returns the number of games tracked so far.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
