//! Routing of decoded messages to per-game handling.
//!
//! The dispatcher is deliberately free of I/O: it consumes one framed
//! message at a time and returns the outbound messages the session should
//! transmit. That keeps the whole protocol core testable without a socket
//! and usable under any I/O model.

use crate::game::GameRegistry;
use log::{error, info, warn};
use shared::{EventKind, Outbound, ServerMessage};

/// Drives the handshake transition and one state machine per game.
///
/// Per-message faults (malformed frames, prompts for unknown games) are
/// logged and swallowed; the dispatcher never panics on server input.
pub struct Dispatcher {
    registry: GameRegistry,
    /// How many games to request once the handshake completes.
    max_games: u32,
}

impl Dispatcher {
    pub fn new(max_games: u32) -> Self {
        Self {
            registry: GameRegistry::new(),
            max_games,
        }
    }

    /// Handles one framed message and returns the responses to send, in
    /// order. An empty vector means the message required no reply (or was
    /// discarded as invalid).
    pub fn handle(&mut self, msg: &str) -> Vec<Outbound> {
        let parsed = match ServerMessage::parse(msg) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Discarding malformed message {:?}: {}", msg, e);
                return Vec::new();
            }
        };

        match parsed {
            ServerMessage::Hello => {
                info!(
                    "Handshake complete, requesting {} game(s)",
                    self.max_games
                );
                (0..self.max_games)
                    .map(|_| Outbound::RequestNewGame)
                    .collect()
            }

            ServerMessage::Event { game_id, kind } => self.handle_event(game_id, kind),
        }
    }

    fn handle_event(&mut self, game_id: u64, kind: EventKind) -> Vec<Outbound> {
        match kind {
            EventKind::NewGame => {
                // Fresh record: the first decision is always Load.
                let record = self.registry.insert_new(game_id);
                let action = record.decide();
                record.apply(action);
                vec![Outbound::Response { game_id, action }]
            }

            EventKind::WinRound | EventKind::LooseRound => {
                info!("Game {} round over: {:?}", game_id, kind);
                // The record stays in the registry, stale, until the
                // server reuses the id.
                vec![Outbound::RequestNewGame]
            }

            EventKind::YourTurn => match self.registry.get_mut(game_id) {
                Some(record) => {
                    let action = record.decide();
                    record.apply(action);
                    vec![Outbound::Response { game_id, action }]
                }
                None => {
                    error!(
                        "Turn prompt for unknown game {}, no NewGame seen; dropping",
                        game_id
                    );
                    Vec::new()
                }
            },
        }
    }

    /// Read access to the tracked games, for observability and tests.
    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Action, SERVER_HELLO};

    #[test]
    fn test_handshake_triggers_one_game_request() {
        let mut dispatcher = Dispatcher::new(1);
        let out = dispatcher.handle(SERVER_HELLO);
        assert_eq!(out, vec![Outbound::RequestNewGame]);
    }

    #[test]
    fn test_handshake_respects_configured_game_count() {
        let mut dispatcher = Dispatcher::new(3);
        let out = dispatcher.handle(SERVER_HELLO);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|o| *o == Outbound::RequestNewGame));
    }

    #[test]
    fn test_new_game_always_loads_first() {
        let mut dispatcher = Dispatcher::new(1);
        let out = dispatcher.handle("7:NewGame");

        assert_eq!(
            out,
            vec![Outbound::Response {
                game_id: 7,
                action: Action::Load,
            }]
        );

        let record = dispatcher.registry().get(7).unwrap();
        assert_eq!(record.ammunition, 1);
        assert_eq!(record.last_command, Some(Action::Load));
    }

    #[test]
    fn test_turn_events_alternate_shoot_and_load() {
        let mut dispatcher = Dispatcher::new(1);
        dispatcher.handle("7:NewGame");

        // One bullet loaded at creation: the next prompt shoots it.
        let out = dispatcher.handle("7:Duck");
        assert_eq!(
            out,
            vec![Outbound::Response {
                game_id: 7,
                action: Action::Shoot,
            }]
        );
        assert_eq!(dispatcher.registry().get(7).unwrap().ammunition, 0);

        // Magazine empty again: reload.
        let out = dispatcher.handle("7:Duck");
        assert_eq!(
            out,
            vec![Outbound::Response {
                game_id: 7,
                action: Action::Load,
            }]
        );
        assert_eq!(dispatcher.registry().get(7).unwrap().ammunition, 1);
    }

    #[test]
    fn test_round_end_requests_new_game_and_keeps_record() {
        let mut dispatcher = Dispatcher::new(1);
        dispatcher.handle("3:NewGame");
        let before = dispatcher.registry().get(3).unwrap().clone();

        for end in ["3:WinRound", "3:LooseRound"] {
            let out = dispatcher.handle(end);
            assert_eq!(out, vec![Outbound::RequestNewGame]);
            assert_eq!(dispatcher.registry().get(3), Some(&before));
        }
    }

    #[test]
    fn test_round_end_without_record_still_requests_new_game() {
        let mut dispatcher = Dispatcher::new(1);
        let out = dispatcher.handle("9:WinRound");
        assert_eq!(out, vec![Outbound::RequestNewGame]);
    }

    #[test]
    fn test_malformed_message_produces_no_output() {
        let mut dispatcher = Dispatcher::new(1);
        assert!(dispatcher.handle("no separator here").is_empty());
        assert!(dispatcher.handle("abc:NewGame").is_empty());
        assert!(dispatcher.handle("").is_empty());
    }

    #[test]
    fn test_turn_for_unknown_game_is_dropped() {
        let mut dispatcher = Dispatcher::new(1);
        let out = dispatcher.handle("42:Duck");
        assert!(out.is_empty());
        assert!(dispatcher.registry().is_empty());
    }

    #[test]
    fn test_games_are_tracked_independently() {
        let mut dispatcher = Dispatcher::new(1);
        dispatcher.handle("1:NewGame");
        dispatcher.handle("2:NewGame");

        // Shoot game 1's bullet; game 2 keeps its own.
        dispatcher.handle("1:Duck");
        assert_eq!(dispatcher.registry().get(1).unwrap().ammunition, 0);
        assert_eq!(dispatcher.registry().get(2).unwrap().ammunition, 1);
    }

    #[test]
    fn test_new_game_resets_a_reused_id() {
        let mut dispatcher = Dispatcher::new(1);
        dispatcher.handle("5:NewGame");
        dispatcher.handle("5:Duck");
        dispatcher.handle("5:Duck");
        dispatcher.handle("5:WinRound");

        let out = dispatcher.handle("5:NewGame");
        assert_eq!(
            out,
            vec![Outbound::Response {
                game_id: 5,
                action: Action::Load,
            }]
        );
        assert_eq!(dispatcher.registry().get(5).unwrap().ammunition, 1);
    }
}
