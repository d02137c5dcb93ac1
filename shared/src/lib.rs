//! Wire protocol definitions shared between the bot and its tests.
//!
//! The Shotgun Arena protocol is newline-delimited UTF-8 text on a single
//! TCP connection. After a fixed handshake, every inbound line is either
//! the server greeting or a `<game_id>:<payload>` tuple multiplexing many
//! logical games over the one stream. This module owns the exact wire
//! strings, the parsing/classification of inbound lines, and the encoding
//! of outbound messages, so the rest of the bot never touches raw protocol
//! text.

use std::fmt;
use thiserror::Error;

/// Exact greeting the server sends once it has accepted the client hello.
/// Must be matched byte-for-byte; it doubles as the handshake acknowledgement.
pub const SERVER_HELLO: &str = "Shotgun Arena Server v0 :: max round length[ms]: 200";

/// Wire token asking the server to start another game.
pub const REQUEST_NEW_GAME: &str = "RequestNewGame";

/// Language tag appended to the client hello.
pub const CLIENT_LANGUAGE: &str = "rust";

/// Round-length budget advertised in [`SERVER_HELLO`], in milliseconds.
/// Informational only; the bot does not enforce it locally.
pub const MAX_ROUND_LENGTH_MS: u64 = 200;

pub const DEFAULT_HOST: &str = "::1";
pub const DEFAULT_PORT: u16 = 6000;

/// The two moves the bot can make in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Put one bullet into the magazine; leaves you open to being hit.
    Load,
    /// Fire one bullet; pointless when the magazine is empty.
    Shoot,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Load => write!(f, "Load"),
            Action::Shoot => write!(f, "Shoot"),
        }
    }
}

/// Classification of a per-game payload into the closed set of events the
/// bot reacts to.
///
/// Classification is prefix-based because the server suffixes extra detail
/// onto some commands (e.g. `NewGame { opponent: "me" }`). Anything that is
/// not a game start or a round end is the server prompting us for our next
/// move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A new game has started under this game id.
    NewGame,
    /// Round over, we won.
    WinRound,
    /// Round over, we lost.
    LooseRound,
    /// The server expects an [`Action`] for this game.
    YourTurn,
}

impl EventKind {
    /// Classifies a payload by prefix, in priority order.
    ///
    /// Both the `LooseRound` spelling seen on the wire and the `LoseRound`
    /// spelling of the server's action grammar count as a loss.
    pub fn classify(payload: &str) -> EventKind {
        if payload.starts_with("NewGame") {
            EventKind::NewGame
        } else if payload.starts_with("WinRound") {
            EventKind::WinRound
        } else if payload.starts_with("LooseRound") || payload.starts_with("LoseRound") {
            EventKind::LooseRound
        } else {
            EventKind::YourTurn
        }
    }
}

/// A decoded inbound line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// The handshake acknowledgement ([`SERVER_HELLO`], matched exactly).
    Hello,
    /// A multiplexed per-game event.
    Event { game_id: u64, kind: EventKind },
}

impl ServerMessage {
    /// Parses one framed line.
    ///
    /// Anything other than the exact hello must be `<digits>:<payload>`,
    /// split at the first `:`. A line without a separator or with a game id
    /// that is not a non-negative integer is a protocol violation.
    pub fn parse(line: &str) -> Result<ServerMessage, ProtocolError> {
        if line == SERVER_HELLO {
            return Ok(ServerMessage::Hello);
        }

        let (id, payload) = line
            .split_once(':')
            .ok_or_else(|| ProtocolError::MissingSeparator(line.to_string()))?;

        let game_id: u64 = id
            .parse()
            .map_err(|_| ProtocolError::InvalidGameId(id.to_string()))?;

        Ok(ServerMessage::Event {
            game_id,
            kind: EventKind::classify(payload),
        })
    }
}

/// A message the bot sends to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Handshake: identifies the player and its implementation language.
    ClientHello { nickname: String },
    /// Ask the server to start another game.
    RequestNewGame,
    /// The bot's move for one round of one game.
    Response { game_id: u64, action: Action },
}

impl Outbound {
    /// Encodes the exact bytes to put on the wire.
    ///
    /// The hello and `RequestNewGame` are newline-terminated; per-round
    /// responses are not. That asymmetry is what the server expects and has
    /// to be reproduced exactly.
    pub fn to_wire(&self) -> String {
        match self {
            Outbound::ClientHello { nickname } => {
                format!("Nickname: >{}<>{}\n", nickname, CLIENT_LANGUAGE)
            }
            Outbound::RequestNewGame => format!("{}\n", REQUEST_NEW_GAME),
            Outbound::Response { game_id, action } => format!("{}:{}", game_id, action),
        }
    }
}

/// Errors for inbound lines that do not fit the wire grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("message has no ':' separator: {0:?}")]
    MissingSeparator(String),
    #[error("game id is not a non-negative integer: {0:?}")]
    InvalidGameId(String),
}
