//! # Shotgun Arena Bot Library
//!
//! This library implements an automated player for the Shotgun Arena game
//! server. The server speaks a newline-delimited text protocol over a
//! single TCP connection and multiplexes many logical games onto it, each
//! identified by an integer game id. The bot performs the fixed handshake,
//! requests games, and answers every round prompt by alternating between
//! loading and shooting based on a locally tracked ammunition counter.
//!
//! ## Architecture Overview
//!
//! Everything is driven by one sequential stream of control: bytes arrive
//! on the connection, are reassembled into discrete messages, routed by
//! game id to the matching state machine, and the chosen action is written
//! back. No locking is needed because exactly one logical task ever
//! touches the game state.
//!
//! ## Module Organization
//!
//! ### Framing Module (`framing`)
//! Reassembles the raw byte stream into newline-delimited messages,
//! preserving partial trailing fragments across reads.
//!
//! ### Game Module (`game`)
//! Holds the per-game records (ammunition counter, last issued action),
//! the registry keyed by game id, and the decision policy: shoot when a
//! bullet is available, otherwise load.
//!
//! ### Dispatcher Module (`dispatcher`)
//! Classifies each decoded message — handshake acknowledgement, game
//! start, round end, or turn prompt — and produces the outbound messages
//! to send. Pure with respect to I/O, so the whole protocol core is
//! testable without a socket.
//!
//! ### Network Module (`network`)
//! Owns the TCP connection: connects, sends the client hello, and runs
//! the read/dispatch/write loop until the server disconnects.

pub mod dispatcher;
pub mod framing;
pub mod game;
pub mod network;
