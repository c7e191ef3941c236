//! # discord-wire
//!
//! Typed wire-format contract for Discord message resources: decode JSON
//! payloads into typed values with field-level errors, and encode typed
//! values back into the sparse JSON the platform expects.
//!
//! Everything here is a pure, synchronous transform over already-parsed
//! `serde_json::Value` data. Networking, auth, and rate limiting belong to
//! the caller.

pub mod attachment;
pub mod embed;
pub mod error;
pub mod message;
pub mod reaction;
pub mod user;
pub mod wire;
