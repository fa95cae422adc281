//! Infrastructure implementations for Crosschat.
//!
//! Concrete storage behind the port traits defined in `crosschat-core`.
//! Currently SQLite only; the port is the seam where another engine would
//! plug in.

pub mod sqlite;
