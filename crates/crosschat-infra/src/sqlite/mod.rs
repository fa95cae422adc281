//! SQLite storage layer: the split read/write pool and the moderation
//! store built on it.

pub mod moderation;
pub mod pool;
