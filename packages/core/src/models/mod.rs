//! Data Models
//!
//! This module contains the data structures the extractor works with:
//!
//! - `ParseTree` / `Node` - read-only input document tree
//! - `Task` / `TaskEntry` - nested extraction output
//! - `Clock` - source of "today" for start-date checks

mod document;
mod task;
pub mod time;

pub use document::{inline_text, Bullet, List, ListItem, ListKind, Node, ParseTree};
pub use task::{Task, TaskEntry, NO_DATE};
pub use time::{Clock, FixedClock, SystemClock};
