//! Document parsers
//!
//! The extractor only needs a [`ParseTree`](crate::models::ParseTree); this
//! module provides a parser for plain wiki text so callers without their own
//! markup parser can still extract tasks.

mod wiki;

pub use wiki::WikiParser;
