//! Utility functions for Tasklist Core

mod dates;

pub use dates::parse_date;
