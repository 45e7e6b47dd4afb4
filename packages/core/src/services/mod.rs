//! Business Services
//!
//! - `TaskExtractor` - derives nested task lists from parsed documents

mod task_extractor;

pub use task_extractor::{extract_tasks, TaskExtractor};
