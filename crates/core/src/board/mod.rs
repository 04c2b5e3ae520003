//! Issue board engine: filter, sort, paginate

pub mod engine;
pub mod pagination;

pub use engine::{apply, BoardEngine};
pub use pagination::page_window;
