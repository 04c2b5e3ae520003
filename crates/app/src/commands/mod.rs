//! Dashboard commands - one async function per page interaction

mod comments;
mod export;
mod issues;
mod reports;

pub use comments::*;
pub use export::*;
pub use issues::*;
pub use reports::*;
