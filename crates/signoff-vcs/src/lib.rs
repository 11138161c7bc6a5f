pub mod git;
pub mod types;

pub use git::*;
pub use types::*;
