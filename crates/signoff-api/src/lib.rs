pub mod client;
pub mod gh;
pub mod host;
pub mod memory;

pub use client::*;
pub use gh::*;
pub use host::*;
pub use memory::*;
