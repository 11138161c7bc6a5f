pub mod context;
pub mod reconcile;
pub mod sets;

pub use context::*;
pub use reconcile::*;
pub use sets::*;
