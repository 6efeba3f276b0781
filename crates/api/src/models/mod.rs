pub mod grid;
pub mod node;
pub mod snapshot;
pub mod util;

pub use grid::*;
pub use node::*;
pub use snapshot::*;
