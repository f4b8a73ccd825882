//! Storage layer: abstraction traits plus the CSV implementation.

pub mod csv;
pub mod traits;

pub use traits::{Connection, OrderStorage};
