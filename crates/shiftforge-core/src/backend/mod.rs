//! Backend implementations of the abstract solver interface (§4.2).

pub mod reference;

pub use reference::ReferenceSolver;
