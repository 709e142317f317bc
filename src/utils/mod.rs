//! # Utilities Module
//!
//! Board queries shared by placement and the turn controller: occupancy lookups
//! and movement reachability.

pub mod grid;
pub mod movement;

pub use grid::*;
pub use movement::*;
