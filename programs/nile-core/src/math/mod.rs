//! NILE Core Mathematics Modules
//!
//! All calculation and pure-arithmetic functions for the protocol.

pub mod bonding_curve;
pub mod fixed_point;

pub use bonding_curve::*;
pub use fixed_point::*;
