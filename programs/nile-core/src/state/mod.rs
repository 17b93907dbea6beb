//! NILE Core State
//!
//! Account structures for every persisted entity in the protocol.

pub mod curve;
pub mod factory;
pub mod oracle;
pub mod soul_token;
pub mod token_pair;
pub mod treasury;

pub use curve::*;
pub use factory::*;
pub use oracle::*;
pub use soul_token::*;
pub use token_pair::*;
pub use treasury::*;
