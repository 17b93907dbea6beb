//! NILE Core Instructions
//!
//! One module per instruction group, re-exported flat so `lib.rs` can wire
//! handlers without qualifying every path.

pub mod buy;
pub mod create_soul_token;
pub mod factory;
pub mod oracle;
pub mod quote;
pub mod sell;
pub mod treasury;

pub use buy::*;
pub use create_soul_token::*;
pub use factory::*;
pub use oracle::*;
pub use quote::*;
pub use sell::*;
pub use treasury::*;
