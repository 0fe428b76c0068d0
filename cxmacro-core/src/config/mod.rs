//! Configuration types
//!
//! Options of the `[custom_macro]` section and the input ranges every macro
//! validates against.

pub mod limits;
pub mod types;

pub use limits::*;
pub use types::*;
