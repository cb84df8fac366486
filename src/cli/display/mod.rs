//! Display primitives shared by command output: tables and colours.

pub mod colors;
pub mod table;

pub use colors::*;
pub use table::*;
