#![forbid(unsafe_code)]

#[macro_use]
pub mod prelude;

pub mod ctx;
pub mod repl;
pub mod repr;
pub mod traits;
