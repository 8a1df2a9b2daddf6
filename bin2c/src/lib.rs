#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub mod config;
pub mod encoder;
pub mod error;
pub mod logging;

pub use encoder::encode;
pub use encoder::run;
