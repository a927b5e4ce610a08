pub mod builder;
pub mod cli;
pub mod error;
pub mod logging;
