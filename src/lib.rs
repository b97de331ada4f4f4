pub mod channel;
pub mod cli;
pub mod config;
pub mod console;
pub mod input;
pub mod logging;
pub mod mvi;
pub mod runtime;
