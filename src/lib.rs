pub mod banner;
pub mod commands;
pub mod config;
pub mod consts;
pub mod error;
pub mod render;
pub mod repl;
pub mod requester;
pub mod source;
pub mod spinner;
pub mod state;
