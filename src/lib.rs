pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod ports;
pub mod render;
pub mod script;
pub mod terminal;
pub mod types;
pub mod utils;
