// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;

pub mod backend;
pub mod data;
pub mod gate;
pub mod gui;
pub mod progress;
pub mod runner;
pub mod scrape;
pub mod store;
pub mod validate;
