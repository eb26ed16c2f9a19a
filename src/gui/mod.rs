// src/gui/mod.rs
pub mod app;

pub use app::run;
