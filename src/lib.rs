// src/lib.rs

pub mod api;
pub mod config;
pub mod context;
pub mod interview;
pub mod llm;
pub mod persona;
pub mod retrieval;
pub mod state;
pub mod store;

pub use config::CONFIG;
