// src/api/mod.rs

pub mod error;
pub mod http;
pub mod types;
