// src/lib.rs

//! Amelia conversation loader and intent classification library

pub mod error;
pub mod handlers;
pub mod llm;
pub mod models;
pub mod services;
pub mod storage;
pub mod transform;
pub mod warehouse;

#[cfg(test)]
mod testing;
