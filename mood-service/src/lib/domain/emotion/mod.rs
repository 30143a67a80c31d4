//! Mood logging domain: recording entries and reading a user's history.

pub mod errors;
pub mod models;
pub mod ports;
pub mod service;
