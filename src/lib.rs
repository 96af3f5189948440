pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod image_input;
pub mod interactive;
pub mod progress;
pub mod render;
pub mod service;
