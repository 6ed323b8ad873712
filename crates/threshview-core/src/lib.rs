pub use image;

pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod loader;
pub mod params;
pub mod scheduler;
pub mod threshold;
