pub mod api;
pub mod bridge;
pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::image::ImageSource;
pub use client::FaceClient;
pub use config::FaceConfig;
pub use error::{Error, Result};
