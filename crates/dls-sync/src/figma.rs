pub mod client;
pub mod error;
pub mod types;

pub use client::FigmaClient;
pub use error::FigmaError;
