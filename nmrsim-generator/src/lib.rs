pub mod config;
pub mod error;
pub mod input;
pub mod manifest;
pub mod pipeline;

pub use config::*;
pub use error::*;
pub use input::*;
pub use manifest::*;
pub use pipeline::*;
