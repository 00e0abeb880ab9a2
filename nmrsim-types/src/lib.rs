pub mod acquisition;
pub mod block_type;
pub mod error;
pub mod header;
pub mod layout;
pub mod line;
pub mod status;

pub use acquisition::*;
pub use block_type::*;
pub use error::*;
pub use header::*;
pub use layout::*;
pub use line::*;
pub use status::*;

/// Комплексная выборка FID (f32 re + f32 im).
pub use rustfft::num_complex::Complex32;
