mod error;
mod palette;

pub use error::*;
pub use palette::*;
