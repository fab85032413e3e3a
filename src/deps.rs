//! Re-exports of third party crates whose types are present in `kpalette`'s public API.

pub use palette;
