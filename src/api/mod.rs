mod extractor;

pub use extractor::{Extraction, PaletteExtractor};
