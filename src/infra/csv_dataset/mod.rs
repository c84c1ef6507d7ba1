mod loader;

pub use loader::{CsvDataset, CsvSource, PREVIEW_ROWS};
