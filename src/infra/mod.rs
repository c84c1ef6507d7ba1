//! Concrete record sources.

pub mod csv_dataset;
pub mod petitions;
