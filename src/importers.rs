pub mod sidra_importer;

pub use sidra_importer::{ImportError, SidraImporter};
