pub mod error;
pub mod loader;
pub mod models;

pub use error::DatasetError;
pub use loader::load_dataset;
pub use models::*;
