pub mod crop_service;
pub mod export_service;

pub use crop_service::CropService;
pub use export_service::{ExportError, ExportFile, ExportService};
