pub mod catalog_loader;
pub mod work_items;

pub use catalog_loader::{
    BundleStepRecord, CatalogLoader, CatalogLoaderError, CatalogRecord,
};
pub use work_items::{WorkItemLoader, WorkItemLoaderError};
