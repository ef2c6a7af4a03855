mod geo_driver;
mod storage_handle;

pub use geo_driver::{parse_address, require_address, GeoDriver, GeoLookup};
pub use storage_handle::StorageHandle;
