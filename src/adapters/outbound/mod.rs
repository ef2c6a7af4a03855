mod driver_registry;
mod http_client;
mod ip_api_driver;
mod ipwhois_driver;
mod local_disk_storage;
mod maxmind_driver;
mod memory_storage;

pub use driver_registry::build_geo_driver;
pub use http_client::build_client;
pub use ip_api_driver::{IpApiDriver, IpApiResponse, IP_API_DEFAULT_URL};
pub use ipwhois_driver::{IpWhoisDriver, IpWhoisResponse, IpWhoisTimezone, IPWHOIS_DEFAULT_URL};
pub use local_disk_storage::{mime_from_extension, LocalDiskStorage};
pub use maxmind_driver::{LocationRecord, MaxMindCity, MaxMindDriver, NamedRecord, PostalRecord};
pub use memory_storage::MemoryStorage;
