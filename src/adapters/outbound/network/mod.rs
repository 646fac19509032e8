/// Network adapters for external API calls
mod caching_package_lookup;
mod maven_central_client;

pub use caching_package_lookup::CachingPackageLookup;
pub use maven_central_client::{MavenCentralClient, MavenCoordinates};
