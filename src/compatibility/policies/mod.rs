mod error_policy;

pub use error_policy::{policy, retry_delay, ErrorKind, ErrorPolicy};
