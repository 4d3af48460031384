pub mod types;

pub use types::{AuthError, GatewayError, StorageError};
