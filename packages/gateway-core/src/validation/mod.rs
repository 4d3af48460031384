pub mod key;
pub mod token;

pub use key::{normalize_key, validate_key};
pub use token::{bearer_token, verify_bearer};
