pub mod constants;
pub mod errors;
pub mod resolve;
pub mod storage;
pub mod validation;

// 公開API
pub use constants::{CACHE_CONTROL_LONG_TERM, FALLBACK_DIMENSION, MAX_KEY_LENGTH, PROCESS_PARAM};
pub use errors::{AuthError, GatewayError, StorageError};
pub use resolve::{
    resolve, ImageExtension, ParsedKey, ResizeDirective, ResizeMode, SizeToken, SizedVariant,
};
pub use storage::{MemoryStore, ObjectStore, StoredObject, TosClient, TosSettings};
pub use validation::{bearer_token, normalize_key, validate_key, verify_bearer};
