pub mod client;
pub mod memory;
pub mod signer;
pub mod traits;

pub use client::{TosClient, TosSettings};
pub use memory::MemoryStore;
pub use signer::TosSigner;
pub use traits::{ObjectStore, StoredObject};
// StorageError は errors モジュールで定義済み
pub use crate::errors::StorageError;
