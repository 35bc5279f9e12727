//! Layout persistence
//!
//! This module stores the dock layout between sessions. The codec turns a
//! live layout into a label-only tree and back; the store keeps the encoded
//! blob under a fixed key.
//!
//! # Module Structure
//!
//! - `codec` - Wire format (`StoredNode`), serialize and resolve
//! - `store` - Storage backends (`MemoryStore`, `FileStore`) and `LayoutPersistence`
//! - `error` - Error types (`PersistError`)

mod codec;
mod error;
mod store;

pub use codec::{
    StoredNode, decode, encode, resolve, resolve_blob, round3, sanitize_ratio, serialize_layout,
};
pub use error::PersistError;
pub use store::{FileStore, LAYOUT_STORAGE_KEY, LayoutPersistence, LayoutStore, MemoryStore};
