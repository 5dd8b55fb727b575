//! Notes module: note records, storage contract and the note service.
//!
//! This module provides:
//! - `Note` and `NoteInput` types (`model`)
//! - The `NoteStore` persistence contract (`store`)
//! - `NoteService`, which encrypts secure notes on write and decrypts
//!   them on read (`service`)

pub mod model;
pub mod service;
pub mod store;

// Re-export the most commonly used items.
pub use model::{Note, NoteId, NoteInput};
pub use service::NoteService;
pub use store::NoteStore;
