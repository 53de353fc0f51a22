//! Sync client — persists confirmed board mutations to the Note Store.
//!
//! DESIGN
//! ======
//! The board crate mutates local state first and hands back `Action`s. This
//! crate turns those into store calls without blocking the caller: each note
//! gets its own ordered lane (an unbounded channel drained by one task), so
//! updates for a note reach the store in the order their gestures completed
//! while different notes proceed independently. Failures are logged and
//! reported as `SyncEvent`s; nothing is retried or rolled back.
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | `NoteStore` trait (the store contract) and `StoreError` |
//! | [`http`] | `HttpNoteStore`, the JSON-over-HTTP implementation |
//! | [`client`] | `SyncClient`, per-note lanes and completion events |

pub mod client;
pub mod http;
pub mod store;

pub use client::{SyncClient, SyncConfig, SyncEvent};
pub use http::HttpNoteStore;
pub use store::{NoteStore, StoreError};
