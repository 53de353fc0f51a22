//! Interaction core for the shared sticky-note board.
//!
//! This crate owns everything that happens between a raw pointer event and a
//! confirmed local mutation: translating screen coordinates into board space,
//! deciding whether a gesture pans the board or drags a note, resolving
//! clicks into selection changes, and keeping the stacking order monotonic.
//! It performs no I/O. Every mutation that must reach the server is returned
//! to the host as an [`engine::Action`], which the `sync` crate persists.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Session object [`engine::BoardCore`] and the emitted [`engine::Action`]s |
//! | [`note`] | Wire note type and the per-note view state store |
//! | [`viewport`] | Pan offset, resize centering and coordinate conversions |
//! | [`input`] | Pointer event types and the gesture state machine states |
//! | [`hit`] | Hit-testing pointer positions against notes |
//! | [`zorder`] | Monotonic stacking counter |
//! | [`consts`] | Shared constants (click threshold, note size, palette, limits) |

pub mod consts;
pub mod engine;
pub mod hit;
pub mod input;
pub mod note;
pub mod viewport;
pub mod zorder;
