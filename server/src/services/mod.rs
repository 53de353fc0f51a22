//! Domain services used by the HTTP routes.
//!
//! Service modules own validation and persistence so route handlers stay
//! focused on protocol translation.

pub mod note;
