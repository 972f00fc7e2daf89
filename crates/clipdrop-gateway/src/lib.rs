//! HTTP front-end for Clipdrop.
//!
//! Serves the submission form, renders extraction results into it, and
//! streams downloaded files back as attachments.

pub mod app;
pub mod error;
pub mod handlers;
pub mod page;
pub mod state;

pub use app::App;
pub use state::AppState;
