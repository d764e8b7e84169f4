//! Custom extractors for Axum handlers.

pub mod checked;

pub use checked::{CheckRejection, Checked, RouteInput};
