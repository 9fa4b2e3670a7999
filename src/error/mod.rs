//! Structured error types shared across the crate.

mod app;

pub use app::AppError;

// All error types implement Display and Error via thiserror.
