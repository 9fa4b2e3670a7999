pub mod actor;
mod client;
pub mod models;

pub use client::{
    ApiError, MelodiaryClient, MelodiaryClientConfig, SessionState, clear_session, load_session,
    save_session, session_path,
};
