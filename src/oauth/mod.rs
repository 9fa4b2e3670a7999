mod listener;

pub use listener::{CALLBACK_PATH, CallbackParams, spawn_redirect_listener};
