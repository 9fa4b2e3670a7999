use std::time::Instant;

use super::{CoreState, UiAction};
use crate::api::actor::{ApiCommand, ApiEvent};
use crate::app::{View, path_for_view, resolve_route};
use crate::core::effects::CoreEffects;
use crate::core::utils;
use crate::messages::app::AppCommand;

pub async fn handle_ui(
    cmd: &AppCommand,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) -> UiAction {
    match cmd {
        AppCommand::Quit => return UiAction::Quit,
        AppCommand::Bootstrap => {
            effects.emit_state(&state.app);
            let id = utils::next_id(&mut state.req_id);
            effects.send_api_warn(
                ApiCommand::Init { req_id: id },
                "api channel closed: Init not sent",
            );
        }
        AppCommand::UiToggleHelp => {
            state.app.help_visible = !state.app.help_visible;
            effects.emit_state(&state.app);
        }
        AppCommand::NavHome => navigate(View::Home, state, effects),
        AppCommand::NavLogin => navigate(View::Login, state, effects),
        AppCommand::NavLibrary => navigate(View::Library, state, effects),
        _ => return UiAction::NotHandled,
    }
    UiAction::Handled
}

/// Move to `target`, substituting the login view for protected targets
/// while signed out. Every view change in the core goes through here, so
/// the guard cannot be skipped.
pub fn navigate(target: View, state: &mut CoreState, effects: &mut CoreEffects) {
    let resolved = resolve_route(target, state.app.logged_in);
    state.app.pending_redirect = None;
    if state.app.view != resolved {
        tracing::debug!(path = path_for_view(resolved), "view changed");
        state.app.view = resolved;
        if resolved == View::Library {
            super::library::enter(state, effects);
        }
    }
    effects.emit_state(&state.app);
}

/// Fires scheduled redirects once their deadline passes.
pub fn handle_tick(state: &mut CoreState, effects: &mut CoreEffects) {
    if let Some(pending) = state.app.pending_redirect
        && pending.at <= Instant::now()
    {
        navigate(pending.view, state, effects);
    }
}

/// Fallback for events no feature claimed: errors whose request is no
/// longer pending, and responses that arrived after a reset.
pub fn handle_api_event(evt: &ApiEvent, _state: &mut CoreState, effects: &mut CoreEffects) {
    match evt {
        ApiEvent::Error { req_id, message } => {
            tracing::warn!(req_id, message = %message, "api error with no pending request");
            effects.error(message.clone());
        }
        _ => {
            tracing::debug!(?evt, "unclaimed api event dropped");
        }
    }
}
