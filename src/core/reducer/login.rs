use super::{CoreState, UiAction};
use crate::api::actor::{ApiCommand, ApiEvent};
use crate::app::View;
use crate::core::effects::CoreEffects;
use crate::core::infra::RequestKey;
use crate::core::utils;
use crate::messages::app::AppCommand;

/// Shown for any failure obtaining the authorization URL; the real error
/// goes to the log only.
const AUTH_URL_FAILED: &str = "Failed to connect to Spotify. Please try again.";

pub async fn handle_ui(
    cmd: &AppCommand,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) -> UiAction {
    match cmd {
        AppCommand::LoginStart => {
            if state.app.logged_in {
                super::ui::navigate(View::Library, state, effects);
                return UiAction::Handled;
            }
            if state.app.login_in_flight {
                return UiAction::Handled;
            }
            state.app.login_in_flight = true;
            state.app.login_status = "Contacting Spotify...".to_owned();
            // A fresh attempt re-arms the redirect listener latch.
            state.app.callback_processed = false;
            effects.emit_state(&state.app);
            let id = state
                .request_tracker
                .issue(RequestKey::AuthUrl, || utils::next_id(&mut state.req_id));
            effects.send_api_warn(
                ApiCommand::FetchAuthUrl { req_id: id },
                "api channel closed: FetchAuthUrl not sent",
            );
        }
        AppCommand::Logout => {
            let id = utils::next_id(&mut state.req_id);
            effects.send_api_warn(
                ApiCommand::Logout { req_id: id },
                "api channel closed: Logout not sent",
            );
        }
        _ => return UiAction::NotHandled,
    }
    UiAction::Handled
}

pub async fn handle_api_event(
    evt: &ApiEvent,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) -> bool {
    match evt {
        ApiEvent::ClientReady {
            req_id,
            authenticated,
            user_id,
        } => {
            tracing::debug!(req_id, authenticated, "api actor ready");
            state.app.logged_in = *authenticated;
            state.app.user_id = user_id.clone();
            if *authenticated {
                super::ui::navigate(View::Library, state, effects);
            } else {
                super::ui::navigate(View::Home, state, effects);
            }
            true
        }
        ApiEvent::AuthUrl { req_id, url } => {
            if !state.request_tracker.accept(&RequestKey::AuthUrl, *req_id) {
                tracing::debug!(req_id, "stale AuthUrl response dropped");
                return false;
            }
            state.app.login_in_flight = false;
            state.app.login_auth_url = Some(url.clone());
            state.app.login_status =
                "Complete the sign-in in your browser, then return here.".to_owned();
            effects.emit_state(&state.app);
            effects.open_browser(url.clone());
            true
        }
        ApiEvent::LoggedOut { .. } => {
            state.request_tracker.reset_all();
            state.app.reset_user_state();
            effects.toast("Signed out.");
            super::ui::navigate(View::Login, state, effects);
            true
        }
        ApiEvent::SessionExpired { req_id } => {
            tracing::debug!(req_id, "session expired, resetting to login");
            state.request_tracker.reset_all();
            state.app.reset_user_state();
            state.app.login_status = "Your session has expired. Please sign in again.".to_owned();
            super::ui::navigate(View::Login, state, effects);
            true
        }
        ApiEvent::Error { req_id, message } => {
            if !state.request_tracker.accept(&RequestKey::AuthUrl, *req_id) {
                return false;
            }
            tracing::warn!(req_id, message = %message, "auth url fetch failed");
            state.app.login_in_flight = false;
            state.app.login_status = AUTH_URL_FAILED.to_owned();
            effects.emit_state(&state.app);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::effects::CoreEffect;

    #[tokio::test]
    async fn login_start_requests_auth_url() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();

        let outcome = handle_ui(&AppCommand::LoginStart, &mut state, &mut effects).await;

        assert!(matches!(outcome, UiAction::Handled));
        assert!(state.app.login_in_flight);
        assert_eq!(state.app.login_status, "Contacting Spotify...");
        assert!(effects.actions.iter().any(|effect| matches!(
            effect,
            CoreEffect::SendApi {
                cmd: ApiCommand::FetchAuthUrl { .. },
                ..
            }
        )));
    }

    #[tokio::test]
    async fn login_start_is_ignored_while_in_flight() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();

        handle_ui(&AppCommand::LoginStart, &mut state, &mut effects).await;
        let sends_before = effects.actions.len();
        handle_ui(&AppCommand::LoginStart, &mut state, &mut effects).await;

        assert_eq!(effects.actions.len(), sends_before);
    }

    #[tokio::test]
    async fn auth_url_response_opens_browser() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();
        handle_ui(&AppCommand::LoginStart, &mut state, &mut effects).await;

        let mut effects = CoreEffects::default();
        let evt = ApiEvent::AuthUrl {
            req_id: 1,
            url: "https://accounts.spotify.com/authorize?x=1".to_owned(),
        };
        let handled = handle_api_event(&evt, &mut state, &mut effects).await;

        assert!(handled);
        assert!(!state.app.login_in_flight);
        assert!(effects.actions.iter().any(|effect| matches!(
            effect,
            CoreEffect::OpenBrowser { url } if url.contains("accounts.spotify.com")
        )));
    }

    #[tokio::test]
    async fn stale_auth_url_response_is_dropped() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();
        handle_ui(&AppCommand::LoginStart, &mut state, &mut effects).await;

        let mut effects = CoreEffects::default();
        let evt = ApiEvent::AuthUrl {
            req_id: 999,
            url: "https://accounts.spotify.com/authorize?x=1".to_owned(),
        };
        let handled = handle_api_event(&evt, &mut state, &mut effects).await;

        assert!(!handled);
        assert!(state.app.login_in_flight);
        assert!(effects.actions.is_empty());
    }

    #[tokio::test]
    async fn auth_url_failure_shows_generic_message() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();
        handle_ui(&AppCommand::LoginStart, &mut state, &mut effects).await;

        let mut effects = CoreEffects::default();
        let evt = ApiEvent::Error {
            req_id: 1,
            message: "connection refused".to_owned(),
        };
        let handled = handle_api_event(&evt, &mut state, &mut effects).await;

        assert!(handled);
        assert!(!state.app.login_in_flight);
        assert_eq!(state.app.login_status, AUTH_URL_FAILED);
    }

    #[tokio::test]
    async fn session_expiry_resets_to_login() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();
        state.app.logged_in = true;
        state.app.user_id = Some("user-1".to_owned());
        state.app.view = View::Library;

        let evt = ApiEvent::SessionExpired { req_id: 7 };
        let handled = handle_api_event(&evt, &mut state, &mut effects).await;

        assert!(handled);
        assert!(!state.app.logged_in);
        assert!(state.app.user_id.is_none());
        assert_eq!(state.app.view, View::Login);
        assert_eq!(
            state.app.login_status,
            "Your session has expired. Please sign in again."
        );
    }

    #[tokio::test]
    async fn logged_out_clears_user_state() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();
        state.app.logged_in = true;
        state.app.view = View::Library;

        let evt = ApiEvent::LoggedOut { req_id: 3 };
        let handled = handle_api_event(&evt, &mut state, &mut effects).await;

        assert!(handled);
        assert!(!state.app.logged_in);
        assert_eq!(state.app.view, View::Login);
        assert!(effects
            .actions
            .iter()
            .any(|effect| matches!(effect, CoreEffect::EmitToast(msg) if msg == "Signed out.")));
    }

    #[tokio::test]
    async fn client_ready_with_session_opens_library() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();

        let evt = ApiEvent::ClientReady {
            req_id: 1,
            authenticated: true,
            user_id: Some("user-1".to_owned()),
        };
        let handled = handle_api_event(&evt, &mut state, &mut effects).await;

        assert!(handled);
        assert!(state.app.logged_in);
        assert_eq!(state.app.view, View::Library);
    }
}
