use std::time::{Duration, Instant};

use super::CoreState;
use crate::api::actor::{ApiCommand, ApiEvent};
use crate::app::{CallbackPhase, PendingRedirect, View};
use crate::core::effects::CoreEffects;
use crate::core::infra::RequestKey;
use crate::core::utils;
use crate::oauth::CallbackParams;

const SUCCESS_REDIRECT_DELAY: Duration = Duration::from_millis(1500);
const ERROR_REDIRECT_DELAY: Duration = Duration::from_secs(5);

/// Fallback when the backend rejects the code exchange without a message.
const EXCHANGE_FAILED: &str = "Failed to authenticate. Please try again.";

/// One redirect delivery drives the whole callback view: it either starts
/// the code exchange or lands directly in the error phase. Duplicate
/// deliveries for the same sign-in attempt are ignored.
pub fn handle_callback(params: CallbackParams, state: &mut CoreState, effects: &mut CoreEffects) {
    if state.app.callback_processed {
        tracing::debug!("duplicate callback delivery ignored");
        return;
    }
    state.app.callback_processed = true;
    state.app.view = View::Callback;
    state.app.pending_redirect = None;

    if let Some(err) = params.error {
        tracing::warn!(error = %err, "authorization denied");
        fail(format!("Spotify authorization error: {err}"), state, effects);
        return;
    }
    let Some(code) = params.code else {
        fail(
            "No authorization code received from Spotify.".to_owned(),
            state,
            effects,
        );
        return;
    };

    state.app.callback_phase = CallbackPhase::Loading;
    state.app.callback_message = None;
    effects.emit_state(&state.app);
    let id = state
        .request_tracker
        .issue(RequestKey::ExchangeCode, || utils::next_id(&mut state.req_id));
    effects.send_api_warn(
        ApiCommand::ExchangeCode { req_id: id, code },
        "api channel closed: ExchangeCode not sent",
    );
}

fn fail(message: String, state: &mut CoreState, effects: &mut CoreEffects) {
    state.app.callback_phase = CallbackPhase::Error;
    state.app.callback_message = Some(message);
    state.app.pending_redirect = Some(PendingRedirect {
        view: View::Login,
        at: Instant::now() + ERROR_REDIRECT_DELAY,
    });
    effects.emit_state(&state.app);
}

pub async fn handle_api_event(
    evt: &ApiEvent,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) -> bool {
    match evt {
        ApiEvent::SessionEstablished { req_id, user } => {
            if !state
                .request_tracker
                .accept(&RequestKey::ExchangeCode, *req_id)
            {
                tracing::debug!(req_id, "stale SessionEstablished response dropped");
                return false;
            }
            state.app.logged_in = true;
            state.app.user_id = Some(user.user_id.clone());
            state.app.login_in_flight = false;
            state.app.callback_phase = CallbackPhase::Success;
            state.app.callback_message = None;
            state.app.pending_redirect = Some(PendingRedirect {
                view: View::Library,
                at: Instant::now() + SUCCESS_REDIRECT_DELAY,
            });
            effects.emit_state(&state.app);
            if user.display_name.is_empty() {
                effects.toast("Signed in.");
            } else {
                effects.toast(format!("Signed in as {}.", user.display_name));
            }
            true
        }
        ApiEvent::Error { req_id, message } => {
            if !state
                .request_tracker
                .accept(&RequestKey::ExchangeCode, *req_id)
            {
                return false;
            }
            tracing::warn!(req_id, message = %message, "code exchange failed");
            let shown = if message.is_empty() {
                EXCHANGE_FAILED.to_owned()
            } else {
                message.clone()
            };
            fail(shown, state, effects);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::effects::CoreEffect;
    use crate::domain::model::AuthUser;

    fn code_params(code: &str) -> CallbackParams {
        CallbackParams {
            code: Some(code.to_owned()),
            error: None,
        }
    }

    #[tokio::test]
    async fn callback_with_code_starts_exchange() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();

        handle_callback(code_params("abc123"), &mut state, &mut effects);

        assert_eq!(state.app.view, View::Callback);
        assert_eq!(state.app.callback_phase, CallbackPhase::Loading);
        assert!(state.app.callback_processed);
        assert!(effects.actions.iter().any(|effect| matches!(
            effect,
            CoreEffect::SendApi {
                cmd: ApiCommand::ExchangeCode { code, .. },
                ..
            } if code == "abc123"
        )));
    }

    #[tokio::test]
    async fn callback_with_error_param_fails_without_exchange() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();

        let params = CallbackParams {
            code: None,
            error: Some("access_denied".to_owned()),
        };
        handle_callback(params, &mut state, &mut effects);

        assert_eq!(state.app.callback_phase, CallbackPhase::Error);
        assert_eq!(
            state.app.callback_message.as_deref(),
            Some("Spotify authorization error: access_denied")
        );
        let redirect = state.app.pending_redirect.expect("redirect scheduled");
        assert_eq!(redirect.view, View::Login);
        assert!(!effects.actions.iter().any(|effect| matches!(
            effect,
            CoreEffect::SendApi {
                cmd: ApiCommand::ExchangeCode { .. },
                ..
            }
        )));
    }

    #[tokio::test]
    async fn callback_without_code_fails() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();

        handle_callback(CallbackParams::default(), &mut state, &mut effects);

        assert_eq!(state.app.callback_phase, CallbackPhase::Error);
        assert_eq!(
            state.app.callback_message.as_deref(),
            Some("No authorization code received from Spotify.")
        );
    }

    #[tokio::test]
    async fn duplicate_callback_is_ignored() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();
        handle_callback(code_params("abc123"), &mut state, &mut effects);

        let mut effects = CoreEffects::default();
        handle_callback(code_params("other"), &mut state, &mut effects);

        assert!(effects.actions.is_empty());
    }

    #[tokio::test]
    async fn session_established_schedules_library_redirect() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();
        handle_callback(code_params("abc123"), &mut state, &mut effects);

        let mut effects = CoreEffects::default();
        let evt = ApiEvent::SessionEstablished {
            req_id: 1,
            user: AuthUser {
                user_id: "user-1".to_owned(),
                email: "a@b.c".to_owned(),
                display_name: "Ada".to_owned(),
            },
        };
        let handled = handle_api_event(&evt, &mut state, &mut effects).await;

        assert!(handled);
        assert!(state.app.logged_in);
        assert_eq!(state.app.user_id.as_deref(), Some("user-1"));
        assert_eq!(state.app.callback_phase, CallbackPhase::Success);
        let redirect = state.app.pending_redirect.expect("redirect scheduled");
        assert_eq!(redirect.view, View::Library);
    }

    #[tokio::test]
    async fn exchange_failure_shows_backend_message() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();
        handle_callback(code_params("abc123"), &mut state, &mut effects);

        let mut effects = CoreEffects::default();
        let evt = ApiEvent::Error {
            req_id: 1,
            message: "Invalid authorization code".to_owned(),
        };
        let handled = handle_api_event(&evt, &mut state, &mut effects).await;

        assert!(handled);
        assert_eq!(state.app.callback_phase, CallbackPhase::Error);
        assert_eq!(
            state.app.callback_message.as_deref(),
            Some("Invalid authorization code")
        );
        let redirect = state.app.pending_redirect.expect("redirect scheduled");
        assert_eq!(redirect.view, View::Login);
    }

    #[tokio::test]
    async fn exchange_failure_without_message_uses_fallback() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();
        handle_callback(code_params("abc123"), &mut state, &mut effects);

        let mut effects = CoreEffects::default();
        let evt = ApiEvent::Error {
            req_id: 1,
            message: String::new(),
        };
        handle_api_event(&evt, &mut state, &mut effects).await;

        assert_eq!(state.app.callback_message.as_deref(), Some(EXCHANGE_FAILED));
    }
}
