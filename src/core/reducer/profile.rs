use super::{CoreState, UiAction};
use crate::api::actor::{ApiCommand, ApiEvent};
use crate::api::models::convert;
use crate::core::effects::CoreEffects;
use crate::core::infra::RequestKey;
use crate::core::utils;
use crate::domain::model::{NotificationFrequency, Preferences, Theme};
use crate::messages::app::AppCommand;

/// Pane-enter hook: fetch profile and connections together.
pub fn enter(state: &mut CoreState, effects: &mut CoreEffects) {
    if state.app.profile.is_some() || state.request_tracker.is_pending(&RequestKey::Profile) {
        return;
    }
    state.app.profile_status = "Loading profile...".to_owned();
    effects.emit_state(&state.app);
    let id = state
        .request_tracker
        .issue(RequestKey::Profile, || utils::next_id(&mut state.req_id));
    effects.send_api_warn(
        ApiCommand::FetchProfile { req_id: id },
        "api channel closed: FetchProfile not sent",
    );
    let id = state
        .request_tracker
        .issue(RequestKey::Connections, || utils::next_id(&mut state.req_id));
    effects.send_api_warn(
        ApiCommand::FetchConnections { req_id: id },
        "api channel closed: FetchConnections not sent",
    );
}

pub async fn handle_ui(
    cmd: &AppCommand,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) -> UiAction {
    match cmd {
        AppCommand::ConnectionsMoveUp => {
            state.app.connections_selected = state.app.connections_selected.saturating_sub(1);
            effects.emit_state(&state.app);
        }
        AppCommand::ConnectionsMoveDown => {
            if state.app.connections_selected + 1 < state.app.connections.len() {
                state.app.connections_selected += 1;
            }
            effects.emit_state(&state.app);
        }
        AppCommand::ConnectionDisconnectSelected => {
            if state.request_tracker.is_pending(&RequestKey::Disconnect) {
                return UiAction::Handled;
            }
            let Some(conn) = state.app.connections.get(state.app.connections_selected) else {
                return UiAction::Handled;
            };
            let connected = conn.connected;
            let platform = convert::platform_to_string(&conn.platform);
            if !connected {
                state.app.profile_status = "That platform is already disconnected.".to_owned();
                effects.emit_state(&state.app);
                return UiAction::Handled;
            }
            state.app.profile_status = format!("Disconnecting {platform}...");
            effects.emit_state(&state.app);
            let id = state
                .request_tracker
                .issue(RequestKey::Disconnect, || utils::next_id(&mut state.req_id));
            effects.send_api_warn(
                ApiCommand::DisconnectPlatform {
                    req_id: id,
                    platform,
                },
                "api channel closed: DisconnectPlatform not sent",
            );
        }
        AppCommand::PrefToggleEmailNotifications => {
            let Some(user) = state.app.profile.as_ref() else {
                return UiAction::Handled;
            };
            let mut prefs = user.preferences.clone();
            prefs.email_notifications = !prefs.email_notifications;
            send_update(prefs, state, effects);
        }
        AppCommand::PrefCycleFrequency => {
            let Some(user) = state.app.profile.as_ref() else {
                return UiAction::Handled;
            };
            let mut prefs = user.preferences.clone();
            prefs.notification_frequency = next_frequency(prefs.notification_frequency);
            send_update(prefs, state, effects);
        }
        AppCommand::PrefCycleTheme => {
            let Some(user) = state.app.profile.as_ref() else {
                return UiAction::Handled;
            };
            let mut prefs = user.preferences.clone();
            prefs.theme = Some(next_theme(prefs.theme));
            send_update(prefs, state, effects);
        }
        _ => return UiAction::NotHandled,
    }
    UiAction::Handled
}

/// Preferences are saved as a whole object; the updated profile comes
/// back in the response.
fn send_update(preferences: Preferences, state: &mut CoreState, effects: &mut CoreEffects) {
    if state.request_tracker.is_pending(&RequestKey::Preferences) {
        return;
    }
    state.app.profile_status = "Saving preferences...".to_owned();
    effects.emit_state(&state.app);
    let id = state
        .request_tracker
        .issue(RequestKey::Preferences, || utils::next_id(&mut state.req_id));
    effects.send_api_warn(
        ApiCommand::UpdatePreferences {
            req_id: id,
            preferences,
        },
        "api channel closed: UpdatePreferences not sent",
    );
}

fn next_frequency(f: NotificationFrequency) -> NotificationFrequency {
    match f {
        NotificationFrequency::Daily => NotificationFrequency::Weekly,
        NotificationFrequency::Weekly => NotificationFrequency::Never,
        NotificationFrequency::Never => NotificationFrequency::Daily,
    }
}

fn next_theme(t: Option<Theme>) -> Theme {
    match t {
        Some(Theme::Light) => Theme::Dark,
        Some(Theme::Dark) => Theme::Auto,
        Some(Theme::Auto) | None => Theme::Light,
    }
}

pub async fn handle_api_event(
    evt: &ApiEvent,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) -> bool {
    match evt {
        ApiEvent::Profile { req_id, user } => {
            if state.request_tracker.accept(&RequestKey::Profile, *req_id) {
                state.app.profile = Some((**user).clone());
                state.app.profile_status.clear();
                effects.emit_state(&state.app);
                return true;
            }
            if state
                .request_tracker
                .accept(&RequestKey::Preferences, *req_id)
            {
                state.app.profile = Some((**user).clone());
                state.app.profile_status = "Preferences saved.".to_owned();
                effects.emit_state(&state.app);
                return true;
            }
            tracing::debug!(req_id, "stale Profile response dropped");
            false
        }
        ApiEvent::Connections {
            req_id,
            connections,
        } => {
            if !state
                .request_tracker
                .accept(&RequestKey::Connections, *req_id)
            {
                tracing::debug!(req_id, "stale Connections response dropped");
                return false;
            }
            state.app.connections = connections.clone();
            if state.app.connections_selected >= state.app.connections.len() {
                state.app.connections_selected = state.app.connections.len().saturating_sub(1);
            }
            effects.emit_state(&state.app);
            true
        }
        ApiEvent::PlatformDisconnected { req_id, platform } => {
            if !state
                .request_tracker
                .accept(&RequestKey::Disconnect, *req_id)
            {
                tracing::debug!(req_id, "stale PlatformDisconnected response dropped");
                return false;
            }
            let target = convert::platform_from_string(platform);
            for conn in &mut state.app.connections {
                if conn.platform == target {
                    conn.connected = false;
                    conn.connected_at = None;
                }
            }
            state.app.profile_status = format!("Disconnected {platform}.");
            effects.emit_state(&state.app);
            true
        }
        ApiEvent::Error { req_id, message } => {
            if state.request_tracker.accept(&RequestKey::Profile, *req_id) {
                tracing::warn!(req_id, message = %message, "profile fetch failed");
                state.app.profile_status = format!("Failed to load profile: {message}");
                effects.emit_state(&state.app);
                return true;
            }
            if state
                .request_tracker
                .accept(&RequestKey::Preferences, *req_id)
            {
                tracing::warn!(req_id, message = %message, "preference update failed");
                state.app.profile_status = format!("Failed to save preferences: {message}");
                effects.emit_state(&state.app);
                return true;
            }
            if state
                .request_tracker
                .accept(&RequestKey::Connections, *req_id)
            {
                tracing::warn!(req_id, message = %message, "connections fetch failed");
                state.app.profile_status = format!("Failed to load connections: {message}");
                effects.emit_state(&state.app);
                return true;
            }
            if state
                .request_tracker
                .accept(&RequestKey::Disconnect, *req_id)
            {
                tracing::warn!(req_id, message = %message, "disconnect failed");
                state.app.profile_status = format!("Failed to disconnect: {message}");
                effects.emit_state(&state.app);
                return true;
            }
            false
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::effects::CoreEffect;
    use crate::domain::model::{Platform, PlatformConnection, User};

    fn user() -> User {
        User {
            user_id: "user-1".to_owned(),
            email: "a@b.c".to_owned(),
            display_name: "Ada".to_owned(),
            created_at: None,
            has_real_email: true,
            spotify_id: Some("spotify-1".to_owned()),
            preferences: Preferences::default(),
        }
    }

    fn connection(connected: bool) -> PlatformConnection {
        PlatformConnection {
            platform: Platform::Spotify,
            connected,
            connected_at: None,
            display_name: Some("Ada".to_owned()),
            profile_url: None,
            platform_user_id: Some("spotify-1".to_owned()),
        }
    }

    #[tokio::test]
    async fn enter_fetches_profile_and_connections() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();

        enter(&mut state, &mut effects);

        assert_eq!(state.app.profile_status, "Loading profile...");
        assert!(effects.actions.iter().any(|effect| matches!(
            effect,
            CoreEffect::SendApi {
                cmd: ApiCommand::FetchProfile { .. },
                ..
            }
        )));
        assert!(effects.actions.iter().any(|effect| matches!(
            effect,
            CoreEffect::SendApi {
                cmd: ApiCommand::FetchConnections { .. },
                ..
            }
        )));

        // Loaded profile blocks a refetch on re-enter.
        state.app.profile = Some(user());
        let mut effects = CoreEffects::default();
        enter(&mut state, &mut effects);
        assert!(effects.actions.is_empty());
    }

    #[tokio::test]
    async fn toggle_email_sends_flipped_preferences() {
        let mut state = CoreState::new();
        state.app.profile = Some(user());
        assert!(state.app.profile.as_ref().unwrap().preferences.email_notifications);

        let mut effects = CoreEffects::default();
        handle_ui(
            &AppCommand::PrefToggleEmailNotifications,
            &mut state,
            &mut effects,
        )
        .await;

        assert_eq!(state.app.profile_status, "Saving preferences...");
        assert!(effects.actions.iter().any(|effect| matches!(
            effect,
            CoreEffect::SendApi {
                cmd: ApiCommand::UpdatePreferences { preferences, .. },
                ..
            } if !preferences.email_notifications
        )));
    }

    #[tokio::test]
    async fn frequency_cycles_daily_weekly_never() {
        assert_eq!(
            next_frequency(NotificationFrequency::Daily),
            NotificationFrequency::Weekly
        );
        assert_eq!(
            next_frequency(NotificationFrequency::Weekly),
            NotificationFrequency::Never
        );
        assert_eq!(
            next_frequency(NotificationFrequency::Never),
            NotificationFrequency::Daily
        );
    }

    #[tokio::test]
    async fn theme_cycle_starts_at_light() {
        assert_eq!(next_theme(None), Theme::Light);
        assert_eq!(next_theme(Some(Theme::Light)), Theme::Dark);
        assert_eq!(next_theme(Some(Theme::Dark)), Theme::Auto);
        assert_eq!(next_theme(Some(Theme::Auto)), Theme::Light);
    }

    #[tokio::test]
    async fn saved_preferences_replace_profile() {
        let mut state = CoreState::new();
        state.app.profile = Some(user());
        let mut effects = CoreEffects::default();
        handle_ui(
            &AppCommand::PrefToggleEmailNotifications,
            &mut state,
            &mut effects,
        )
        .await;

        let mut updated = user();
        updated.preferences.email_notifications = false;
        let mut effects = CoreEffects::default();
        let evt = ApiEvent::Profile {
            req_id: state.req_id - 1,
            user: Box::new(updated),
        };
        assert!(handle_api_event(&evt, &mut state, &mut effects).await);

        assert_eq!(state.app.profile_status, "Preferences saved.");
        assert!(
            !state
                .app
                .profile
                .as_ref()
                .unwrap()
                .preferences
                .email_notifications
        );
    }

    #[tokio::test]
    async fn disconnect_marks_connection_offline() {
        let mut state = CoreState::new();
        state.app.connections = vec![connection(true)];

        let mut effects = CoreEffects::default();
        handle_ui(
            &AppCommand::ConnectionDisconnectSelected,
            &mut state,
            &mut effects,
        )
        .await;

        assert_eq!(state.app.profile_status, "Disconnecting spotify...");
        assert!(effects.actions.iter().any(|effect| matches!(
            effect,
            CoreEffect::SendApi {
                cmd: ApiCommand::DisconnectPlatform { platform, .. },
                ..
            } if platform == "spotify"
        )));

        let mut effects = CoreEffects::default();
        let evt = ApiEvent::PlatformDisconnected {
            req_id: state.req_id - 1,
            platform: "spotify".to_owned(),
        };
        assert!(handle_api_event(&evt, &mut state, &mut effects).await);

        assert!(!state.app.connections[0].connected);
        assert_eq!(state.app.profile_status, "Disconnected spotify.");
    }

    #[tokio::test]
    async fn disconnect_skips_already_disconnected() {
        let mut state = CoreState::new();
        state.app.connections = vec![connection(false)];

        let mut effects = CoreEffects::default();
        handle_ui(
            &AppCommand::ConnectionDisconnectSelected,
            &mut state,
            &mut effects,
        )
        .await;

        assert_eq!(
            state.app.profile_status,
            "That platform is already disconnected."
        );
        assert!(!effects.actions.iter().any(|effect| matches!(
            effect,
            CoreEffect::SendApi {
                cmd: ApiCommand::DisconnectPlatform { .. },
                ..
            }
        )));
    }

    #[tokio::test]
    async fn preference_commands_require_loaded_profile() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();

        let outcome = handle_ui(
            &AppCommand::PrefToggleEmailNotifications,
            &mut state,
            &mut effects,
        )
        .await;

        assert!(matches!(outcome, UiAction::Handled));
        assert!(effects.actions.is_empty());
    }
}
