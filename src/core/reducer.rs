use crate::api::MelodiaryClientConfig;
use crate::api::actor::{ApiEvent, spawn_api_actor};
use crate::app::App;
use crate::messages::app::{AppCommand, AppEvent};
use crate::oauth::CallbackParams;

use std::time::Duration;
use tokio::sync::mpsc;

use crate::core::effects::{CoreDispatch, CoreEffects, run_effects};
use crate::core::infra::{RequestKey, RequestTracker};

mod callback;
mod library;
mod login;
mod playlists;
mod profile;
mod ui;

enum CoreMsg {
    Ui(AppCommand),
    Api(ApiEvent),
    Callback(CallbackParams),
    Tick,
}

struct CoreState {
    app: App,
    req_id: u64,
    request_tracker: RequestTracker<RequestKey>,
    /// Whether the in-flight library fetch extends the list or replaces it.
    library_fetch_append: bool,
}

enum UiAction {
    Handled,
    NotHandled,
    Quit,
}

impl CoreState {
    fn new() -> Self {
        Self {
            app: App::default(),
            req_id: 1,
            request_tracker: RequestTracker::new(),
            library_fetch_append: false,
        }
    }
}

async fn reduce(msg: CoreMsg, state: &mut CoreState, effects: &mut CoreEffects) -> bool {
    match msg {
        CoreMsg::Tick => ui::handle_tick(state, effects),
        CoreMsg::Callback(params) => callback::handle_callback(params, state, effects),
        CoreMsg::Ui(cmd) => {
            match ui::handle_ui(&cmd, state, effects).await {
                UiAction::Quit => return true,
                UiAction::Handled => return false,
                UiAction::NotHandled => {}
            }

            if matches!(
                login::handle_ui(&cmd, state, effects).await,
                UiAction::Handled
            ) {
                return false;
            }
            if matches!(
                library::handle_ui(&cmd, state, effects).await,
                UiAction::Handled
            ) {
                return false;
            }
            if matches!(
                playlists::handle_ui(&cmd, state, effects).await,
                UiAction::Handled
            ) {
                return false;
            }
            if matches!(
                profile::handle_ui(&cmd, state, effects).await,
                UiAction::Handled
            ) {
                return false;
            }
        }
        CoreMsg::Api(evt) => {
            if login::handle_api_event(&evt, state, effects).await {
                return false;
            }
            if callback::handle_api_event(&evt, state, effects).await {
                return false;
            }
            if library::handle_api_event(&evt, state, effects).await {
                return false;
            }
            if playlists::handle_api_event(&evt, state, effects).await {
                return false;
            }
            if profile::handle_api_event(&evt, state, effects).await {
                return false;
            }
            ui::handle_api_event(&evt, state, effects);
        }
    }

    false
}

pub fn spawn_app_actor(
    cfg: MelodiaryClientConfig,
    redirect_port: u16,
) -> (mpsc::Sender<AppCommand>, mpsc::Receiver<AppEvent>) {
    let (tx_cmd, mut rx_cmd) = mpsc::channel::<AppCommand>(64);
    let (tx_evt, rx_evt) = mpsc::channel::<AppEvent>(64);

    let (tx_api, mut rx_api) = spawn_api_actor(cfg);

    // The listener failing to bind is not fatal: everything but the
    // sign-in redirect still works.
    let mut rx_callback = match crate::oauth::spawn_redirect_listener(redirect_port) {
        Ok(rx) => Some(rx),
        Err(e) => {
            tracing::warn!(
                err = %e,
                port = redirect_port,
                "redirect listener unavailable, sign-in cannot complete"
            );
            None
        }
    };

    tokio::spawn(async move {
        let mut state = CoreState::new();
        let mut tick = tokio::time::interval(Duration::from_millis(200));
        let dispatch = CoreDispatch {
            tx_api: &tx_api,
            tx_evt: &tx_evt,
        };

        loop {
            let msg = tokio::select! {
                _ = tick.tick() => CoreMsg::Tick,
                Some(cmd) = rx_cmd.recv() => CoreMsg::Ui(cmd),
                Some(evt) = rx_api.recv() => CoreMsg::Api(evt),
                Some(params) = next_callback(&mut rx_callback) => CoreMsg::Callback(params),
            };

            let mut effects = CoreEffects::default();
            let should_quit = reduce(msg, &mut state, &mut effects).await;
            run_effects(effects, &dispatch).await;
            if should_quit {
                break;
            }
        }
    });

    (tx_cmd, rx_evt)
}

async fn next_callback(
    rx: &mut Option<mpsc::Receiver<CallbackParams>>,
) -> Option<CallbackParams> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
