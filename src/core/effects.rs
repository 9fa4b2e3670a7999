use crate::api::actor::ApiCommand;
use crate::app::App;
use crate::app::AppSnapshot;
use crate::messages::app::AppEvent;
use tokio::sync::mpsc;

/// Side effects collected while reducing one message. They run after the
/// reducer returns so state changes and channel sends cannot interleave.
#[derive(Default)]
pub struct CoreEffects {
    pub(super) actions: Vec<CoreEffect>,
}

#[derive(Debug)]
pub enum CoreEffect {
    EmitState(Box<AppSnapshot>),
    EmitToast(String),
    EmitError(String),
    SendApi {
        cmd: ApiCommand,
        warn: Option<&'static str>,
    },
    OpenBrowser {
        url: String,
    },
}

impl CoreEffects {
    pub fn emit_state(&mut self, app: &App) {
        self.actions
            .push(CoreEffect::EmitState(Box::new(AppSnapshot::from_app(app))));
    }

    pub fn send_api(&mut self, cmd: ApiCommand) {
        self.actions.push(CoreEffect::SendApi { cmd, warn: None });
    }

    pub fn send_api_warn(&mut self, cmd: ApiCommand, warn: &'static str) {
        self.actions.push(CoreEffect::SendApi {
            cmd,
            warn: Some(warn),
        });
    }

    pub fn open_browser(&mut self, url: impl Into<String>) {
        self.actions.push(CoreEffect::OpenBrowser { url: url.into() });
    }

    pub fn toast(&mut self, message: impl Into<String>) {
        self.actions.push(CoreEffect::EmitToast(message.into()));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.actions.push(CoreEffect::EmitError(message.into()));
    }
}

pub struct CoreDispatch<'a> {
    pub(super) tx_api: &'a mpsc::Sender<ApiCommand>,
    pub(super) tx_evt: &'a mpsc::Sender<AppEvent>,
}

pub async fn run_effects(effects: CoreEffects, dispatch: &CoreDispatch<'_>) {
    for effect in effects.actions {
        match effect {
            CoreEffect::EmitState(app) => {
                let _ = dispatch.tx_evt.send(AppEvent::State(app)).await;
            }
            CoreEffect::EmitToast(msg) => {
                let _ = dispatch.tx_evt.send(AppEvent::Toast(msg)).await;
            }
            CoreEffect::EmitError(msg) => {
                let _ = dispatch.tx_evt.send(AppEvent::Error(msg)).await;
            }
            CoreEffect::SendApi { cmd, warn } => {
                if let Err(e) = dispatch.tx_api.send(cmd).await
                    && let Some(ctx) = warn
                {
                    tracing::warn!(err = %e, "{ctx}");
                }
            }
            CoreEffect::OpenBrowser { url } => {
                if let Err(e) = webbrowser::open(&url) {
                    tracing::warn!(err = %e, url = %url, "failed to open browser");
                }
            }
        }
    }
}
