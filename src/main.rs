use clap::Parser;
use melodiary_tui::api::models::{convert, dto};
use melodiary_tui::api::{MelodiaryClient, MelodiaryClientConfig, clear_session};
use melodiary_tui::app::{App, AppSnapshot};
use melodiary_tui::error::AppError;
use melodiary_tui::ui::{Cli, Command, run_tui};
use melodiary_tui::{core, logging};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut cfg = MelodiaryClientConfig::default();
    if let Some(v) = cli.api_base_url.clone() {
        cfg.base_url = v;
    }
    if let Some(v) = cli.data_dir.clone() {
        cfg.data_dir = v;
    }

    let _log_guard = logging::init(
        &cfg.data_dir,
        logging::LogConfig {
            dir: cli.log_dir.clone(),
            filter: cli.log_filter.clone(),
        },
    );
    tracing::info!(
        data_dir = %cfg.data_dir.display(),
        base_url = %cfg.base_url,
        "melodiary-tui starting"
    );

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let (tx, rx) = core::spawn_app_actor(cfg, cli.redirect_port);
            run_tui(AppSnapshot::from_app(&App::default()), tx, rx).await?;
            Ok(())
        }
        Command::Sync { platform } => {
            let mut client = signed_in_client(cfg)?;
            let v = client.sync_platform(&platform).await?;
            let report = convert::to_sync_report(serde_json::from_value::<dto::SyncResp>(v)?);
            println!("{}", report.message);
            println!("Synced: {} track(s)", report.synced);
            if report.malformed > 0 {
                println!("Skipped: {} malformed track(s)", report.malformed);
            }
            Ok(())
        }
        Command::Add {
            name,
            artist,
            album,
            cover_art_url,
            duration,
            release_year,
            genre,
            notes,
        } => {
            let mut client = signed_in_client(cfg)?;
            let body = dto::NewTrackBody {
                track_name: name,
                artist_name: artist,
                album_name: album,
                cover_art_url,
                duration,
                release_year,
                genre,
                notes,
            };
            let v = client.add_manual_track(&body).await?;
            let track = convert::to_track(serde_json::from_value::<dto::TrackInfo>(v)?);
            println!(
                "Added \"{}\" by {} ({})",
                track.track_name, track.artist_name, track.track_id
            );
            Ok(())
        }
        Command::Logout => {
            clear_session(&cfg.data_dir)?;
            println!("Signed out.");
            Ok(())
        }
    }
}

fn signed_in_client(cfg: MelodiaryClientConfig) -> Result<MelodiaryClient, AppError> {
    let client = MelodiaryClient::new(cfg)?;
    if !client.is_authenticated() {
        return Err(AppError::Other(
            "not signed in; run `melodiary-tui` and sign in first".to_owned(),
        ));
    }
    Ok(client)
}
