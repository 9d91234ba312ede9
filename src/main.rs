use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use ratatui::layout::{Constraint, Layout};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use folio::action::{Action, Section};
use folio::app::{App, Effect, InputMode, Overlay};
use folio::client::{ActivitySource, Gateway, GithubClient, OfflineGateway, RestGateway};
use folio::config::{Cli, Command, ConfigFile, LogTarget, Settings};
use folio::domain::Portfolio;
use folio::event::{key_to_action, AppEvent, RawEventHandler};
use folio::session::Session;
use folio::widgets;
use folio::worker::{FolioHandle, FolioRequest, FolioWorker};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Set up logging
    let _log_guard = init_logging(cli.log_target())?;

    let settings = Settings::resolve(&cli, ConfigFile::load().unwrap_or_default());
    let content = match &settings.content {
        Some(path) => Portfolio::load(path)?,
        None => Portfolio::builtin(),
    };
    let github_user = settings
        .github_user
        .clone()
        .or_else(|| content.github_handle())
        .unwrap_or_default();
    let session = Session::from_credentials(settings.user_id.clone(), settings.access_token.clone());

    match cli.command {
        Some(Command::Activity { json }) => {
            let activity = build_activity_source(&settings)?;
            let report = folio::headless::activity_report(
                activity.as_ref(),
                &github_user,
                settings.activity_limit,
                settings.time_display,
                json,
            )
            .await?;
            println!("{}", report);
            Ok(())
        }
        Some(Command::Book(args)) => {
            let gateway = build_gateway(&settings, &session)?;
            let receipt = folio::headless::book(gateway.as_ref(), &session, args).await?;
            println!("{}", receipt);
            Ok(())
        }
        Some(Command::Train(args)) => {
            let gateway = build_gateway(&settings, &session)?;
            let receipt = folio::headless::train(gateway.as_ref(), &session, args).await?;
            println!("{}", receipt);
            Ok(())
        }
        None => {
            let activity = build_activity_source(&settings)?;
            let gateway = build_gateway(&settings, &session)?;
            let app = App::new(
                content,
                session,
                github_user,
                settings.activity_limit,
                settings.time_display,
            );
            run_tui(app, activity, gateway).await
        }
    }
}

fn init_logging(target: LogTarget) -> Result<Option<WorkerGuard>> {
    match target {
        LogTarget::File(log_file) => {
            let file = std::fs::File::create(log_file)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_writer(writer)
                .with_ansi(false)
                .with_env_filter(EnvFilter::from_default_env())
                .init();
            Ok(Some(guard))
        }
        LogTarget::Stderr => {
            let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .with_target(false)
                .init();
            Ok(None)
        }
        LogTarget::Off => Ok(None),
    }
}

fn build_activity_source(settings: &Settings) -> Result<Arc<dyn ActivitySource>> {
    let client = GithubClient::new(&settings.github_api, settings.http_timeout)?;
    Ok(Arc::new(client))
}

fn build_gateway(settings: &Settings, session: &Session) -> Result<Arc<dyn Gateway>> {
    let Some(url) = settings.gateway_url.as_deref() else {
        tracing::info!("No gateway configured; remote sections will be empty");
        return Ok(Arc::new(OfflineGateway));
    };
    if settings.anon_key.is_empty() {
        return Err(eyre!(
            "FOLIO_ANON_KEY is required when FOLIO_GATEWAY_URL is set"
        ));
    }
    let gateway = RestGateway::new(
        url,
        settings.anon_key.clone(),
        session.access_token().map(str::to_string),
        settings.http_timeout,
    )?;
    Ok(Arc::new(gateway))
}

async fn run_tui(
    mut app: App,
    activity: Arc<dyn ActivitySource>,
    gateway: Arc<dyn Gateway>,
) -> Result<()> {
    // Set up channels
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Create worker
    let (worker, folio_handle) = FolioWorker::new(activity, gateway, action_tx);
    tokio::spawn(worker.run());

    // Initial data load
    let effects = app.start();
    handle_effects(effects, &folio_handle);

    // Set up terminal
    let mut terminal = folio::tui::init()?;

    // Set up event handler
    let mut events = RawEventHandler::new(Duration::from_secs(1));

    // Main loop
    loop {
        // Render
        terminal.draw(|frame| render(&app, frame))?;

        // Handle events
        tokio::select! {
            Some(event) = events.next() => {
                match event {
                    AppEvent::Key(key) => {
                        if let Some(action) = key_to_action(
                            key,
                            &app.input_mode,
                            &app.overlay,
                            &app.input_buffer,
                        ) {
                            let effects = app.update(action);
                            handle_effects(effects, &folio_handle);
                        }
                    }
                    AppEvent::Tick => {
                        let effects = app.update(Action::Tick);
                        handle_effects(effects, &folio_handle);
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                let effects = app.update(action);
                handle_effects(effects, &folio_handle);
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    folio::tui::restore()?;

    Ok(())
}

fn render(app: &App, frame: &mut ratatui::Frame) {
    let area = frame.area();

    frame.render_widget(
        ratatui::widgets::Block::default()
            .style(ratatui::style::Style::default().bg(folio::theme::BG_DARK)),
        area,
    );

    let command_height = if app.input_mode == InputMode::Command { 2 } else { 0 };
    let layout = Layout::vertical([
        Constraint::Length(1),              // Tab bar
        Constraint::Fill(1),                // Content
        Constraint::Length(command_height), // Command input + suggestions
        Constraint::Length(1),              // Footer
    ])
    .split(area);

    // Tab bar
    widgets::tab_bar::render(app, frame, layout[0]);

    // Content area
    let content_area = layout[1].inner(ratatui::layout::Margin::new(1, 1));
    match app.section.active() {
        Section::About => widgets::about::render(app, frame, content_area),
        Section::Projects => widgets::showcase::render(app, frame, content_area),
        Section::Activity => widgets::activity::render(app, frame, content_area),
        Section::Reviews => widgets::reviews::render(app, frame, content_area),
        Section::Services => widgets::services::render(app, frame, content_area),
        Section::Team => widgets::team::render(app, frame, content_area),
        Section::Dashboard => widgets::dashboard::render(app, frame, content_area),
    }

    // Command input
    if app.input_mode == InputMode::Command {
        let [suggest_area, input_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(layout[2]);
        widgets::command_input::render_suggestions(app, frame, suggest_area);
        widgets::command_input::render(app, frame, input_area);
    }

    // Footer
    widgets::footer::render(app, frame, layout[3]);

    // Overlays
    if app.overlay == Overlay::Help {
        widgets::help_overlay::render(app.section.active(), frame, area);
    }

    // Error toast
    widgets::error_toast::render(app, frame, area);
}

fn handle_effects(effects: Vec<Effect>, folio_handle: &FolioHandle) {
    for effect in effects {
        match effect {
            Effect::FetchActivity(ticket) => {
                folio_handle.send(FolioRequest::FetchActivity(ticket));
            }
            Effect::LoadCollection(collection) => {
                folio_handle.send(FolioRequest::LoadCollection(collection));
            }
            Effect::LoadDashboard {
                generation,
                user_id,
            } => {
                folio_handle.send(FolioRequest::LoadDashboard {
                    generation,
                    user_id,
                });
            }
            Effect::SignOut => {
                folio_handle.send(FolioRequest::SignOut);
            }
            Effect::Quit => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(args: &[&str]) -> Settings {
        let mut argv = vec!["folio"];
        argv.extend_from_slice(args);
        Settings::resolve(&Cli::parse_from(argv), ConfigFile::default())
    }

    #[test]
    fn bad_github_root_does_not_block_the_gateway() {
        let settings = settings(&["--github-api", "not a url"]);
        assert!(build_activity_source(&settings).is_err());
        assert!(build_gateway(&settings, &Session::Anonymous).is_ok());
    }

    #[test]
    fn gateway_url_requires_anon_key() {
        let settings = settings(&["--gateway-url", "https://db.example.com"]);
        assert!(build_gateway(&settings, &Session::Anonymous).is_err());
    }
}
