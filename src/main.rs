mod app;
mod catalog;
mod config;
mod session;
mod store;
mod text;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use config::{AppConfig, SessionInfo};
use store::cache::MemberCache;
use store::StoreClient;

#[derive(Parser, Debug)]
#[command(name = "garagehub")]
#[command(version = "0.1.0")]
#[command(about = "A terminal companion for the GarageHub garage-sharing community")]
struct Args {
    /// Output the current member snapshot as JSON (for scripts)
    #[arg(short, long)]
    status: bool,

    /// Sign in as the given user id
    #[arg(long, value_name = "USER_ID")]
    login: Option<String>,

    /// Display name to record with --login
    #[arg(long)]
    name: Option<String>,

    /// API token to record with --login
    #[arg(long)]
    token: Option<String>,

    /// Sign out
    #[arg(long)]
    logout: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Handle CLI-only commands
    if args.logout {
        return logout();
    }

    if let Some(user_id) = args.login {
        return login(user_id, args.name, args.token);
    }

    if args.status {
        return print_status().await;
    }

    // Run TUI
    run_tui().await
}

fn login(user_id: String, name: Option<String>, token: Option<String>) -> Result<()> {
    let mut config = AppConfig::load().unwrap_or_default();
    config.session = Some(SessionInfo {
        user_id: user_id.clone(),
        display_name: name,
        token,
    });
    config.save()?;
    println!("Signed in as {}", user_id);
    Ok(())
}

fn logout() -> Result<()> {
    let mut config = AppConfig::load().unwrap_or_default();
    config.session = None;
    config.save()?;
    println!("Signed out");
    Ok(())
}

async fn print_status() -> Result<()> {
    let config = AppConfig::load().unwrap_or_default();
    let user = config.current_user();

    let mut cache = MemberCache::default();
    if user.is_some() {
        let token = config.session.as_ref().and_then(|s| s.token.clone());
        let client = StoreClient::from_url(config.store_url(), token)?;
        cache.refresh(user.as_ref(), &client).await;
    }

    let members: Vec<_> = cache
        .members()
        .iter()
        .map(|m| {
            serde_json::json!({
                "id": m.id,
                "name": m.name,
                "garage": catalog::garage_label(&m.member_type),
                "email": m.email.as_deref().map(text::mask_email),
            })
        })
        .collect();

    let output = serde_json::json!({
        "signed_in": user.is_some(),
        "user": user.as_ref().map(|u| u.id.clone()),
        "developer": config.developer,
        "logo": config.developer.as_deref().and_then(catalog::developer_logo),
        "members": members,
    });

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

async fn run_tui() -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new().await?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c')
                            if key.modifiers.contains(event::KeyModifiers::CONTROL) =>
                        {
                            return Ok(())
                        }
                        _ => {
                            // Handle key and catch any errors to prevent crashes
                            if let Err(e) = app.handle_key(key).await {
                                app.status_message = Some(format!("Error: {}", e));
                            }
                        }
                    }
                }
            }
        }

        // Periodic housekeeping
        let _ = app.tick().await;
    }
}
