//! Dashboard command implementation
//!
//! Runs the interactive terminal dashboard until the user quits.

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

use cloud_economics::{
    client::ApiClient,
    config::Config,
    dashboard::{Action, Dashboard, DashboardEvent, Dispatcher},
};

/// Execute the dashboard command
pub async fn execute(cfg: &Config) -> Result<()> {
    let client = ApiClient::new(&cfg.api)?;
    info!(base_url = client.base_url(), "Starting dashboard");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let (dispatcher, events) = Dispatcher::new(client);
    let result = run_dashboard(&mut terminal, dispatcher, events, cfg.dashboard.tick_rate()).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("Dashboard closed");
    result
}

async fn run_dashboard(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut dispatcher: Dispatcher,
    mut events: UnboundedReceiver<DashboardEvent>,
    tick_rate: Duration,
) -> Result<()> {
    let mut app = Dashboard::new();

    loop {
        // Apply completed requests in arrival order
        while let Ok(event) = events.try_recv() {
            app.apply(event);
        }

        terminal.draw(|f| app.render(f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                match app.handle_key(key) {
                    Action::Quit => break,
                    Action::Submit(request) => dispatcher.dispatch(request),
                    Action::None => {}
                }
            }
        }

        app.on_tick();
        // Let spawned requests make progress between polls
        tokio::task::yield_now().await;
    }

    // Requests still running belong to a dashboard that no longer exists
    if dispatcher.in_flight() > 0 {
        info!(in_flight = dispatcher.in_flight(), "Aborting in-flight requests");
    }
    dispatcher.abort_all();
    Ok(())
}
