//! Interactive TUI for the ETL monitoring dashboard.
//!
//! Two views over two loading-state controllers: the dashboard (KPIs,
//! charts, recent executions) and the full execution history.

mod app;
mod input;
mod ui;

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::context::AppContext;
use app::TuiApp;

/// Run the TUI over the configured data source.
pub async fn run(ctx: AppContext) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = TuiApp::new(&ctx);
    app.init(Duration::from_secs(ctx.config.refresh_interval_secs));
    let result = run_app(&mut terminal, &mut app).await;
    app.shutdown();

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut TuiApp,
) -> Result<()> {
    // Redraw cadence; controller state changes land between frames.
    let tick = Duration::from_millis(250);

    loop {
        let dashboard = app.dashboard.state().await;
        let executions = app.executions.state().await;

        terminal.draw(|frame| ui::render(frame, app, &dashboard, &executions))?;

        if event::poll(tick)? {
            let event = event::read()?;
            if let Some(action) = input::handle_event(event) {
                app.handle_action(action).await;
            }
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
