//! TUI application state and logic.

use std::sync::Arc;
use std::time::Duration;

use crate::context::AppContext;
use crate::core::controller::ResourceController;
use crate::core::models::{DashboardSnapshot, EtlExecution};
use crate::core::source::DataSource;

/// Current view being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// KPIs, charts and recent executions.
    Dashboard,
    /// Full execution history table.
    History {
        /// Selected row index
        selected: usize,
    },
}

/// Actions that can be triggered by user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Up,
    Down,
    Refresh,
    History,
    Back,
    Trigger,
}

/// Main TUI application state.
pub struct TuiApp {
    source: Arc<dyn DataSource>,
    pub view: View,
    pub dashboard: ResourceController<DashboardSnapshot>,
    pub executions: ResourceController<Vec<EtlExecution>>,
    pub running: bool,
    pub mock: bool,
    /// One-line result of the last manual trigger.
    pub notice: Option<String>,
}

impl TuiApp {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            source: Arc::clone(&ctx.source),
            view: View::Dashboard,
            dashboard: ResourceController::dashboard(Arc::clone(&ctx.source)),
            executions: ResourceController::executions(
                Arc::clone(&ctx.source),
                ctx.config.history_limit,
            ),
            running: true,
            mock: ctx.config.mock,
            notice: None,
        }
    }

    /// Kick off the initial dashboard load and, when configured, the
    /// periodic refresh. Loads run in the background; the render loop
    /// observes controller state each frame.
    pub fn init(&self, refresh_interval: Duration) {
        self.spawn_load(&self.dashboard);
        if !refresh_interval.is_zero() {
            self.dashboard.spawn_auto_refresh(refresh_interval);
        }
    }

    fn spawn_load<T: Clone + Send + Sync + 'static>(&self, ctl: &ResourceController<T>) {
        let ctl = ctl.clone();
        tokio::spawn(async move { ctl.load().await });
    }

    /// Handle an action and update state accordingly.
    pub async fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Refresh => {
                self.notice = None;
                match self.view {
                    View::Dashboard => self.spawn_load(&self.dashboard),
                    View::History { .. } => self.spawn_load(&self.executions),
                }
            }
            Action::History => {
                self.spawn_load(&self.executions);
                self.view = View::History { selected: 0 };
            }
            Action::Back => {
                self.view = View::Dashboard;
            }
            Action::Up => self.navigate(-1).await,
            Action::Down => self.navigate(1).await,
            Action::Trigger => self.trigger().await,
        }
    }

    /// Tear down both controllers; pending refreshes become no-ops.
    pub fn shutdown(&self) {
        self.dashboard.shutdown();
        self.executions.shutdown();
    }

    async fn navigate(&mut self, delta: isize) {
        if let View::History { selected } = self.view {
            let len = self
                .executions
                .state()
                .await
                .data
                .map(|records| records.len())
                .unwrap_or(0);
            if len == 0 {
                return;
            }
            let next = selected
                .saturating_add_signed(delta)
                .min(len.saturating_sub(1));
            self.view = View::History { selected: next };
        }
    }

    async fn trigger(&mut self) {
        self.notice = Some(match self.source.trigger().await {
            Ok(receipt) => format!("{} ({})", receipt.message, receipt.execution_id),
            Err(e) => format!("Trigger failed: {}", e),
        });
    }
}
