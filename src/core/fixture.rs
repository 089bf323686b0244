//! Demo dataset for offline operation.
//!
//! Six executions spanning 2024-02-05 through 2024-02-10 plus a dashboard
//! snapshot whose KPI totals are the sums over those records. The data is
//! embedded in the API wire format, so loading it also exercises the same
//! decode path a live fetch uses.

use super::models::{DashboardSnapshot, EtlExecution};

/// Display cap on the dashboard's recent-executions list.
pub const RECENT_EXECUTIONS_CAP: usize = 5;

/// A self-contained dataset a fixture-backed source resolves against.
///
/// Constructed explicitly and injected; never a process-wide singleton, so
/// tests can substitute their own without shared-state leakage.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub executions: Vec<EtlExecution>,
    pub dashboard: DashboardSnapshot,
}

impl Fixture {
    pub fn new(executions: Vec<EtlExecution>, dashboard: DashboardSnapshot) -> Self {
        Self {
            executions,
            dashboard,
        }
    }

    /// The built-in demo dataset.
    pub fn demo() -> Self {
        let executions: Vec<EtlExecution> =
            serde_json::from_str(include_str!("fixture/executions.json"))
                .expect("embedded executions fixture is valid");

        let mut dashboard: DashboardSnapshot =
            serde_json::from_str(include_str!("fixture/dashboard.json"))
                .expect("embedded dashboard fixture is valid");

        // Most recent first, capped for display.
        dashboard.recent_executions = executions
            .iter()
            .take(RECENT_EXECUTIONS_CAP)
            .cloned()
            .collect();

        Self::new(executions, dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ExecutionStatus;

    #[test]
    fn demo_kpi_totals_match_record_sums() {
        let fixture = Fixture::demo();
        let kpis = &fixture.dashboard.kpis;

        let processed: u64 = fixture.executions.iter().map(|e| e.records_processed).sum();
        let success: u64 = fixture.executions.iter().map(|e| e.records_success).sum();
        let error: u64 = fixture.executions.iter().map(|e| e.records_error).sum();

        assert_eq!(kpis.total_records, 80601);
        assert_eq!(kpis.total_records, processed);
        assert_eq!(kpis.success_records, 79985);
        assert_eq!(kpis.success_records, success);
        assert_eq!(kpis.error_records, 616);
        assert_eq!(kpis.error_records, error);
        assert_eq!(kpis.success_records + kpis.error_records, kpis.total_records);
        assert!((kpis.success_rate - 99.24).abs() < 0.01);
    }

    #[test]
    fn demo_records_are_internally_consistent() {
        let fixture = Fixture::demo();
        assert_eq!(fixture.executions.len(), 6);

        for exec in &fixture.executions {
            assert_eq!(
                exec.records_processed,
                exec.records_success + exec.records_error,
                "record {} has inconsistent counts",
                exec.id
            );
            if exec.status.is_terminal() {
                assert!(exec.end_time >= exec.start_time);
            }
        }
    }

    #[test]
    fn demo_time_series_is_six_days_ascending() {
        let fixture = Fixture::demo();
        let series = &fixture.dashboard.time_series;

        assert_eq!(series.len(), 6);
        assert_eq!(series[0].date.to_string(), "2024-02-05");
        assert_eq!(series[5].date.to_string(), "2024-02-10");
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));

        for point in series {
            assert_eq!(point.processed, point.success + point.error);
        }
    }

    #[test]
    fn demo_distribution_sums_to_total_records() {
        let fixture = Fixture::demo();
        let total: u64 = fixture
            .dashboard
            .status_distribution
            .iter()
            .map(|s| s.value)
            .sum();

        assert_eq!(fixture.dashboard.status_distribution.len(), 2);
        assert_eq!(total, fixture.dashboard.kpis.total_records);
    }

    #[test]
    fn demo_recent_executions_are_first_five() {
        let fixture = Fixture::demo();
        let recent = &fixture.dashboard.recent_executions;

        assert_eq!(recent.len(), RECENT_EXECUTIONS_CAP);
        assert_eq!(recent[0].id, "exec-001");
        assert_eq!(recent[4].id, "exec-005");
        assert_eq!(recent[1].status, ExecutionStatus::Warning);
    }
}
