use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one ETL run. `Running` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Success,
    Warning,
    Error,
    Running,
}

impl ExecutionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Running => "running",
        }
    }
}

/// One ETL pipeline run as reported by the upstream system.
///
/// Records are read-only once fetched. `records_processed` is expected to
/// equal `records_success + records_error`, but upstream values are passed
/// through as-is, never corrected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtlExecution {
    pub id: String,
    pub execution_date: DateTime<Utc>,
    pub status: ExecutionStatus,
    /// Wall-clock duration in seconds. A running estimate for non-terminal runs.
    #[serde(rename = "duration")]
    pub duration_secs: u64,
    pub records_processed: u64,
    pub records_success: u64,
    pub records_error: u64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Headline metrics for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardKpis {
    pub total_records: u64,
    pub success_records: u64,
    pub error_records: u64,
    pub last_execution: DateTime<Utc>,
    /// Mean run duration in seconds.
    #[serde(rename = "averageDuration")]
    pub average_duration_secs: u64,
    /// Percentage in [0, 100].
    pub success_rate: f64,
}

/// One day of processing volume for the time-series charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub processed: u64,
    pub success: u64,
    pub error: u64,
}

/// One slice of the status-distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSlice {
    pub name: String,
    pub value: u64,
    /// Display color token, e.g. "#10b981".
    pub color: String,
}

/// Full dashboard payload for one fetch cycle.
///
/// Immutable once fetched; a refresh replaces the whole value, it is never
/// patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub kpis: DashboardKpis,
    pub time_series: Vec<TimeSeriesPoint>,
    pub status_distribution: Vec<StatusSlice>,
    pub recent_executions: Vec<EtlExecution>,
}

/// Response to a manual pipeline trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerReceipt {
    pub message: String,
    pub execution_id: String,
}
