use chrono::{DateTime, FixedOffset, Local};
use tokio::sync::mpsc;

use crate::error::AdminError;
use crate::messages::{AdminRequest, StatsRequest};
use crate::stats::{DashboardReport, Snapshot};

/// Client for the dashboard and statistics rollups.
#[derive(Clone)]
pub struct StatsClient {
    sender: mpsc::Sender<AdminRequest>,
}

impl StatsClient {
    pub fn new(sender: mpsc::Sender<AdminRequest>) -> Self {
        Self { sender }
    }

    /// The report as seen now, in the local time zone.
    pub async fn report(&self) -> Result<DashboardReport, AdminError> {
        self.report_at(DateTime::<FixedOffset>::from(Local::now())).await
    }
}

client_method!(StatsClient => fn snapshot() -> Snapshot as StatsRequest::Snapshot, Error = AdminError);
client_method!(StatsClient => fn report_at(now: DateTime<FixedOffset>) -> DashboardReport as StatsRequest::Report, Error = AdminError);
