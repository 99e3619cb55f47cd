//! Best-effort visit recording
//!
//! Recording never feeds back into the redirect: each insert runs on its own
//! task, is bounded by a timeout, and failures are only logged.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::VisitSink;
use crate::storage::NewVisit;

#[derive(Clone)]
pub struct VisitRecorder {
    sink: Arc<dyn VisitSink>,
    timeout: Duration,
}

impl VisitRecorder {
    pub fn new(sink: Arc<dyn VisitSink>, timeout: Duration) -> Self {
        Self { sink, timeout }
    }

    /// Insert one visit, waiting at most `timeout`
    pub async fn record(&self, visit: NewVisit) {
        let shortcut_id = visit.shortcut_id;
        match tokio::time::timeout(self.timeout, self.sink.record_visit(visit)).await {
            Ok(Ok(())) => debug!("Visit recorded for shortcut {}", shortcut_id),
            Ok(Err(e)) => warn!("Failed to record visit for shortcut {}: {}", shortcut_id, e),
            Err(_) => warn!(
                "Recording visit for shortcut {} timed out after {:?}",
                shortcut_id, self.timeout
            ),
        }
    }

    /// Record on a detached task
    ///
    /// The task keeps running when the caller is dropped, so a client that
    /// disconnects after the lookup still gets its visit counted.
    pub fn record_detached(&self, visit: NewVisit) -> JoinHandle<()> {
        let recorder = self.clone();
        tokio::spawn(async move {
            recorder.record(visit).await;
        })
    }
}
