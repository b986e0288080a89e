use std::sync::Arc;

use futures_util::{stream, StreamExt};
use serde_json::Value;

use crate::error::{MapError, SinkError};
use crate::models::{Event, EventName};

use super::client_trait::{EventSink, OrderSource};
use super::klaviyo::TrackOutcome;
use super::mapper;

/// Result of submitting one event.
#[derive(Debug, Clone)]
pub struct EventOutcome {
    pub event: EventName,
    pub event_id: u64,
    pub result: Result<Value, Arc<SinkError>>,
}

impl EventOutcome {
    pub fn track_outcome(&self) -> Option<TrackOutcome> {
        self.result.as_ref().ok().map(TrackOutcome::from_response)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub source_failed: bool,
    pub orders: usize,
    pub events: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub failed: usize,
    // answered with something other than 1 or 0
    pub unknown: usize,
    pub mapping_failures: Vec<MapError>,
    pub outcomes: Vec<EventOutcome>,
}

impl RunReport {
    fn record(&mut self, outcome: EventOutcome) {
        match outcome.track_outcome() {
            Some(TrackOutcome::Accepted) => self.accepted += 1,
            Some(TrackOutcome::Rejected) => self.rejected += 1,
            Some(TrackOutcome::Unknown) => self.unknown += 1,
            None => self.failed += 1,
        }
        self.outcomes.push(outcome);
    }
}

/// One sync run: pull orders, map them, push every event through a bounded
/// pool of in-flight track calls.
pub struct Pipeline {
    source: Arc<dyn OrderSource>,
    sink: Arc<dyn EventSink>,
    token: String,
    concurrency: usize,
}

impl Pipeline {
    pub fn new(
        source: Arc<dyn OrderSource>,
        sink: Arc<dyn EventSink>,
        token: String,
        concurrency: usize,
    ) -> Self {
        Self {
            source,
            sink,
            token,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn run(&self) -> RunReport {
        let mut report = RunReport::default();

        let orders = match self.source.list_orders().await {
            Ok(orders) => orders,
            Err(e) => {
                tracing::error!(error = %e, "could not fetch orders; nothing to send");
                report.source_failed = true;
                return report;
            }
        };
        report.orders = orders.len();
        tracing::info!(count = orders.len(), "fetched orders");

        let mut events: Vec<Event> = Vec::new();
        for order in &orders {
            match mapper::map_order(order, &self.token) {
                Ok(mut evs) => events.append(&mut evs),
                Err(e) => {
                    tracing::error!(order_id = order.id, error = %e, "skipping order");
                    report.mapping_failures.push(e);
                }
            }
        }
        report.events = events.len();

        let outcomes: Vec<EventOutcome> = stream::iter(events)
            .map(|event| {
                let sink = Arc::clone(&self.sink);
                async move { submit(sink.as_ref(), event).await }
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        for outcome in outcomes {
            report.record(outcome);
        }

        tracing::info!(
            orders = report.orders,
            events = report.events,
            accepted = report.accepted,
            rejected = report.rejected,
            failed = report.failed,
            unknown = report.unknown,
            skipped_orders = report.mapping_failures.len(),
            "sync run finished"
        );
        report
    }
}

async fn submit(sink: &dyn EventSink, event: Event) -> EventOutcome {
    let name = event.event;
    let event_id = event.event_id();
    let result = match sink.send(&event).await {
        Ok(body) => {
            match TrackOutcome::from_response(&body) {
                TrackOutcome::Accepted => {
                    tracing::info!(event = %name, event_id, response = %body, "event sent")
                }
                TrackOutcome::Rejected => {
                    tracing::warn!(event = %name, event_id, response = %body, "event rejected")
                }
                TrackOutcome::Unknown => {
                    tracing::warn!(event = %name, event_id, response = %body, "unexpected response")
                }
            }
            Ok(body)
        }
        Err(e) => {
            tracing::error!(event = %name, event_id, error = %e, "event not sent");
            Err(Arc::new(e))
        }
    };

    EventOutcome {
        event: name,
        event_id,
        result,
    }
}
