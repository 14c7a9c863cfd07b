//! Request dispatch for the dashboard
//!
//! Every submission runs on its own tokio task and reports back through
//! an unbounded channel. Nothing de-duplicates or cancels earlier
//! requests, so the UI applies responses in the order they arrive. Tasks
//! still in flight are aborted when the dispatcher is dropped.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::client::{ApiClient, CostQuery, MetricsQuery};
use crate::error::ApiError;
use crate::models::{CostReport, MetricsReport};

/// A request produced by a form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    Costs(CostQuery),
    Metrics(MetricsQuery),
}

/// Completion of a dispatched request
#[derive(Debug)]
pub enum DashboardEvent {
    Costs(Result<CostReport, ApiError>),
    Metrics {
        query: MetricsQuery,
        result: Result<MetricsReport, ApiError>,
    },
}

pub struct Dispatcher {
    client: Arc<ApiClient>,
    tx: UnboundedSender<DashboardEvent>,
    in_flight: Vec<JoinHandle<()>>,
}

impl Dispatcher {
    pub fn new(client: ApiClient) -> (Self, UnboundedReceiver<DashboardEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = Self {
            client: Arc::new(client),
            tx,
            in_flight: Vec::new(),
        };
        (dispatcher, rx)
    }

    /// Spawn the request; must be called inside a tokio runtime
    pub fn dispatch(&mut self, request: ApiRequest) {
        self.in_flight.retain(|handle| !handle.is_finished());

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let handle = match request {
            ApiRequest::Costs(query) => {
                debug!(users = %query.users, instance_capacity = %query.instance_capacity, "Dispatching cost request");
                tokio::spawn(async move {
                    let result = client.compute_costs(&query).await;
                    // Receiver gone means the dashboard exited
                    let _ = tx.send(DashboardEvent::Costs(result));
                })
            }
            ApiRequest::Metrics(query) => {
                debug!(instance_id = %query.instance_id, "Dispatching metrics request");
                tokio::spawn(async move {
                    let result = client.fetch_metrics(&query).await;
                    let _ = tx.send(DashboardEvent::Metrics { query, result });
                })
            }
        };
        self.in_flight.push(handle);
    }

    /// Number of requests that have not completed yet
    pub fn in_flight(&self) -> usize {
        self.in_flight.iter().filter(|h| !h.is_finished()).count()
    }

    pub fn abort_all(&mut self) {
        for handle in self.in_flight.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.abort_all();
    }
}
