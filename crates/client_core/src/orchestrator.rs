//! All-or-nothing fan-out over the six dashboard datasets, with
//! generation-based discarding of out-of-order completions.

use std::{collections::HashSet, sync::Arc};

use futures::try_join;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use shared::{
    domain::{DateRange, Role, Session},
    protocol::{CategoryProfit, FinancialPeriod, GeoRecord, KpiSummary, OrderSummary, TopCustomer},
};

use crate::{
    error::{FetchError, OrchestrationError},
    session::SessionGuard,
    transport,
};

/// One fully-populated result of a dashboard fetch generation. Either all
/// six datasets are present or the fetch failed as a whole; partial
/// snapshots are never built.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub kpis: KpiSummary,
    pub financial: Vec<FinancialPeriod>,
    pub category_profit: Vec<CategoryProfit>,
    pub top_customers: Vec<TopCustomer>,
    pub geo: Vec<GeoRecord>,
    pub recent_orders: Vec<OrderSummary>,
}

#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// This generation's snapshot is now the visible one.
    Applied(Arc<DashboardSnapshot>),
    /// A newer generation started or applied first; this result was
    /// discarded at the application boundary.
    Stale,
    /// The session lacks the administrator role; nothing was fetched and
    /// no state changed.
    Skipped,
}

struct OrchestratorState {
    latest_started: u64,
    applied_generation: u64,
    in_flight: HashSet<u64>,
    snapshot: Option<Arc<DashboardSnapshot>>,
}

pub struct DataOrchestrator {
    http: Client,
    base_url: Url,
    session_guard: Arc<dyn SessionGuard>,
    state: Mutex<OrchestratorState>,
}

impl DataOrchestrator {
    pub fn new(base_url: Url, session_guard: Arc<dyn SessionGuard>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            session_guard,
            state: Mutex::new(OrchestratorState {
                latest_started: 0,
                applied_generation: 0,
                in_flight: HashSet::new(),
                snapshot: None,
            }),
        }
    }

    /// Whether any fetch generation is still outstanding.
    pub async fn is_loading(&self) -> bool {
        !self.state.lock().await.in_flight.is_empty()
    }

    /// The snapshot of the highest generation applied so far, if any.
    pub async fn latest_snapshot(&self) -> Option<Arc<DashboardSnapshot>> {
        self.state.lock().await.snapshot.clone()
    }

    /// Fetches all six dashboard datasets concurrently for one generation.
    ///
    /// Generations are a monotonically increasing counter supplied by the
    /// caller; both a filter change and a manual refresh must mint a new
    /// one. The orchestrator discards completions that lost the race to a
    /// newer generation, but it does not serialize callers and does not
    /// deduplicate concurrent calls issued for the same generation.
    ///
    /// A 401 on any dataset read tears the session down through the
    /// injected [`SessionGuard`] before the error is returned. In-flight
    /// requests of a superseded generation are never aborted; their
    /// results are suppressed when they complete.
    pub async fn fetch_snapshot(
        &self,
        filter: DateRange,
        session: &Session,
        generation: u64,
    ) -> Result<FetchOutcome, OrchestrationError> {
        if session.role != Role::Administrator {
            debug!(generation, "dashboard: fetch skipped for non-administrator session");
            return Ok(FetchOutcome::Skipped);
        }

        {
            let mut state = self.state.lock().await;
            if generation > state.latest_started {
                state.latest_started = generation;
            }
            state.in_flight.insert(generation);
        }
        debug!(generation, filter = filter.query_value(), "dashboard: fetch started");

        let result = self.fetch_all(filter, &session.token).await;

        {
            let mut state = self.state.lock().await;
            state.in_flight.remove(&generation);
        }

        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(err) => {
                if err.is_unauthorized() {
                    warn!(
                        endpoint = err.endpoint,
                        "dashboard: token rejected; invalidating session"
                    );
                    self.session_guard.invalidate().await;
                }
                return Err(err);
            }
        };

        let mut state = self.state.lock().await;
        if generation < state.latest_started || generation <= state.applied_generation {
            info!(
                generation,
                newest = state.latest_started,
                "dashboard: discarding stale generation"
            );
            return Ok(FetchOutcome::Stale);
        }

        let snapshot = Arc::new(snapshot);
        state.applied_generation = generation;
        state.snapshot = Some(snapshot.clone());
        info!(generation, "dashboard: snapshot applied");
        Ok(FetchOutcome::Applied(snapshot))
    }

    async fn fetch_all(
        &self,
        filter: DateRange,
        token: &str,
    ) -> Result<DashboardSnapshot, OrchestrationError> {
        let (kpis, financial, category_profit, top_customers, geo, recent_orders) = try_join!(
            self.read_dataset::<KpiSummary>("kpis", filter, token),
            self.read_dataset::<Vec<FinancialPeriod>>("analisis-financiero", filter, token),
            self.read_dataset::<Vec<CategoryProfit>>(
                "admin/rentabilidad-categoria",
                filter,
                token
            ),
            self.read_dataset::<Vec<TopCustomer>>("top-clientes", filter, token),
            self.read_dataset::<Vec<GeoRecord>>("admin/geo-clientes", filter, token),
            self.read_dataset::<Vec<OrderSummary>>("ultimas-ordenes", filter, token),
        )?;

        Ok(DashboardSnapshot {
            kpis,
            financial,
            category_profit,
            top_customers,
            geo,
            recent_orders,
        })
    }

    async fn read_dataset<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        filter: DateRange,
        token: &str,
    ) -> Result<T, OrchestrationError> {
        transport::get_json(
            &self.http,
            &self.base_url,
            endpoint,
            Some(("dias", filter.query_value())),
            token,
        )
        .await
        .map_err(|source: FetchError| OrchestrationError { endpoint, source })
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
