//! Mock subscription service for testing.
//!
//! Behaves like a small billing backend: `create`/`update` change the stored
//! subscription, `get` returns it, `cancel` schedules the end of access.
//! `update` answers with only the plan, the way a service does when trial
//! dates and status are computed asynchronously, so callers that skip the
//! re-fetch see incomplete state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::adapters::call_log::{lock, CallLog, MethodCall};
use crate::domain::foundation::Timestamp;
use crate::domain::subscription::SubscriptionPlan;
use crate::ports::{PlanRequest, ServiceFailure, SubscriptionPayload, SubscriptionService};

/// Trial length granted to new paid subscriptions.
pub const MOCK_TRIAL_DAYS: i64 = 14;

#[derive(Clone)]
pub struct MockSubscriptionService {
    inner: Arc<Mutex<MockState>>,
}

struct MockState {
    current: SubscriptionPayload,
    failures: HashMap<String, ServiceFailure>,
    log: CallLog,
}

impl Default for MockSubscriptionService {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockState {
                current: SubscriptionPayload::new("free", "none").with_payment_method(false),
                failures: HashMap::new(),
                log: CallLog::default(),
            })),
        }
    }
}

impl MockSubscriptionService {
    /// Starts with no subscription on record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the given subscription on record.
    pub fn with_current(self, payload: SubscriptionPayload) -> Self {
        lock(&self.inner).current = payload;
        self
    }

    /// Starts on an active paid plan with a card on file.
    pub fn on_paid_plan() -> Self {
        let ends_at = Timestamp::now().add_days(30).to_string();
        Self::new().with_current(
            SubscriptionPayload::new("paid", "active")
                .with_ends_at(&ends_at)
                .with_payment_method(true),
        )
    }

    /// Makes `method` fail until cleared.
    pub fn fail(&self, method: &str, failure: ServiceFailure) {
        lock(&self.inner)
            .failures
            .insert(method.to_string(), failure);
    }

    pub fn clear_failures(&self) {
        lock(&self.inner).failures.clear();
    }

    /// The next call to `method` waits until the returned gate is notified.
    pub fn pause(&self, method: &str) -> Arc<Notify> {
        lock(&self.inner).log.pause(method)
    }

    /// Subscription currently on record.
    pub fn current(&self) -> SubscriptionPayload {
        lock(&self.inner).current.clone()
    }

    pub fn calls(&self) -> Vec<MethodCall> {
        lock(&self.inner).log.calls()
    }

    pub fn call_count(&self, method: &str) -> usize {
        lock(&self.inner).log.count(method)
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    /// Total number of calls across all methods.
    pub fn total_calls(&self) -> usize {
        lock(&self.inner).log.calls().len()
    }

    async fn enter(&self, method: &str, args: Vec<String>) -> Result<(), ServiceFailure> {
        let gate = lock(&self.inner).log.record(method, args);
        if let Some(gate) = gate {
            gate.notified().await;
        }
        match lock(&self.inner).failures.get(method) {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }

    fn plan_args(request: &PlanRequest<'_>) -> Vec<String> {
        vec![
            request.plan.as_str().to_string(),
            request.payment_method.unwrap_or("-").to_string(),
        ]
    }

    fn enroll(request: &PlanRequest<'_>) -> SubscriptionPayload {
        match request.plan {
            SubscriptionPlan::Paid => {
                let trial_end = Timestamp::now().add_days(MOCK_TRIAL_DAYS).to_string();
                SubscriptionPayload::new("paid", "trialing")
                    .with_trial_ends_at(&trial_end)
                    .with_payment_method(request.payment_method.is_some())
            }
            SubscriptionPlan::Free => {
                SubscriptionPayload::new("free", "none").with_payment_method(false)
            }
        }
    }
}

#[async_trait]
impl SubscriptionService for MockSubscriptionService {
    async fn get(&self) -> Result<SubscriptionPayload, ServiceFailure> {
        self.enter("get", vec![]).await?;
        Ok(self.current())
    }

    async fn create(
        &self,
        request: &PlanRequest<'_>,
    ) -> Result<SubscriptionPayload, ServiceFailure> {
        self.enter("create", Self::plan_args(request)).await?;
        let created = Self::enroll(request);
        lock(&self.inner).current = created.clone();
        Ok(created)
    }

    async fn update(
        &self,
        request: &PlanRequest<'_>,
    ) -> Result<SubscriptionPayload, ServiceFailure> {
        self.enter("update", Self::plan_args(request)).await?;
        lock(&self.inner).current = Self::enroll(request);
        Ok(SubscriptionPayload {
            plan: Some(request.plan.as_str().to_string()),
            ..Default::default()
        })
    }

    async fn cancel(&self) -> Result<SubscriptionPayload, ServiceFailure> {
        self.enter("cancel", vec![]).await?;
        let mut state = lock(&self.inner);
        let ends_at = state
            .current
            .trial_ends_at
            .clone()
            .or_else(|| state.current.ends_at.clone())
            .unwrap_or_else(|| Timestamp::now().add_days(30).to_string());
        state.current.status = Some("canceled".to_string());
        state.current.ends_at = Some(ends_at);
        Ok(state.current.clone())
    }
}
