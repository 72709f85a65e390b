//! Plan change for a signed-in account: switch between free and paid, or
//! cancel a paid subscription.
//!
//! The flow only ever displays state confirmed by the subscription service.
//! An update is followed by a re-fetch, and the re-fetched state replaces
//! the displayed one; nothing is patched locally. Cancellation needs a
//! [`CancelConfirmation`] obtained from [`PlanChangeFlow::request_cancel`].

mod step;

pub use step::PlanChangeStep;

use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use super::enrollment::Enrollment;
use super::FlowError;
use crate::application::coordinators::{CardCollector, CardSession, SubscriptionCoordinator};
use crate::application::session::clear_session;
use crate::domain::foundation::StateMachine;
use crate::domain::subscription::{
    NoOpError, SubscriptionError, SubscriptionPlan, SubscriptionState,
};
use crate::ports::SessionStore;

/// Proof that the user was asked to confirm a cancellation.
///
/// Issued by [`PlanChangeFlow::request_cancel`], consumed by
/// [`PlanChangeFlow::confirm_cancel`] or [`PlanChangeFlow::abort_cancel`].
/// Only valid for the flow and the request that issued it.
#[derive(Debug)]
#[must_use]
pub struct CancelConfirmation {
    flow_id: Uuid,
    request_id: Uuid,
}

/// Point-in-time view for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanChangeSnapshot {
    pub step: PlanChangeStep,
    pub current: SubscriptionState,
    pub target: Option<SubscriptionPlan>,
    pub last_error: Option<FlowError>,
    pub busy: bool,
}

pub struct PlanChangeFlow {
    id: Uuid,
    subscriptions: SubscriptionCoordinator,
    cards: CardCollector,
    session: Arc<dyn SessionStore>,
    state: Mutex<FlowState>,
}

struct FlowState {
    step: PlanChangeStep,
    resting: PlanChangeStep,
    current: SubscriptionState,
    target: Option<SubscriptionPlan>,
    card: Option<CardSession>,
    tokenizing: bool,
    refreshing: bool,
    pending_cancel: Option<Uuid>,
    last_error: Option<FlowError>,
    torn_down: bool,
}

enum Admission {
    Proceed,
    Busy(PlanChangeStep),
}

impl FlowState {
    fn is_busy(&self) -> bool {
        self.tokenizing || self.refreshing || self.step.is_in_flight()
    }

    fn admit(&self, action: &'static str) -> Result<Admission, FlowError> {
        if self.torn_down {
            return Err(FlowError::Discarded);
        }
        if self.is_busy() {
            tracing::debug!(action, step = ?self.step, "Ignoring trigger while busy");
            return Ok(Admission::Busy(self.step));
        }
        Ok(Admission::Proceed)
    }

    fn move_to(&mut self, next: PlanChangeStep) -> Result<PlanChangeStep, FlowError> {
        if self.step != next {
            self.step = self.step.transition_to(next)?;
            tracing::debug!(step = ?next, "Plan change step changed");
        }
        if next.is_resting() {
            self.resting = next;
        }
        Ok(next)
    }

    fn reject(&mut self, error: FlowError) -> Result<PlanChangeStep, FlowError> {
        self.last_error = Some(error.clone());
        Err(error)
    }

    fn matches(&self, flow_id: Uuid, gate: &CancelConfirmation) -> bool {
        gate.flow_id == flow_id && self.pending_cancel == Some(gate.request_id)
    }
}

impl PlanChangeFlow {
    /// Loads the current subscription and starts in `Viewing`.
    pub async fn open(
        subscriptions: SubscriptionCoordinator,
        cards: CardCollector,
        session: Arc<dyn SessionStore>,
    ) -> Result<Self, FlowError> {
        let current = match subscriptions.get().await {
            Ok(current) => current,
            Err(e) => {
                if e.requires_reauthentication() {
                    clear_session(session.as_ref());
                }
                return Err(e.into());
            }
        };
        tracing::debug!(plan = %current.plan, status = ?current.status, "Plan change opened");

        Ok(Self {
            id: Uuid::new_v4(),
            subscriptions,
            cards,
            session,
            state: Mutex::new(FlowState {
                step: PlanChangeStep::Viewing,
                resting: PlanChangeStep::Viewing,
                current,
                target: None,
                card: None,
                tokenizing: false,
                refreshing: false,
                pending_cancel: None,
                last_error: None,
                torn_down: false,
            }),
        })
    }

    pub async fn step(&self) -> PlanChangeStep {
        self.state.lock().await.step
    }

    /// Last state confirmed by the subscription service.
    pub async fn current(&self) -> SubscriptionState {
        self.state.lock().await.current.clone()
    }

    pub async fn target(&self) -> Option<SubscriptionPlan> {
        self.state.lock().await.target
    }

    pub async fn last_error(&self) -> Option<FlowError> {
        self.state.lock().await.last_error.clone()
    }

    pub async fn snapshot(&self) -> PlanChangeSnapshot {
        let state = self.state.lock().await;
        PlanChangeSnapshot {
            step: state.step,
            current: state.current.clone(),
            target: state.target,
            last_error: state.last_error.clone(),
            busy: state.is_busy(),
        }
    }

    /// Re-fetches the confirmed state from a resting step.
    pub async fn refresh(&self) -> Result<PlanChangeStep, FlowError> {
        {
            let mut state = self.state.lock().await;
            if let Admission::Busy(step) = state.admit("refresh")? {
                return Ok(step);
            }
            if !state.step.is_resting() {
                return Err(FlowError::invalid(state.step, "refresh"));
            }
            state.refreshing = true;
        }

        let fetched = self.subscriptions.get().await;

        let mut state = self.state.lock().await;
        state.refreshing = false;
        if state.torn_down {
            return Err(FlowError::Discarded);
        }
        match fetched {
            Ok(current) => {
                state.current = current;
                state.last_error = None;
                if state.step == PlanChangeStep::Failed {
                    state.move_to(PlanChangeStep::Viewing)?;
                }
                Ok(state.step)
            }
            Err(e) => {
                if e.requires_reauthentication() {
                    clear_session(self.session.as_ref());
                }
                state.reject(e.into())
            }
        }
    }

    /// Chooses the plan to switch to.
    ///
    /// Choosing the plan already in effect is a [`NoOpError`] and changes
    /// nothing. Paid always mounts a card input, even if a card is on file.
    pub async fn select_plan(&self, target: SubscriptionPlan) -> Result<PlanChangeStep, FlowError> {
        let mut state = self.state.lock().await;
        if let Admission::Busy(step) = state.admit("select_plan")? {
            return Ok(step);
        }
        if state.step == PlanChangeStep::ConfirmingCancel {
            return Err(FlowError::invalid(state.step, "select_plan"));
        }
        if target == state.current.plan {
            return Err(NoOpError { plan: target }.into());
        }

        state.last_error = None;
        match target {
            SubscriptionPlan::Free => {
                state.card = None;
                state.target = Some(SubscriptionPlan::Free);
                state.move_to(PlanChangeStep::SelectingPlan)
            }
            SubscriptionPlan::Paid => {
                if state.step != PlanChangeStep::CollectingPayment || state.card.is_none() {
                    state.card = None;
                    match self.cards.acquire() {
                        Ok(card) => state.card = Some(card),
                        Err(e) => return state.reject(e.into()),
                    }
                }
                state.target = Some(SubscriptionPlan::Paid);
                state.move_to(PlanChangeStep::CollectingPayment)
            }
        }
    }

    /// Leaves plan selection or cancel confirmation without changing anything.
    pub async fn back(&self) -> Result<PlanChangeStep, FlowError> {
        let mut state = self.state.lock().await;
        if let Admission::Busy(step) = state.admit("back")? {
            return Ok(step);
        }
        if !matches!(
            state.step,
            PlanChangeStep::SelectingPlan
                | PlanChangeStep::CollectingPayment
                | PlanChangeStep::ConfirmingCancel
        ) {
            return Err(FlowError::invalid(state.step, "back"));
        }
        state.card = None;
        state.target = None;
        state.pending_cancel = None;
        let resting = state.resting;
        state.move_to(resting)
    }

    /// Switches to the free plan.
    ///
    /// Applying with nothing selected, or with the plan already in effect,
    /// is a [`NoOpError`].
    pub async fn apply(&self) -> Result<PlanChangeStep, FlowError> {
        {
            let mut state = self.state.lock().await;
            if let Admission::Busy(step) = state.admit("apply")? {
                return Ok(step);
            }
            let target = state.target.unwrap_or(state.current.plan);
            if target == state.current.plan {
                return Err(NoOpError { plan: target }.into());
            }
            if state.step != PlanChangeStep::SelectingPlan || target != SubscriptionPlan::Free {
                return Err(FlowError::invalid(state.step, "apply"));
            }
            state.move_to(PlanChangeStep::Applying)?;
        }

        self.run_update(Enrollment::Free).await
    }

    /// Tokenizes the card and switches to the paid plan.
    pub async fn submit_payment(&self) -> Result<PlanChangeStep, FlowError> {
        let card = {
            let mut state = self.state.lock().await;
            if let Admission::Busy(step) = state.admit("submit_payment")? {
                return Ok(step);
            }
            if state.step != PlanChangeStep::CollectingPayment {
                return Err(FlowError::invalid(state.step, "submit_payment"));
            }
            if state.current.plan == SubscriptionPlan::Paid {
                return Err(NoOpError {
                    plan: SubscriptionPlan::Paid,
                }
                .into());
            }
            let card = match state.card.take() {
                Some(card) => card,
                None => match self.cards.acquire() {
                    Ok(card) => card,
                    Err(e) => return state.reject(e.into()),
                },
            };
            state.tokenizing = true;
            card
        };

        let collected = card.collect_card().await;

        let handle = {
            let mut state = self.state.lock().await;
            state.tokenizing = false;
            if state.torn_down {
                return Err(FlowError::Discarded);
            }
            match collected {
                Ok(handle) => {
                    drop(card);
                    state.move_to(PlanChangeStep::Applying)?;
                    handle
                }
                Err(e) => {
                    tracing::debug!(code = %e.code, "Card rejected by tokenizer");
                    state.card = Some(card);
                    return state.reject(e.into());
                }
            }
        };

        self.run_update(Enrollment::Paid(handle)).await
    }

    /// Asks for confirmation before canceling the paid subscription.
    ///
    /// Asking again while confirming issues a fresh confirmation; the
    /// earlier one stops working.
    pub async fn request_cancel(&self) -> Result<CancelConfirmation, FlowError> {
        let mut state = self.state.lock().await;
        if state.torn_down {
            return Err(FlowError::Discarded);
        }
        let reissue = state.step == PlanChangeStep::ConfirmingCancel;
        if state.is_busy() || !(reissue || state.step.is_resting()) {
            return Err(FlowError::invalid(state.step, "request_cancel"));
        }
        if !state.current.is_paid_and_active() {
            return Err(FlowError::invalid(state.step, "request_cancel"));
        }

        let request_id = Uuid::new_v4();
        state.card = None;
        state.target = None;
        state.pending_cancel = Some(request_id);
        if !reissue {
            state.move_to(PlanChangeStep::ConfirmingCancel)?;
        }

        Ok(CancelConfirmation {
            flow_id: self.id,
            request_id,
        })
    }

    /// Cancels the subscription. Access continues until the period ends.
    pub async fn confirm_cancel(
        &self,
        confirmation: CancelConfirmation,
    ) -> Result<PlanChangeStep, FlowError> {
        {
            let mut state = self.state.lock().await;
            if let Admission::Busy(step) = state.admit("confirm_cancel")? {
                return Ok(step);
            }
            if state.step != PlanChangeStep::ConfirmingCancel
                || !state.matches(self.id, &confirmation)
            {
                return Err(FlowError::invalid(state.step, "confirm_cancel"));
            }
            state.pending_cancel = None;
            state.move_to(PlanChangeStep::Canceling)?;
        }

        let canceled = self.subscriptions.cancel().await;
        self.settle(canceled).await
    }

    /// Declines the cancellation and returns to where the user was.
    pub async fn abort_cancel(
        &self,
        confirmation: CancelConfirmation,
    ) -> Result<PlanChangeStep, FlowError> {
        let mut state = self.state.lock().await;
        if state.torn_down {
            return Err(FlowError::Discarded);
        }
        if state.step != PlanChangeStep::ConfirmingCancel || !state.matches(self.id, &confirmation)
        {
            return Err(FlowError::invalid(state.step, "abort_cancel"));
        }
        state.pending_cancel = None;
        let resting = state.resting;
        state.move_to(resting)
    }

    /// Marks the flow dead. Results of calls still in flight are discarded.
    pub async fn teardown(&self) {
        let mut state = self.state.lock().await;
        state.torn_down = true;
        state.card = None;
        state.pending_cancel = None;
        tracing::debug!(step = ?state.step, "Plan change flow torn down");
    }

    async fn run_update(&self, enrollment: Enrollment) -> Result<PlanChangeStep, FlowError> {
        let (plan, payment_method) = enrollment.into_parts();

        if let Err(e) = self.subscriptions.update(plan, payment_method).await {
            return self.settle(Err(e)).await;
        }
        if self.state.lock().await.torn_down {
            return Err(FlowError::Discarded);
        }

        // The update response is an acknowledgement; confirmed state comes from get().
        let refreshed = self.subscriptions.get().await;
        self.settle(refreshed).await
    }

    async fn settle(
        &self,
        result: Result<SubscriptionState, SubscriptionError>,
    ) -> Result<PlanChangeStep, FlowError> {
        let mut state = self.state.lock().await;
        if state.torn_down {
            tracing::debug!("Subscription call finished after teardown; discarding");
            return Err(FlowError::Discarded);
        }
        state.target = None;

        match result {
            Ok(current) => {
                tracing::info!(
                    plan = %current.plan,
                    status = ?current.status,
                    "Subscription changed"
                );
                state.current = current;
                state.last_error = None;
                state.move_to(PlanChangeStep::Applied)
            }
            Err(e) => {
                tracing::info!(error = %e, "Subscription change failed");
                if e.requires_reauthentication() {
                    clear_session(self.session.as_ref());
                }
                state.move_to(PlanChangeStep::Failed)?;
                state.reject(e.into())
            }
        }
    }
}
