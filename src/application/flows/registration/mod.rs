//! Two-step registration: profile, then plan (and card for paid), then commit.
//!
//! The commit is ordered and not atomic. The account is created first and
//! its token stored immediately; only then is a paid subscription created.
//! A subscription failure after that point leaves a signed-in account on the
//! free tier ([`RegistrationOutcome::PartiallySucceeded`]) rather than rolling
//! anything back.

mod outcome;
mod step;

pub use outcome::{FailureStage, RegistrationOutcome};
pub use step::RegistrationStep;

use std::sync::Arc;

use tokio::sync::Mutex;

use super::enrollment::Enrollment;
use super::FlowError;
use crate::application::coordinators::{
    AuthCoordinator, CardCollector, CardSession, SubscriptionCoordinator,
};
use crate::application::session::store_token;
use crate::domain::account::RegistrationDraft;
use crate::domain::foundation::StateMachine;
use crate::domain::subscription::SubscriptionPlan;
use crate::ports::SessionStore;

/// A single registration attempt.
///
/// All triggers take `&self`; the flow can be shared with whatever delivers
/// user events. Triggers return the step the flow is in afterwards.
pub struct RegistrationFlow {
    auth: AuthCoordinator,
    subscriptions: SubscriptionCoordinator,
    cards: CardCollector,
    session: Arc<dyn SessionStore>,
    state: Mutex<FlowState>,
}

/// Point-in-time view for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationSnapshot {
    pub step: RegistrationStep,
    pub selected_plan: Option<SubscriptionPlan>,
    pub outcome: Option<RegistrationOutcome>,
    pub last_error: Option<FlowError>,
    pub busy: bool,
}

struct FlowState {
    step: RegistrationStep,
    draft: Option<RegistrationDraft>,
    plan: Option<SubscriptionPlan>,
    card: Option<CardSession>,
    tokenizing: bool,
    outcome: Option<RegistrationOutcome>,
    last_error: Option<FlowError>,
    torn_down: bool,
}

enum Admission {
    Proceed,
    Busy(RegistrationStep),
}

impl FlowState {
    fn new() -> Self {
        Self {
            step: RegistrationStep::CollectingProfile,
            draft: None,
            plan: None,
            card: None,
            tokenizing: false,
            outcome: None,
            last_error: None,
            torn_down: false,
        }
    }

    fn is_busy(&self) -> bool {
        self.tokenizing || self.step == RegistrationStep::Submitting
    }

    fn admit(&self, action: &'static str) -> Result<Admission, FlowError> {
        if self.torn_down {
            return Err(FlowError::Discarded);
        }
        if self.is_busy() {
            tracing::debug!(action, step = ?self.step, "Ignoring trigger while busy");
            return Ok(Admission::Busy(self.step));
        }
        if self.step.is_terminal() {
            return Err(FlowError::Finished);
        }
        Ok(Admission::Proceed)
    }

    fn move_to(&mut self, next: RegistrationStep) -> Result<RegistrationStep, FlowError> {
        if self.step != next {
            self.step = self.step.transition_to(next)?;
            tracing::debug!(step = ?next, "Registration step changed");
        }
        self.last_error = None;
        Ok(next)
    }

    fn reject(&mut self, error: FlowError) -> Result<RegistrationStep, FlowError> {
        self.last_error = Some(error.clone());
        Err(error)
    }

    fn finish(&mut self, outcome: RegistrationOutcome) -> RegistrationStep {
        self.step = outcome.step();
        self.last_error = match &outcome {
            RegistrationOutcome::Succeeded { .. } => None,
            RegistrationOutcome::PartiallySucceeded { subscription_error } => {
                Some(FlowError::Subscription(subscription_error.clone()))
            }
            RegistrationOutcome::Failed { error, .. } => Some(error.clone()),
        };
        tracing::info!(step = ?self.step, "Registration finished");
        self.outcome = Some(outcome);
        self.draft = None;
        self.step
    }
}

impl RegistrationFlow {
    pub fn new(
        auth: AuthCoordinator,
        subscriptions: SubscriptionCoordinator,
        cards: CardCollector,
        session: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            auth,
            subscriptions,
            cards,
            session,
            state: Mutex::new(FlowState::new()),
        }
    }

    pub async fn step(&self) -> RegistrationStep {
        self.state.lock().await.step
    }

    pub async fn outcome(&self) -> Option<RegistrationOutcome> {
        self.state.lock().await.outcome.clone()
    }

    pub async fn last_error(&self) -> Option<FlowError> {
        self.state.lock().await.last_error.clone()
    }

    pub async fn selected_plan(&self) -> Option<SubscriptionPlan> {
        self.state.lock().await.plan
    }

    /// The draft accepted in the profile step, for pre-filling on edit.
    pub async fn draft(&self) -> Option<RegistrationDraft> {
        self.state.lock().await.draft.clone()
    }

    pub async fn snapshot(&self) -> RegistrationSnapshot {
        let state = self.state.lock().await;
        RegistrationSnapshot {
            step: state.step,
            selected_plan: state.plan,
            outcome: state.outcome.clone(),
            last_error: state.last_error.clone(),
            busy: state.is_busy(),
        }
    }

    /// Validates the profile and moves on to plan selection.
    pub async fn submit_profile(
        &self,
        draft: RegistrationDraft,
    ) -> Result<RegistrationStep, FlowError> {
        let mut state = self.state.lock().await;
        if let Admission::Busy(step) = state.admit("submit_profile")? {
            return Ok(step);
        }
        if state.step != RegistrationStep::CollectingProfile {
            return Err(FlowError::invalid(state.step, "submit_profile"));
        }

        if let Err(e) = draft.validate() {
            tracing::debug!(field = e.field(), "Profile rejected");
            return state.reject(e.into());
        }

        state.draft = Some(draft);
        state.move_to(RegistrationStep::SelectingPlan)
    }

    /// Returns to the profile step, releasing any card input.
    pub async fn edit_profile(&self) -> Result<RegistrationStep, FlowError> {
        let mut state = self.state.lock().await;
        if let Admission::Busy(step) = state.admit("edit_profile")? {
            return Ok(step);
        }
        if !matches!(
            state.step,
            RegistrationStep::SelectingPlan | RegistrationStep::CollectingPayment
        ) {
            return Err(FlowError::invalid(state.step, "edit_profile"));
        }

        state.card = None;
        state.plan = None;
        state.move_to(RegistrationStep::CollectingProfile)
    }

    /// Chooses a plan. Paid mounts the card input; free releases it.
    pub async fn select_plan(&self, plan: SubscriptionPlan) -> Result<RegistrationStep, FlowError> {
        let mut state = self.state.lock().await;
        if let Admission::Busy(step) = state.admit("select_plan")? {
            return Ok(step);
        }
        if !matches!(
            state.step,
            RegistrationStep::SelectingPlan | RegistrationStep::CollectingPayment
        ) {
            return Err(FlowError::invalid(state.step, "select_plan"));
        }

        match plan {
            SubscriptionPlan::Free => {
                state.card = None;
                state.plan = Some(SubscriptionPlan::Free);
                state.move_to(RegistrationStep::SelectingPlan)
            }
            SubscriptionPlan::Paid => {
                if state.card.is_none() {
                    match self.cards.acquire() {
                        Ok(card) => state.card = Some(card),
                        Err(e) => return state.reject(e.into()),
                    }
                }
                state.plan = Some(SubscriptionPlan::Paid);
                state.move_to(RegistrationStep::CollectingPayment)
            }
        }
    }

    /// Tokenizes the card and, on success, submits the registration.
    ///
    /// A rejected card leaves the flow in `CollectingPayment` with the input
    /// still mounted.
    pub async fn submit_payment(&self) -> Result<RegistrationStep, FlowError> {
        let card = {
            let mut state = self.state.lock().await;
            if let Admission::Busy(step) = state.admit("submit_payment")? {
                return Ok(step);
            }
            if state.step != RegistrationStep::CollectingPayment {
                return Err(FlowError::invalid(state.step, "submit_payment"));
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

        let mut state = self.state.lock().await;
        state.tokenizing = false;
        if state.torn_down {
            tracing::debug!("Tokenization finished after teardown; discarding");
            return Err(FlowError::Discarded);
        }

        let handle = match collected {
            Ok(handle) => handle,
            Err(e) => {
                tracing::debug!(code = %e.code, "Card rejected by tokenizer");
                state.card = Some(card);
                return state.reject(e.into());
            }
        };
        drop(card);

        let draft = match state.draft.clone() {
            Some(draft) => draft,
            None => return Err(FlowError::invalid(state.step, "submit_payment")),
        };
        state.move_to(RegistrationStep::Submitting)?;
        drop(state);

        self.commit(draft, Enrollment::Paid(handle)).await
    }

    /// Submits a free registration.
    pub async fn confirm(&self) -> Result<RegistrationStep, FlowError> {
        let draft = {
            let mut state = self.state.lock().await;
            if let Admission::Busy(step) = state.admit("confirm")? {
                return Ok(step);
            }
            if state.step != RegistrationStep::SelectingPlan
                || state.plan != Some(SubscriptionPlan::Free)
            {
                return Err(FlowError::invalid(state.step, "confirm"));
            }
            let draft = match state.draft.clone() {
                Some(draft) => draft,
                None => return Err(FlowError::invalid(state.step, "confirm")),
            };
            state.move_to(RegistrationStep::Submitting)?;
            draft
        };

        self.commit(draft, Enrollment::Free).await
    }

    /// Marks the flow dead. Results of calls still in flight are discarded.
    pub async fn teardown(&self) {
        let mut state = self.state.lock().await;
        state.torn_down = true;
        state.card = None;
        tracing::debug!(step = ?state.step, "Registration flow torn down");
    }

    async fn commit(
        &self,
        draft: RegistrationDraft,
        enrollment: Enrollment,
    ) -> Result<RegistrationStep, FlowError> {
        let plan = enrollment.plan();
        tracing::info!(plan = %plan, "Submitting registration");

        // 1. Account
        let registered = self.auth.register(&draft).await;
        drop(draft);

        let mut state = self.state.lock().await;
        if state.torn_down {
            tracing::warn!("Registration completed after teardown; result discarded");
            return Err(FlowError::Discarded);
        }
        let token = match registered {
            Ok(token) => token,
            Err(e) => {
                let error = FlowError::from(e);
                tracing::info!(stage = "account", error = %error, "Registration failed");
                state.finish(RegistrationOutcome::Failed {
                    stage: FailureStage::Account,
                    error: error.clone(),
                });
                return Err(error);
            }
        };

        // 2. Session, before anything else can fail
        store_token(self.session.as_ref(), token);

        // 3. Subscription
        let handle = match enrollment {
            Enrollment::Free => {
                return Ok(state.finish(RegistrationOutcome::Succeeded {
                    plan,
                    subscription: None,
                }));
            }
            Enrollment::Paid(handle) => handle,
        };
        drop(state);

        let created = self.subscriptions.create(plan, Some(handle)).await;

        let mut state = self.state.lock().await;
        if state.torn_down {
            tracing::warn!("Subscription completed after teardown; result discarded");
            return Err(FlowError::Discarded);
        }
        let outcome = match created {
            Ok(subscription) => RegistrationOutcome::Succeeded {
                plan,
                subscription: Some(subscription),
            },
            Err(subscription_error) => {
                tracing::warn!(
                    stage = "subscription",
                    error = %subscription_error,
                    "Account created without subscription"
                );
                RegistrationOutcome::PartiallySucceeded { subscription_error }
            }
        };
        Ok(state.finish(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockAuthService;
    use crate::adapters::billing::MockSubscriptionService;
    use crate::adapters::session::InMemorySessionStore;
    use crate::adapters::tokenizer::MockTokenizer;
    use crate::domain::account::AuthError;
    use crate::domain::foundation::ValidationError;
    use crate::domain::subscription::{CardField, SubscriptionError, SubscriptionStatus};
    use crate::ports::{ServiceFailure, TokenizerFailure};
    use proptest::prelude::*;
    use serde_json::json;

    struct Harness {
        flow: RegistrationFlow,
        auth: MockAuthService,
        billing: MockSubscriptionService,
        tokenizer: MockTokenizer,
        session: Arc<InMemorySessionStore>,
    }

    fn harness() -> Harness {
        let auth = MockAuthService::new().with_token("tok_new");
        let billing = MockSubscriptionService::new();
        let tokenizer = MockTokenizer::new();
        let session = Arc::new(InMemorySessionStore::new());
        let flow = RegistrationFlow::new(
            AuthCoordinator::new(Arc::new(auth.clone())),
            SubscriptionCoordinator::new(Arc::new(billing.clone())),
            CardCollector::new(Arc::new(tokenizer.clone())),
            session.clone(),
        );
        Harness {
            flow,
            auth,
            billing,
            tokenizer,
            session,
        }
    }

    fn draft() -> RegistrationDraft {
        RegistrationDraft::new("Ada", "Lovelace", "ada@example.com", "analytical")
            .with_accept_terms(true)
    }

    async fn at_plan_selection(h: &Harness) {
        h.flow.submit_profile(draft()).await.unwrap();
    }

    // Profile step

    #[tokio::test]
    async fn starts_collecting_profile() {
        let h = harness();
        assert_eq!(h.flow.step().await, RegistrationStep::CollectingProfile);
        assert!(h.flow.outcome().await.is_none());
    }

    #[tokio::test]
    async fn mismatched_password_stays_and_never_calls_register() {
        let h = harness();
        let err = h
            .flow
            .submit_profile(draft().with_confirm_password("analyticaL"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            FlowError::Validation(ValidationError::mismatch("confirm_password", "password"))
        );
        assert_eq!(h.flow.step().await, RegistrationStep::CollectingProfile);
        assert_eq!(h.flow.last_error().await, Some(err));
        assert!(!h.auth.was_called("register"));
    }

    #[tokio::test]
    async fn unaccepted_terms_are_rejected() {
        let h = harness();
        let err = h
            .flow
            .submit_profile(draft().with_accept_terms(false))
            .await
            .unwrap_err();
        assert!(matches!(err, FlowError::Validation(ValidationError::NotAccepted { .. })));
    }

    #[tokio::test]
    async fn valid_profile_moves_to_plan_selection_without_calls() {
        let h = harness();
        let step = h.flow.submit_profile(draft()).await.unwrap();

        assert_eq!(step, RegistrationStep::SelectingPlan);
        assert!(h.auth.calls().is_empty());
        assert_eq!(h.flow.draft().await.map(|d| d.email), Some("ada@example.com".into()));
    }

    #[tokio::test]
    async fn profile_cannot_be_submitted_twice() {
        let h = harness();
        at_plan_selection(&h).await;
        let err = h.flow.submit_profile(draft()).await.unwrap_err();
        assert!(matches!(err, FlowError::InvalidTransition { action: "submit_profile", .. }));
    }

    // Plan step

    #[tokio::test]
    async fn paid_mounts_card_and_free_releases_it() {
        let h = harness();
        at_plan_selection(&h).await;

        let step = h.flow.select_plan(SubscriptionPlan::Paid).await.unwrap();
        assert_eq!(step, RegistrationStep::CollectingPayment);
        assert_eq!(h.tokenizer.mounted(), 1);

        let step = h.flow.select_plan(SubscriptionPlan::Free).await.unwrap();
        assert_eq!(step, RegistrationStep::SelectingPlan);
        assert_eq!(h.tokenizer.mounted(), 0);
        assert_eq!(h.flow.selected_plan().await, Some(SubscriptionPlan::Free));
    }

    #[tokio::test]
    async fn reselecting_paid_keeps_single_mount() {
        let h = harness();
        at_plan_selection(&h).await;
        h.flow.select_plan(SubscriptionPlan::Paid).await.unwrap();
        h.flow.select_plan(SubscriptionPlan::Paid).await.unwrap();

        assert_eq!(h.tokenizer.mounted(), 1);
        assert_eq!(h.tokenizer.mount_count(), 1);
    }

    #[tokio::test]
    async fn edit_profile_returns_and_releases_card() {
        let h = harness();
        at_plan_selection(&h).await;
        h.flow.select_plan(SubscriptionPlan::Paid).await.unwrap();

        let step = h.flow.edit_profile().await.unwrap();
        assert_eq!(step, RegistrationStep::CollectingProfile);
        assert_eq!(h.tokenizer.mounted(), 0);
        assert_eq!(h.flow.selected_plan().await, None);
    }

    #[tokio::test]
    async fn confirm_requires_free_selection() {
        let h = harness();
        at_plan_selection(&h).await;
        assert!(h.flow.confirm().await.is_err());

        h.flow.select_plan(SubscriptionPlan::Paid).await.unwrap();
        let err = h.flow.confirm().await.unwrap_err();
        assert!(matches!(err, FlowError::InvalidTransition { action: "confirm", .. }));
        assert!(!h.auth.was_called("register"));
    }

    #[tokio::test]
    async fn mount_failure_stays_selecting() {
        let h = harness();
        h.tokenizer
            .fail_mount(TokenizerFailure::new("provider_unavailable", "Payments unavailable"));
        at_plan_selection(&h).await;

        let err = h.flow.select_plan(SubscriptionPlan::Paid).await.unwrap_err();
        assert!(matches!(err, FlowError::PaymentInput(_)));
        assert_eq!(h.flow.step().await, RegistrationStep::SelectingPlan);
    }

    // Commit

    #[tokio::test]
    async fn free_registration_succeeds_without_subscription_call() {
        let h = harness();
        at_plan_selection(&h).await;
        h.flow.select_plan(SubscriptionPlan::Free).await.unwrap();

        let step = h.flow.confirm().await.unwrap();

        assert_eq!(step, RegistrationStep::Succeeded);
        assert_eq!(h.session.token().map(|t| t.expose().to_string()), Some("tok_new".into()));
        assert_eq!(h.billing.total_calls(), 0);
        assert_eq!(
            h.flow.outcome().await,
            Some(RegistrationOutcome::Succeeded {
                plan: SubscriptionPlan::Free,
                subscription: None
            })
        );
    }

    #[tokio::test]
    async fn paid_registration_stores_token_then_creates_subscription() {
        let h = harness();
        at_plan_selection(&h).await;
        h.flow.select_plan(SubscriptionPlan::Paid).await.unwrap();

        let step = h.flow.submit_payment().await.unwrap();

        assert_eq!(step, RegistrationStep::Succeeded);
        assert!(h.session.is_authenticated());
        assert_eq!(h.billing.calls()[0].args, vec!["paid".to_string(), "pm_test".to_string()]);
        assert_eq!(h.tokenizer.mounted(), 0);
        match h.flow.outcome().await {
            Some(RegistrationOutcome::Succeeded {
                subscription: Some(state),
                ..
            }) => assert_eq!(state.status, SubscriptionStatus::Trialing),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn card_error_stays_collecting_with_input_mounted() {
        let h = harness();
        h.tokenizer.push_outcome(Err(TokenizerFailure::new(
            "invalid_cvc",
            "Your card's security code is invalid.",
        )));
        at_plan_selection(&h).await;
        h.flow.select_plan(SubscriptionPlan::Paid).await.unwrap();

        let err = h.flow.submit_payment().await.unwrap_err();
        match &err {
            FlowError::PaymentInput(e) => assert_eq!(e.field, CardField::Cvc),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(h.flow.step().await, RegistrationStep::CollectingPayment);
        assert_eq!(h.tokenizer.mounted(), 1);
        assert!(!h.auth.was_called("register"));

        let step = h.flow.submit_payment().await.unwrap();
        assert_eq!(step, RegistrationStep::Succeeded);
        assert_eq!(h.tokenizer.mount_count(), 1);
    }

    #[tokio::test]
    async fn account_failure_is_terminal_and_skips_subscription() {
        let h = harness();
        h.auth.fail(
            "register",
            ServiceFailure::http(409, json!({"message": "Email already registered"})),
        );
        at_plan_selection(&h).await;
        h.flow.select_plan(SubscriptionPlan::Paid).await.unwrap();

        let err = h.flow.submit_payment().await.unwrap_err();

        assert!(matches!(err, FlowError::Auth(AuthError::Conflict(_))));
        assert_eq!(h.flow.step().await, RegistrationStep::Failed);
        assert!(!h.billing.was_called("create"));
        assert!(!h.session.is_authenticated());
        let outcome = h.flow.outcome().await.unwrap();
        assert!(!outcome.account_created());
    }

    #[tokio::test]
    async fn subscription_failure_is_partial_success_with_token_kept() {
        let h = harness();
        h.billing
            .fail("create", ServiceFailure::http(402, json!({"message": "card_declined"})));
        at_plan_selection(&h).await;
        h.flow.select_plan(SubscriptionPlan::Paid).await.unwrap();

        let step = h.flow.submit_payment().await.unwrap();

        assert_eq!(step, RegistrationStep::PartiallySucceeded);
        assert!(h.session.is_authenticated());
        let outcome = h.flow.outcome().await.unwrap();
        assert!(outcome.account_created());
        assert!(outcome.notice().unwrap().contains("card_declined"));
        assert!(matches!(
            h.flow.last_error().await,
            Some(FlowError::Subscription(SubscriptionError::Declined(_)))
        ));
    }

    #[tokio::test]
    async fn triggers_after_terminal_are_finished() {
        let h = harness();
        at_plan_selection(&h).await;
        h.flow.select_plan(SubscriptionPlan::Free).await.unwrap();
        h.flow.confirm().await.unwrap();

        assert_eq!(h.flow.confirm().await, Err(FlowError::Finished));
        assert_eq!(
            h.flow.select_plan(SubscriptionPlan::Paid).await,
            Err(FlowError::Finished)
        );
        assert_eq!(h.auth.call_count("register"), 1);
    }

    // Concurrency and liveness

    #[tokio::test]
    async fn second_confirm_while_submitting_is_ignored() {
        let h = harness();
        at_plan_selection(&h).await;
        h.flow.select_plan(SubscriptionPlan::Free).await.unwrap();
        let gate = h.auth.pause("register");

        let (first, second) = tokio::join!(h.flow.confirm(), async {
            tokio::task::yield_now().await;
            let step = h.flow.confirm().await;
            gate.notify_one();
            step
        });

        assert_eq!(first, Ok(RegistrationStep::Succeeded));
        assert_eq!(second, Ok(RegistrationStep::Submitting));
        assert_eq!(h.auth.call_count("register"), 1);
    }

    #[tokio::test]
    async fn double_submit_payment_tokenizes_once() {
        let h = harness();
        at_plan_selection(&h).await;
        h.flow.select_plan(SubscriptionPlan::Paid).await.unwrap();
        let gate = h.auth.pause("register");

        let (first, second) = tokio::join!(h.flow.submit_payment(), async {
            tokio::task::yield_now().await;
            let step = h.flow.submit_payment().await;
            gate.notify_one();
            step
        });

        assert_eq!(first, Ok(RegistrationStep::Succeeded));
        assert_eq!(second, Ok(RegistrationStep::Submitting));
        assert_eq!(h.tokenizer.tokenize_count(), 1);
        assert_eq!(h.billing.call_count("create"), 1);
    }

    #[tokio::test]
    async fn teardown_discards_register_result() {
        let h = harness();
        at_plan_selection(&h).await;
        h.flow.select_plan(SubscriptionPlan::Paid).await.unwrap();
        let gate = h.auth.pause("register");

        let (result, _) = tokio::join!(h.flow.submit_payment(), async {
            tokio::task::yield_now().await;
            h.flow.teardown().await;
            gate.notify_one();
        });

        assert_eq!(result, Err(FlowError::Discarded));
        assert!(!h.session.is_authenticated());
        assert!(!h.billing.was_called("create"));
        assert_eq!(h.tokenizer.mounted(), 0);
        assert_eq!(h.flow.select_plan(SubscriptionPlan::Free).await, Err(FlowError::Discarded));
    }

    #[tokio::test]
    async fn teardown_releases_card_input() {
        let h = harness();
        at_plan_selection(&h).await;
        h.flow.select_plan(SubscriptionPlan::Paid).await.unwrap();

        h.flow.teardown().await;
        assert_eq!(h.tokenizer.mounted(), 0);
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    proptest! {
        #[test]
        fn mismatched_passwords_never_advance(
            password in "[a-zA-Z0-9]{8,20}",
            confirm in "[a-zA-Z0-9]{0,20}",
        ) {
            prop_assume!(password != confirm);
            let h = harness();
            let mismatched =
                RegistrationDraft::new("Ada", "Lovelace", "ada@example.com", password.clone())
                    .with_accept_terms(true)
                .with_confirm_password(confirm.clone());
            let result = runtime().block_on(h.flow.submit_profile(mismatched));

            prop_assert!(result.is_err());
            prop_assert_eq!(runtime().block_on(h.flow.step()), RegistrationStep::CollectingProfile);
            prop_assert!(!h.auth.was_called("register"));
        }

        #[test]
        fn paid_never_submits_without_a_handle(token in "[ a-z_0-9]{0,12}") {
            let h = harness();
            h.tokenizer.push_outcome(Ok(token.clone()));
            let step = runtime().block_on(async {
                h.flow.submit_profile(draft()).await.unwrap();
                h.flow.select_plan(SubscriptionPlan::Paid).await.unwrap();
                let _ = h.flow.submit_payment().await;
                h.flow.step().await
            });

            if token.trim().is_empty() {
                prop_assert_eq!(step, RegistrationStep::CollectingPayment);
                prop_assert!(!h.auth.was_called("register"));
            } else {
                prop_assert_eq!(step, RegistrationStep::Succeeded);
                let calls = h.billing.calls();
                prop_assert_eq!(calls[0].args[1].as_str(), token.as_str());
            }
        }
    }
}
