//! End-to-end registration over the mock services.
//!
//! Drives `RegistrationFlow` the way a signup screen would: profile, plan,
//! card, commit. Covers the free path, the paid path, partial success and
//! a token that survives a restart through the file session store.

use std::sync::Arc;

use serde_json::json;

use onboarding::adapters::auth::MockAuthService;
use onboarding::adapters::billing::MockSubscriptionService;
use onboarding::adapters::session::{FileSessionStore, InMemorySessionStore};
use onboarding::adapters::tokenizer::MockTokenizer;
use onboarding::application::{
    AuthCoordinator, CardCollector, FlowError, RegistrationFlow, RegistrationOutcome,
    RegistrationStep, SubscriptionCoordinator,
};
use onboarding::domain::account::RegistrationDraft;
use onboarding::domain::subscription::{SubscriptionError, SubscriptionPlan};
use onboarding::ports::{ServiceFailure, SessionStore};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Services {
    auth: MockAuthService,
    billing: MockSubscriptionService,
    tokenizer: MockTokenizer,
}

impl Services {
    fn new() -> Self {
        Self {
            auth: MockAuthService::new(),
            billing: MockSubscriptionService::new(),
            tokenizer: MockTokenizer::new(),
        }
    }

    fn flow(&self, session: Arc<dyn SessionStore>) -> RegistrationFlow {
        RegistrationFlow::new(
            AuthCoordinator::new(Arc::new(self.auth.clone())),
            SubscriptionCoordinator::new(Arc::new(self.billing.clone())),
            CardCollector::new(Arc::new(self.tokenizer.clone())),
            session,
        )
    }
}

fn draft() -> RegistrationDraft {
    RegistrationDraft::new("Grace", "Hopper", "grace@example.com", "abcdefgh")
        .with_confirm_password("abcdefgh")
        .with_accept_terms(true)
}

// =============================================================================
// Free plan
// =============================================================================

#[tokio::test]
async fn free_signup_registers_once_and_never_subscribes() {
    let services = Services::new();
    let session = Arc::new(InMemorySessionStore::new());
    let flow = services.flow(session.clone());

    flow.submit_profile(draft()).await.unwrap();
    flow.select_plan(SubscriptionPlan::Free).await.unwrap();
    let step = flow.confirm().await.unwrap();

    assert_eq!(step, RegistrationStep::Succeeded);
    assert_eq!(services.auth.call_count("register"), 1);
    assert!(!services.billing.was_called("create"));
    assert!(session.is_authenticated());
    assert_eq!(services.tokenizer.mount_count(), 0);
}

#[tokio::test]
async fn changing_mind_from_paid_to_free_releases_card_input() {
    let services = Services::new();
    let flow = services.flow(Arc::new(InMemorySessionStore::new()));

    flow.submit_profile(draft()).await.unwrap();
    flow.select_plan(SubscriptionPlan::Paid).await.unwrap();
    assert_eq!(services.tokenizer.mounted(), 1);

    flow.select_plan(SubscriptionPlan::Free).await.unwrap();
    flow.confirm().await.unwrap();

    assert_eq!(services.tokenizer.mounted(), 0);
    assert_eq!(services.tokenizer.tokenize_count(), 0);
}

// =============================================================================
// Paid plan
// =============================================================================

#[tokio::test]
async fn paid_signup_declined_card_leaves_signed_in_account() {
    let services = Services {
        auth: MockAuthService::new().with_token("tok_abc"),
        billing: MockSubscriptionService::new(),
        tokenizer: MockTokenizer::new().with_handle("pm_123"),
    };
    services
        .billing
        .fail("create", ServiceFailure::http(402, json!({"message": "card_declined"})));
    let session = Arc::new(InMemorySessionStore::new());
    let flow = services.flow(session.clone());

    flow.submit_profile(draft()).await.unwrap();
    flow.select_plan(SubscriptionPlan::Paid).await.unwrap();
    let step = flow.submit_payment().await.unwrap();

    assert_eq!(step, RegistrationStep::PartiallySucceeded);
    let outcome = flow.outcome().await.unwrap();
    assert!(outcome.account_created());
    match outcome {
        RegistrationOutcome::PartiallySucceeded { subscription_error } => {
            assert!(matches!(subscription_error, SubscriptionError::Declined(_)));
            assert_eq!(subscription_error.message(), "card_declined");
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(session.token().unwrap().expose(), "tok_abc");

    let calls = services.billing.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "create");
    assert_eq!(calls[0].args, vec!["paid".to_string(), "pm_123".to_string()]);
}

#[tokio::test]
async fn paid_signup_succeeds_with_trial() {
    let services = Services::new();
    let flow = services.flow(Arc::new(InMemorySessionStore::new()));

    flow.submit_profile(draft()).await.unwrap();
    flow.select_plan(SubscriptionPlan::Paid).await.unwrap();
    flow.submit_payment().await.unwrap();

    match flow.outcome().await {
        Some(RegistrationOutcome::Succeeded {
            plan: SubscriptionPlan::Paid,
            subscription: Some(subscription),
        }) => {
            assert!(subscription.is_trialing());
            assert!(subscription.trial_ends_at.is_some());
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[tokio::test]
async fn account_conflict_blocks_everything() {
    let services = Services::new();
    services.auth.fail(
        "register",
        ServiceFailure::http(
            409,
            json!({"message": "Email already registered", "errors": {"email": ["is taken"]}}),
        ),
    );
    let session = Arc::new(InMemorySessionStore::new());
    let flow = services.flow(session.clone());

    flow.submit_profile(draft()).await.unwrap();
    flow.select_plan(SubscriptionPlan::Paid).await.unwrap();
    let err = flow.submit_payment().await.unwrap_err();

    assert_eq!(err.message(), "Email already registered");
    assert_eq!(flow.step().await, RegistrationStep::Failed);
    assert_eq!(services.billing.total_calls(), 0);
    assert!(!session.is_authenticated());
    assert_eq!(flow.submit_payment().await, Err(FlowError::Finished));
}

// =============================================================================
// Session persistence
// =============================================================================

#[tokio::test]
async fn token_from_registration_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session").join("token");
    let services = Services {
        auth: MockAuthService::new().with_token("tok_persisted"),
        ..Services::new()
    };

    {
        let session = Arc::new(FileSessionStore::load(&path).unwrap());
        let flow = services.flow(session);
        flow.submit_profile(draft()).await.unwrap();
        flow.select_plan(SubscriptionPlan::Free).await.unwrap();
        flow.confirm().await.unwrap();
    }

    let restored = FileSessionStore::load(&path).unwrap();
    assert_eq!(restored.token().unwrap().expose(), "tok_persisted");
}
