//! Shared test infrastructure: in-memory port implementations and an app
//! builder wiring them into the real router, middleware, and handlers.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use secrecy::SecretString;

use lexcase::adapters::auth::{issue_session_token, JwtSessionVerifier};
use lexcase::adapters::http::middleware::{AccessGateConfig, SessionLayer};
use lexcase::adapters::http::{app_router, AppState};
use lexcase::application::billing::{CheckoutPlan, IngestEventHandler, StartCheckoutHandler};
use lexcase::config::AuthConfig;
use lexcase::domain::billing::{
    compute_signature_hex, OrderingKey, SubscriptionStatus, WebhookVerifier,
};
use lexcase::domain::foundation::{DomainError, OrganizationId, UserId};
use lexcase::domain::organization::{OrgMembership, OrgRole};
use lexcase::ports::{
    CheckoutGateway, CheckoutGatewayError, CreateCheckoutRequest, HostedCheckout, LedgerError,
    OrganizationDirectory, SessionVerifier, SubscriptionLedger, SubscriptionUpsert,
    UpsertOutcome,
};

pub const SESSION_SECRET: &str = "integration-test-session-secret-0001";
pub const WEBHOOK_SECRET: &str = "whsec_integration_test";

// ════════════════════════════════════════════════════════════════════════════
// In-memory ports
// ════════════════════════════════════════════════════════════════════════════

/// In-memory subscription ledger honoring the ordering and terminality
/// rules of the Postgres implementation.
pub struct InMemoryLedger {
    rows: Mutex<HashMap<String, (SubscriptionUpsert, u64)>>,
    write_seq: AtomicU64,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            write_seq: AtomicU64::new(0),
        }
    }

    pub fn stored_status(&self, subscription_id: &str) -> Option<SubscriptionStatus> {
        self.rows
            .lock()
            .unwrap()
            .get(subscription_id)
            .map(|(row, _)| row.status)
    }
}

#[async_trait]
impl SubscriptionLedger for InMemoryLedger {
    async fn upsert(&self, change: SubscriptionUpsert) -> Result<UpsertOutcome, LedgerError> {
        let seq = self.write_seq.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        if let Some((stored, _)) = rows.get(&change.subscription_id) {
            let stored_key = OrderingKey::new(stored.current_period_end, stored.event_created);
            if stored.status.is_terminal() || !change.ordering_key().supersedes(&stored_key) {
                return Ok(UpsertOutcome::Discarded);
            }
        }
        rows.insert(change.subscription_id.clone(), (change, seq));
        Ok(UpsertOutcome::Applied)
    }

    async fn mark_canceled(&self, subscription_id: &str) -> Result<(), LedgerError> {
        let seq = self.write_seq.fetch_add(1, Ordering::SeqCst);
        if let Some((row, stored_seq)) = self.rows.lock().unwrap().get_mut(subscription_id) {
            row.status = SubscriptionStatus::Canceled;
            *stored_seq = seq;
        }
        Ok(())
    }

    async fn current_status(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<SubscriptionStatus, LedgerError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|(row, _)| &row.organization_id == organization_id)
            .max_by_key(|(_, seq)| *seq)
            .map(|(row, _)| row.status)
            .unwrap_or(SubscriptionStatus::None))
    }
}

/// In-memory organization directory.
pub struct InMemoryDirectory {
    memberships: Mutex<Vec<OrgMembership>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self {
            memberships: Mutex::new(Vec::new()),
        }
    }

    pub fn add_membership(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
        name: &str,
        slug: &str,
        created_at: DateTime<Utc>,
    ) {
        self.memberships.lock().unwrap().push(OrgMembership {
            user_id,
            organization_id,
            role: OrgRole::Owner,
            organization_name: name.to_string(),
            organization_slug: slug.to_string(),
            organization_created_at: created_at,
        });
    }
}

#[async_trait]
impl OrganizationDirectory for InMemoryDirectory {
    async fn memberships_for(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<OrgMembership>, DomainError> {
        let mut memberships: Vec<OrgMembership> = self
            .memberships
            .lock()
            .unwrap()
            .iter()
            .filter(|m| &m.user_id == user_id)
            .cloned()
            .collect();
        memberships.sort_by_key(|m| m.organization_created_at);
        Ok(memberships)
    }
}

/// Checkout gateway recording every request, returning a fixed session.
pub struct RecordingGateway {
    pub calls: Mutex<Vec<CreateCheckoutRequest>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CheckoutGateway for RecordingGateway {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<HostedCheckout, CheckoutGatewayError> {
        self.calls.lock().unwrap().push(request);
        Ok(HostedCheckout {
            id: "cs_test_1".to_string(),
            url: "https://checkout.stripe.com/c/pay/cs_test_1".to_string(),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// App builder
// ════════════════════════════════════════════════════════════════════════════

pub struct TestApp {
    pub app: Router,
    pub ledger: Arc<InMemoryLedger>,
    pub directory: Arc<InMemoryDirectory>,
    pub gateway: Arc<RecordingGateway>,
}

/// Build the full application router over in-memory ports.
pub fn build_app() -> TestApp {
    build_app_with_plan(Some("price_basic".to_string()))
}

/// Same as [`build_app`], with control over the configured plan price.
pub fn build_app_with_plan(price_id: Option<String>) -> TestApp {
    let ledger = Arc::new(InMemoryLedger::new());
    let directory = Arc::new(InMemoryDirectory::new());
    let gateway = Arc::new(RecordingGateway::new());

    let start_checkout = Arc::new(StartCheckoutHandler::new(
        directory.clone(),
        gateway.clone(),
        CheckoutPlan {
            price_id,
            success_url: "https://app.lexcase.example/dashboard?status=success".to_string(),
            cancel_url: "https://app.lexcase.example/dashboard?status=cancel".to_string(),
        },
    ));
    let ingest_event = Arc::new(IngestEventHandler::new(
        WebhookVerifier::new(SecretString::new(WEBHOOK_SECRET.to_string())),
        ledger.clone(),
    ));

    let state = AppState {
        start_checkout,
        ingest_event,
        ledger: ledger.clone(),
        directory: directory.clone(),
    };

    let auth = auth_config();
    let verifier: Arc<dyn SessionVerifier> =
        Arc::new(JwtSessionVerifier::new(&auth.session_secret));
    let session = SessionLayer {
        verifier,
        session_cookie: auth.session_cookie.clone(),
        secure_session_cookie: auth.secure_session_cookie(),
    };
    let gate = Arc::new(AccessGateConfig::from_auth(&auth));

    TestApp {
        app: app_router(state, session, gate),
        ledger,
        directory,
        gateway,
    }
}

fn auth_config() -> AuthConfig {
    AuthConfig {
        session_secret: SecretString::new(SESSION_SECRET.to_string()),
        ..Default::default()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Request helpers
// ════════════════════════════════════════════════════════════════════════════

/// A valid session cookie for the given user.
pub fn session_cookie_for(user_id: &UserId) -> String {
    let token = issue_session_token(
        &SecretString::new(SESSION_SECRET.to_string()),
        user_id,
        Some("user@firm.example"),
        3600,
    )
    .unwrap();
    format!("session_token={}", token)
}

/// A correctly signed webhook signature header for the payload.
pub fn webhook_signature(payload: &[u8]) -> String {
    let timestamp = Utc::now().timestamp();
    format!(
        "t={},v1={}",
        timestamp,
        compute_signature_hex(WEBHOOK_SECRET, timestamp, payload)
    )
}

/// A subscription lifecycle event payload.
pub fn subscription_event(
    event_id: &str,
    event_type: &str,
    created: i64,
    object: serde_json::Value,
) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "id": event_id,
        "type": event_type,
        "created": created,
        "data": { "object": object },
        "livemode": false
    }))
    .unwrap()
}

/// A subscription object with organization attribution.
pub fn subscription_object(
    subscription_id: &str,
    status: &str,
    period_end: i64,
    organization_id: &OrganizationId,
) -> serde_json::Value {
    serde_json::json!({
        "id": subscription_id,
        "customer": "cus_42",
        "status": status,
        "current_period_end": period_end,
        "items": { "data": [ { "price": { "id": "price_basic" } } ] },
        "metadata": { "organization_id": organization_id.to_string() }
    })
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("cookie", cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn post_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("cookie", cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn webhook_post(payload: Vec<u8>, signature: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/billing/webhook")
        .header("content-type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header("stripe-signature", signature);
    }
    builder.body(Body::from(payload)).unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A fixed point in time for period-end fields.
pub fn unix(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap()
}
