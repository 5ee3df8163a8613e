use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Datelike;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tower::ServiceExt;

use document_store::{Document, MemoryBackend, QuerySpec, StoreBackend, StoreClient, StoreResult};
use meditrack_server::{create_app, MediTrackServer, ServerConfig};
use records_dal::{NewUser, Role, User};

const SECRET: &str = "api-test-secret";

/// Test harness around a server over a fresh in-memory store
struct TestApp {
    server: MediTrackServer,
    app: Router,
}

impl TestApp {
    fn new() -> Self {
        Self::with_store(StoreClient::in_memory())
    }

    fn with_store(store: StoreClient) -> Self {
        let config = ServerConfig::default().with_jwt_secret(SECRET);
        let server = MediTrackServer::with_store(config, store);
        let app = create_app(server.clone());
        Self { server, app }
    }

    /// Seed a profile record and return it; the id doubles as the token subject
    async fn seed_user(&self, role: Role, name: &str) -> User {
        self.seed(role, name, None).await
    }

    /// Seed a partner profile onboarded by the given affiliate
    async fn seed_partner(&self, role: Role, name: &str, affiliate_id: &str) -> User {
        self.seed(role, name, Some(affiliate_id.to_string())).await
    }

    async fn seed(&self, role: Role, name: &str, affiliate_id: Option<String>) -> User {
        let email = format!("{}@clinic.example", name.to_lowercase().replace(' ', "."));
        self.server
            .dal
            .create(&NewUser {
                email,
                display_name: name.to_string(),
                role,
                username: None,
                doctor_id: None,
                hospital_id: None,
                affiliate_id,
                permissions: Vec::new(),
            })
            .await
            .expect("seed user")
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.expect("request");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, value)
    }
}

#[derive(Serialize)]
struct Claims<'a> {
    sub: &'a str,
    exp: i64,
}

fn bearer(user_id: &str) -> String {
    let exp = (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp();
    let token = encode(
        &Header::default(),
        &Claims {
            sub: user_id,
            exp,
        },
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("token encodes");
    format!("Bearer {token}")
}

fn get(uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).method("GET");
    if let Some(value) = auth {
        builder = builder.header("Authorization", value);
    }
    builder.body(Body::empty()).expect("request")
}

fn send_json(method: &str, uri: &str, auth: &str, body: Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header("Authorization", auth)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn now_stamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Store wrapper counting writes, for proving denial happens before any write
struct CountingBackend {
    inner: MemoryBackend,
    inserts: AtomicUsize,
}

impl CountingBackend {
    fn new() -> Self {
        Self {
            inner: MemoryBackend::new(),
            inserts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl StoreBackend for CountingBackend {
    async fn run_query(&self, spec: &QuerySpec) -> StoreResult<Vec<Document>> {
        self.inner.run_query(spec).await
    }

    async fn count(&self, spec: &QuerySpec) -> StoreResult<u64> {
        self.inner.count(spec).await
    }

    async fn insert(&self, collection: &str, fields: Map<String, Value>) -> StoreResult<Document> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(collection, fields).await
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Document> {
        self.inner.get(collection, id).await
    }

    async fn update_merge(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> StoreResult<Document> {
        self.inner.update_merge(collection, id, patch).await
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.inner.health_check().await
    }
}

#[tokio::test]
async fn health_check_is_open_and_reports_store_status() {
    let app = TestApp::new();

    let (status, body) = app.send(get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "MediTrack");
    assert_eq!(body["checks"]["documentStore"], "up");
    assert!(!body["timestamp"].as_str().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn requests_without_a_token_are_unauthorized() {
    let app = TestApp::new();

    let (status, body) = app.send(get("/api/patients", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_type"], "authentication_error");
}

#[tokio::test]
async fn malformed_authorization_header_is_unauthorized() {
    let app = TestApp::new();

    let (status, _) = app.send(get("/api/patients", Some("Token abc"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_for_an_unknown_subject_is_unauthorized() {
    let app = TestApp::new();

    let (status, body) = app.send(get("/api/patients", Some(&bearer("ghost")))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_type"], "authentication_error");
}

#[tokio::test]
async fn role_outside_the_policy_is_forbidden() {
    let app = TestApp::new();
    let nurse = app.seed_user(Role::Nurse, "Asha").await;

    let (status, body) = app
        .send(send_json(
            "POST",
            "/api/users",
            &bearer(&nurse.id),
            json!({
                "email": "new.doc@clinic.example",
                "displayName": "New Doctor",
                "role": "doctor"
            }),
        ))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error_type"], "authorization_error");
}

#[tokio::test]
async fn denied_writes_never_reach_the_store() {
    let backend = Arc::new(CountingBackend::new());
    let app = TestApp::with_store(StoreClient::new(backend.clone()));
    let nurse = app.seed_user(Role::Nurse, "Asha").await;
    let writes_after_seeding = backend.inserts.load(Ordering::SeqCst);

    let (status, _) = app
        .send(send_json(
            "POST",
            "/api/users",
            &bearer(&nurse.id),
            json!({
                "email": "new.doc@clinic.example",
                "displayName": "New Doctor",
                "role": "doctor"
            }),
        ))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(backend.inserts.load(Ordering::SeqCst), writes_after_seeding);
}

#[tokio::test]
async fn create_patient_returns_the_raw_document() {
    let app = TestApp::new();
    let staff = app.seed_user(Role::Staff, "Ravi").await;

    let (status, body) = app
        .send(send_json(
            "POST",
            "/api/patients",
            &bearer(&staff.id),
            json!({
                "name": "Raj Patel",
                "age": 42,
                "gender": "M",
                "contact": "9990001111"
            }),
        ))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(!body["id"].as_str().unwrap_or_default().is_empty());
    assert_eq!(body["name"], "Raj Patel");
    assert_eq!(body["age"], json!(42));
    assert_eq!(body["gender"], "M");
    assert_eq!(body["contact"], "9990001111");
    assert_eq!(body["createdById"], json!(staff.id));
    assert!(chrono::DateTime::parse_from_rfc3339(body["createdAt"].as_str().unwrap()).is_ok());
    // Single-resource responses are the bare document, not a wrapper
    assert!(body.get("success").is_none());
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn create_with_a_blank_name_is_rejected() {
    let app = TestApp::new();
    let staff = app.seed_user(Role::Staff, "Ravi").await;
    let token = bearer(&staff.id);

    let (status, body) = app
        .send(send_json(
            "POST",
            "/api/patients",
            &token,
            json!({"name": "", "age": 30, "gender": "F", "contact": "9990001111"}),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_error");

    let (_, listing) = app.send(get("/api/patients", Some(&token))).await;
    assert_eq!(listing["total"], json!(0));
}

#[tokio::test]
async fn fetching_a_missing_record_is_not_found() {
    let app = TestApp::new();
    let doctor = app.seed_user(Role::Doctor, "Dr Mehta").await;

    let (status, body) = app
        .send(get("/api/patients/x404", Some(&bearer(&doctor.id))))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "not_found");
}

#[tokio::test]
async fn list_envelope_reports_offset_bookkeeping() {
    let app = TestApp::new();
    let staff = app.seed_user(Role::Staff, "Ravi").await;
    let token = bearer(&staff.id);
    for i in 0..3 {
        let (status, _) = app
            .send(send_json(
                "POST",
                "/api/patients",
                &token,
                json!({
                    "name": format!("Patient {i}"),
                    "age": 30 + i,
                    "gender": "F",
                    "contact": "9990001111"
                }),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app.send(get("/api/patients?limit=2", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["total"], json!(3));
    assert_eq!(body["page"], json!(1));
    assert_eq!(body["limit"], json!(2));
    assert_eq!(body["totalPages"], json!(2));
    assert!(body["nextCursor"].is_string());

    let (_, second) = app
        .send(get("/api/patients?page=2&limit=2", Some(&token)))
        .await;
    assert_eq!(second["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(second["page"], json!(2));
    assert!(second.get("nextCursor").is_none());
}

#[tokio::test]
async fn cursor_walk_visits_every_record_once() {
    let app = TestApp::new();
    let staff = app.seed_user(Role::Staff, "Ravi").await;
    let token = bearer(&staff.id);
    for i in 0..5 {
        app.send(send_json(
            "POST",
            "/api/patients",
            &token,
            json!({
                "name": format!("Patient {i}"),
                "age": 40,
                "gender": "M",
                "contact": "9990001111"
            }),
        ))
        .await;
    }

    let mut seen = std::collections::HashSet::new();
    let mut sizes = Vec::new();
    let mut uri = "/api/patients?limit=2".to_string();
    loop {
        let (status, body) = app.send(get(&uri, Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        let data = body["data"].as_array().expect("data array").clone();
        sizes.push(data.len());
        for record in &data {
            let id = record["id"].as_str().expect("id").to_string();
            assert!(seen.insert(id), "record listed twice");
        }
        match body["nextCursor"].as_str() {
            Some(cursor) => uri = format!("/api/patients?limit=2&cursor={cursor}"),
            None => break,
        }
    }

    assert_eq!(sizes, vec![2, 2, 1]);
    assert_eq!(seen.len(), 5);
}

#[tokio::test]
async fn invalid_cursor_is_a_bad_request() {
    let app = TestApp::new();
    let staff = app.seed_user(Role::Staff, "Ravi").await;

    let (status, body) = app
        .send(get(
            "/api/patients?cursor=not-a-cursor",
            Some(&bearer(&staff.id)),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "bad_request");
}

#[tokio::test]
async fn billing_patch_merges_status_and_paid_at() {
    let app = TestApp::new();
    let staff = app.seed_user(Role::Staff, "Ravi").await;
    let token = bearer(&staff.id);

    let (status, created) = app
        .send(send_json(
            "POST",
            "/api/billings",
            &token,
            json!({
                "patientId": "p1",
                "amount": 1500.0,
                "items": [{"description": "Consultation", "amount": 1500.0, "quantity": 1}]
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "pending");
    let invoice_number = created["invoiceNumber"].as_str().expect("invoice").to_string();
    let billing_id = created["id"].as_str().expect("id").to_string();

    let (status, _) = app
        .send(send_json(
            "PATCH",
            &format!("/api/billings/{billing_id}"),
            &token,
            json!({"status": "paid", "paidAt": "2026-02-05T10:00:00.000Z"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, fetched) = app
        .send(get(&format!("/api/billings/{billing_id}"), Some(&token)))
        .await;
    assert_eq!(fetched["status"], "paid");
    assert_eq!(fetched["paidAt"], "2026-02-05T10:00:00.000Z");
    assert_eq!(fetched["invoiceNumber"], json!(invoice_number));
    assert_eq!(fetched["amount"], json!(1500.0));
    assert_eq!(fetched["items"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn treatment_logs_reject_updates() {
    let app = TestApp::new();
    let doctor = app.seed_user(Role::Doctor, "Dr Mehta").await;
    let token = bearer(&doctor.id);

    let (status, log) = app
        .send(send_json(
            "POST",
            "/api/treatment-logs",
            &token,
            json!({"patientId": "p1", "notes": "Ward round"}),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let log_id = log["id"].as_str().expect("id").to_string();

    let (status, _) = app
        .send(send_json(
            "PATCH",
            &format!("/api/treatment-logs/{log_id}"),
            &token,
            json!({"notes": "rewritten"}),
        ))
        .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn users_me_returns_the_caller_profile() {
    let app = TestApp::new();
    let nurse = app.seed_user(Role::Nurse, "Asha").await;

    let (status, body) = app.send(get("/api/users/me", Some(&bearer(&nurse.id)))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(nurse.id));
    assert_eq!(body["displayName"], "Asha");
    assert_eq!(body["role"], "nurse");
}

#[tokio::test]
async fn affiliate_registers_an_account_on_trial() {
    let app = TestApp::new();
    let affiliate = app.seed_user(Role::Affiliate, "Priya").await;

    let (status, body) = app
        .send(send_json(
            "POST",
            "/api/accounts",
            &bearer(&affiliate.id),
            json!({
                "name": "Dr. Mehta Clinic",
                "email": "clinic@example.com",
                "contact": "9990001111",
                "planType": "doctor"
            }),
        ))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "trial");
    assert_eq!(body["planAmount"], json!(3500.0));
    assert_eq!(body["accountType"], "doctor");
    assert_eq!(body["affiliateId"], json!(affiliate.id));
    assert!(body["lastPayment"].is_null());
    assert!(chrono::DateTime::parse_from_rfc3339(body["planEnd"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn recording_a_payment_activates_the_account() {
    let app = TestApp::new();
    let affiliate = app.seed_user(Role::Affiliate, "Priya").await;
    let token = bearer(&affiliate.id);

    let (_, account) = app
        .send(send_json(
            "POST",
            "/api/accounts",
            &token,
            json!({
                "name": "City Hospital",
                "email": "billing@cityhospital.example",
                "contact": "9990002222",
                "planType": "hospital"
            }),
        ))
        .await;
    let account_id = account["id"].as_str().expect("id").to_string();

    let paid_at = now_stamp();
    let (status, updated) = app
        .send(send_json(
            "PATCH",
            &format!("/api/accounts/{account_id}"),
            &token,
            json!({"status": "active", "lastPayment": paid_at}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "active");
    assert_eq!(updated["lastPayment"], json!(paid_at));

    let (status, fetched) = app
        .send(get(&format!("/api/accounts/{account_id}"), Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["status"], "active");
    assert_eq!(fetched["lastPayment"], json!(paid_at));
}

#[tokio::test]
async fn clinical_dashboard_aggregates_recent_activity() {
    let app = TestApp::new();
    let staff = app.seed_user(Role::Staff, "Ravi").await;
    let token = bearer(&staff.id);

    let mut patient_id = String::new();
    for name in ["Raj Patel", "Asha Rao"] {
        let (_, patient) = app
            .send(send_json(
                "POST",
                "/api/patients",
                &token,
                json!({"name": name, "age": 40, "gender": "M", "contact": "9990001111"}),
            ))
            .await;
        patient_id = patient["id"].as_str().expect("id").to_string();
    }
    app.send(send_json(
        "POST",
        "/api/admissions",
        &token,
        json!({
            "patientId": patient_id,
            "admissionType": "OPD",
            "admissionDate": now_stamp(),
            "doctorId": "d1"
        }),
    ))
    .await;
    app.send(send_json(
        "POST",
        "/api/billings",
        &token,
        json!({"patientId": patient_id, "amount": 500.0}),
    ))
    .await;
    app.send(send_json(
        "POST",
        "/api/treatment-logs",
        &token,
        json!({"patientId": patient_id, "notes": "OPD visit"}),
    ))
    .await;

    let (status, stats) = app.send(get("/api/dashboard/stats", Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalPatients"], json!(2));
    assert_eq!(stats["admissions"]["total"], json!(1));
    assert_eq!(stats["admissions"]["opd"], json!(1));
    assert_eq!(stats["admissions"]["ipd"], json!(0));
    assert_eq!(stats["revenue"], json!(500.0));
    assert_eq!(stats["appointments"], json!(1));
}

#[tokio::test]
async fn affiliate_dashboard_reports_commission_and_partners() {
    let app = TestApp::new();
    let affiliate = app.seed_user(Role::Affiliate, "Priya").await;
    let token = bearer(&affiliate.id);
    let now = chrono::Utc::now();

    let doctor = app.seed_partner(Role::Doctor, "Dr Mehta", &affiliate.id).await;
    app.seed_partner(Role::Hospital, "City Hospital", &affiliate.id)
        .await;
    // Partners of other affiliates stay out of the counts
    app.seed_partner(Role::Doctor, "Dr Rao", "someone-else").await;

    let (status, _) = app
        .send(send_json(
            "POST",
            "/api/affiliate-tracking",
            &token,
            json!({
                "affiliateId": affiliate.id,
                "userId": doctor.id,
                "userType": "doctor",
                "amount": 700.0,
                "month": now.month(),
                "year": now.year()
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, stats) = app.send(get("/api/dashboard/stats", Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["accounts"]["total"], json!(2));
    assert_eq!(stats["accounts"]["doctors"], json!(1));
    assert_eq!(stats["accounts"]["hospitals"], json!(1));
    assert_eq!(stats["commission"]["total"], json!(700.0));
    assert_eq!(stats["commission"]["pending"], json!(700.0));
    assert_eq!(stats["commission"]["paid"], json!(0.0));

    let months = stats["monthlyRevenue"].as_array().expect("twelve months");
    assert_eq!(months.len(), 12);
    let current = &months[now.month() as usize - 1];
    assert_eq!(current["amount"], json!(700.0));
}

#[tokio::test]
async fn hospital_role_has_no_dashboard() {
    let app = TestApp::new();
    let hospital = app.seed_user(Role::Hospital, "City Hospital").await;

    let (status, body) = app
        .send(get("/api/dashboard/stats", Some(&bearer(&hospital.id))))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error_type"], "authorization_error");
}
