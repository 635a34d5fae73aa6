use crate::auth::{create_session, issue_submit_token};
use crate::backend::{Backend, BackendError};
use crate::db::{init_db, Database};
use crate::domain::{
    ActivityItem, AuthGrant, ExtensionReceipt, Lease, NewExtensionRequest, PropertyListing,
    PropertyPage, PropertyQuery, Role,
};
use crate::domain::lease::{ApprovalStatus, PaymentStatus};
use crate::i18n::Language;
use crate::router::{handle, now, AppContext};
use astra::{Body, Response};
use chrono::NaiveDate;
use http::{Method, Request};
use std::io::Read;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

pub const PASSWORD: &str = "correct horse";

/// Fresh file-backed database built from the production schema.
pub fn make_db() -> Database {
    let path = std::env::temp_dir().join(format!(
        "icumbi_test_{}_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        rand::random::<u32>()
    ));
    let db = Database::new(path.to_string_lossy().into_owned());
    init_db(&db, "sql/schema.sql").expect("Failed to initialize DB");
    db
}

pub fn lease(id: &str, rent: i64, next_due: NaiveDate) -> Lease {
    Lease {
        id: id.into(),
        tenant_id: "user-1".into(),
        room_id: format!("room-{id}"),
        room_name: Some("Room 4".into()),
        property_id: "prop-1".into(),
        property_name: Some("Kacyiru Heights".into()),
        rent_amount: rent,
        move_in_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        next_due_date: next_due,
    }
}

/// In-memory backend. Records every extension request it receives.
pub struct FakeBackend {
    pub role: Result<Role, BackendError>,
    pub leases: Vec<Lease>,
    pub listings: Vec<PropertyListing>,
    pub fail_submissions: bool,
    pub submissions: Mutex<Vec<NewExtensionRequest>>,
    pub queries: Mutex<Vec<PropertyQuery>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            role: Ok(Role::Tenant),
            leases: vec![lease(
                "lease-1",
                100_000,
                NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            )],
            listings: Vec::new(),
            fail_submissions: false,
            submissions: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
        }
    }
}

impl FakeBackend {
    pub fn submitted(&self) -> Vec<NewExtensionRequest> {
        self.submissions.lock().unwrap().clone()
    }
}

impl Backend for FakeBackend {
    fn sign_in(&self, email: &str, password: &str) -> Result<AuthGrant, BackendError> {
        if password != PASSWORD {
            return Err(BackendError::Status {
                status: 400,
                message: "Invalid login credentials".into(),
            });
        }
        Ok(AuthGrant {
            user_id: "user-1".into(),
            email: email.into(),
            access_token: "jwt-user-1".into(),
            expires_in: 3600,
        })
    }

    fn user_role(&self, _token: &str, _user_id: &str) -> Result<Role, BackendError> {
        self.role.clone()
    }

    fn active_leases(&self, _token: &str, _tenant_id: &str) -> Result<Vec<Lease>, BackendError> {
        Ok(self.leases.clone())
    }

    fn create_extension_request(
        &self,
        _token: &str,
        request: &NewExtensionRequest,
    ) -> Result<ExtensionReceipt, BackendError> {
        if self.fail_submissions {
            return Err(BackendError::Network("connection reset".into()));
        }
        self.submissions.lock().unwrap().push(request.clone());
        Ok(ExtensionReceipt {
            id: "req-1".into(),
            status: ApprovalStatus::Pending,
            payment_status: PaymentStatus::Pending,
        })
    }

    fn public_properties(&self, query: &PropertyQuery) -> Result<PropertyPage, BackendError> {
        self.queries.lock().unwrap().push(*query);
        Ok(PropertyPage::from_rows(*query, self.listings.clone()))
    }

    fn activity_feed(
        &self,
        _token: &str,
        _user_id: &str,
        _limit: u32,
    ) -> Result<Vec<ActivityItem>, BackendError> {
        Err(BackendError::Network("feed offline".into()))
    }
}

pub fn app(backend: Arc<FakeBackend>) -> AppContext {
    AppContext {
        db: make_db(),
        backend,
        session_ttl_secs: 3600,
        default_language: Language::En,
    }
}

/// Inserts a session directly and returns the cookie header value.
pub fn signed_in(ctx: &AppContext, role: Role) -> String {
    let grant = AuthGrant {
        user_id: "user-1".into(),
        email: "tenant@example.com".into(),
        access_token: "jwt-user-1".into(),
        expires_in: 3600,
    };
    let issued = ctx
        .db
        .with_conn(|conn| create_session(conn, &grant, role, now(), 3600))
        .unwrap();
    format!("session={}", issued.token)
}

/// A live submit token for the user behind `signed_in`.
pub fn submit_token(ctx: &AppContext) -> String {
    ctx.db
        .with_conn(|conn| issue_submit_token(conn, "user-1", now()))
        .unwrap()
}

/// Value of the first hidden input called `name` in a rendered page.
pub fn hidden_value(body: &str, name: &str) -> Option<String> {
    let marker = format!("name=\"{name}\" value=\"");
    let start = body.find(&marker)? + marker.len();
    let len = body[start..].find('"')?;
    Some(body[start..start + len].to_string())
}

pub fn get(ctx: &AppContext, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    handle(builder.body(Body::empty()).unwrap(), ctx).expect("Failed to handle request")
}

pub fn post_form(ctx: &AppContext, uri: &str, cookie: Option<&str>, pairs: &[(&str, &str)]) -> Response {
    let body: String = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    handle(builder.body(Body::from(body)).unwrap(), ctx).expect("Failed to handle request")
}

pub fn body_text(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn location(resp: &Response) -> &str {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
