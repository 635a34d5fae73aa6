// rest.rs
use crate::backend::{Backend, BackendError};
use crate::config::BackendConfig;
use crate::domain::{
    ActivityItem, AuthGrant, ExtensionReceipt, Lease, NewExtensionRequest, PropertyListing,
    PropertyPage, PropertyQuery, Role,
};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const USER_AGENT: &str = concat!("icumbi-web/", env!("CARGO_PKG_VERSION"));

/// Talks to the hosted backend: `/auth/v1` for sign-in and
/// `/rest/v1/rpc/<name>` for every named server-side function.
pub struct RestBackend {
    client: Client,
    base_url: String,
    anon_key: String,
}

#[derive(Deserialize)]
struct GrantBody {
    access_token: String,
    #[serde(default)]
    expires_in: i64,
    user: GrantUser,
}

#[derive(Deserialize)]
struct GrantUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl RestBackend {
    pub fn new(cfg: &BackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: cfg.url.trim_end_matches('/').to_string(),
            anon_key: cfg.anon_key.clone(),
        })
    }

    /// POST a named RPC with JSON params, authorised as `bearer`.
    fn rpc<P, T>(&self, name: &str, bearer: &str, params: &P) -> Result<T, BackendError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(rpc = name, "calling backend rpc");

        let resp = self
            .client
            .post(rpc_url(&self.base_url, name))
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
            .json(params)
            .send()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        read_json(resp)
    }
}

impl Backend for RestBackend {
    fn sign_in(&self, email: &str, password: &str) -> Result<AuthGrant, BackendError> {
        let resp = self
            .client
            .post(format!("{}/auth/v1/token", self.base_url))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let body: GrantBody = read_json(resp)?;
        Ok(AuthGrant {
            user_id: body.user.id,
            email: body.user.email.unwrap_or_else(|| email.to_string()),
            access_token: body.access_token,
            expires_in: body.expires_in,
        })
    }

    fn user_role(&self, access_token: &str, user_id: &str) -> Result<Role, BackendError> {
        let role: Option<String> =
            self.rpc("get_user_role", access_token, &json!({ "p_user_id": user_id }))?;
        Ok(role.as_deref().map(Role::from_code).unwrap_or_default())
    }

    fn active_leases(
        &self,
        access_token: &str,
        tenant_id: &str,
    ) -> Result<Vec<Lease>, BackendError> {
        self.rpc(
            "get_tenant_active_leases",
            access_token,
            &json!({ "p_tenant_id": tenant_id }),
        )
    }

    fn create_extension_request(
        &self,
        access_token: &str,
        request: &NewExtensionRequest,
    ) -> Result<ExtensionReceipt, BackendError> {
        let value: Value = self.rpc("create_extension_request", access_token, request)?;
        single_row(value)
    }

    fn public_properties(&self, query: &PropertyQuery) -> Result<PropertyPage, BackendError> {
        let rows: Vec<PropertyListing> = self.rpc(
            "get_public_properties",
            &self.anon_key,
            &json!({
                "p_limit": query.page_size,
                "p_offset": query.offset(),
                "p_sort": query.sort.code(),
            }),
        )?;
        Ok(PropertyPage::from_rows(*query, rows))
    }

    fn activity_feed(
        &self,
        access_token: &str,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<ActivityItem>, BackendError> {
        self.rpc(
            "get_activity_feed",
            access_token,
            &json!({ "p_user_id": user_id, "p_limit": limit }),
        )
    }
}

pub(crate) fn rpc_url(base_url: &str, name: &str) -> String {
    format!("{}/rest/v1/rpc/{}", base_url.trim_end_matches('/'), name)
}

fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, BackendError> {
    let status = resp.status();
    let text = resp
        .text()
        .map_err(|e| BackendError::Network(e.to_string()))?;

    if !status.is_success() {
        return Err(status_error(status.as_u16(), &text));
    }

    serde_json::from_str(&text).map_err(|e| BackendError::Decode(e.to_string()))
}

/// The gateway reports errors as JSON with `message` (RPC) or
/// `error_description` / `msg` (auth). Fall back to the raw body.
pub(crate) fn status_error(status: u16, body: &str) -> BackendError {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        ["message", "error_description", "msg", "error"]
            .iter()
            .find_map(|k| v.get(k).and_then(Value::as_str).map(str::to_string))
    });

    let message = from_json.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            "(no body)".to_string()
        } else {
            trimmed.to_string()
        }
    });

    BackendError::Status { status, message }
}

/// Set-returning functions answer with an array, scalar-row ones with an object.
pub(crate) fn single_row<T: DeserializeOwned>(value: Value) -> Result<T, BackendError> {
    let row = match value {
        Value::Array(mut rows) => {
            if rows.is_empty() {
                return Err(BackendError::Decode("empty result set".into()));
            }
            rows.swap_remove(0)
        }
        other => other,
    };
    serde_json::from_value(row).map_err(|e| BackendError::Decode(e.to_string()))
}
