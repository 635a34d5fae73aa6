mod backend_error;
mod rest;

pub use backend_error::BackendError;
pub use rest::RestBackend;

use crate::domain::{
    ActivityItem, AuthGrant, ExtensionReceipt, Lease, NewExtensionRequest, PropertyPage,
    PropertyQuery, Role,
};

/// Everything the app asks of the hosted backend. Authorization is the
/// backend's job (RLS); callers pass the signed-in user's access token.
pub trait Backend: Send + Sync {
    fn sign_in(&self, email: &str, password: &str) -> Result<AuthGrant, BackendError>;

    fn user_role(&self, access_token: &str, user_id: &str) -> Result<Role, BackendError>;

    fn active_leases(&self, access_token: &str, tenant_id: &str)
        -> Result<Vec<Lease>, BackendError>;

    fn create_extension_request(
        &self,
        access_token: &str,
        request: &NewExtensionRequest,
    ) -> Result<ExtensionReceipt, BackendError>;

    fn public_properties(&self, query: &PropertyQuery) -> Result<PropertyPage, BackendError>;

    fn activity_feed(
        &self,
        access_token: &str,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<ActivityItem>, BackendError>;
}
