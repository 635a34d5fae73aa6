pub mod auth;
pub mod dashboard;
pub mod extension;
pub mod preferences;
pub mod properties;

use crate::auth::Session;
use crate::db::Preferences;
use crate::templates::Nav;
use std::collections::HashMap;

pub(crate) fn nav_for(session: Option<&Session>, prefs: &Preferences) -> Nav {
    Nav {
        email: session.map(|s| s.email.clone()),
        can_extend: session.is_some_and(|s| s.role.can_extend_leases()),
        theme: prefs.theme,
    }
}

/// Trimmed form value; blank fields count as missing.
pub(crate) fn field<'a>(form: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    form.get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}
