use crate::auth::{
    cleared_session_cookie, create_session, purge_stale_sessions, revoke_session, session_cookie,
    session_token,
};
use crate::domain::Role;
use crate::i18n::Message;
use crate::responses::{html_response, html_response_with_status, redirect_with_cookie, ResultResp};
use crate::router::{now, AppContext};
use crate::templates::pages::login_page;
use astra::Request;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::field;

pub fn login_form(_ctx: &AppContext) -> ResultResp {
    html_response(login_page(None, ""))
}

pub fn login(form: &HashMap<String, String>, ctx: &AppContext) -> ResultResp {
    let email = field(form, "email").unwrap_or_default();
    let password = form.get("password").map(String::as_str).unwrap_or_default();
    let failed = Message::LoginFailed.text(ctx.default_language);

    if email.is_empty() || password.is_empty() {
        return html_response_with_status(400, login_page(Some(failed), email));
    }

    let grant = match ctx.backend.sign_in(email, password) {
        Ok(grant) => grant,
        Err(e) if e.is_auth_failure() => {
            info!(%email, "sign-in rejected");
            return html_response_with_status(401, login_page(Some(failed), email));
        }
        Err(e) => return Err(e.into()),
    };

    // A user without a role row can still browse as a guest.
    let role = ctx
        .backend
        .user_role(&grant.access_token, &grant.user_id)
        .unwrap_or_else(|e| {
            warn!(user_id = %grant.user_id, error = %e, "role lookup failed, using guest");
            Role::Guest
        });

    let issued = ctx.db.with_conn(|conn| {
        let at = now();
        let purged = purge_stale_sessions(conn, at)?;
        if purged > 0 {
            debug!(purged, "removed stale sessions");
        }
        create_session(conn, &grant, role, at, ctx.session_ttl_secs)
    })?;
    info!(user_id = %grant.user_id, role = role.code(), "signed in");

    redirect_with_cookie(
        "/dashboard",
        &session_cookie(&issued.token, issued.max_age_secs),
    )
}

pub fn logout(req: &Request, ctx: &AppContext) -> ResultResp {
    if let Some(token) = session_token(req) {
        ctx.db.with_conn(|conn| revoke_session(conn, &token, now()))?;
    }
    redirect_with_cookie("/login", &cleared_session_cookie())
}
