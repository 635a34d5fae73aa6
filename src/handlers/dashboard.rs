use crate::domain::Role;
use crate::i18n::Message;
use crate::responses::{html_response, redirect, ResultResp};
use crate::router::{parse_query, AppContext};
use crate::templates::pages::{dashboard_page, DashboardVm};
use astra::Request;
use tracing::warn;

const ACTIVITY_LIMIT: u32 = 20;

pub fn show(req: &Request, ctx: &AppContext) -> ResultResp {
    let Some(session) = ctx.session(req)? else {
        return redirect("/login");
    };
    let preferences = ctx.preferences(Some(&session))?;

    let leases = if session.role == Role::Tenant {
        ctx.backend
            .active_leases(&session.access_token, &session.user_id)?
    } else {
        Vec::new()
    };

    // Feed errors degrade to an empty list.
    let activity = if session.role == Role::Guest {
        Vec::new()
    } else {
        ctx.backend
            .activity_feed(&session.access_token, &session.user_id, ACTIVITY_LIMIT)
            .unwrap_or_else(|e| {
                warn!(user_id = %session.user_id, error = %e, "activity feed unavailable");
                Vec::new()
            })
    };

    let notice = parse_query(req)
        .get("notice")
        .and_then(|n| Message::from_notice(n))
        .map(|m| m.text(preferences.language));

    html_response(dashboard_page(&DashboardVm {
        email: session.email,
        role: session.role,
        leases,
        activity,
        notice,
        preferences,
    }))
}
