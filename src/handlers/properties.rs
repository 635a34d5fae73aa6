use crate::domain::{PropertyQuery, PropertySort};
use crate::responses::{html_response, ResultResp};
use crate::router::{parse_query, AppContext};
use crate::templates::pages::properties_page;
use astra::Request;

use super::nav_for;

/// Public listing; works with or without a session.
pub fn list(req: &Request, ctx: &AppContext) -> ResultResp {
    let params = parse_query(req);
    let page = params
        .get("page")
        .and_then(|p| p.parse::<u32>().ok())
        .unwrap_or(1);
    let sort = params
        .get("sort")
        .and_then(|s| PropertySort::from_code(s))
        .unwrap_or_default();

    let session = ctx.session(req)?;
    let prefs = ctx.preferences(session.as_ref())?;

    let listing = ctx
        .backend
        .public_properties(&PropertyQuery::new(page, sort))?;

    html_response(properties_page(&nav_for(session.as_ref(), &prefs), &listing))
}
