use crate::db::{set_preference, Preference};
use crate::responses::{redirect, ResultResp};
use crate::router::{now, AppContext};
use astra::Request;
use std::collections::HashMap;

use super::field;

pub fn save(req: &Request, form: &HashMap<String, String>, ctx: &AppContext) -> ResultResp {
    let Some(session) = ctx.session(req)? else {
        return redirect("/login");
    };

    // Validate everything before writing anything.
    let prefs = ["theme", "language"]
        .into_iter()
        .filter_map(|key| field(form, key).map(|value| Preference::parse(key, value)))
        .collect::<Result<Vec<_>, _>>()?;

    let at = now();
    ctx.db.with_conn(|conn| {
        for pref in prefs {
            set_preference(conn, &session.user_id, pref, at)?;
        }
        Ok(())
    })?;

    redirect("/dashboard?notice=preferences_saved")
}
