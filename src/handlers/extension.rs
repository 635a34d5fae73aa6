use crate::auth::{claim_submit_token, issue_submit_token, release_submit_token, Claim, Session};
use crate::backend::BackendError;
use crate::db::Preferences;
use crate::domain::{
    ExtensionReceipt, ExtensionWizard, Lease, PaymentMethod, SavedWizard, StepKind, WizardAction,
    WizardError,
};
use crate::errors::ServerError;
use crate::i18n::Message;
use crate::responses::{html_response_with_status, redirect, ResultResp};
use crate::router::{now, AppContext};
use crate::templates::pages::{extension_page, ExtensionVm};
use astra::Request;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{error, info, warn};

use super::{field, nav_for};

/// Everything a wizard page needs besides the wizard itself.
struct View<'a> {
    ctx: &'a AppContext,
    session: &'a Session,
    prefs: Preferences,
    leases: &'a [Lease],
}

impl View<'_> {
    /// Steps that can send the request get a fresh single-use submit token.
    fn render(&self, wizard: &ExtensionWizard, alert: Option<Message>, status: u16) -> ResultResp {
        let submit_token = match wizard.step().kind() {
            StepKind::Confirmation | StepKind::Payment => Some(
                self.ctx
                    .db
                    .with_conn(|conn| issue_submit_token(conn, &self.session.user_id, now()))?,
            ),
            _ => None,
        };
        let nav = nav_for(Some(self.session), &self.prefs);
        let alert = alert.map(|m| m.text(self.prefs.language));
        html_response_with_status(
            status,
            extension_page(&ExtensionVm {
                nav: &nav,
                wizard,
                leases: self.leases,
                alert,
                submit_token: submit_token.as_deref(),
            }),
        )
    }
}

/// Ways a submit can fail without becoming an error page.
enum SubmitError {
    Invalid(WizardError),
    /// The form's submit token is unknown or expired.
    Stale,
    Backend(BackendError),
    Server(ServerError),
}

impl From<WizardError> for SubmitError {
    fn from(e: WizardError) -> Self {
        SubmitError::Invalid(e)
    }
}

fn tenant_leases(session: &Session, ctx: &AppContext) -> Result<Vec<Lease>, ServerError> {
    if !session.role.can_extend_leases() {
        return Err(ServerError::Unauthorized(
            "only tenants can request a lease extension".into(),
        ));
    }
    Ok(ctx
        .backend
        .active_leases(&session.access_token, &session.user_id)?)
}

pub fn start(req: &Request, ctx: &AppContext) -> ResultResp {
    let Some(session) = ctx.session(req)? else {
        return redirect("/login");
    };
    let leases = tenant_leases(&session, ctx)?;
    let view = View {
        ctx,
        session: &session,
        prefs: ctx.preferences(Some(&session))?,
        leases: &leases,
    };
    view.render(&ExtensionWizard::open(), None, 200)
}

/// Rebuilds the wizard from the posted hidden fields and applies `action`.
pub fn step(req: &Request, form: &HashMap<String, String>, ctx: &AppContext) -> ResultResp {
    let Some(session) = ctx.session(req)? else {
        return redirect("/login");
    };
    let leases = tenant_leases(&session, ctx)?;
    let view = View {
        ctx,
        session: &session,
        prefs: ctx.preferences(Some(&session))?,
        leases: &leases,
    };

    let action = field(form, "action").unwrap_or_default();
    let mut wizard = match ExtensionWizard::restore(&leases, &saved_from_form(form)) {
        Ok(wizard) => wizard,
        // Closing never depends on the posted state being valid.
        Err(_) if action == "close" => return redirect("/dashboard"),
        Err(e) => {
            warn!(user_id = %session.user_id, error = %e, "could not restore extension wizard");
            return view.render(&ExtensionWizard::open(), Some(e.message()), 422);
        }
    };

    let outcome = match action {
        "select_lease" => select_lease(&leases, form).and_then(|a| wizard.apply(a)),
        "choose_date" => match field(form, "end_date").and_then(parse_date) {
            Some(end_date) => wizard.apply(WizardAction::ChooseDate {
                end_date,
                notes: form.get("notes").cloned().unwrap_or_default(),
            }),
            None => Err(WizardError::MissingEndDate),
        },
        "proceed_to_payment" => wizard.apply(WizardAction::ProceedToPayment),
        "back" => wizard.apply(WizardAction::Back),
        "close" => wizard.apply(WizardAction::Close),
        "submit" => return submit(&mut wizard, &view, form),
        other => {
            return Err(ServerError::BadRequest(format!(
                "unknown wizard action: {other:?}"
            )))
        }
    };

    match outcome {
        Ok(()) if wizard.is_closed() => redirect("/dashboard"),
        Ok(()) => view.render(&wizard, None, 200),
        Err(e) => {
            info!(user_id = %session.user_id, error = %e, "wizard action rejected");
            view.render(&wizard, Some(e.message()), 422)
        }
    }
}

/// Sends the request at most once per rendered form: the submit token is
/// claimed before the backend call and released again if the call fails.
fn submit(wizard: &mut ExtensionWizard, view: &View, form: &HashMap<String, String>) -> ResultResp {
    let ctx = view.ctx;
    let session = view.session;
    let lease_id = wizard.step().lease().map(|l| l.id.clone()).unwrap_or_default();
    let token = field(form, "submit_token").unwrap_or_default();

    let sent = wizard.submit(|request| -> Result<Option<ExtensionReceipt>, SubmitError> {
        let claim = ctx
            .db
            .with_conn(|conn| claim_submit_token(conn, &session.user_id, token, now()))
            .map_err(SubmitError::Server)?;
        match claim {
            Claim::Claimed => {}
            Claim::AlreadyUsed => return Ok(None),
            Claim::Unknown => return Err(SubmitError::Stale),
        }

        match ctx
            .backend
            .create_extension_request(&session.access_token, request)
        {
            Ok(receipt) => Ok(Some(receipt)),
            Err(e) => {
                ctx.db
                    .with_conn(|conn| release_submit_token(conn, &session.user_id, token))
                    .map_err(SubmitError::Server)?;
                Err(SubmitError::Backend(e))
            }
        }
    });

    match sent {
        Ok(Some(receipt)) => {
            info!(
                user_id = %session.user_id,
                %lease_id,
                request_id = %receipt.id,
                status = ?receipt.status,
                "extension request created"
            );
            redirect("/dashboard?notice=extension_submitted")
        }
        Ok(None) => {
            info!(user_id = %session.user_id, %lease_id, "repeated extension submit ignored");
            redirect("/dashboard?notice=extension_submitted")
        }
        Err(SubmitError::Invalid(e)) => view.render(wizard, Some(e.message()), 422),
        Err(SubmitError::Stale) => {
            warn!(user_id = %session.user_id, %lease_id, "extension submit with stale token");
            view.render(wizard, Some(Message::FormExpired), 422)
        }
        Err(SubmitError::Backend(e)) => {
            error!(user_id = %session.user_id, %lease_id, error = %e, "extension request failed");
            view.render(wizard, Some(Message::SubmissionFailed), 502)
        }
        Err(SubmitError::Server(e)) => Err(e),
    }
}

fn select_lease(leases: &[Lease], form: &HashMap<String, String>) -> Result<WizardAction, WizardError> {
    let id = field(form, "lease_id").unwrap_or_default();
    leases
        .iter()
        .find(|l| l.id == id)
        .cloned()
        .map(WizardAction::SelectLease)
        .ok_or_else(|| WizardError::UnknownLease(id.to_string()))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn saved_from_form(form: &HashMap<String, String>) -> SavedWizard {
    SavedWizard {
        step: field(form, "step").and_then(StepKind::from_code),
        lease_id: field(form, "lease_id").map(str::to_string),
        end_date: field(form, "end_date").and_then(parse_date),
        notes: form.get("notes").cloned().unwrap_or_default(),
        payment_method: field(form, "payment_method").and_then(PaymentMethod::from_code),
    }
}
