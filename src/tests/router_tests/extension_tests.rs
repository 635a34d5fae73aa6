use crate::domain::{PaymentMethod, Role};
use crate::errors::ServerError;
use crate::tests::utils::{
    app, body_text, get, hidden_value, lease, location, post_form, signed_in, submit_token,
    FakeBackend,
};
use chrono::NaiveDate;
use std::sync::Arc;

const EXTEND: &str = "/leases/extend";

fn tenant() -> (Arc<FakeBackend>, crate::router::AppContext, String) {
    tenant_with(FakeBackend::default())
}

fn tenant_with(backend: FakeBackend) -> (Arc<FakeBackend>, crate::router::AppContext, String) {
    let backend = Arc::new(backend);
    let ctx = app(backend.clone());
    let cookie = signed_in(&ctx, Role::Tenant);
    (backend, ctx, cookie)
}

#[test]
fn wizard_requires_login() {
    let (_, ctx, _) = tenant();
    let resp = get(&ctx, EXTEND, None);
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/login");
}

#[test]
fn landlords_cannot_open_the_wizard() {
    let (_, ctx, _) = tenant();
    let cookie = signed_in(&ctx, Role::Landlord);
    let req = http::Request::builder()
        .uri(EXTEND)
        .header("Cookie", cookie.as_str())
        .body(astra::Body::empty())
        .unwrap();
    assert!(matches!(
        crate::router::handle(req, &ctx),
        Err(ServerError::Unauthorized(_))
    ));
}

#[test]
fn full_flow_submits_three_months() {
    let (backend, ctx, cookie) = tenant();

    let start = body_text(get(&ctx, EXTEND, Some(&cookie)));
    assert!(start.contains("Which lease do you want to extend?"));
    assert!(start.contains("Kacyiru Heights · Room 4"));

    let date_step = post_form(
        &ctx,
        EXTEND,
        Some(&cookie),
        &[("step", "property"), ("lease_id", "lease-1"), ("action", "select_lease")],
    );
    assert_eq!(date_step.status(), 200);
    let body = body_text(date_step);
    assert!(body.contains("name=\"end_date\""));
    assert!(body.contains("value=\"date\""));

    let confirm = post_form(
        &ctx,
        EXTEND,
        Some(&cookie),
        &[
            ("step", "date"),
            ("lease_id", "lease-1"),
            ("end_date", "2026-04-30"),
            ("notes", "Staying through exams"),
            ("action", "choose_date"),
        ],
    );
    assert_eq!(confirm.status(), 200);
    let body = body_text(confirm);
    assert!(body.contains("3 month(s)"));
    assert!(body.contains("300,000 RWF"));
    assert!(body.contains("Staying through exams"));
    let token = hidden_value(&body, "submit_token").expect("confirm step carries a submit token");

    let done = post_form(
        &ctx,
        EXTEND,
        Some(&cookie),
        &[
            ("step", "confirm"),
            ("lease_id", "lease-1"),
            ("end_date", "2026-04-30"),
            ("notes", "Staying through exams"),
            ("submit_token", token.as_str()),
            ("action", "submit"),
        ],
    );
    assert_eq!(done.status(), 302);
    assert_eq!(location(&done), "/dashboard?notice=extension_submitted");

    let sent = backend.submitted();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].lease_id, "lease-1");
    assert_eq!(sent[0].extension_months, 3);
    assert_eq!(sent[0].total_amount, 300_000);
    assert_eq!(sent[0].notes, "Staying through exams");
    assert_eq!(sent[0].payment_method, None);
}

#[test]
fn same_month_date_is_blocked_before_any_backend_call() {
    let (backend, ctx, cookie) = tenant_with(FakeBackend {
        leases: vec![lease(
            "lease-1",
            100_000,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        )],
        ..FakeBackend::default()
    });

    let resp = post_form(
        &ctx,
        EXTEND,
        Some(&cookie),
        &[
            ("step", "date"),
            ("lease_id", "lease-1"),
            ("end_date", "2026-01-28"),
            ("action", "choose_date"),
        ],
    );

    assert_eq!(resp.status(), 422);
    let body = body_text(resp);
    assert!(body.contains("at least one month after"));
    assert!(body.contains("value=\"2026-01-28\""));
    assert!(backend.submitted().is_empty());

    // Forged confirm step with the same zero-month date never reaches the backend either.
    let forged = post_form(
        &ctx,
        EXTEND,
        Some(&cookie),
        &[
            ("step", "confirm"),
            ("lease_id", "lease-1"),
            ("end_date", "2026-01-28"),
            ("action", "submit"),
        ],
    );
    assert_eq!(forged.status(), 422);
    assert!(backend.submitted().is_empty());
}

#[test]
fn month_boundary_counts_as_one_month() {
    let (backend, ctx, cookie) = tenant();
    let token = submit_token(&ctx);

    let resp = post_form(
        &ctx,
        EXTEND,
        Some(&cookie),
        &[
            ("step", "confirm"),
            ("lease_id", "lease-1"),
            ("end_date", "2026-02-01"),
            ("submit_token", token.as_str()),
            ("action", "submit"),
        ],
    );

    assert_eq!(resp.status(), 302);
    assert_eq!(backend.submitted()[0].extension_months, 1);
    assert_eq!(backend.submitted()[0].total_amount, 100_000);
}

#[test]
fn missing_date_asks_for_one() {
    let (_, ctx, cookie) = tenant();

    let body = body_text(post_form(
        &ctx,
        EXTEND,
        Some(&cookie),
        &[("step", "date"), ("lease_id", "lease-1"), ("action", "choose_date")],
    ));

    assert!(body.contains("Please choose a new end date."));
}

#[test]
fn failed_submission_keeps_date_and_notes() {
    let (backend, ctx, cookie) = tenant_with(FakeBackend {
        fail_submissions: true,
        ..FakeBackend::default()
    });

    let token = submit_token(&ctx);
    let form = [
        ("step", "confirm"),
        ("lease_id", "lease-1"),
        ("end_date", "2026-04-30"),
        ("notes", "Please call first"),
        ("submit_token", token.as_str()),
        ("action", "submit"),
    ];

    let resp = post_form(&ctx, EXTEND, Some(&cookie), &form);

    assert_eq!(resp.status(), 502);
    let body = body_text(resp);
    assert!(body.contains("We could not send your extension request."));
    assert!(body.contains("value=\"confirm\""));
    assert!(body.contains("value=\"2026-04-30\""));
    assert!(body.contains("Please call first"));
    assert!(hidden_value(&body, "submit_token").is_some());
    assert!(backend.submitted().is_empty());

    // The failed attempt released its token, so the same form can be retried.
    let retry = body_text(post_form(&ctx, EXTEND, Some(&cookie), &form));
    assert!(retry.contains("We could not send your extension request."));
    assert!(!retry.contains("This form has expired."));
}

#[test]
fn payment_step_needs_a_method() {
    let (backend, ctx, cookie) = tenant();
    let base = [
        ("step", "payment"),
        ("lease_id", "lease-1"),
        ("end_date", "2026-03-31"),
        ("action", "submit"),
    ];

    let missing = post_form(&ctx, EXTEND, Some(&cookie), &base);
    assert_eq!(missing.status(), 422);
    assert!(body_text(missing).contains("Please choose a payment method."));
    assert!(backend.submitted().is_empty());

    let token = submit_token(&ctx);
    let mut with_method = base.to_vec();
    with_method.push(("payment_method", "mtn_momo"));
    with_method.push(("submit_token", token.as_str()));
    let paid = post_form(&ctx, EXTEND, Some(&cookie), &with_method);
    assert_eq!(paid.status(), 302);
    assert_eq!(
        backend.submitted()[0].payment_method,
        Some(PaymentMethod::MtnMomo)
    );
    assert_eq!(backend.submitted()[0].total_amount, 200_000);
}

#[test]
fn back_from_confirm_keeps_the_typed_date() {
    let (_, ctx, cookie) = tenant();

    let body = body_text(post_form(
        &ctx,
        EXTEND,
        Some(&cookie),
        &[
            ("step", "confirm"),
            ("lease_id", "lease-1"),
            ("end_date", "2026-04-30"),
            ("notes", "hello"),
            ("action", "back"),
        ],
    ));

    assert!(body.contains("value=\"date\""));
    assert!(body.contains("value=\"2026-04-30\""));
    assert!(body.contains(">hello</textarea>"));
}

#[test]
fn close_returns_to_dashboard_without_sending() {
    let (backend, ctx, cookie) = tenant();

    let resp = post_form(
        &ctx,
        EXTEND,
        Some(&cookie),
        &[
            ("step", "confirm"),
            ("lease_id", "lease-1"),
            ("end_date", "2026-04-30"),
            ("action", "close"),
        ],
    );

    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/dashboard");
    assert!(backend.submitted().is_empty());
}

#[test]
fn stale_lease_restarts_with_alert() {
    let (_, ctx, cookie) = tenant();

    let resp = post_form(
        &ctx,
        EXTEND,
        Some(&cookie),
        &[("step", "date"), ("lease_id", "lease-gone"), ("action", "back")],
    );

    assert_eq!(resp.status(), 422);
    let body = body_text(resp);
    assert!(body.contains("This lease is no longer active."));
    assert!(body.contains("value=\"property\""));
}

#[test]
fn resubmitting_the_same_form_sends_once() {
    let (backend, ctx, cookie) = tenant();
    let token = submit_token(&ctx);
    let form = [
        ("step", "confirm"),
        ("lease_id", "lease-1"),
        ("end_date", "2026-04-30"),
        ("submit_token", token.as_str()),
        ("action", "submit"),
    ];

    let first = post_form(&ctx, EXTEND, Some(&cookie), &form);
    let second = post_form(&ctx, EXTEND, Some(&cookie), &form);

    assert_eq!(first.status(), 302);
    assert_eq!(second.status(), 302);
    assert_eq!(location(&second), "/dashboard?notice=extension_submitted");
    assert_eq!(backend.submitted().len(), 1);
}

#[test]
fn submit_without_a_valid_token_is_refused() {
    let (backend, ctx, cookie) = tenant();

    let resp = post_form(
        &ctx,
        EXTEND,
        Some(&cookie),
        &[
            ("step", "confirm"),
            ("lease_id", "lease-1"),
            ("end_date", "2026-04-30"),
            ("submit_token", "made-up"),
            ("action", "submit"),
        ],
    );

    assert_eq!(resp.status(), 422);
    let body = body_text(resp);
    assert!(body.contains("This form has expired."));
    assert!(hidden_value(&body, "submit_token").is_some());
    assert!(backend.submitted().is_empty());
}

#[test]
fn close_works_even_when_the_posted_state_is_stale() {
    let (backend, ctx, cookie) = tenant();

    let resp = post_form(
        &ctx,
        EXTEND,
        Some(&cookie),
        &[
            ("step", "confirm"),
            ("lease_id", "lease-gone"),
            ("end_date", "2026-04-30"),
            ("action", "close"),
        ],
    );

    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/dashboard");
    assert!(backend.submitted().is_empty());
}
