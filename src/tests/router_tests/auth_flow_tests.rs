use crate::backend::BackendError;
use crate::domain::Role;
use crate::tests::utils::{app, body_text, get, location, post_form, FakeBackend, PASSWORD};
use std::sync::Arc;

#[test]
fn login_page_loads_successfully() {
    let ctx = app(Arc::new(FakeBackend::default()));

    let resp = get(&ctx, "/login", None);

    assert_eq!(resp.status(), 200);
    let body = body_text(resp);
    assert!(body.contains("Sign in"));
    assert!(body.contains("form"));
}

#[test]
fn root_redirects_to_properties() {
    let ctx = app(Arc::new(FakeBackend::default()));
    let resp = get(&ctx, "/", None);
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/properties");
}

#[test]
fn successful_login_sets_cookie_and_opens_dashboard() {
    let ctx = app(Arc::new(FakeBackend::default()));

    let resp = post_form(
        &ctx,
        "/login",
        None,
        &[("email", "tenant@example.com"), ("password", PASSWORD)],
    );

    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/dashboard");
    let cookie = resp
        .headers()
        .get("Set-Cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));

    let session = cookie.split(';').next().unwrap();
    let dash = get(&ctx, "/dashboard", Some(session));
    assert_eq!(dash.status(), 200);
    let body = body_text(dash);
    assert!(body.contains("tenant@example.com"));
    assert!(body.contains("(tenant)"));
}

#[test]
fn bad_password_rerenders_form_with_email_kept() {
    let ctx = app(Arc::new(FakeBackend::default()));

    let resp = post_form(
        &ctx,
        "/login",
        None,
        &[("email", "tenant@example.com"), ("password", "nope")],
    );

    assert_eq!(resp.status(), 401);
    assert!(resp.headers().get("Set-Cookie").is_none());
    let body = body_text(resp);
    assert!(body.contains("Invalid email or password."));
    assert!(body.contains("value=\"tenant@example.com\""));
}

#[test]
fn failed_role_lookup_signs_in_as_guest() {
    let backend = FakeBackend {
        role: Err(BackendError::Status {
            status: 500,
            message: "boom".into(),
        }),
        ..FakeBackend::default()
    };
    let ctx = app(Arc::new(backend));

    let resp = post_form(
        &ctx,
        "/login",
        None,
        &[("email", "new@example.com"), ("password", PASSWORD)],
    );
    assert_eq!(resp.status(), 302);

    let cookie = resp.headers()["Set-Cookie"].to_str().unwrap().to_string();
    let session = cookie.split(';').next().unwrap();
    let body = body_text(get(&ctx, "/dashboard", Some(session)));
    assert!(body.contains(&format!("({})", Role::Guest.code())));
    assert!(body.contains("Browse available properties"));
}

#[test]
fn logout_revokes_session() {
    let ctx = app(Arc::new(FakeBackend::default()));
    let cookie = crate::tests::utils::signed_in(&ctx, Role::Tenant);

    let resp = post_form(&ctx, "/logout", Some(&cookie), &[]);
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/login");
    assert!(resp.headers()["Set-Cookie"]
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));

    let after = get(&ctx, "/dashboard", Some(&cookie));
    assert_eq!(after.status(), 302);
    assert_eq!(location(&after), "/login");
}

#[test]
fn cookie_lifetime_follows_the_backend_token() {
    let mut ctx = app(Arc::new(FakeBackend::default()));
    ctx.session_ttl_secs = 7 * 24 * 3600;

    let resp = post_form(
        &ctx,
        "/login",
        None,
        &[("email", "tenant@example.com"), ("password", PASSWORD)],
    );

    let cookie = resp.headers()["Set-Cookie"].to_str().unwrap().to_string();
    assert!(cookie.contains("Max-Age=3600"));
}
