use crate::templates::{alert, desktop_layout, Nav};
use maud::{html, Markup};

/// `error` is shown above the form; `email` is kept so the user only retypes the password.
pub fn login_page(error: Option<&str>, email: &str) -> Markup {
    desktop_layout(
        "Sign in",
        &Nav::default(),
        html! {
            main class="container narrow" {
                h1 { "Sign in" }
                p class="lead" { "Use the email and password of your Icumbi account." }

                @if let Some(message) = error {
                    (alert(message))
                }

                form method="post" action="/login" class="stack" {
                    label for="email" { "Email address" }
                    input type="email" id="email" name="email" value=(email)
                        placeholder="you@domain.com" autocomplete="email" required;

                    label for="password" { "Password" }
                    input type="password" id="password" name="password"
                        autocomplete="current-password" required;

                    button type="submit" class="primary" { "Sign in" }
                }
            }
        },
    )
}
