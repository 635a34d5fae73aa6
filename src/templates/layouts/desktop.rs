use crate::db::Theme;
use maud::{html, Markup, DOCTYPE};

/// What the header needs to know about the visitor.
#[derive(Debug, Clone, Default)]
pub struct Nav {
    pub email: Option<String>,
    pub can_extend: bool,
    pub theme: Theme,
}

pub fn desktop_layout(title: &str, nav: &Nav, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · Icumbi" }
                link rel="icon" href="/static/favicon/favicon.ico";
                link rel="stylesheet" href="/static/main.css";
                script src="/static/htmx.js" defer {};
            }
            body class=(format!("theme-{}", nav.theme.code())) {
              header class="flex items-center justify-between px-6 py-3 shadow" {
                  a href="/" class="brand" { "Icumbi" }
                  nav {
                      ul {
                          li { a href="/properties" { "Properties" } }
                          @if nav.email.is_some() {
                              li { a href="/dashboard" { "Dashboard" } }
                          }
                          @if nav.can_extend {
                              li { a href="/leases/extend" { "Extend lease" } }
                          }
                      }
                  }

                  @match &nav.email {
                      Some(email) => {
                          form action="/logout" method="post" class="inline" {
                              span class="text-sm" { (email) }
                              button type="submit" class="link" { "Sign out" }
                          }
                      }
                      None => {
                          a href="/login" class="text-base font-medium hover:text-blue-600" { "Login" }
                      }
                  }
              }
                (content)
            }
        }
    }
}
