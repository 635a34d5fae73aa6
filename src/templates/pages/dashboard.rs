use crate::db::{Preferences, Theme};
use crate::domain::{ActivityItem, Lease, Role};
use crate::i18n::Language;
use crate::templates::{card, desktop_layout, format_amount, notice, Nav};
use maud::{html, Markup};

pub struct DashboardVm {
    pub email: String,
    pub role: Role,
    pub leases: Vec<Lease>,
    pub activity: Vec<ActivityItem>,
    pub notice: Option<&'static str>,
    pub preferences: Preferences,
}

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    let nav = Nav {
        email: Some(vm.email.clone()),
        can_extend: vm.role.can_extend_leases(),
        theme: vm.preferences.theme,
    };

    desktop_layout(
        "Dashboard",
        &nav,
        html! {
            main class="container" {
                h1 { "Dashboard" }
                p { "Signed in as " strong { (vm.email) } " (" (vm.role.code()) ")" }

                @if let Some(message) = vm.notice {
                    (notice(message))
                }

                @match vm.role {
                    Role::Tenant => (leases_card(&vm.leases)),
                    Role::Landlord | Role::Manager => {
                        (card("Extension requests", html! {
                            p { "New extension requests from your tenants appear in the activity feed below." }
                        }))
                    },
                    Role::Admin => {
                        (card("Administration", html! {
                            p { "You have admin access." }
                        }))
                    },
                    Role::Guest => {
                        (card("Welcome", html! {
                            p { "Your account is not linked to a lease yet." }
                            a href="/properties" { "Browse available properties" }
                        }))
                    },
                }

                @if vm.role != Role::Guest {
                    (activity_card(&vm.activity))
                }

                (preferences_card(&vm.preferences))
            }
        },
    )
}

fn leases_card(leases: &[Lease]) -> Markup {
    card(
        "Your leases",
        html! {
            @if leases.is_empty() {
                p { "You have no active leases." }
            } @else {
                table {
                    thead {
                        tr { th { "Property" } th { "Rent / month" } th { "Paid until" } }
                    }
                    tbody {
                        @for lease in leases {
                            tr {
                                td { (lease.label()) }
                                td { (format_amount(lease.rent_amount)) }
                                td { (lease.next_due_date.format("%Y-%m-%d")) }
                            }
                        }
                    }
                }
                a href="/leases/extend" class="btn" { "Request an extension" }
            }
        },
    )
}

fn activity_card(items: &[ActivityItem]) -> Markup {
    card(
        "Recent activity",
        html! {
            @if items.is_empty() {
                p class="muted" { "Nothing yet." }
            } @else {
                ul class="activity" {
                    @for item in items {
                        li data-kind=(item.kind) {
                            strong { (item.title) }
                            @if let Some(detail) = &item.detail {
                                " · " (detail)
                            }
                            " "
                            time datetime=(item.created_at.to_rfc3339()) {
                                (item.created_at.format("%Y-%m-%d %H:%M"))
                            }
                        }
                    }
                }
            }
        },
    )
}

fn preferences_card(prefs: &Preferences) -> Markup {
    card(
        "Preferences",
        html! {
            form action="/preferences" method="post" class="inline" {
                label for="theme" { "Theme" }
                select name="theme" id="theme" {
                    @for theme in [Theme::Light, Theme::Dark] {
                        option value=(theme.code()) selected[prefs.theme == theme] { (theme.code()) }
                    }
                }
                label for="language" { "Language" }
                select name="language" id="language" {
                    @for lang in [Language::En, Language::Fr] {
                        option value=(lang.code()) selected[prefs.language == lang] { (lang.code()) }
                    }
                }
                button type="submit" { "Save" }
            }
        },
    )
}
