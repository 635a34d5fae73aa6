// templates/pages/extension.rs

use crate::domain::wizard::WizardStep;
use crate::domain::{ExtensionQuote, ExtensionWizard, Lease, PaymentMethod, StepKind};
use crate::templates::{alert, card, desktop_layout, format_amount, Nav};
use maud::{html, Markup};

pub struct ExtensionVm<'a> {
    pub nav: &'a Nav,
    pub wizard: &'a ExtensionWizard,
    pub leases: &'a [Lease],
    /// Localized blocking alert for the last failed action.
    pub alert: Option<&'a str>,
    /// Single-use token on steps that can send the request.
    pub submit_token: Option<&'a str>,
}

pub fn extension_page(vm: &ExtensionVm) -> Markup {
    let step = vm.wizard.step();
    let saved = vm.wizard.snapshot();

    desktop_layout(
        "Extend your lease",
        vm.nav,
        html! {
            main class="container narrow" {
                div class="modal" role="dialog" aria-labelledby="wizard-title" {
                    h1 id="wizard-title" { "Extend your lease" }
                    (progress(step))

                    @if let Some(message) = vm.alert {
                        (alert(message))
                    }

                    form method="post" action="/leases/extend" class="stack" {
                        input type="hidden" name="step" value=[saved.step.map(StepKind::code)];
                        @if let Some(lease_id) = &saved.lease_id {
                            input type="hidden" name="lease_id" value=(lease_id);
                        }
                        @if let Some(token) = vm.submit_token {
                            input type="hidden" name="submit_token" value=(token);
                        }

                        @match step {
                            WizardStep::PropertySelection => (property_selection(vm.leases)),
                            WizardStep::DateSelection { lease } => (date_selection(lease, vm.wizard)),
                            WizardStep::Confirmation { lease, quote } => (confirmation(lease, quote, vm.wizard)),
                            WizardStep::Payment { lease, quote, method } => (payment(lease, quote, *method, vm.wizard)),
                            WizardStep::Closed => p { "This request is closed." },
                        }
                    }
                }
            }
        },
    )
}

fn progress(step: &WizardStep) -> Markup {
    let current = step.kind();
    let labels = [
        (StepKind::PropertySelection, "Property"),
        (StepKind::DateSelection, "New end date"),
        (StepKind::Confirmation, "Review"),
        (StepKind::Payment, "Payment"),
    ];
    html! {
        ol class="steps" {
            @for (kind, label) in labels {
                li class=[(kind == current).then_some("current")] { (label) }
            }
        }
    }
}

fn nav_buttons(extra: Markup) -> Markup {
    html! {
        div class="actions" {
            button type="submit" name="action" value="close" formnovalidate { "Close" }
            button type="submit" name="action" value="back" formnovalidate { "Back" }
            (extra)
        }
    }
}

fn property_selection(leases: &[Lease]) -> Markup {
    html! {
        @if leases.is_empty() {
            p { "You have no active leases to extend." }
            div class="actions" {
                button type="submit" name="action" value="close" formnovalidate { "Close" }
            }
        } @else {
            fieldset {
                legend { "Which lease do you want to extend?" }
                @for (i, lease) in leases.iter().enumerate() {
                    label class="option" {
                        input type="radio" name="lease_id" value=(lease.id) required checked[i == 0];
                        " " (lease.label())
                        span class="muted" {
                            " · paid until " (lease.next_due_date.format("%Y-%m-%d"))
                            " · " (format_amount(lease.rent_amount)) " / month"
                        }
                    }
                }
            }
            div class="actions" {
                button type="submit" name="action" value="close" formnovalidate { "Close" }
                button type="submit" name="action" value="select_lease" class="primary" { "Continue" }
            }
        }
    }
}

fn date_selection(lease: &Lease, wizard: &ExtensionWizard) -> Markup {
    let min = lease.next_due_date.succ_opt().unwrap_or(lease.next_due_date);
    html! {
        p { "Current lease ends on " strong { (lease.next_due_date.format("%Y-%m-%d")) } "." }
        p class="muted" {
            "Extensions are billed per calendar month at " (format_amount(lease.rent_amount)) "."
        }

        label for="end_date" { "New end date" }
        input type="date" id="end_date" name="end_date" required
            min=(min.format("%Y-%m-%d"))
            value=[wizard.end_date().map(|d| d.format("%Y-%m-%d").to_string())];

        label for="notes" { "Notes for your landlord (optional)" }
        textarea id="notes" name="notes" rows="3" { (wizard.notes()) }

        (nav_buttons(html! {
            button type="submit" name="action" value="choose_date" class="primary" { "Review" }
        }))
    }
}

fn summary(lease: &Lease, quote: &ExtensionQuote, wizard: &ExtensionWizard) -> Markup {
    html! {
        input type="hidden" name="end_date" value=(quote.requested_end.format("%Y-%m-%d"));
        input type="hidden" name="notes" value=(wizard.notes());

        (card(&lease.label(), html! {
            dl class="summary" {
                dt { "Current end date" } dd { (quote.current_end.format("%Y-%m-%d")) }
                dt { "New end date" } dd { (quote.requested_end.format("%Y-%m-%d")) }
                dt { "Extension" } dd { (quote.months) " month(s)" }
                dt { "Monthly rent" } dd { (format_amount(quote.monthly_rent)) }
                dt { "Total" } dd { strong { (format_amount(quote.total)) } }
                @if !wizard.notes().is_empty() {
                    dt { "Notes" } dd { (wizard.notes()) }
                }
            }
        }))
    }
}

fn confirmation(lease: &Lease, quote: &ExtensionQuote, wizard: &ExtensionWizard) -> Markup {
    html! {
        (summary(lease, quote, wizard))
        (nav_buttons(html! {
            button type="submit" name="action" value="proceed_to_payment" { "Pay now" }
            button type="submit" name="action" value="submit" class="primary" { "Send request" }
        }))
    }
}

fn payment(
    lease: &Lease,
    quote: &ExtensionQuote,
    selected: Option<PaymentMethod>,
    wizard: &ExtensionWizard,
) -> Markup {
    html! {
        (summary(lease, quote, wizard))
        fieldset {
            legend { "Pay " (format_amount(quote.total)) " with" }
            @for method in PaymentMethod::ALL {
                label class="option" {
                    input type="radio" name="payment_method" value=(method.code())
                        checked[selected == Some(method)];
                    " " (method.label())
                }
            }
        }
        (nav_buttons(html! {
            button type="submit" name="action" value="submit" class="primary" { "Send request" }
        }))
    }
}
