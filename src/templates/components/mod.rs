use maud::{html, Markup};

pub mod card;
pub mod error;

pub use card::card;
pub use error::error_page;

/// Blocking alert inside a form. `role="alert"` so screen readers announce it.
pub fn alert(message: &str) -> Markup {
    html! {
        div class="alert alert-error" role="alert" { (message) }
    }
}

pub fn notice(message: &str) -> Markup {
    html! {
        div class="alert alert-success" role="status" { (message) }
    }
}

/// 300000 -> "300,000 RWF"
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped} RWF")
}
