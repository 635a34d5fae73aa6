pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{alert, card, error_page, format_amount, notice};
pub use layouts::desktop::{desktop_layout, Nav};
