pub mod dashboard;
pub mod extension;
pub mod login;
pub mod properties;

pub use dashboard::{dashboard_page, DashboardVm};
pub use extension::{extension_page, ExtensionVm};
pub use login::login_page;
pub use properties::properties_page;
