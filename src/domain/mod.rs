pub mod account;
pub mod extension;
pub mod lease;
pub mod payment;
pub mod property;
pub mod wizard;

pub use account::{ActivityItem, AuthGrant, Role};
pub use extension::{ExtensionQuote, NewExtensionRequest};
pub use lease::{ExtensionReceipt, Lease};
pub use payment::PaymentMethod;
pub use property::{PropertyListing, PropertyPage, PropertyQuery, PropertySort};
pub use wizard::{ExtensionWizard, SavedWizard, StepKind, WizardAction, WizardError};
