// src/domain/wizard.rs

//! The lease-extension wizard.
//!
//! A tenant walks `PropertySelection -> DateSelection -> Confirmation ->
//! Payment (optional)` and submits one request. `Close` aborts from anywhere.
//! The web layer is stateless, so a wizard is carried between requests as a
//! [`SavedWizard`] and rebuilt with [`ExtensionWizard::restore`], which
//! replays the same transitions a live session would have taken.

use crate::domain::extension::{quote_for_lease, ExtensionError, ExtensionQuote, NewExtensionRequest};
use crate::domain::lease::Lease;
use crate::domain::payment::PaymentMethod;
use crate::i18n::Message;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Quote(#[from] ExtensionError),

    #[error("choose a payment method before submitting")]
    MissingPaymentMethod,

    #[error("no end date chosen")]
    MissingEndDate,

    #[error("lease {0} is not among the tenant's active leases")]
    UnknownLease(String),

    #[error("cannot {action} from the {step} step")]
    InvalidTransition {
        step: &'static str,
        action: &'static str,
    },
}

impl WizardError {
    /// Alert shown to the tenant.
    pub fn message(&self) -> Message {
        match self {
            WizardError::Quote(ExtensionError::NotAfterCurrentEnd { .. }) => {
                Message::EndDateNotAfterCurrent
            }
            WizardError::Quote(ExtensionError::NonPositiveMonths(_)) => Message::NoExtensionMonths,
            WizardError::Quote(ExtensionError::AmountOverflow { .. }) => Message::AmountTooLarge,
            WizardError::MissingPaymentMethod => Message::ChoosePaymentMethod,
            WizardError::UnknownLease(_) => Message::LeaseNotFound,
            WizardError::MissingEndDate => Message::ChooseEndDate,
            WizardError::InvalidTransition { .. } => Message::InvalidStep,
        }
    }
}

/// Which screen the wizard is on, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StepKind {
    PropertySelection,
    DateSelection,
    Confirmation,
    Payment,
    Closed,
}

impl StepKind {
    pub fn code(self) -> &'static str {
        match self {
            StepKind::PropertySelection => "property",
            StepKind::DateSelection => "date",
            StepKind::Confirmation => "confirm",
            StepKind::Payment => "payment",
            StepKind::Closed => "closed",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        [
            StepKind::PropertySelection,
            StepKind::DateSelection,
            StepKind::Confirmation,
            StepKind::Payment,
            StepKind::Closed,
        ]
        .into_iter()
        .find(|k| k.code() == code)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum WizardStep {
    #[default]
    PropertySelection,
    DateSelection {
        lease: Lease,
    },
    Confirmation {
        lease: Lease,
        quote: ExtensionQuote,
    },
    Payment {
        lease: Lease,
        quote: ExtensionQuote,
        method: Option<PaymentMethod>,
    },
    Closed,
}

impl WizardStep {
    pub fn kind(&self) -> StepKind {
        match self {
            WizardStep::PropertySelection => StepKind::PropertySelection,
            WizardStep::DateSelection { .. } => StepKind::DateSelection,
            WizardStep::Confirmation { .. } => StepKind::Confirmation,
            WizardStep::Payment { .. } => StepKind::Payment,
            WizardStep::Closed => StepKind::Closed,
        }
    }

    pub fn lease(&self) -> Option<&Lease> {
        match self {
            WizardStep::DateSelection { lease }
            | WizardStep::Confirmation { lease, .. }
            | WizardStep::Payment { lease, .. } => Some(lease),
            WizardStep::PropertySelection | WizardStep::Closed => None,
        }
    }

    pub fn quote(&self) -> Option<&ExtensionQuote> {
        match self {
            WizardStep::Confirmation { quote, .. } | WizardStep::Payment { quote, .. } => {
                Some(quote)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    SelectLease(Lease),
    ChooseDate { end_date: NaiveDate, notes: String },
    ProceedToPayment,
    SelectPaymentMethod(PaymentMethod),
    Back,
    Close,
}

impl WizardAction {
    fn name(&self) -> &'static str {
        match self {
            WizardAction::SelectLease(_) => "select a lease",
            WizardAction::ChooseDate { .. } => "choose a date",
            WizardAction::ProceedToPayment => "proceed to payment",
            WizardAction::SelectPaymentMethod(_) => "select a payment method",
            WizardAction::Back => "go back",
            WizardAction::Close => "close",
        }
    }
}

/// Hidden-field snapshot of a wizard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SavedWizard {
    pub step: Option<StepKind>,
    pub lease_id: Option<String>,
    pub end_date: Option<NaiveDate>,
    pub notes: String,
    pub payment_method: Option<PaymentMethod>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtensionWizard {
    step: WizardStep,
    end_date: Option<NaiveDate>,
    notes: String,
}

impl ExtensionWizard {
    pub fn open() -> Self {
        Self::default()
    }

    pub fn step(&self) -> &WizardStep {
        &self.step
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn is_closed(&self) -> bool {
        self.step == WizardStep::Closed
    }

    /// Applies one transition. On error the current step is kept; a rejected
    /// `ChooseDate` still remembers the date and notes the tenant typed.
    pub fn apply(&mut self, action: WizardAction) -> Result<(), WizardError> {
        if matches!(action, WizardAction::Close) {
            self.close();
            return Ok(());
        }

        let next = match (&self.step, action) {
            (WizardStep::PropertySelection, WizardAction::SelectLease(lease)) => {
                WizardStep::DateSelection { lease }
            }
            (WizardStep::DateSelection { lease }, WizardAction::ChooseDate { end_date, notes }) => {
                self.end_date = Some(end_date);
                self.notes = notes;
                let quote = quote_for_lease(lease, end_date)?;
                WizardStep::Confirmation {
                    lease: lease.clone(),
                    quote,
                }
            }
            (WizardStep::Confirmation { lease, quote }, WizardAction::ProceedToPayment) => {
                WizardStep::Payment {
                    lease: lease.clone(),
                    quote: *quote,
                    method: None,
                }
            }
            (
                WizardStep::Payment { lease, quote, .. },
                WizardAction::SelectPaymentMethod(method),
            ) => WizardStep::Payment {
                lease: lease.clone(),
                quote: *quote,
                method: Some(method),
            },
            (WizardStep::PropertySelection, WizardAction::Back)
            | (WizardStep::DateSelection { .. }, WizardAction::Back) => {
                WizardStep::PropertySelection
            }
            (WizardStep::Confirmation { lease, .. }, WizardAction::Back) => {
                WizardStep::DateSelection {
                    lease: lease.clone(),
                }
            }
            (WizardStep::Payment { lease, quote, .. }, WizardAction::Back) => {
                WizardStep::Confirmation {
                    lease: lease.clone(),
                    quote: *quote,
                }
            }
            (step, action) => {
                return Err(WizardError::InvalidTransition {
                    step: step.kind().code(),
                    action: action.name(),
                })
            }
        };

        self.step = next;
        Ok(())
    }

    /// The request that `submit` would send from the current step.
    pub fn submission(&self) -> Result<NewExtensionRequest, WizardError> {
        let (lease, quote, method) = match &self.step {
            WizardStep::Confirmation { lease, quote } => (lease, quote, None),
            WizardStep::Payment {
                lease,
                quote,
                method: Some(method),
            } => (lease, quote, Some(*method)),
            WizardStep::Payment { method: None, .. } => {
                return Err(WizardError::MissingPaymentMethod)
            }
            step => {
                return Err(WizardError::InvalidTransition {
                    step: step.kind().code(),
                    action: "submit",
                })
            }
        };

        if quote.months <= 0 {
            return Err(ExtensionError::NonPositiveMonths(quote.months).into());
        }

        Ok(NewExtensionRequest::new(lease, quote, &self.notes, method))
    }

    /// Sends the request once through `send`. Success closes the wizard and
    /// clears its state; failure leaves everything in place for a retry.
    pub fn submit<T, E, F>(&mut self, send: F) -> Result<T, E>
    where
        F: FnOnce(&NewExtensionRequest) -> Result<T, E>,
        E: From<WizardError>,
    {
        let request = self.submission()?;
        let out = send(&request)?;
        self.close();
        Ok(out)
    }

    fn close(&mut self) {
        self.step = WizardStep::Closed;
        self.end_date = None;
        self.notes.clear();
    }

    pub fn snapshot(&self) -> SavedWizard {
        let payment_method = match &self.step {
            WizardStep::Payment { method, .. } => *method,
            _ => None,
        };
        SavedWizard {
            step: Some(self.step.kind()),
            lease_id: self.step.lease().map(|l| l.id.clone()),
            end_date: self.end_date,
            notes: self.notes.clone(),
            payment_method,
        }
    }

    /// Rebuilds a wizard from a snapshot against the tenant's current leases.
    /// A closed or missing step opens a fresh wizard.
    pub fn restore(leases: &[Lease], saved: &SavedWizard) -> Result<Self, WizardError> {
        let target = match saved.step {
            None | Some(StepKind::Closed) => return Ok(Self::open()),
            Some(kind) => kind,
        };

        let mut wizard = Self::open();
        wizard.end_date = saved.end_date;
        wizard.notes = saved.notes.clone();

        if target >= StepKind::DateSelection {
            let lease_id = saved.lease_id.as_deref().unwrap_or_default();
            let lease = leases
                .iter()
                .find(|l| l.id == lease_id)
                .ok_or_else(|| WizardError::UnknownLease(lease_id.to_string()))?;
            wizard.apply(WizardAction::SelectLease(lease.clone()))?;
        }

        if target >= StepKind::Confirmation {
            let end_date = saved.end_date.ok_or(WizardError::MissingEndDate)?;
            wizard.apply(WizardAction::ChooseDate {
                end_date,
                notes: saved.notes.clone(),
            })?;
        }

        if target == StepKind::Payment {
            wizard.apply(WizardAction::ProceedToPayment)?;
            if let Some(method) = saved.payment_method {
                wizard.apply(WizardAction::SelectPaymentMethod(method))?;
            }
        }

        Ok(wizard)
    }
}
