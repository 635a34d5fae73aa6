// src/i18n.rs

/// UI language. Only alert and notice strings are translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "fr" => Some(Language::Fr),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }
}

/// User-facing alert and notice strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    EndDateNotAfterCurrent,
    NoExtensionMonths,
    AmountTooLarge,
    ChoosePaymentMethod,
    ChooseEndDate,
    InvalidStep,
    SubmissionFailed,
    FormExpired,
    ExtensionSubmitted,
    LoginFailed,
    LeaseNotFound,
    PreferencesSaved,
}

impl Message {
    pub fn text(self, lang: Language) -> &'static str {
        match (self, lang) {
            (Message::EndDateNotAfterCurrent, Language::En) => {
                "The new end date must be after your current due date."
            }
            (Message::EndDateNotAfterCurrent, Language::Fr) => {
                "La nouvelle date de fin doit être postérieure à votre échéance actuelle."
            }
            (Message::NoExtensionMonths, Language::En) => {
                "Please choose a date at least one month after your current due date."
            }
            (Message::NoExtensionMonths, Language::Fr) => {
                "Veuillez choisir une date au moins un mois après votre échéance actuelle."
            }
            (Message::AmountTooLarge, Language::En) => "The requested extension is too long.",
            (Message::AmountTooLarge, Language::Fr) => "La prolongation demandée est trop longue.",
            (Message::ChoosePaymentMethod, Language::En) => "Please choose a payment method.",
            (Message::ChoosePaymentMethod, Language::Fr) => {
                "Veuillez choisir un moyen de paiement."
            }
            (Message::ChooseEndDate, Language::En) => "Please choose a new end date.",
            (Message::ChooseEndDate, Language::Fr) => {
                "Veuillez choisir une nouvelle date de fin."
            }
            (Message::InvalidStep, Language::En) => "That action is not available on this step.",
            (Message::InvalidStep, Language::Fr) => {
                "Cette action n'est pas disponible à cette étape."
            }
            (Message::SubmissionFailed, Language::En) => {
                "We could not send your extension request. Please try again."
            }
            (Message::SubmissionFailed, Language::Fr) => {
                "Impossible d'envoyer votre demande de prolongation. Veuillez réessayer."
            }
            (Message::FormExpired, Language::En) => {
                "This form has expired. Please review your request and send it again."
            }
            (Message::FormExpired, Language::Fr) => {
                "Ce formulaire a expiré. Vérifiez votre demande et renvoyez-la."
            }
            (Message::ExtensionSubmitted, Language::En) => {
                "Your extension request was sent to your landlord."
            }
            (Message::ExtensionSubmitted, Language::Fr) => {
                "Votre demande de prolongation a été envoyée à votre propriétaire."
            }
            (Message::LoginFailed, Language::En) => "Invalid email or password.",
            (Message::LoginFailed, Language::Fr) => "Email ou mot de passe invalide.",
            (Message::LeaseNotFound, Language::En) => "This lease is no longer active.",
            (Message::LeaseNotFound, Language::Fr) => "Ce bail n'est plus actif.",
            (Message::PreferencesSaved, Language::En) => "Preferences saved.",
            (Message::PreferencesSaved, Language::Fr) => "Préférences enregistrées.",
        }
    }

    /// Looks up a notice passed through a redirect query string.
    pub fn from_notice(notice: &str) -> Option<Self> {
        match notice {
            "extension_submitted" => Some(Message::ExtensionSubmitted),
            "preferences_saved" => Some(Message::PreferencesSaved),
            _ => None,
        }
    }
}
