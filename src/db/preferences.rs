// src/db/preferences.rs
use crate::errors::ServerError;
use crate::i18n::Language;
use rusqlite::{params, Connection, OptionalExtension};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn code(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
    pub language: Language,
}

/// A single validated key/value pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    Theme(Theme),
    Language(Language),
}

impl Preference {
    /// Parses a form field; unknown keys and values are rejected.
    pub fn parse(key: &str, value: &str) -> Result<Self, ServerError> {
        let parsed = match key {
            "theme" => Theme::from_code(value).map(Preference::Theme),
            "language" => Language::from_code(value).map(Preference::Language),
            _ => return Err(ServerError::BadRequest(format!("unknown preference: {key}"))),
        };
        parsed.ok_or_else(|| ServerError::BadRequest(format!("invalid value for {key}")))
    }

    fn key(self) -> &'static str {
        match self {
            Preference::Theme(_) => "theme",
            Preference::Language(_) => "language",
        }
    }

    fn value(self) -> &'static str {
        match self {
            Preference::Theme(t) => t.code(),
            Preference::Language(l) => l.code(),
        }
    }
}

pub fn get_preferences(
    conn: &Connection,
    user_id: &str,
    default_language: Language,
) -> Result<Preferences, ServerError> {
    let lookup = |key: &str| -> Result<Option<String>, ServerError> {
        conn.query_row(
            "select value from preferences where user_id = ? and key = ?",
            params![user_id, key],
            |r| r.get(0),
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("load preference failed: {e}")))
    };

    // Stored values that no longer parse fall back to defaults.
    let theme = lookup("theme")?
        .as_deref()
        .and_then(Theme::from_code)
        .unwrap_or_default();
    let language = lookup("language")?
        .as_deref()
        .and_then(Language::from_code)
        .unwrap_or(default_language);

    Ok(Preferences { theme, language })
}

pub fn set_preference(
    conn: &Connection,
    user_id: &str,
    pref: Preference,
    now: i64,
) -> Result<(), ServerError> {
    conn.execute(
        r#"
        insert into preferences (user_id, key, value, updated_at)
        values (?, ?, ?, ?)
        on conflict(user_id, key) do update
          set value = excluded.value,
              updated_at = excluded.updated_at
        "#,
        params![user_id, pref.key(), pref.value(), now],
    )
    .map_err(|e| ServerError::DbError(format!("save preference failed: {e}")))?;
    Ok(())
}
