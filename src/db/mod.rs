pub mod connection;
pub mod preferences;

pub use connection::{init_db, Database};
pub use preferences::{get_preferences, set_preference, Preference, Preferences, Theme};
