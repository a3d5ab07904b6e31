use serde::Deserialize;
use std::num::NonZeroU64;

use crate::util::Sensitive;

#[derive(Debug, Deserialize)]
pub struct Database {
    /// Connection URL connecting to the MongoDB deployment.
    ///
    /// It can be left out if the server runs with an in-memory
    /// document store.
    ///
    /// **Environment variables**:
    /// - `CHIRPER_DATABASE_URL`, `DATABASE_URL` or `MONGODB_URI`
    pub url: Option<Sensitive<String>>,

    /// Name of the database where Chirper stores its collections.
    ///
    /// **Environment variables**:
    /// - `CHIRPER_DATABASE_NAME`
    #[serde(default = "Database::default_name")]
    pub name: String,

    /// How long this server can wait until its time limit where the
    /// database takes a while to acknowledge or to select a server.
    ///
    /// **Environment variables**:
    /// - `CHIRPER_DATABASE_TIMEOUT_SECS`
    #[serde(default = "Database::default_timeout_secs")]
    pub timeout_secs: NonZeroU64,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            url: None,
            name: Self::default_name(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl Database {
    const DEFAULT_TIMEOUT_SECS: u64 = 5;

    fn default_name() -> String {
        "chirper".into()
    }

    const fn default_timeout_secs() -> NonZeroU64 {
        match NonZeroU64::new(Self::DEFAULT_TIMEOUT_SECS) {
            Some(n) => n,
            None => panic!("DEFAULT_TIMEOUT_SECS is accidentally set to 0"),
        }
    }
}
