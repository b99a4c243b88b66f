//! Local account registry standing in for a credential service
//!
//! Passwords never reach storage; only their SHA-256 digests do.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::error::{AuthError, Result, StorageError};
use crate::persist::{KeyValueStore, MemoryStore};
use crate::types::{AuthGrant, Credentials, Registration};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Login and registration backend
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<AuthGrant>;

    async fn register(&self, registration: &Registration) -> Result<AuthGrant>;
}

/// Form checks shared by login and register
pub fn validate_login(credentials: &Credentials) -> Result<()> {
    if credentials.username.trim().is_empty() {
        return Err(AuthError::Validation("Username is required".to_string()).into());
    }
    if credentials.password.expose_secret().is_empty() {
        return Err(AuthError::Validation("Password is required".to_string()).into());
    }
    Ok(())
}

pub fn validate_registration(registration: &Registration) -> Result<()> {
    validate_login(&registration.credentials)?;
    let password = registration.credentials.password.expose_secret();
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ))
        .into());
    }
    if let Some(confirm) = &registration.confirm {
        if confirm.expose_secret() != password {
            return Err(AuthError::Validation("Passwords must match".to_string()).into());
        }
    }
    Ok(())
}

fn digest(password: &SecretString) -> String {
    Sha256::digest(password.expose_secret().as_bytes())
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

fn issue_token() -> String {
    format!(
        "fitpulse-{}-{}",
        chrono::Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4().simple()
    )
}

/// Storage key holding the account registry
pub const ACCOUNTS_KEY: &str = "accounts";

type Accounts = BTreeMap<String, String>;

/// Account registry kept in a [`KeyValueStore`] as username to hex SHA-256 digest
///
/// Every call waits `latency` first to behave like a remote round trip.
/// With a [`FileStore`](crate::persist::FileStore) the registry outlives the
/// process, so a later run can log back in.
pub struct StoredAuthenticator {
    storage: Arc<dyn KeyValueStore>,
    latency: Duration,
    // serializes read-modify-write of the registry
    lock: Mutex<()>,
}

impl StoredAuthenticator {
    pub fn new(storage: Arc<dyn KeyValueStore>, latency: Duration) -> Self {
        Self {
            storage,
            latency,
            lock: Mutex::new(()),
        }
    }

    /// Registry that lives only as long as this value
    pub fn in_memory(latency: Duration) -> Self {
        Self::new(Arc::new(MemoryStore::new()), latency)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| StorageError::Unavailable("account registry lock poisoned".to_string()).into())
    }

    fn load(&self) -> Result<Accounts> {
        match self.storage.get(ACCOUNTS_KEY)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes).map_err(StorageError::Encoding)?),
            None => Ok(Accounts::new()),
        }
    }

    fn save(&self, accounts: &Accounts) -> Result<()> {
        let bytes = serde_json::to_vec(accounts).map_err(StorageError::Encoding)?;
        self.storage.set(ACCOUNTS_KEY, &bytes)
    }
}

#[async_trait]
impl Authenticator for StoredAuthenticator {
    async fn login(&self, credentials: &Credentials) -> Result<AuthGrant> {
        validate_login(credentials)?;
        self.simulate_latency().await;

        let _guard = self.guard()?;
        let accounts = self.load()?;
        let stored = accounts
            .get(&credentials.username)
            .ok_or(AuthError::UnknownUser)?;
        if *stored != digest(&credentials.password) {
            tracing::debug!(username = %credentials.username, "Password mismatch");
            return Err(AuthError::WrongPassword.into());
        }

        tracing::info!(username = %credentials.username, "Logged in");
        Ok(AuthGrant {
            token: issue_token(),
            username: credentials.username.clone(),
        })
    }

    async fn register(&self, registration: &Registration) -> Result<AuthGrant> {
        validate_registration(registration)?;
        self.simulate_latency().await;

        let credentials = &registration.credentials;
        let _guard = self.guard()?;
        let mut accounts = self.load()?;
        if accounts.contains_key(&credentials.username) {
            return Err(AuthError::UsernameTaken.into());
        }
        accounts.insert(credentials.username.clone(), digest(&credentials.password));
        self.save(&accounts)?;

        tracing::info!(username = %credentials.username, "Registered account");
        Ok(AuthGrant {
            token: issue_token(),
            username: credentials.username.clone(),
        })
    }
}
