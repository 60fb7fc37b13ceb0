//! Logon parameters for opening a backend connection.

use crate::config::MatreqConfig;
use crate::error::{MatreqError, MatreqResult};
use std::fmt;

/// User credentials of the logged-on operator
#[derive(Clone, PartialEq, Eq)]
pub struct SapCredentials {
    pub user: String,
    pub password: String,
    /// Backend client (mandant) number
    pub client: String,
}

impl SapCredentials {
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        client: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            client: client.into(),
        }
    }
}

impl fmt::Debug for SapCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SapCredentials")
            .field("user", &self.user)
            .field("password", &"[MASKED]")
            .field("client", &self.client)
            .finish()
    }
}

/// Everything a connector needs to log on to one system
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub system_id: String,
    pub host: String,
    pub system_number: String,
    pub client: String,
    pub user: String,
    pub password: String,
    pub language: String,
}

impl ConnectionParams {
    /// Resolve the system from the registry and combine it with the user's
    /// credentials
    pub fn resolve(
        config: &MatreqConfig,
        system_id: &str,
        credentials: &SapCredentials,
    ) -> MatreqResult<Self> {
        let system = config
            .sap_system(system_id)
            .ok_or_else(|| MatreqError::UnknownSystem(system_id.to_string()))?;

        Ok(Self {
            system_id: system.id.clone(),
            host: system.host.clone(),
            system_number: system.system_number.clone(),
            client: credentials.client.clone(),
            user: credentials.user.clone(),
            password: credentials.password.clone(),
            language: config.connection.language.clone(),
        })
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("system_id", &self.system_id)
            .field("host", &self.host)
            .field("system_number", &self.system_number)
            .field("client", &self.client)
            .field("user", &self.user)
            .field("password", &"[MASKED]")
            .field("language", &self.language)
            .finish()
    }
}
