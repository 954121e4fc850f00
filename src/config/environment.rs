//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Todas las variables son
//! opcionales y tienen un valor por defecto; un valor mal formado es un error.

use std::env;
use std::str::FromStr;

use bcrypt::DEFAULT_COST;
use tracing::Level;

use crate::utils::errors::{ModelError, ModelResult};
use crate::utils::jwt::{DEFAULT_ISSUER, DEFAULT_SECRET};

/// Validez máxima del token (10 años)
pub const MAX_JWT_EXPIRATION: u64 = 10 * 365 * 24 * 60 * 60;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub log_level: Level,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    /// Segundos de validez del token
    pub jwt_expiration: u64,
    pub bcrypt_cost: u32,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: Level::INFO,
            jwt_secret: DEFAULT_SECRET.to_string(),
            jwt_issuer: DEFAULT_ISSUER.to_string(),
            jwt_expiration: 24 * 60 * 60,
            bcrypt_cost: DEFAULT_COST,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar desde `.env` (si existe) y variables de entorno
    pub fn from_env() -> ModelResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Cargar usando una función de búsqueda arbitraria
    pub fn from_lookup<F>(lookup: F) -> ModelResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let jwt_expiration: u64 = parse_var(&lookup, "JWT_EXPIRATION", defaults.jwt_expiration)?;
        if jwt_expiration > MAX_JWT_EXPIRATION {
            return Err(ModelError::Config(format!(
                "JWT_EXPIRATION must be at most {} seconds, got {}",
                MAX_JWT_EXPIRATION, jwt_expiration
            )));
        }

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            log_level: parse_var(&lookup, "LOG_LEVEL", defaults.log_level)?,
            jwt_secret: lookup("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_issuer: lookup("JWT_ISSUER").unwrap_or(defaults.jwt_issuer),
            jwt_expiration,
            bcrypt_cost: parse_var(&lookup, "BCRYPT_COST", defaults.bcrypt_cost)?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> ModelResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ModelError::Config(format!("{} must be a valid value, got '{}'", key, raw))),
        None => Ok(default),
    }
}
