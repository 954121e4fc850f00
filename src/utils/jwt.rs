//! Utilidades JWT
//!
//! Firma y verificación de los claims de usuario. No hay flujo de login ni
//! refresh aquí: sólo el formato del token.

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::environment::{EnvironmentConfig, MAX_JWT_EXPIRATION};
use crate::models::auth::UserClaims;
use crate::models::user::Role;
use crate::utils::errors::{ModelError, ModelResult};

pub const DEFAULT_ISSUER: &str = "auth-service";
pub const DEFAULT_SECRET: &str = "your-super-secret-jwt-key-change-in-production";

/// Configuración de JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub expiration: Duration,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            issuer: DEFAULT_ISSUER.to_string(),
            expiration: Duration::hours(24),
        }
    }
}

impl From<&EnvironmentConfig> for JwtConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        // from_lookup ya limita el rango; aquí se acota igualmente
        let seconds = i64::try_from(config.jwt_expiration.min(MAX_JWT_EXPIRATION))
            .unwrap_or_default();

        Self {
            secret: config.jwt_secret.clone(),
            issuer: config.jwt_issuer.clone(),
            expiration: Duration::try_seconds(seconds).unwrap_or_else(|| Duration::hours(24)),
        }
    }
}

/// Firmar los claims (HS256)
pub fn encode_token(claims: &UserClaims, config: &JwtConfig) -> ModelResult<String> {
    let encoding_key = EncodingKey::from_secret(config.secret.as_ref());

    encode(&Header::new(Algorithm::HS256), claims, &encoding_key)
        .map_err(|e| ModelError::Token(format!("Error generando token: {}", e)))
}

/// Verificar y decodificar un token
///
/// Comprueba firma, expiración, emisor y que la audiencia sea un rol conocido.
pub fn decode_token(token: &str, config: &JwtConfig) -> ModelResult<UserClaims> {
    let decoding_key = DecodingKey::from_secret(config.secret.as_ref());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.as_str()]);
    validation.set_audience(&Role::ALL.map(|role| role.as_str()));
    validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

    let token_data = decode::<UserClaims>(token, &decoding_key, &validation)
        .map_err(|e| ModelError::Token(format!("Token inválido: {}", e)))?;

    Ok(token_data.claims)
}
