use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user::User;

/// Claims estándar del JWT de un usuario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    pub jti: String, // user_id
    pub sub: String, // email
    pub aud: String, // role
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub nbf: i64,
}

/// Usuario autenticado tal como lo devuelve el servicio de autenticación
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub data: AuthUserData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUserData {
    pub id: String,
    pub email: String,
    pub role: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            data: AuthUserData {
                id: user.id.map(|oid| oid.to_hex()).unwrap_or_default(),
                email: user.email.to_string(),
                role: user.role.map(|role| role.as_str().to_string()).unwrap_or_default(),
                created_at: user.created_at,
                updated_at: user.updated_at,
            },
        }
    }
}
