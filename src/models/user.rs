//! Modelo de User
//!
//! Este módulo contiene el struct User, sus tipos de valor (Email, Role) y su
//! mapeo al documento de la colección `users`. La contraseña sólo se guarda
//! como hash bcrypt y nunca se serializa a JSON.

use std::fmt;
use std::str::FromStr;

use bcrypt::{hash, verify, DEFAULT_COST};
use bson::oid::ObjectId;
use bson::Document;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::environment::EnvironmentConfig;
use crate::models::auth::UserClaims;
use crate::models::{
    check_persisted, from_bson_datetime, stamp_timestamps, to_bson_datetime, Model,
};
use crate::utils::errors::{ModelError, ModelResult};
use crate::utils::jwt::JwtConfig;
use crate::utils::object_id::option_hex;
use crate::utils::validation::{validate_email, validate_enum, validate_not_empty};

/// Dirección de email
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn validate(&self) -> ModelResult<()> {
        validate_email(&self.0)
    }
}

impl From<&str> for Email {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Email {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn parse(value: &str) -> ModelResult<Self> {
        let allowed = Self::ALL.map(|role| (role.as_str(), role));
        validate_enum(value, &allowed, ModelError::RoleEmpty, ModelError::InvalidRole)
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Role {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User principal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, with = "option_hex", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub email: Email,
    /// Hash bcrypt, fuera del JSON
    #[serde(skip)]
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asigna el email si es válido; si no, el valor anterior se conserva
    pub fn set_email(&mut self, email: &str) -> ModelResult<&mut Self> {
        let email = Email::from(email);
        email.validate()?;
        self.email = email;
        Ok(self)
    }

    /// Guarda el hash de la contraseña con el coste por defecto de bcrypt
    pub fn set_password(&mut self, password: &str) -> ModelResult<&mut Self> {
        self.set_password_with_cost(password, DEFAULT_COST)
    }

    /// Igual que `set_password`, con el coste configurado en el entorno
    pub fn set_password_with_config(
        &mut self,
        password: &str,
        config: &EnvironmentConfig,
    ) -> ModelResult<&mut Self> {
        self.set_password_with_cost(password, config.bcrypt_cost)
    }

    pub fn set_password_with_cost(&mut self, password: &str, cost: u32) -> ModelResult<&mut Self> {
        validate_not_empty(password, ModelError::PasswordEmpty)?;
        self.password = hash(password, cost)?;
        Ok(self)
    }

    /// Compara una contraseña en claro con el hash guardado
    pub fn verify_password(&self, candidate: &str) -> ModelResult<bool> {
        validate_not_empty(&self.password, ModelError::PasswordEmpty)?;
        Ok(verify(candidate, &self.password)?)
    }

    pub fn set_role(&mut self, role: Role) -> &mut Self {
        self.role = Some(role);
        self
    }

    /// Claims estándar del token de este usuario
    pub fn claims(&self, config: &JwtConfig) -> ModelResult<UserClaims> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(config.expiration).ok_or_else(|| {
            ModelError::Token(format!("token expiration out of range: {}", config.expiration))
        })?;

        Ok(UserClaims {
            jti: self.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            sub: self.email.to_string(),
            aud: self.role.map(|role| role.as_str().to_string()).unwrap_or_default(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: config.issuer.clone(),
            nbf: now.timestamp(),
        })
    }

    /// Convertir a documento BSON (incluye el hash de la contraseña)
    pub fn to_document(&self) -> ModelResult<Document> {
        Ok(bson::to_document(&UserDocument::from(self))?)
    }

    /// Construir desde un documento BSON
    pub fn from_document(document: Document) -> ModelResult<Self> {
        let doc: UserDocument = bson::from_document(document)?;
        Ok(doc.into())
    }
}

impl Model for User {
    const KIND: &'static str = "user";

    fn validate(&self) -> ModelResult<()> {
        self.email.validate()?;
        validate_not_empty(&self.password, ModelError::PasswordEmpty)?;
        if self.role.is_none() {
            return Err(ModelError::RoleEmpty);
        }
        Ok(())
    }

    fn build(&mut self) -> ModelResult<()> {
        stamp_timestamps(&mut self.created_at, &mut self.updated_at);
        tracing::debug!(kind = Self::KIND, id = ?self.id, "👤 Preparando usuario para guardar");
        self.validate()
    }

    fn check(&self) -> ModelResult<()> {
        check_persisted(self.id.as_ref(), self.created_at.as_ref(), self.updated_at.as_ref())
            .and_then(|_| self.validate())
            .map_err(|e| {
                tracing::warn!(kind = Self::KIND, id = ?self.id, error = %e, "⚠️ Usuario inválido leído de la base de datos");
                e
            })
    }
}

/// Documento de la colección `users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub email: Email,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub created_at: Option<bson::DateTime>,
    #[serde(default)]
    pub updated_at: Option<bson::DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<bson::DateTime>,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            password: user.password.clone(),
            role: user.role,
            created_at: to_bson_datetime(user.created_at),
            updated_at: to_bson_datetime(user.updated_at),
            deleted_at: to_bson_datetime(user.deleted_at),
        }
    }
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id,
            email: doc.email,
            password: doc.password,
            role: doc.role,
            created_at: from_bson_datetime(doc.created_at),
            updated_at: from_bson_datetime(doc.updated_at),
            deleted_at: from_bson_datetime(doc.deleted_at),
        }
    }
}
