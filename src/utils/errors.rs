//! Sistema de manejo de errores
//!
//! Este módulo define los errores centinela de los modelos: uno por campo o
//! condición, sin envoltura. El llamador decide cómo exponerlos (por ejemplo
//! como respuesta 400 de la API).

use thiserror::Error;

/// Errores de los modelos
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    // Errores comunes de ciclo de vida
    #[error("id is missing")]
    IdMissing,

    #[error("created_at is missing")]
    CreatedAtMissing,

    #[error("updated_at is missing")]
    UpdatedAtMissing,

    // User
    #[error("email is required")]
    EmailEmpty,

    #[error("email is invalid")]
    InvalidEmail,

    #[error("password is required")]
    PasswordEmpty,

    #[error("role is required")]
    RoleEmpty,

    #[error("role is invalid")]
    InvalidRole,

    // Vehicle
    #[error("vehicle name is required")]
    VehicleNameEmpty,

    #[error("vehicle model is required")]
    VehicleModelEmpty,

    #[error("vehicle status is required")]
    VehicleStatusEmpty,

    #[error("license number is required")]
    LicenseNumberEmpty,

    #[error("invalid vehicle status")]
    InvalidVehicleStatus,

    // TrackingData
    #[error("invalid vehicle id")]
    InvalidVehicleId,

    #[error("vehicle id is empty")]
    VehicleIdEmpty,

    #[error("location is empty")]
    LocationEmpty,

    #[error("mileage is empty")]
    MileageEmpty,

    #[error("fuel condition is empty")]
    FuelConditionEmpty,

    #[error("invalid fuel condition")]
    InvalidFuelCondition,

    // Colaboradores externos
    #[error("Hash error: {0}")]
    PasswordHash(String),

    #[error("JWT error: {0}")]
    Token(String),

    #[error("Document error: {0}")]
    Document(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ModelError {
    /// Indica si el error es un centinela de validación (y no un fallo de un colaborador)
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            ModelError::PasswordHash(_)
                | ModelError::Token(_)
                | ModelError::Document(_)
                | ModelError::Config(_)
        )
    }
}

impl From<bcrypt::BcryptError> for ModelError {
    fn from(e: bcrypt::BcryptError) -> Self {
        ModelError::PasswordHash(e.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ModelError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        ModelError::Token(e.to_string())
    }
}

impl From<bson::ser::Error> for ModelError {
    fn from(e: bson::ser::Error) -> Self {
        ModelError::Document(e.to_string())
    }
}

impl From<bson::de::Error> for ModelError {
    fn from(e: bson::de::Error) -> Self {
        ModelError::Document(e.to_string())
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type ModelResult<T> = Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_messages() {
        assert_eq!(ModelError::IdMissing.to_string(), "id is missing");
        assert_eq!(ModelError::EmailEmpty.to_string(), "email is required");
        assert_eq!(ModelError::InvalidVehicleStatus.to_string(), "invalid vehicle status");
        assert_eq!(ModelError::MileageEmpty.to_string(), "mileage is empty");
    }

    #[test]
    fn test_is_validation() {
        assert!(ModelError::LocationEmpty.is_validation());
        assert!(ModelError::CreatedAtMissing.is_validation());
        assert!(!ModelError::Token("bad".to_string()).is_validation());
        assert!(!ModelError::Config("bad".to_string()).is_validation());
    }
}
