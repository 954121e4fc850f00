//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de campos
//! y conversión de tipos. Cada helper devuelve el error centinela que
//! recibe el modelo, nunca un error genérico.

use bson::oid::ObjectId;
use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::errors::{ModelError, ModelResult};

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str, error: ModelError) -> ModelResult<()> {
    if value.is_empty() {
        return Err(error);
    }
    Ok(())
}

/// Validar formato de email
pub fn validate_email(value: &str) -> ModelResult<()> {
    validate_not_empty(value, ModelError::EmailEmpty)?;
    if !EMAIL_REGEX.is_match(value) {
        return Err(ModelError::InvalidEmail);
    }
    Ok(())
}

/// Validar que un valor esté en una lista de literales permitidos
///
/// `allowed` asocia cada literal con su valor tipado. La comparación es
/// exacta (sensible a mayúsculas).
pub fn validate_enum<T: Copy>(
    value: &str,
    allowed: &[(&str, T)],
    empty: ModelError,
    invalid: ModelError,
) -> ModelResult<T> {
    if value.is_empty() {
        return Err(empty);
    }
    allowed
        .iter()
        .find(|(literal, _)| *literal == value)
        .map(|(_, parsed)| *parsed)
        .ok_or(invalid)
}

/// Validar y convertir string hexadecimal a ObjectId
pub fn validate_object_id(value: &str, invalid: ModelError) -> ModelResult<ObjectId> {
    ObjectId::parse_str(value).map_err(|_| invalid)
}

/// Un ObjectId ausente o todo a cero se considera no asignado
pub fn is_unset_object_id(id: Option<&ObjectId>) -> bool {
    match id {
        Some(oid) => oid.bytes().iter().all(|b| *b == 0),
        None => true,
    }
}

/// Validar que el kilometraje no sea cero
pub fn validate_mileage(value: f64) -> ModelResult<()> {
    if value == 0.0 {
        return Err(ModelError::MileageEmpty);
    }
    Ok(())
}
