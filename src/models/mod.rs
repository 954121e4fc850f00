//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos de la aplicación de seguimiento
//! de vehículos y el contrato de ciclo de vida que comparten:
//! `validate` (campos), `build` (antes de guardar) y `check` (después de leer).

pub mod auth;
pub mod tracking;
pub mod user;
pub mod vehicle;

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

use crate::utils::errors::{ModelError, ModelResult};
use crate::utils::validation::is_unset_object_id;

/// Contrato de ciclo de vida de una entidad persistida
pub trait Model {
    /// Nombre de la entidad para logs
    const KIND: &'static str;

    /// Valida el modelo antes de guardarlo
    fn validate(&self) -> ModelResult<()>;

    /// Prepara el modelo antes de guardarlo: marca timestamps y valida
    fn build(&mut self) -> ModelResult<()>;

    /// Verifica un modelo que viene de la base de datos
    fn check(&self) -> ModelResult<()>;
}

/// Marca `created_at` sólo si no está asignado y refresca siempre `updated_at`
pub(crate) fn stamp_timestamps(
    created_at: &mut Option<DateTime<Utc>>,
    updated_at: &mut Option<DateTime<Utc>>,
) {
    let now = Utc::now();
    if created_at.is_none() {
        *created_at = Some(now);
    }
    *updated_at = Some(now);
}

/// Un registro leído de la base de datos debe tener identidad y timestamps
pub(crate) fn check_persisted(
    id: Option<&ObjectId>,
    created_at: Option<&DateTime<Utc>>,
    updated_at: Option<&DateTime<Utc>>,
) -> ModelResult<()> {
    if is_unset_object_id(id) {
        return Err(ModelError::IdMissing);
    }
    if created_at.is_none() {
        return Err(ModelError::CreatedAtMissing);
    }
    if updated_at.is_none() {
        return Err(ModelError::UpdatedAtMissing);
    }
    Ok(())
}

/// Conversión de timestamps al formato nativo del documento (precisión de milisegundos)
pub(crate) fn to_bson_datetime(value: Option<DateTime<Utc>>) -> Option<bson::DateTime> {
    value.map(bson::DateTime::from_chrono)
}

pub(crate) fn from_bson_datetime(value: Option<bson::DateTime>) -> Option<DateTime<Utc>> {
    value.map(bson::DateTime::to_chrono)
}
