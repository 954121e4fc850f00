//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle, su estado y su mapeo al documento
//! de la colección `vehicles`.

use std::fmt;
use std::str::FromStr;

use bson::oid::ObjectId;
use bson::Document;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    check_persisted, from_bson_datetime, stamp_timestamps, to_bson_datetime, Model,
};
use crate::utils::errors::{ModelError, ModelResult};
use crate::utils::object_id::option_hex;
use crate::utils::validation::{validate_enum, validate_not_empty};

/// Estado del vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum VehicleStatus {
    Active,
    Inactive,
    Repair,
    Sold,
    Rented,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 5] = [
        VehicleStatus::Active,
        VehicleStatus::Inactive,
        VehicleStatus::Repair,
        VehicleStatus::Sold,
        VehicleStatus::Rented,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "active",
            VehicleStatus::Inactive => "inactive",
            VehicleStatus::Repair => "repair",
            VehicleStatus::Sold => "sold",
            VehicleStatus::Rented => "rented",
        }
    }

    /// Valida un literal de estado: vacío y desconocido dan errores distintos
    pub fn parse(value: &str) -> ModelResult<Self> {
        let allowed = Self::ALL.map(|status| (status.as_str(), status));
        validate_enum(
            value,
            &allowed,
            ModelError::VehicleStatusEmpty,
            ModelError::InvalidVehicleStatus,
        )
    }
}

impl FromStr for VehicleStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VehicleStatus {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehicle principal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default, with = "option_hex", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub vehicle_name: String,
    #[serde(default)]
    pub vehicle_model: String,
    #[serde(default)]
    pub vehicle_status: Option<VehicleStatus>,
    // Un vehículo nuevo puede tener 0, no se valida
    #[serde(default)]
    pub mileage: f64,
    #[serde(default)]
    pub license_number: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Vehicle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_vehicle_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.vehicle_name = name.into();
        self
    }

    pub fn set_vehicle_model(&mut self, model: impl Into<String>) -> &mut Self {
        self.vehicle_model = model.into();
        self
    }

    pub fn set_vehicle_status(&mut self, status: VehicleStatus) -> &mut Self {
        self.vehicle_status = Some(status);
        self
    }

    pub fn set_mileage(&mut self, mileage: f64) -> &mut Self {
        self.mileage = mileage;
        self
    }

    pub fn set_license_number(&mut self, license: impl Into<String>) -> &mut Self {
        self.license_number = license.into();
        self
    }

    /// Convertir a documento BSON
    pub fn to_document(&self) -> ModelResult<Document> {
        Ok(bson::to_document(&VehicleDocument::from(self))?)
    }

    /// Construir desde un documento BSON
    pub fn from_document(document: Document) -> ModelResult<Self> {
        let doc: VehicleDocument = bson::from_document(document)?;
        Ok(doc.into())
    }
}

impl Model for Vehicle {
    const KIND: &'static str = "vehicle";

    fn validate(&self) -> ModelResult<()> {
        validate_not_empty(&self.vehicle_name, ModelError::VehicleNameEmpty)?;
        validate_not_empty(&self.vehicle_model, ModelError::VehicleModelEmpty)?;
        if self.vehicle_status.is_none() {
            return Err(ModelError::VehicleStatusEmpty);
        }
        validate_not_empty(&self.license_number, ModelError::LicenseNumberEmpty)?;
        Ok(())
    }

    fn build(&mut self) -> ModelResult<()> {
        stamp_timestamps(&mut self.created_at, &mut self.updated_at);
        tracing::debug!(kind = Self::KIND, id = ?self.id, "🔧 Preparando vehículo para guardar");
        self.validate()
    }

    fn check(&self) -> ModelResult<()> {
        check_persisted(self.id.as_ref(), self.created_at.as_ref(), self.updated_at.as_ref())
            .and_then(|_| self.validate())
            .map_err(|e| {
                tracing::warn!(kind = Self::KIND, id = ?self.id, error = %e, "⚠️ Vehículo inválido leído de la base de datos");
                e
            })
    }
}

/// Documento de la colección `vehicles`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub vehicle_name: String,
    #[serde(default)]
    pub vehicle_model: String,
    #[serde(default)]
    pub vehicle_status: Option<VehicleStatus>,
    #[serde(default)]
    pub mileage: f64,
    #[serde(default)]
    pub license_number: String,
    #[serde(default)]
    pub created_at: Option<bson::DateTime>,
    #[serde(default)]
    pub updated_at: Option<bson::DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<bson::DateTime>,
}

impl From<&Vehicle> for VehicleDocument {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id,
            vehicle_name: vehicle.vehicle_name.clone(),
            vehicle_model: vehicle.vehicle_model.clone(),
            vehicle_status: vehicle.vehicle_status,
            mileage: vehicle.mileage,
            license_number: vehicle.license_number.clone(),
            created_at: to_bson_datetime(vehicle.created_at),
            updated_at: to_bson_datetime(vehicle.updated_at),
            deleted_at: to_bson_datetime(vehicle.deleted_at),
        }
    }
}

impl From<VehicleDocument> for Vehicle {
    fn from(doc: VehicleDocument) -> Self {
        Self {
            id: doc.id,
            vehicle_name: doc.vehicle_name,
            vehicle_model: doc.vehicle_model,
            vehicle_status: doc.vehicle_status,
            mileage: doc.mileage,
            license_number: doc.license_number,
            created_at: from_bson_datetime(doc.created_at),
            updated_at: from_bson_datetime(doc.updated_at),
            deleted_at: from_bson_datetime(doc.deleted_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_vehicle() -> Vehicle {
        let mut vehicle = Vehicle::new();
        vehicle
            .set_vehicle_name("Hilux")
            .set_vehicle_model("2021")
            .set_vehicle_status(VehicleStatus::Active)
            .set_license_number("YGN-4B/1234");
        vehicle
    }

    #[test]
    fn test_validate_each_missing_field() {
        assert!(valid_vehicle().validate().is_ok());

        let mut v = valid_vehicle();
        v.vehicle_name.clear();
        assert_eq!(v.validate(), Err(ModelError::VehicleNameEmpty));

        let mut v = valid_vehicle();
        v.vehicle_model.clear();
        assert_eq!(v.validate(), Err(ModelError::VehicleModelEmpty));

        let mut v = valid_vehicle();
        v.vehicle_status = None;
        assert_eq!(v.validate(), Err(ModelError::VehicleStatusEmpty));

        let mut v = valid_vehicle();
        v.license_number.clear();
        assert_eq!(v.validate(), Err(ModelError::LicenseNumberEmpty));
    }

    #[test]
    fn test_validate_short_circuits_in_order() {
        assert_eq!(Vehicle::new().validate(), Err(ModelError::VehicleNameEmpty));

        let mut v = Vehicle::new();
        v.set_vehicle_name("Hilux");
        assert_eq!(v.validate(), Err(ModelError::VehicleModelEmpty));
    }

    #[test]
    fn test_zero_mileage_is_valid() {
        let mut v = valid_vehicle();
        v.set_mileage(0.0);
        assert!(v.validate().is_ok());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("rented".parse::<VehicleStatus>(), Ok(VehicleStatus::Rented));
        assert_eq!(VehicleStatus::parse(""), Err(ModelError::VehicleStatusEmpty));
        assert_eq!(VehicleStatus::parse("broken"), Err(ModelError::InvalidVehicleStatus));
        assert_eq!(VehicleStatus::Repair.to_string(), "repair");
    }

    #[test]
    fn test_status_json_rejects_unknown_literal() {
        let err = serde_json::from_str::<VehicleStatus>(r#""parked""#).unwrap_err();
        assert!(err.to_string().contains("invalid vehicle status"));

        let err = serde_json::from_str::<VehicleStatus>(r#""""#).unwrap_err();
        assert!(err.to_string().contains("vehicle status is required"));
    }

    #[test]
    fn test_document_field_names() {
        let mut v = valid_vehicle();
        v.id = Some(ObjectId::new());
        v.build().unwrap();

        let doc = v.to_document().unwrap();
        assert!(doc.get_object_id("_id").is_ok());
        assert_eq!(doc.get_str("vehicle_status").unwrap(), "active");
        assert!(doc.get_datetime("created_at").is_ok());
        assert!(!doc.contains_key("id"));
        assert!(!doc.contains_key("deleted_at"));
    }

    #[test]
    fn test_document_missing_fields_loads_then_fails_check() {
        let now = bson::DateTime::now();
        let doc = bson::doc! {
            "_id": ObjectId::new(),
            "vehicle_name": "Hilux",
            "vehicle_model": "2021",
            "vehicle_status": "sold",
            "created_at": now,
            "updated_at": now,
        };
        let v = Vehicle::from_document(doc).unwrap();
        assert_eq!(v.mileage, 0.0);
        assert_eq!(v.check(), Err(ModelError::LicenseNumberEmpty));
    }
}
