//! Modelo de TrackingData
//!
//! Este módulo contiene los datos de seguimiento de un vehículo (ubicación,
//! kilometraje, estado y combustible), la request de creación y el mapeo al
//! documento de la colección `tracking_data`.

use std::fmt;
use std::str::FromStr;

use bson::oid::ObjectId;
use bson::Document;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::vehicle::VehicleStatus;
use crate::models::{
    check_persisted, from_bson_datetime, stamp_timestamps, to_bson_datetime, Model,
};
use crate::utils::errors::{ModelError, ModelResult};
use crate::utils::object_id::option_hex;
use crate::utils::validation::{
    is_unset_object_id, validate_enum, validate_mileage, validate_not_empty, validate_object_id,
};

/// Nivel de combustible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum FuelCondition {
    Empty,
    Low,
    Half,
    Full,
}

impl FuelCondition {
    pub const ALL: [FuelCondition; 4] = [
        FuelCondition::Empty,
        FuelCondition::Low,
        FuelCondition::Half,
        FuelCondition::Full,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelCondition::Empty => "empty",
            FuelCondition::Low => "low",
            FuelCondition::Half => "half",
            FuelCondition::Full => "full",
        }
    }

    pub fn parse(value: &str) -> ModelResult<Self> {
        let allowed = Self::ALL.map(|condition| (condition.as_str(), condition));
        validate_enum(
            value,
            &allowed,
            ModelError::FuelConditionEmpty,
            ModelError::InvalidFuelCondition,
        )
    }
}

impl FromStr for FuelCondition {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FuelCondition {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for FuelCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Punto de seguimiento de un vehículo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingData {
    #[serde(default, with = "option_hex", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, with = "option_hex")]
    pub vehicle_id: Option<ObjectId>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub mileage: f64,
    #[serde(default)]
    pub status: Option<VehicleStatus>,
    #[serde(default)]
    pub fuel_condition: Option<FuelCondition>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TrackingData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asigna el vehículo a partir de su id hexadecimal
    pub fn set_vehicle_id(&mut self, hex: &str) -> ModelResult<&mut Self> {
        self.vehicle_id = Some(validate_object_id(hex, ModelError::InvalidVehicleId)?);
        Ok(self)
    }

    pub fn set_location(&mut self, location: impl Into<String>) -> &mut Self {
        self.location = location.into();
        self
    }

    pub fn set_mileage(&mut self, mileage: f64) -> &mut Self {
        self.mileage = mileage;
        self
    }

    pub fn set_status(&mut self, status: VehicleStatus) -> &mut Self {
        self.status = Some(status);
        self
    }

    pub fn set_fuel_condition(&mut self, fuel_condition: FuelCondition) -> &mut Self {
        self.fuel_condition = Some(fuel_condition);
        self
    }

    /// Convertir a documento BSON
    pub fn to_document(&self) -> ModelResult<Document> {
        Ok(bson::to_document(&TrackingDataDocument::from(self))?)
    }

    /// Construir desde un documento BSON
    pub fn from_document(document: Document) -> ModelResult<Self> {
        let doc: TrackingDataDocument = bson::from_document(document)?;
        Ok(doc.into())
    }
}

impl Model for TrackingData {
    const KIND: &'static str = "tracking_data";

    fn validate(&self) -> ModelResult<()> {
        if is_unset_object_id(self.vehicle_id.as_ref()) {
            return Err(ModelError::VehicleIdEmpty);
        }
        validate_not_empty(&self.location, ModelError::LocationEmpty)?;
        // El kilometraje sólo puede ser distinto de cero
        validate_mileage(self.mileage)?;
        if self.status.is_none() {
            return Err(ModelError::VehicleStatusEmpty);
        }
        if self.fuel_condition.is_none() {
            return Err(ModelError::FuelConditionEmpty);
        }
        Ok(())
    }

    fn build(&mut self) -> ModelResult<()> {
        stamp_timestamps(&mut self.created_at, &mut self.updated_at);
        tracing::debug!(kind = Self::KIND, vehicle_id = ?self.vehicle_id, "📍 Preparando tracking para guardar");
        self.validate()
    }

    fn check(&self) -> ModelResult<()> {
        check_persisted(self.id.as_ref(), self.created_at.as_ref(), self.updated_at.as_ref())
            .and_then(|_| self.validate())
            .map_err(|e| {
                tracing::warn!(kind = Self::KIND, id = ?self.id, error = %e, "⚠️ Tracking inválido leído de la base de datos");
                e
            })
    }
}

/// Request para crear un nuevo punto de seguimiento
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingDataRequest {
    #[serde(default)]
    pub vehicle_id: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub mileage: f64,
    #[serde(default)]
    pub status: Option<VehicleStatus>,
    #[serde(default)]
    pub fuel_condition: Option<FuelCondition>,
}

impl TrackingDataRequest {
    pub fn validate(&self) -> ModelResult<()> {
        validate_not_empty(&self.vehicle_id, ModelError::VehicleIdEmpty)?;
        validate_object_id(&self.vehicle_id, ModelError::InvalidVehicleId)?;
        validate_not_empty(&self.location, ModelError::LocationEmpty)?;
        validate_mileage(self.mileage)?;
        if self.status.is_none() {
            return Err(ModelError::VehicleStatusEmpty);
        }
        if self.fuel_condition.is_none() {
            return Err(ModelError::FuelConditionEmpty);
        }
        Ok(())
    }

    /// Convierte la request en un TrackingData sin persistir (sin id ni timestamps)
    pub fn to_tracking_data(&self) -> ModelResult<TrackingData> {
        let vehicle_id = validate_object_id(&self.vehicle_id, ModelError::InvalidVehicleId)?;
        Ok(TrackingData {
            vehicle_id: Some(vehicle_id),
            location: self.location.clone(),
            mileage: self.mileage,
            status: self.status,
            fuel_condition: self.fuel_condition,
            ..TrackingData::default()
        })
    }
}

/// Documento de la colección `tracking_data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingDataDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub vehicle_id: Option<ObjectId>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub mileage: f64,
    #[serde(default)]
    pub status: Option<VehicleStatus>,
    #[serde(default)]
    pub fuel_condition: Option<FuelCondition>,
    #[serde(default)]
    pub created_at: Option<bson::DateTime>,
    #[serde(default)]
    pub updated_at: Option<bson::DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<bson::DateTime>,
}

impl From<&TrackingData> for TrackingDataDocument {
    fn from(data: &TrackingData) -> Self {
        Self {
            id: data.id,
            vehicle_id: data.vehicle_id,
            location: data.location.clone(),
            mileage: data.mileage,
            status: data.status,
            fuel_condition: data.fuel_condition,
            created_at: to_bson_datetime(data.created_at),
            updated_at: to_bson_datetime(data.updated_at),
            deleted_at: to_bson_datetime(data.deleted_at),
        }
    }
}

impl From<TrackingDataDocument> for TrackingData {
    fn from(doc: TrackingDataDocument) -> Self {
        Self {
            id: doc.id,
            vehicle_id: doc.vehicle_id,
            location: doc.location,
            mileage: doc.mileage,
            status: doc.status,
            fuel_condition: doc.fuel_condition,
            created_at: from_bson_datetime(doc.created_at),
            updated_at: from_bson_datetime(doc.updated_at),
            deleted_at: from_bson_datetime(doc.deleted_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VEHICLE_HEX: &str = "64b7f0c2a1b2c3d4e5f60718";

    fn valid_tracking() -> TrackingData {
        let mut data = TrackingData::new();
        data.set_vehicle_id(VEHICLE_HEX)
            .unwrap()
            .set_location("16.8409,96.1735")
            .set_mileage(1520.5)
            .set_status(VehicleStatus::Rented)
            .set_fuel_condition(FuelCondition::Half);
        data
    }

    fn valid_request() -> TrackingDataRequest {
        TrackingDataRequest {
            vehicle_id: VEHICLE_HEX.to_string(),
            location: "Yangon".to_string(),
            mileage: 88.0,
            status: Some(VehicleStatus::Active),
            fuel_condition: Some(FuelCondition::Full),
        }
    }

    #[test]
    fn test_validate_each_missing_field() {
        assert!(valid_tracking().validate().is_ok());

        let mut t = valid_tracking();
        t.vehicle_id = None;
        assert_eq!(t.validate(), Err(ModelError::VehicleIdEmpty));

        let mut t = valid_tracking();
        t.vehicle_id = Some(ObjectId::from_bytes([0; 12]));
        assert_eq!(t.validate(), Err(ModelError::VehicleIdEmpty));

        let mut t = valid_tracking();
        t.location.clear();
        assert_eq!(t.validate(), Err(ModelError::LocationEmpty));

        let mut t = valid_tracking();
        t.mileage = 0.0;
        assert_eq!(t.validate(), Err(ModelError::MileageEmpty));

        let mut t = valid_tracking();
        t.status = None;
        assert_eq!(t.validate(), Err(ModelError::VehicleStatusEmpty));

        let mut t = valid_tracking();
        t.fuel_condition = None;
        assert_eq!(t.validate(), Err(ModelError::FuelConditionEmpty));
    }

    #[test]
    fn test_set_vehicle_id_rejects_bad_hex() {
        let mut t = TrackingData::new();
        assert_eq!(t.set_vehicle_id("not-an-id").err(), Some(ModelError::InvalidVehicleId));
        assert_eq!(t.set_vehicle_id("").err(), Some(ModelError::InvalidVehicleId));
        assert!(t.vehicle_id.is_none());
    }

    #[test]
    fn test_fuel_condition_parse() {
        assert_eq!("low".parse::<FuelCondition>(), Ok(FuelCondition::Low));
        assert_eq!(FuelCondition::parse(""), Err(ModelError::FuelConditionEmpty));
        assert_eq!(FuelCondition::parse("FULL"), Err(ModelError::InvalidFuelCondition));
    }

    #[test]
    fn test_request_validate() {
        assert!(valid_request().validate().is_ok());

        let mut r = valid_request();
        r.vehicle_id.clear();
        assert_eq!(r.validate(), Err(ModelError::VehicleIdEmpty));

        let mut r = valid_request();
        r.vehicle_id = "xyz".to_string();
        assert_eq!(r.validate(), Err(ModelError::InvalidVehicleId));

        let mut r = valid_request();
        r.location.clear();
        assert_eq!(r.validate(), Err(ModelError::LocationEmpty));

        let mut r = valid_request();
        r.mileage = 0.0;
        assert_eq!(r.validate(), Err(ModelError::MileageEmpty));

        let mut r = valid_request();
        r.status = None;
        assert_eq!(r.validate(), Err(ModelError::VehicleStatusEmpty));

        let mut r = valid_request();
        r.fuel_condition = None;
        assert_eq!(r.validate(), Err(ModelError::FuelConditionEmpty));
    }

    #[test]
    fn test_request_to_tracking_data() {
        let data = valid_request().to_tracking_data().unwrap();
        assert_eq!(data.vehicle_id.unwrap().to_hex(), VEHICLE_HEX);
        assert_eq!(data.location, "Yangon");
        assert_eq!(data.mileage, 88.0);
        assert_eq!(data.status, Some(VehicleStatus::Active));
        assert_eq!(data.fuel_condition, Some(FuelCondition::Full));
        assert!(data.id.is_none());
        assert!(data.created_at.is_none());
        assert!(data.validate().is_ok());

        let mut r = valid_request();
        r.vehicle_id = "bad".to_string();
        assert_eq!(r.to_tracking_data(), Err(ModelError::InvalidVehicleId));
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{
            "vehicle_id": "64b7f0c2a1b2c3d4e5f60718",
            "location": "Mandalay",
            "mileage": 12.25,
            "status": "repair",
            "fuel_condition": "low"
        }"#;
        let request: TrackingDataRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.status, Some(VehicleStatus::Repair));

        let bad = r#"{"vehicle_id": "64b7f0c2a1b2c3d4e5f60718", "fuel_condition": "overflowing"}"#;
        let err = serde_json::from_str::<TrackingDataRequest>(bad).unwrap_err();
        assert!(err.to_string().contains("invalid fuel condition"));
    }

    #[test]
    fn test_json_vehicle_id_is_hex() {
        let t = valid_tracking();
        let value = serde_json::to_value(&t).unwrap();
        assert_eq!(value["vehicle_id"], VEHICLE_HEX);
        assert_eq!(value["fuel_condition"], "half");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_document_missing_fields_loads_then_fails_check() {
        let now = bson::DateTime::now();
        let doc = bson::doc! {
            "_id": ObjectId::new(),
            "vehicle_id": ObjectId::parse_str(VEHICLE_HEX).unwrap(),
            "status": "active",
            "fuel_condition": "full",
            "created_at": now,
            "updated_at": now,
        };
        let t = TrackingData::from_document(doc).unwrap();
        assert!(t.location.is_empty());
        assert_eq!(t.mileage, 0.0);
        assert_eq!(t.check(), Err(ModelError::LocationEmpty));
    }
}
