//! Modelos de la aplicación de seguimiento de vehículos
//!
//! User, Vehicle y TrackingData con su validación de campos y los hooks de
//! ciclo de vida que se ejecutan antes de guardar (`build`) y después de
//! leer (`check`) un registro.

pub mod config;
pub mod models;
pub mod utils;

pub use models::auth::{AuthUser, AuthUserData, UserClaims};
pub use models::tracking::{FuelCondition, TrackingData, TrackingDataDocument, TrackingDataRequest};
pub use models::user::{Email, Role, User, UserDocument};
pub use models::vehicle::{Vehicle, VehicleDocument, VehicleStatus};
pub use models::Model;
pub use utils::errors::{ModelError, ModelResult};
