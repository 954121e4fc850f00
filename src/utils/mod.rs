//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! JWT, serialización de ObjectId y logging.

pub mod errors;
pub mod jwt;
pub mod logger;
pub mod object_id;
pub mod validation;
