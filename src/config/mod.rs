//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno que usan los modelos
//! (JWT, coste de bcrypt, nivel de log).

pub mod environment;

pub use environment::*;
