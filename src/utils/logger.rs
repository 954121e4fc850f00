//! Configuración de logging

use tracing::Level;

use crate::config::environment::EnvironmentConfig;

/// Instala el subscriber de `tracing` con un nivel máximo
///
/// Si ya hay un subscriber global instalado no hace nada.
pub fn init_logging(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

/// Instala el subscriber con el `LOG_LEVEL` del entorno
pub fn init_logging_from_config(config: &EnvironmentConfig) {
    init_logging(config.log_level);
    tracing::info!(environment = %config.environment, level = %config.log_level, "📝 Logging configurado");
}
