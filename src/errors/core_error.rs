use thiserror::Error;

/// Errores fatales de la aplicación: configuración y lectura/escritura de
/// tablas. Los fallos de consulta nunca llegan aquí.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error interno: {0}")]
    Internal(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error en tabla: {0}")]
    Table(String),
    #[error("Error de serialización: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<csv::Error> for CoreError {
    fn from(e: csv::Error) -> Self {
        CoreError::Table(e.to_string())
    }
}
