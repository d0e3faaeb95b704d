//! Errores de las consultas externas.
//!
//! Ninguna variante escapa del motor: todas se degradan al centinela
//! `NotFound` y se registran en el log.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum LookupError {
    #[error("sin resultados")] NotFound,
    #[error("respuesta mal formada: {0}")] Malformed(String),
    #[error("error de transporte: {0}")] Transport(String),
    #[error("tiempo de espera agotado tras {0:?}")] Timeout(Duration),
    #[error("lote cancelado")] Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(LookupError::Malformed("2 campos".into()).to_string(), "respuesta mal formada: 2 campos");
        assert_eq!(LookupError::Timeout(Duration::from_millis(10)).to_string(), "tiempo de espera agotado tras 10ms");
    }
}
