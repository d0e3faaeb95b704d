//! Evento de advertencia.
//!
//! Cada advertencia que produce el motor se añade a un `WarningSink` en el
//! momento en que ocurre. El flujo de eventos es diagnóstico: no forma parte
//! del contrato de la tabla de salida.
use chem_domain::ValidationWarning;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningEvent {
    pub seq: u64, // orden de emisión dentro del lote
    pub run_id: Uuid,
    pub warning: ValidationWarning,
    pub ts: DateTime<Utc>, // metadato (no entra en la huella)
}
