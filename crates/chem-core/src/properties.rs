//! Etapa de propiedades físicas, posterior a la resolución.
//!
//! El core sólo decide para qué filas pedir el cálculo (las que tienen
//! SMILES) y memoriza el resultado por SMILES dentro de la ejecución. Los
//! fallos se registran y dejan la fila sin propiedades.

use chem_domain::BatchResult;
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::cancel::CancelFlag;
use crate::errors::LookupError;
use crate::ports::{PropertyComputationPort, PropertyTable};

pub struct PropertyStage {
    port: Arc<dyn PropertyComputationPort>,
    timeout: Duration,
    cancel: CancelFlag,
}

impl PropertyStage {
    pub fn new(port: Arc<dyn PropertyComputationPort>, timeout: Duration) -> Self {
        Self { port, timeout, cancel: CancelFlag::new() }
    }

    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    async fn compute_one(&self, smiles: &str) -> Result<PropertyTable, LookupError> {
        if self.cancel.is_cancelled() {
            return Err(LookupError::Cancelled);
        }
        match tokio::time::timeout(self.timeout, self.port.compute(smiles)).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::Timeout(self.timeout)),
        }
    }

    /// Propiedades por fila, alineadas con `batch.rows()`. `None` si la fila
    /// no tiene SMILES o el cálculo falló.
    pub async fn compute_for(&self, batch: &BatchResult) -> Vec<Option<PropertyTable>> {
        let mut memo: HashMap<String, Option<PropertyTable>> = HashMap::new();
        let mut out = Vec::with_capacity(batch.len());
        for (index, row) in batch.rows().iter().enumerate() {
            let Some(smiles) = row.identity.smiles.as_deref() else {
                out.push(None);
                continue;
            };
            if let Some(known) = memo.get(smiles) {
                debug!("[properties] fila {}: {} reutilizado", index + 1, smiles);
                out.push(known.clone());
                continue;
            }
            let computed = match self.compute_one(smiles).await {
                Ok(table) => Some(table),
                Err(LookupError::Cancelled) => {
                    out.push(None);
                    continue;
                }
                Err(e) => {
                    warn!("[properties] fila {} ('{}'): {} falló para {}: {}",
                          index + 1,
                          row.query.original_name(),
                          self.port.name(),
                          smiles,
                          e);
                    None
                }
            };
            memo.insert(smiles.to_string(), computed.clone());
            out.push(computed);
        }
        out
    }
}
