//! Orquestación de una ejecución: resolución del lote y, si hay
//! herramienta configurada, cálculo de propiedades.

use chem_core::{PropertyStage, PropertyTable, ResolutionEngine, WarningSink};
use chem_domain::BatchResult;
use log::info;

use crate::table::InputTable;

#[derive(Debug)]
pub struct RunOutput {
    pub batch: BatchResult,
    /// Alineado con `batch.rows()`; vacío si no se calcularon propiedades.
    pub properties: Vec<Option<PropertyTable>>,
}

pub async fn run_table<W: WarningSink>(engine: &mut ResolutionEngine<W>,
                                       properties: Option<&PropertyStage>,
                                       table: &InputTable)
                                       -> RunOutput {
    let batch = engine.resolve_batch(table.names()).await;
    let properties = match properties {
        Some(stage) if batch.cancelled_at().is_none() => stage.compute_for(&batch).await,
        Some(_) => {
            info!("[pipeline] lote cancelado: no se calculan propiedades");
            Vec::new()
        }
        None => Vec::new(),
    };
    let resolved = batch.rows().iter().filter(|r| r.identity.has_smiles()).count();
    info!("[pipeline] {} de {} filas con SMILES, {} advertencias", resolved, batch.len(), batch.warnings().len());
    RunOutput { batch, properties }
}
