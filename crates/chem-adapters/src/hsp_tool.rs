//! Herramienta externa de parámetros de Hansen (HSP).
//!
//! Los argumentos se configuran como plantilla; `{smiles}` se sustituye por
//! el SMILES de la fila. La salida es tabular: cabecera y una fila de
//! valores separadas por tabuladores.

use async_trait::async_trait;
use chem_core::{LookupError, PropertyComputationPort, PropertyTable};

use crate::process::ProcessSpec;

pub const SMILES_PLACEHOLDER: &str = "{smiles}";

pub struct HspToolAdapter {
    process: ProcessSpec,
    arg_template: Vec<String>,
}

impl HspToolAdapter {
    /// Si la plantilla no contiene `{smiles}`, el SMILES se añade al final.
    pub fn new(process: ProcessSpec, arg_template: Vec<String>) -> Self {
        let mut arg_template = arg_template;
        if !arg_template.iter().any(|a| a.contains(SMILES_PLACEHOLDER)) {
            arg_template.push(SMILES_PLACEHOLDER.to_string());
        }
        Self { process, arg_template }
    }

    pub fn args_for(&self, smiles: &str) -> Vec<String> {
        self.arg_template.iter().map(|a| a.replace(SMILES_PLACEHOLDER, smiles)).collect()
    }
}

#[async_trait]
impl PropertyComputationPort for HspToolAdapter {
    fn name(&self) -> &str {
        "hsp_tool"
    }

    async fn compute(&self, smiles: &str) -> Result<PropertyTable, LookupError> {
        let stdout = self.process.run(self.args_for(smiles)).await?;
        PropertyTable::parse_tabular(&stdout)
    }
}
