//! Consulta por CAS mediante script externo.
//!
//! Argumentos: `<cas> <nombre>`. Salida: una línea con el SMILES o el
//! centinela `Not found`.

use async_trait::async_trait;
use chem_core::{CasLookupPort, LookupError};
use chem_domain::Identifier;

use crate::process::{last_line, ProcessSpec};

pub struct ScriptCasLookup {
    process: ProcessSpec,
}

impl ScriptCasLookup {
    pub fn new(process: ProcessSpec) -> Self {
        Self { process }
    }
}

pub fn parse_cas_output(stdout: &str) -> Result<String, LookupError> {
    match last_line(stdout).map(Identifier::parse) {
        Some(Identifier::Found(smiles)) => Ok(smiles),
        _ => Err(LookupError::NotFound),
    }
}

#[async_trait]
impl CasLookupPort for ScriptCasLookup {
    fn name(&self) -> &str {
        "cas_lookup_script"
    }

    async fn lookup_cas(&self, cas: &str, compound_name: &str) -> Result<String, LookupError> {
        let stdout = self.process.run([cas, compound_name]).await?;
        parse_cas_output(&stdout)
    }
}
