//! Consulta por nombre mediante script externo.
//!
//! El script recibe el nombre como único argumento e imprime
//! `CAS\tIUPAC\tSMILES`; si no encuentra nada imprime el centinela
//! `Not found` en los tres campos.

use async_trait::async_trait;
use chem_core::{LookupError, NameLookupHit, NameLookupPort};
use chem_domain::Identifier;

use crate::process::{last_line, ProcessSpec};

pub struct ScriptNameLookup {
    process: ProcessSpec,
}

impl ScriptNameLookup {
    pub fn new(process: ProcessSpec) -> Self {
        Self { process }
    }
}

/// Interpreta la salida del script de consulta por nombre.
pub fn parse_name_output(stdout: &str) -> Result<NameLookupHit, LookupError> {
    let line = last_line(stdout).ok_or_else(|| LookupError::Malformed("salida vacía".into()))?;
    let fields: Vec<&str> = line.split('\t').collect();
    let hit = NameLookupHit::from_fields(&fields)?;
    let all_missing = [&hit.cas, &hit.iupac, &hit.smiles].iter()
                                                          .all(|f| Identifier::parse(f).is_not_found());
    if all_missing {
        return Err(LookupError::NotFound);
    }
    Ok(hit)
}

#[async_trait]
impl NameLookupPort for ScriptNameLookup {
    fn name(&self) -> &str {
        "name_lookup_script"
    }

    async fn lookup_name(&self, compound_name: &str) -> Result<NameLookupHit, LookupError> {
        let stdout = self.process.run([compound_name]).await?;
        parse_name_output(&stdout)
    }
}
