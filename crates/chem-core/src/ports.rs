//! Puertos hacia los colaboradores externos.
//!
//! El motor sólo conoce estos contratos; las implementaciones reales (scripts,
//! servicios de red, la herramienta de propiedades) viven fuera del core y se
//! inyectan al construir el motor. En tests se sustituyen por stubs.

use async_trait::async_trait;
use chem_domain::{Identifier, ResolvedIdentity};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::LookupError;

/// Respuesta bien formada de la consulta por nombre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameLookupHit {
    pub cas: String,
    pub iupac: String,
    pub smiles: String,
}

impl NameLookupHit {
    pub fn new(cas: impl Into<String>, iupac: impl Into<String>, smiles: impl Into<String>) -> Self {
        Self { cas: cas.into(), iupac: iupac.into(), smiles: smiles.into() }
    }

    /// Construye la respuesta a partir de campos ya separados.
    ///
    /// # Errores
    /// `LookupError::Malformed` si no hay exactamente tres campos.
    pub fn from_fields(fields: &[&str]) -> Result<Self, LookupError> {
        match fields {
            [cas, iupac, smiles] => Ok(Self::new(*cas, *iupac, *smiles)),
            other => Err(LookupError::Malformed(format!("se esperaban 3 campos, llegaron {}", other.len()))),
        }
    }

    /// Identidad por nombre. Cada campo se interpreta por separado: una
    /// fuente puede devolver IUPAC y SMILES aunque no encuentre el CAS.
    pub fn into_identity(self) -> ResolvedIdentity {
        ResolvedIdentity::name_based(Identifier::parse(&self.cas),
                                     Identifier::parse(&self.iupac),
                                     Identifier::parse(&self.smiles))
    }
}

/// Consulta primaria: nombre → (CAS, IUPAC, SMILES).
#[async_trait]
pub trait NameLookupPort: Send + Sync {
    fn name(&self) -> &str {
        "name_lookup"
    }

    async fn lookup_name(&self, compound_name: &str) -> Result<NameLookupHit, LookupError>;
}

/// Consulta secundaria: CAS → SMILES. El nombre de origen sólo sirve para
/// trazas y desambiguación.
#[async_trait]
pub trait CasLookupPort: Send + Sync {
    fn name(&self) -> &str {
        "cas_lookup"
    }

    async fn lookup_cas(&self, cas: &str, compound_name: &str) -> Result<String, LookupError>;
}

/// Salida tabular de la herramienta de propiedades para un SMILES: columnas
/// en el orden en que la herramienta las emite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyTable {
    values: IndexMap<String, String>,
}

impl PropertyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    /// Interpreta texto tabular separado por tabuladores: la primera línea no
    /// vacía es la cabecera y la segunda la fila de valores.
    pub fn parse_tabular(text: &str) -> Result<Self, LookupError> {
        let mut lines = text.lines().map(str::trim_end).filter(|l| !l.trim().is_empty());
        let header = lines.next().ok_or_else(|| LookupError::Malformed("salida vacía".into()))?;
        let row = lines.next().ok_or_else(|| LookupError::Malformed("falta la fila de valores".into()))?;
        let columns: Vec<&str> = header.split('\t').map(str::trim).collect();
        let values: Vec<&str> = row.split('\t').map(str::trim).collect();
        if columns.len() != values.len() {
            return Err(LookupError::Malformed(format!("{} columnas y {} valores", columns.len(), values.len())));
        }
        Ok(Self { values: columns.into_iter()
                                 .zip(values)
                                 .map(|(c, v)| (c.to_string(), v.to_string()))
                                 .collect() })
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Cálculo de propiedades físicas (parámetros de Hansen) a partir de un SMILES.
#[async_trait]
pub trait PropertyComputationPort: Send + Sync {
    fn name(&self) -> &str {
        "property_computation"
    }

    async fn compute(&self, smiles: &str) -> Result<PropertyTable, LookupError>;
}
