// compound.rs
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Identifier;

/// Nombre de compuesto tal como llegó en la tabla y su forma corregida.
///
/// `corrected_name` coincide con `original_name` salvo que la etapa de
/// corrección haya reconocido una errata conocida. Inmutable una vez creado.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompoundQuery {
    original_name: String,
    corrected_name: String,
}

impl CompoundQuery {
    /// Consulta sin corrección.
    pub fn new(name: &str) -> Self {
        Self::corrected(name, name)
    }

    /// Consulta cuyo nombre fue reescrito por la etapa de corrección.
    pub fn corrected(original: &str, corrected: &str) -> Self {
        CompoundQuery { original_name: original.trim().to_string(),
                        corrected_name: corrected.trim().to_string() }
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn corrected_name(&self) -> &str {
        &self.corrected_name
    }

    pub fn was_corrected(&self) -> bool {
        self.original_name != self.corrected_name
    }

    /// Fila sin nombre utilizable: no se consulta ninguna fuente.
    pub fn is_blank(&self) -> bool {
        self.corrected_name.is_empty()
    }
}

impl fmt::Display for CompoundQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.was_corrected() {
            write!(f, "{} -> {}", self.original_name, self.corrected_name)
        } else {
            f.write_str(&self.original_name)
        }
    }
}

/// Estrategia que produjo el SMILES final de una identidad (auditoría).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentitySource {
    /// Consulta primaria por nombre.
    NameBased,
    /// SMILES tomado de la consulta por CAS para cubrir un hueco.
    CasBased,
    /// Recuperado con el CAS esperado de la tabla estática.
    CorrectedCas,
}

impl fmt::Display for IdentitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameBased => write!(f, "name-based"),
            Self::CasBased => write!(f, "cas-based"),
            Self::CorrectedCas => write!(f, "corrected-cas"),
        }
    }
}

/// Identificadores canónicos resueltos para un nombre corregido.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedIdentity {
    pub cas: Identifier,
    pub iupac: Identifier,
    pub smiles: Identifier,
    pub source: IdentitySource,
}

impl ResolvedIdentity {
    /// Identidad sin ningún campo resuelto (fallo total de consulta).
    pub fn not_found() -> Self {
        ResolvedIdentity { cas: Identifier::NotFound,
                           iupac: Identifier::NotFound,
                           smiles: Identifier::NotFound,
                           source: IdentitySource::NameBased }
    }

    /// Identidad tal como la devuelve la consulta por nombre.
    pub fn name_based(cas: Identifier, iupac: Identifier, smiles: Identifier) -> Self {
        ResolvedIdentity { cas, iupac, smiles, source: IdentitySource::NameBased }
    }

    pub fn is_fully_unresolved(&self) -> bool {
        self.cas.is_not_found() && self.iupac.is_not_found() && self.smiles.is_not_found()
    }

    /// Indica si procede pedir el cálculo de propiedades para esta fila.
    pub fn has_smiles(&self) -> bool {
        self.smiles.is_found()
    }
}

impl fmt::Display for ResolvedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<cas: {}, iupac: {}, smiles: {} ({})>", self.cas, self.iupac, self.smiles, self.source)
    }
}
