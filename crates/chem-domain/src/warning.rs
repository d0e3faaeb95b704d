// warning.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tipos de advertencia que puede producir una resolución.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningKind {
    TypoCorrected,
    SmilesMismatch,
    AlkeneMissingDoubleBond,
    AlkaneUnexpectedDoubleBond,
    NitrileMissingTripleBond,
    DuplicateCasInconsistent,
}

impl WarningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypoCorrected => "typo_corrected",
            Self::SmilesMismatch => "smiles_mismatch",
            Self::AlkeneMissingDoubleBond => "alkene_missing_double_bond",
            Self::AlkaneUnexpectedDoubleBond => "alkane_unexpected_double_bond",
            Self::NitrileMissingTripleBond => "nitrile_missing_triple_bond",
            Self::DuplicateCasInconsistent => "duplicate_cas_inconsistent",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advertencia no fatal asociada a una fila del lote.
///
/// Se acumulan; nunca se lanzan ni detienen el procesamiento.
/// `compound_index` es el índice (base 0) de la fila de entrada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub compound_index: usize,
    pub kind: WarningKind,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(compound_index: usize, kind: WarningKind, message: impl Into<String>) -> Self {
        ValidationWarning { compound_index, kind, message: message.into() }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[fila {}] {}: {}", self.compound_index + 1, self.kind, self.message)
    }
}
