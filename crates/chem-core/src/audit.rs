//! Auditoría de identidades duplicadas.
//!
//! Recorre el lote terminado una sola vez, agrupa las filas por CAS (se
//! ignora `NotFound`) y marca cada CAS cuyas filas no comparten un único
//! SMILES o un único nombre IUPAC. Es una pasada pura: nunca modifica filas,
//! sólo informa.

use chem_domain::{Identifier, ResolvedRow, ValidationWarning, WarningKind};
use indexmap::{IndexMap, IndexSet};

/// Fila que contribuye a un CAS inconsistente.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateMember {
    pub row_index: usize,
    pub original_name: String,
    pub smiles: Identifier,
    pub iupac: Identifier,
}

/// CAS asociado a más de un SMILES o IUPAC dentro del lote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateCasFinding {
    pub cas: String,
    pub distinct_smiles: usize,
    pub distinct_iupac: usize,
    pub members: Vec<DuplicateMember>,
}

impl DuplicateCasFinding {
    /// Advertencia asociada a la primera fila que aportó el CAS.
    pub fn to_warning(&self) -> ValidationWarning {
        let first = self.members.first().map(|m| m.row_index).unwrap_or_default();
        let detail: Vec<String> = self.members
                                      .iter()
                                      .map(|m| {
                                          format!("fila {} '{}' smiles={} iupac={}",
                                                  m.row_index + 1,
                                                  m.original_name,
                                                  m.smiles,
                                                  m.iupac)
                                      })
                                      .collect();
        ValidationWarning::new(first,
                               WarningKind::DuplicateCasInconsistent,
                               format!("CAS {} con {} SMILES y {} IUPAC distintos: {}",
                                       self.cas,
                                       self.distinct_smiles,
                                       self.distinct_iupac,
                                       detail.join("; ")))
    }
}

/// Busca CAS inconsistentes. El orden de los hallazgos sigue la primera
/// aparición de cada CAS en el lote.
pub fn find_inconsistent_cas(rows: &[ResolvedRow]) -> Vec<DuplicateCasFinding> {
    let mut groups: IndexMap<&str, Vec<(usize, &ResolvedRow)>> = IndexMap::new();
    for (index, row) in rows.iter().enumerate() {
        if let Some(cas) = row.identity.cas.as_deref() {
            groups.entry(cas).or_default().push((index, row));
        }
    }

    groups.into_iter()
          .filter(|(_, members)| members.len() > 1)
          .filter_map(|(cas, members)| {
              let smiles: IndexSet<&str> = members.iter().filter_map(|(_, r)| r.identity.smiles.as_deref()).collect();
              let iupac: IndexSet<&str> = members.iter().filter_map(|(_, r)| r.identity.iupac.as_deref()).collect();
              if smiles.len() <= 1 && iupac.len() <= 1 {
                  return None;
              }
              Some(DuplicateCasFinding { cas: cas.to_string(),
                                         distinct_smiles: smiles.len(),
                                         distinct_iupac: iupac.len(),
                                         members: members.iter()
                                                         .map(|(i, r)| DuplicateMember { row_index: *i,
                                                                                         original_name: r.query.original_name().to_string(),
                                                                                         smiles: r.identity.smiles.clone(),
                                                                                         iupac: r.identity.iupac.clone() })
                                                         .collect() })
          })
          .collect()
}

/// Atajo: hallazgos ya convertidos en advertencias.
pub fn audit_duplicates(rows: &[ResolvedRow]) -> Vec<ValidationWarning> {
    find_inconsistent_cas(rows).iter().map(DuplicateCasFinding::to_warning).collect()
}
