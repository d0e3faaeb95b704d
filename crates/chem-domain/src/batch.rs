// batch.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CompoundQuery, ResolvedIdentity, ValidationWarning, WarningKind};

/// Par (consulta, identidad) de una fila de entrada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRow {
    pub query: CompoundQuery,
    pub identity: ResolvedIdentity,
}

/// Resultado de un lote completo.
///
/// Invariantes:
/// - Una fila por cada fila de entrada, en el mismo orden (aunque todas las
///   consultas fallen).
/// - `warnings` conserva el orden de emisión; las del auditor de duplicados
///   van al final.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    run_id: Uuid,
    rows: Vec<ResolvedRow>,
    warnings: Vec<ValidationWarning>,
    /// Primera fila abandonada por cancelación, si la hubo.
    cancelled_at: Option<usize>,
}

impl BatchResult {
    pub fn new(run_id: Uuid) -> Self {
        BatchResult { run_id, rows: Vec::new(), warnings: Vec::new(), cancelled_at: None }
    }

    pub fn push_row(&mut self, query: CompoundQuery, identity: ResolvedIdentity) {
        self.rows.push(ResolvedRow { query, identity });
    }

    pub fn extend_warnings<I>(&mut self, warnings: I)
        where I: IntoIterator<Item = ValidationWarning>
    {
        self.warnings.extend(warnings);
    }

    pub fn mark_cancelled_at(&mut self, index: usize) {
        if self.cancelled_at.is_none() {
            self.cancelled_at = Some(index);
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn rows(&self) -> &[ResolvedRow] {
        &self.rows
    }

    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    pub fn cancelled_at(&self) -> Option<usize> {
        self.cancelled_at
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn warnings_of(&self, kind: WarningKind) -> impl Iterator<Item = &ValidationWarning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }

    /// Advertencias de una fila concreta, en orden de emisión.
    pub fn warnings_for_row(&self, index: usize) -> impl Iterator<Item = &ValidationWarning> {
        self.warnings.iter().filter(move |w| w.compound_index == index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Identifier;

    #[test]
    fn preserves_row_order_and_filters_warnings() {
        let mut batch = BatchResult::new(Uuid::new_v4());
        batch.push_row(CompoundQuery::new("ethanol"),
                       ResolvedIdentity::name_based("64-17-5".into(), "ethanol".into(), "CCO".into()));
        batch.push_row(CompoundQuery::new("unobtainium"), ResolvedIdentity::not_found());
        batch.extend_warnings(vec![ValidationWarning::new(1, WarningKind::SmilesMismatch, "x"),
                                   ValidationWarning::new(0, WarningKind::TypoCorrected, "y")]);

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.rows()[0].identity.smiles, Identifier::Found("CCO".into()));
        assert!(batch.rows()[1].identity.is_fully_unresolved());
        assert_eq!(batch.warnings_of(WarningKind::TypoCorrected).count(), 1);
        assert_eq!(batch.warnings_for_row(1).count(), 1);
    }

    #[test]
    fn cancelled_at_keeps_first_index() {
        let mut batch = BatchResult::new(Uuid::new_v4());
        batch.mark_cancelled_at(3);
        batch.mark_cancelled_at(5);
        assert_eq!(batch.cancelled_at(), Some(3));
    }
}
