//! Etapa de corrección de nombres y tabla de CAS esperados.
//!
//! Ambas tablas son mapeos estáticos deterministas. Las entradas integradas
//! pueden ampliarse con ficheros externos al arrancar.

use chem_domain::{looks_like_cas, CompoundQuery, DomainError, ValidationWarning, WarningKind};
use std::collections::HashMap;

/// Erratas conocidas (tipográficas o de nomenclatura) → forma corregida.
#[derive(Debug, Clone, Default)]
pub struct CorrectionTable {
    entries: HashMap<String, String>,
}

impl CorrectionTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Tabla integrada.
    pub fn builtin() -> Self {
        let mut t = Self::empty();
        t.entries.insert("1-tetradecane".to_string(), "1-tetradecene".to_string());
        t
    }

    /// Añade o reemplaza una corrección.
    ///
    /// # Errores
    /// `DomainError::ValidationError` si algún lado está vacío o si la
    /// corrección apunta a sí misma.
    pub fn insert(&mut self, typo: &str, corrected: &str) -> Result<(), DomainError> {
        let typo = typo.trim();
        let corrected = corrected.trim();
        if typo.is_empty() || corrected.is_empty() {
            return Err(DomainError::ValidationError("Corrección con nombre vacío".to_string()));
        }
        if typo == corrected {
            return Err(DomainError::ValidationError(format!("Corrección sin efecto: {typo}")));
        }
        self.entries.insert(typo.to_string(), corrected.to_string());
        Ok(())
    }

    /// Fusiona otra tabla; sus entradas prevalecen.
    pub fn merge(&mut self, other: CorrectionTable) {
        self.entries.extend(other.entries);
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries.get(name.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Construye la consulta de la fila `index` y, si hubo corrección, la
    /// advertencia `TypoCorrected` correspondiente.
    pub fn apply(&self, index: usize, raw_name: &str) -> (CompoundQuery, Option<ValidationWarning>) {
        match self.lookup(raw_name) {
            Some(corrected) => {
                let query = CompoundQuery::corrected(raw_name, corrected);
                let warning = ValidationWarning::new(index,
                                                     WarningKind::TypoCorrected,
                                                     format!("nombre corregido: '{}' -> '{}'",
                                                             query.original_name(),
                                                             query.corrected_name()));
                (query, Some(warning))
            }
            None => (CompoundQuery::new(raw_name), None),
        }
    }
}

/// CAS esperado para nombres (ya corregidos) que la consulta por nombre no
/// suele resolver. Se usa como último recurso cuando no hay SMILES.
#[derive(Debug, Clone, Default)]
pub struct ExpectedCasTable {
    entries: HashMap<String, String>,
}

impl ExpectedCasTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut t = Self::empty();
        t.entries.insert("1-tetradecene".to_string(), "1120-36-1".to_string());
        t
    }

    /// # Errores
    /// `DomainError::ValidationError` si el nombre está vacío o el CAS no
    /// tiene forma de CAS.
    pub fn insert(&mut self, name: &str, cas: &str) -> Result<(), DomainError> {
        let name = name.trim();
        let cas = cas.trim();
        if name.is_empty() {
            return Err(DomainError::ValidationError("CAS esperado sin nombre".to_string()));
        }
        if !looks_like_cas(cas) {
            return Err(DomainError::ValidationError(format!("CAS inválido para '{name}': {cas}")));
        }
        self.entries.insert(name.to_string(), cas.to_string());
        Ok(())
    }

    pub fn merge(&mut self, other: ExpectedCasTable) {
        self.entries.extend(other.entries);
    }

    pub fn lookup(&self, corrected_name: &str) -> Option<&str> {
        self.entries.get(corrected_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_corrects_tetradecane() {
        let t = CorrectionTable::builtin();
        let (q, w) = t.apply(1, "1-tetradecane");
        assert_eq!(q.original_name(), "1-tetradecane");
        assert_eq!(q.corrected_name(), "1-tetradecene");
        let w = w.expect("debe avisar de la corrección");
        assert_eq!(w.kind, WarningKind::TypoCorrected);
        assert_eq!(w.compound_index, 1);
        assert!(w.message.contains("1-tetradecane") && w.message.contains("1-tetradecene"));
    }

    #[test]
    fn unknown_names_pass_through() {
        let (q, w) = CorrectionTable::builtin().apply(0, "ethanol");
        assert!(!q.was_corrected());
        assert!(w.is_none());
    }

    #[test]
    fn insert_validates() {
        let mut t = CorrectionTable::empty();
        assert!(t.insert("", "x").is_err());
        assert!(t.insert("same", "same").is_err());
        t.insert("acetonitril", "acetonitrile").unwrap();
        assert_eq!(t.lookup("acetonitril"), Some("acetonitrile"));
    }

    #[test]
    fn merge_overrides_builtin() {
        let mut t = CorrectionTable::builtin();
        let mut extra = CorrectionTable::empty();
        extra.insert("1-tetradecane", "tetradecane").unwrap();
        t.merge(extra);
        assert_eq!(t.lookup("1-tetradecane"), Some("tetradecane"));
    }

    #[test]
    fn expected_cas_rejects_bad_cas() {
        let mut t = ExpectedCasTable::builtin();
        assert_eq!(t.lookup("1-tetradecene"), Some("1120-36-1"));
        assert!(t.insert("water", "agua").is_err());
        t.insert("water", "7732-18-5").unwrap();
        assert_eq!(t.len(), 2);
    }
}
