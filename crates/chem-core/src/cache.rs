//! Cachés de un lote.
//!
//! Viven lo que dura una llamada a `resolve_batch`: se crean al empezar y se
//! descartan al terminar. No se persisten entre ejecuciones.

use chem_domain::{Identifier, ResolvedIdentity};
use std::collections::HashMap;

/// Identidades ya resueltas, por nombre corregido.
#[derive(Debug, Default)]
pub struct IdentityCache {
    by_name: HashMap<String, ResolvedIdentity>,
    hits: usize,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Devuelve una copia de la identidad cacheada y cuenta el acierto.
    pub fn get(&mut self, corrected_name: &str) -> Option<ResolvedIdentity> {
        let found = self.by_name.get(corrected_name).cloned();
        if found.is_some() {
            self.hits += 1;
        }
        found
    }

    /// Inserta o reemplaza la identidad de un nombre.
    pub fn insert(&mut self, corrected_name: &str, identity: ResolvedIdentity) {
        self.by_name.insert(corrected_name.to_string(), identity);
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }
}

/// Resultados de la consulta por CAS (encontrados o no), por número CAS.
#[derive(Debug, Default)]
pub struct CasCache {
    by_cas: HashMap<String, Identifier>,
}

impl CasCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cas: &str) -> Option<&Identifier> {
        self.by_cas.get(cas)
    }

    pub fn insert(&mut self, cas: &str, smiles: Identifier) {
        self.by_cas.insert(cas.to_string(), smiles);
    }

    pub fn len(&self) -> usize {
        self.by_cas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_cas.is_empty()
    }
}

/// Par de cachés con el ciclo de vida de un lote.
#[derive(Debug, Default)]
pub struct BatchCaches {
    pub identities: IdentityCache,
    pub cas: CasCache,
}
