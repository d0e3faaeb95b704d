//! Reglas de "sabiduría química": comprobaciones por subcadena sobre el par
//! (nombre, SMILES).
//!
//! No es un parser químico. Son disparadores baratos; se aceptan falsos
//! positivos y negativos con nomenclatura poco habitual. Las reglas se
//! evalúan en orden y gana la primera que se dispara.

use chem_domain::{Identifier, WarningKind};

/// Hallazgo de una regla sobre un par nombre/SMILES.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WisdomFinding {
    pub rule_id: &'static str,
    pub kind: WarningKind,
    pub message: String,
}

/// Predicado sobre (nombre, SMILES) con el tipo de advertencia que produce.
pub trait WisdomRule: Send + Sync {
    fn id(&self) -> &'static str;
    fn kind(&self) -> WarningKind;
    /// `smiles` siempre es un valor resuelto.
    fn fires(&self, name: &str, smiles: &str) -> bool;
    fn message(&self, name: &str, smiles: &str) -> String;
}

/// Alqueno ("ene", salvo benceno) sin enlace doble en el SMILES.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlkeneMissingDoubleBond;

impl WisdomRule for AlkeneMissingDoubleBond {
    fn id(&self) -> &'static str {
        "alkene_double_bond"
    }

    fn kind(&self) -> WarningKind {
        WarningKind::AlkeneMissingDoubleBond
    }

    fn fires(&self, name: &str, smiles: &str) -> bool {
        name.contains("ene") && !name.contains("benzene") && !smiles.contains('=')
    }

    fn message(&self, name: &str, smiles: &str) -> String {
        format!("'{name}' parece un alqueno pero el SMILES {smiles} no tiene enlace doble")
    }
}

/// Alcano ("ane", sin "di" ni "cyclo") con un enlace doble inesperado.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlkaneUnexpectedDoubleBond;

impl WisdomRule for AlkaneUnexpectedDoubleBond {
    fn id(&self) -> &'static str {
        "alkane_double_bond"
    }

    fn kind(&self) -> WarningKind {
        WarningKind::AlkaneUnexpectedDoubleBond
    }

    fn fires(&self, name: &str, smiles: &str) -> bool {
        name.contains("ane") && !name.contains("di") && !name.contains("cyclo") && smiles.contains('=')
    }

    fn message(&self, name: &str, smiles: &str) -> String {
        format!("'{name}' parece un alcano pero el SMILES {smiles} tiene enlace doble")
    }
}

/// Nitrilo sin triple enlace a nitrógeno (`#N`).
#[derive(Debug, Default, Clone, Copy)]
pub struct NitrileMissingTripleBond;

impl WisdomRule for NitrileMissingTripleBond {
    fn id(&self) -> &'static str {
        "nitrile_triple_bond"
    }

    fn kind(&self) -> WarningKind {
        WarningKind::NitrileMissingTripleBond
    }

    fn fires(&self, name: &str, smiles: &str) -> bool {
        name.to_lowercase().contains("nitrile") && !smiles.contains("#N")
    }

    fn message(&self, name: &str, smiles: &str) -> String {
        format!("'{name}' parece un nitrilo pero el SMILES {smiles} no contiene #N")
    }
}

/// Lista ordenada de reglas.
pub struct WisdomRules {
    rules: Vec<Box<dyn WisdomRule>>,
}

impl WisdomRules {
    /// Lista vacía (desactiva las comprobaciones).
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Reglas estándar: alqueno, alcano, nitrilo, en ese orden.
    pub fn standard() -> Self {
        Self::empty().with_rule(AlkeneMissingDoubleBond)
                     .with_rule(AlkaneUnexpectedDoubleBond)
                     .with_rule(NitrileMissingTripleBond)
    }

    pub fn with_rule<R>(mut self, rule: R) -> Self
        where R: WisdomRule + 'static
    {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evalúa en orden; devuelve el hallazgo de la primera regla que se
    /// dispara. Sin SMILES no se evalúa nada.
    pub fn evaluate(&self, name: &str, smiles: &Identifier) -> Option<WisdomFinding> {
        let smiles = smiles.as_deref()?;
        self.rules
            .iter()
            .find(|r| r.fires(name, smiles))
            .map(|r| WisdomFinding { rule_id: r.id(),
                                     kind: r.kind(),
                                     message: r.message(name, smiles) })
    }
}

impl Default for WisdomRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for WisdomRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WisdomRules").field("rules", &self.ids()).finish()
    }
}
