//! Política de reconciliación entre la consulta por nombre y la consulta por
//! CAS.
//!
//! La fuente por nombre es la referencia: se consulta primero y es el origen
//! del propio CAS. La fuente por CAS sólo rellena huecos o expone
//! discrepancias para revisión humana; nunca sobrescribe en silencio.

use chem_domain::{Identifier, IdentitySource, ResolvedIdentity};
use serde::{Deserialize, Serialize};

/// Resultado de comparar ambos SMILES para una identidad.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReconcileDecision {
    /// Se conserva la identidad tal cual (coinciden o la fuente CAS no aportó nada).
    KeepNameBased,
    /// El nombre no dio SMILES y el CAS sí: se adopta el de CAS.
    AdoptCasBased { smiles: String },
    /// Ambas fuentes dieron SMILES distintos. Se conserva el de nombre y se
    /// informa la discrepancia.
    Mismatch { name_smiles: String, cas_smiles: String },
}

impl ReconcileDecision {
    /// Aplica la decisión sobre una identidad y devuelve la nueva versión.
    pub fn apply(&self, identity: &ResolvedIdentity) -> ResolvedIdentity {
        match self {
            ReconcileDecision::AdoptCasBased { smiles } => ResolvedIdentity { smiles: Identifier::Found(smiles.clone()),
                                                                              source: IdentitySource::CasBased,
                                                                              ..identity.clone() },
            ReconcileDecision::KeepNameBased | ReconcileDecision::Mismatch { .. } => identity.clone(),
        }
    }
}

/// Contrato de políticas de reconciliación deterministas.
pub trait ReconciliationPolicy: Send + Sync {
    fn id(&self) -> &'static str;

    /// Indica si hay que pedir el SMILES por CAS para esta identidad.
    fn wants_cas_lookup(&self, identity: &ResolvedIdentity) -> bool;

    /// Decide con el SMILES por nombre y el obtenido por CAS.
    fn decide(&self, name_smiles: &Identifier, cas_smiles: &Identifier) -> ReconcileDecision;
}

/// Política: confiar siempre en la consulta por nombre.
#[derive(Debug, Default, Clone, Copy)]
pub struct NameFirstPolicy;

impl NameFirstPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl ReconciliationPolicy for NameFirstPolicy {
    fn id(&self) -> &'static str {
        "name_first"
    }

    fn wants_cas_lookup(&self, identity: &ResolvedIdentity) -> bool {
        // Sin CAS no hay nada contra lo que contrastar.
        identity.cas.is_found()
    }

    fn decide(&self, name_smiles: &Identifier, cas_smiles: &Identifier) -> ReconcileDecision {
        match (name_smiles, cas_smiles) {
            (Identifier::NotFound, Identifier::Found(cas)) => ReconcileDecision::AdoptCasBased { smiles: cas.clone() },
            (Identifier::Found(name), Identifier::Found(cas)) if name != cas => {
                ReconcileDecision::Mismatch { name_smiles: name.clone(),
                                              cas_smiles: cas.clone() }
            }
            _ => ReconcileDecision::KeepNameBased,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ethanol() -> ResolvedIdentity {
        ResolvedIdentity::name_based("64-17-5".into(), "ethanol".into(), "CCO".into())
    }

    #[test]
    fn no_cas_means_no_lookup() {
        let p = NameFirstPolicy::new();
        let mut id = ethanol();
        assert!(p.wants_cas_lookup(&id));
        id.cas = Identifier::NotFound;
        assert!(!p.wants_cas_lookup(&id));
    }

    #[test]
    fn mismatch_keeps_name_based_smiles() {
        let p = NameFirstPolicy::new();
        let id = ethanol();
        let d = p.decide(&id.smiles, &"OCC".into());
        assert_eq!(d, ReconcileDecision::Mismatch { name_smiles: "CCO".into(), cas_smiles: "OCC".into() });
        let out = d.apply(&id);
        assert_eq!(out.smiles, Identifier::Found("CCO".into()));
        assert_eq!(out.source, IdentitySource::NameBased);
    }

    #[test]
    fn gap_is_filled_from_cas() {
        let p = NameFirstPolicy::new();
        let mut id = ethanol();
        id.smiles = Identifier::NotFound;
        let d = p.decide(&id.smiles, &"CCO".into());
        let out = d.apply(&id);
        assert_eq!(out.smiles, Identifier::Found("CCO".into()));
        assert_eq!(out.source, IdentitySource::CasBased);
        assert_eq!(out.cas, id.cas);
    }

    #[test]
    fn agreement_or_missing_cas_smiles_keeps() {
        let p = NameFirstPolicy::new();
        assert_eq!(p.decide(&"CCO".into(), &"CCO".into()), ReconcileDecision::KeepNameBased);
        assert_eq!(p.decide(&"CCO".into(), &Identifier::NotFound), ReconcileDecision::KeepNameBased);
        assert_eq!(p.decide(&Identifier::NotFound, &Identifier::NotFound), ReconcileDecision::KeepNameBased);
    }
}
