//! chem-policies – Políticas deterministas de resolución
//!
//! Provee contratos puros (sin IO) que el motor consulta en cada fila:
//! - `reconcile`: cuándo pedir la consulta por CAS y qué hacer con su SMILES.
//! - `wisdom`: reglas heurísticas por subcadena sobre nombre/SMILES.
//! - `pacing`: pausa entre filas para respetar límites externos.

pub mod pacing;
pub mod reconcile;
pub mod wisdom;

pub use pacing::PacingPolicy;
pub use reconcile::{NameFirstPolicy, ReconcileDecision, ReconciliationPolicy};
pub use wisdom::{AlkaneUnexpectedDoubleBond, AlkeneMissingDoubleBond, NitrileMissingTripleBond, WisdomFinding, WisdomRule,
                 WisdomRules};
