//! Política de ritmo entre filas.
//!
//! El retardo existe sólo para respetar el límite de peticiones del servicio
//! externo; no forma parte del algoritmo de resolución. Nunca se aplica antes
//! de la primera fila.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "pacing", content = "params")]
pub enum PacingPolicy {
    /// Sin pausas (tests, servicios locales).
    #[default]
    Disabled,
    /// Pausa fija entre filas consecutivas.
    FixedInterval { delay_ms: u64 },
}

impl PacingPolicy {
    pub fn fixed(delay: Duration) -> Self {
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        if delay_ms == 0 {
            PacingPolicy::Disabled
        } else {
            PacingPolicy::FixedInterval { delay_ms }
        }
    }

    /// Pausa a aplicar antes de procesar la fila `row_index` (base 0).
    pub fn delay_before(&self, row_index: usize) -> Option<Duration> {
        match self {
            PacingPolicy::Disabled => None,
            PacingPolicy::FixedInterval { .. } if row_index == 0 => None,
            PacingPolicy::FixedInterval { delay_ms } => Some(Duration::from_millis(*delay_ms)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, PacingPolicy::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_delay_before_first_row() {
        let p = PacingPolicy::fixed(Duration::from_secs(1));
        assert_eq!(p.delay_before(0), None);
        assert_eq!(p.delay_before(1), Some(Duration::from_secs(1)));
    }

    #[test]
    fn zero_delay_disables() {
        assert_eq!(PacingPolicy::fixed(Duration::ZERO), PacingPolicy::Disabled);
        assert_eq!(PacingPolicy::Disabled.delay_before(7), None);
    }

    #[test]
    fn serializes_tagged() {
        let v = serde_json::to_value(PacingPolicy::FixedInterval { delay_ms: 250 }).unwrap();
        assert_eq!(v, serde_json::json!({"pacing": "FixedInterval", "params": {"delay_ms": 250}}));
    }
}
