use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

use chem_domain::ValidationWarning;

use super::WarningEvent;

/// Almacenamiento de advertencias append-only.
pub trait WarningSink {
    /// Agrega una advertencia y devuelve el evento completo (con seq y ts).
    fn append(&mut self, run_id: Uuid, warning: ValidationWarning) -> WarningEvent;
    /// Lista las advertencias de un lote (orden ascendente por seq).
    fn list(&self, run_id: Uuid) -> Vec<WarningEvent>;
}

#[derive(Debug, Default)]
pub struct InMemoryWarningSink {
    pub inner: HashMap<Uuid, Vec<WarningEvent>>,
}

impl WarningSink for InMemoryWarningSink {
    fn append(&mut self, run_id: Uuid, warning: ValidationWarning) -> WarningEvent {
        let vec = self.inner.entry(run_id).or_default();
        let seq = vec.len() as u64;
        let ev = WarningEvent { seq, run_id, warning, ts: Utc::now() };
        vec.push(ev.clone());
        ev
    }

    fn list(&self, run_id: Uuid) -> Vec<WarningEvent> {
        self.inner.get(&run_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chem_domain::WarningKind;

    #[test]
    fn seq_is_per_run() {
        let mut sink = InMemoryWarningSink::default();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        sink.append(a, ValidationWarning::new(0, WarningKind::TypoCorrected, "x"));
        let second = sink.append(a, ValidationWarning::new(1, WarningKind::SmilesMismatch, "y"));
        let other = sink.append(b, ValidationWarning::new(0, WarningKind::TypoCorrected, "z"));
        assert_eq!(second.seq, 1);
        assert_eq!(other.seq, 0);
        assert_eq!(sink.list(a).len(), 2);
        assert!(sink.list(Uuid::new_v4()).is_empty());
    }
}
