//! Builder para `ResolutionEngine`.
//!
//! Los dos puertos de consulta son obligatorios y se fijan al crear el
//! builder; el resto tiene valores por defecto:
//! - tablas de corrección y de CAS esperados integradas,
//! - política `NameFirstPolicy` y reglas químicas estándar,
//! - sin pausas entre filas,
//! - `DEFAULT_LOOKUP_TIMEOUT` por consulta,
//! - advertencias en memoria (`InMemoryWarningSink`).
//!
//! ```ignore
//! let mut engine = ResolutionEngine::builder(name_port, cas_port)
//!     .pacing(PacingPolicy::fixed(Duration::from_secs(1)))
//!     .lookup_timeout(Duration::from_secs(10))
//!     .build();
//! let batch = engine.resolve_batch(["ethanol", "1-tetradecane"]).await;
//! ```

use chem_policies::{NameFirstPolicy, PacingPolicy, ReconciliationPolicy, WisdomRules};
use std::sync::Arc;
use std::time::Duration;

use crate::cancel::CancelFlag;
use crate::constants::DEFAULT_LOOKUP_TIMEOUT;
use crate::correction::{CorrectionTable, ExpectedCasTable};
use crate::engine::ResolutionEngine;
use crate::event::{InMemoryWarningSink, WarningSink};
use crate::ports::{CasLookupPort, NameLookupPort};
use crate::resolver::LookupResolver;

pub struct EngineBuilder<W: WarningSink> {
    name_port: Arc<dyn NameLookupPort>,
    cas_port: Arc<dyn CasLookupPort>,
    corrections: CorrectionTable,
    expected_cas: ExpectedCasTable,
    policy: Box<dyn ReconciliationPolicy>,
    rules: WisdomRules,
    pacing: PacingPolicy,
    timeout: Duration,
    cancel: CancelFlag,
    sink: W,
}

impl EngineBuilder<InMemoryWarningSink> {
    pub fn new(name_port: Arc<dyn NameLookupPort>, cas_port: Arc<dyn CasLookupPort>) -> Self {
        Self { name_port,
               cas_port,
               corrections: CorrectionTable::builtin(),
               expected_cas: ExpectedCasTable::builtin(),
               policy: Box::new(NameFirstPolicy::new()),
               rules: WisdomRules::standard(),
               pacing: PacingPolicy::Disabled,
               timeout: DEFAULT_LOOKUP_TIMEOUT,
               cancel: CancelFlag::new(),
               sink: InMemoryWarningSink::default() }
    }
}

impl<W: WarningSink> EngineBuilder<W> {
    #[inline]
    pub fn corrections(mut self, corrections: CorrectionTable) -> Self {
        self.corrections = corrections;
        self
    }

    #[inline]
    pub fn expected_cas(mut self, expected_cas: ExpectedCasTable) -> Self {
        self.expected_cas = expected_cas;
        self
    }

    #[inline]
    pub fn policy<P>(mut self, policy: P) -> Self
        where P: ReconciliationPolicy + 'static
    {
        self.policy = Box::new(policy);
        self
    }

    #[inline]
    pub fn rules(mut self, rules: WisdomRules) -> Self {
        self.rules = rules;
        self
    }

    #[inline]
    pub fn pacing(mut self, pacing: PacingPolicy) -> Self {
        self.pacing = pacing;
        self
    }

    #[inline]
    pub fn lookup_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Comparte una bandera de cancelación creada fuera (p. ej. por un
    /// manejador de Ctrl-C).
    #[inline]
    pub fn cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Sustituye el destino de las advertencias.
    pub fn warning_sink<S: WarningSink>(self, sink: S) -> EngineBuilder<S> {
        EngineBuilder { name_port: self.name_port,
                        cas_port: self.cas_port,
                        corrections: self.corrections,
                        expected_cas: self.expected_cas,
                        policy: self.policy,
                        rules: self.rules,
                        pacing: self.pacing,
                        timeout: self.timeout,
                        cancel: self.cancel,
                        sink }
    }

    pub fn build(self) -> ResolutionEngine<W> {
        let resolver = LookupResolver::new(self.name_port, self.cas_port, self.timeout, self.cancel.clone());
        ResolutionEngine { resolver,
                           corrections: self.corrections,
                           expected_cas: self.expected_cas,
                           policy: self.policy,
                           rules: self.rules,
                           pacing: self.pacing,
                           cancel: self.cancel,
                           sink: self.sink }
    }
}

impl ResolutionEngine<InMemoryWarningSink> {
    /// Crea un builder con los dos puertos de consulta.
    #[inline]
    pub fn builder(name_port: Arc<dyn NameLookupPort>, cas_port: Arc<dyn CasLookupPort>) -> EngineBuilder<InMemoryWarningSink> {
        EngineBuilder::new(name_port, cas_port)
    }
}
