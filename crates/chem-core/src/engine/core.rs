//! Core ResolutionEngine implementation

use chem_domain::{BatchResult, CompoundQuery, Identifier, IdentitySource, ResolvedIdentity, ValidationWarning, WarningKind};
use chem_policies::{PacingPolicy, ReconcileDecision, ReconciliationPolicy, WisdomRules};
use log::{debug, info, warn};
use uuid::Uuid;

use crate::audit::audit_duplicates;
use crate::cache::BatchCaches;
use crate::cancel::CancelFlag;
use crate::correction::{CorrectionTable, ExpectedCasTable};
use crate::event::WarningSink;
use crate::resolver::{LookupResolver, Resolution};

/// Motor de resolución de nombres de compuestos.
///
/// Procesa las filas de forma estrictamente secuencial: corrección →
/// caché → consulta por nombre → reconciliación → validación. Al terminar
/// el lote ejecuta una vez el auditor de duplicados.
pub struct ResolutionEngine<W: WarningSink> {
    pub(crate) resolver: LookupResolver,
    pub(crate) corrections: CorrectionTable,
    pub(crate) expected_cas: ExpectedCasTable,
    pub(crate) policy: Box<dyn ReconciliationPolicy>,
    pub(crate) rules: WisdomRules,
    pub(crate) pacing: PacingPolicy,
    pub(crate) cancel: CancelFlag,
    pub(crate) sink: W,
}

/// Estado de una fila en curso: advertencias pendientes de volcar.
struct RowCtx<'a> {
    index: usize,
    query: &'a CompoundQuery,
    warnings: Vec<ValidationWarning>,
}

impl RowCtx<'_> {
    fn warn(&mut self, kind: WarningKind, message: String) {
        self.warnings.push(ValidationWarning::new(self.index, kind, message));
    }
}

impl<W: WarningSink> ResolutionEngine<W> {
    pub fn warning_sink(&self) -> &W {
        &self.sink
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Resuelve un lote completo.
    ///
    /// Siempre devuelve una fila por nombre de entrada, en el mismo orden.
    /// Los fallos de las fuentes externas nunca abortan el lote. Si se
    /// cancela, las filas restantes se emiten sin resolver y sin consultas.
    pub async fn resolve_batch<I, S>(&mut self, names: I) -> BatchResult
        where I: IntoIterator<Item = S>,
              S: AsRef<str>
    {
        let run_id = Uuid::new_v4();
        let mut batch = BatchResult::new(run_id);
        let mut caches = BatchCaches::default();
        info!("[engine] lote {run_id}: inicio (política {}, reglas {:?}, pausas {})",
              self.policy.id(),
              self.rules.ids(),
              if self.pacing.is_enabled() { "activas" } else { "desactivadas" });

        for (index, raw) in names.into_iter().enumerate() {
            let raw = raw.as_ref();
            if !self.cancel.is_cancelled() {
                if let Some(delay) = self.pacing.delay_before(index) {
                    tokio::select! {
                        _ = tokio::time::sleep(delay) => {}
                        _ = self.cancel.cancelled() => {}
                    }
                }
            }
            if self.cancel.is_cancelled() {
                if batch.cancelled_at().is_none() {
                    warn!("[engine] lote {run_id}: cancelado en la fila {}", index + 1);
                }
                batch.mark_cancelled_at(index);
                batch.push_row(CompoundQuery::new(raw), ResolvedIdentity::not_found());
                continue;
            }

            let (query, identity, warnings) = self.resolve_row(&mut caches, index, raw).await;
            self.emit(run_id, &mut batch, warnings);
            batch.push_row(query, identity);
        }

        let duplicates = audit_duplicates(batch.rows());
        self.emit(run_id, &mut batch, duplicates);

        info!("[engine] lote {run_id}: {} filas, {} nombres distintos consultados, {} aciertos de caché, {} CAS consultados, {} advertencias",
              batch.len(),
              caches.identities.len(),
              caches.identities.hits(),
              caches.cas.len(),
              batch.warnings().len());
        batch
    }

    /// Vuelca advertencias al sink (con log) y al resultado.
    fn emit(&mut self, run_id: Uuid, batch: &mut BatchResult, warnings: Vec<ValidationWarning>) {
        for w in &warnings {
            let ev = self.sink.append(run_id, w.clone());
            warn!("[engine] #{} {}", ev.seq, ev.warning);
        }
        batch.extend_warnings(warnings);
    }

    async fn resolve_row(&self,
                         caches: &mut BatchCaches,
                         index: usize,
                         raw: &str)
                         -> (CompoundQuery, ResolvedIdentity, Vec<ValidationWarning>) {
        let (query, typo) = self.corrections.apply(index, raw);
        let mut ctx = RowCtx { index, query: &query, warnings: typo.into_iter().collect() };

        if query.is_blank() {
            debug!("[engine] fila {}: nombre vacío, sin consultas", index + 1);
            let warnings = ctx.warnings;
            return (query, ResolvedIdentity::not_found(), warnings);
        }

        let name = query.corrected_name();
        let identity = match self.resolver.resolve_name(&mut caches.identities, index, name).await {
            Resolution::Cached(identity) => identity,
            Resolution::Fresh(identity) => {
                let identity = self.reconcile(caches, &mut ctx, identity).await;
                let identity = self.recover(caches, &ctx, identity).await;
                if !self.cancel.is_cancelled() {
                    caches.identities.insert(name, identity.clone());
                }
                identity
            }
        };

        if let Some(finding) = self.rules.evaluate(name, &identity.smiles) {
            ctx.warn(finding.kind, finding.message);
        }
        let warnings = ctx.warnings;
        (query, identity, warnings)
    }

    /// Contraste con la consulta por CAS según la política.
    async fn reconcile(&self, caches: &mut BatchCaches, ctx: &mut RowCtx<'_>, identity: ResolvedIdentity) -> ResolvedIdentity {
        if !self.policy.wants_cas_lookup(&identity) {
            return identity;
        }
        let Some(cas) = identity.cas.as_deref() else {
            return identity;
        };
        let name = ctx.query.corrected_name();
        let cas_smiles = self.resolver.resolve_cas(&mut caches.cas, ctx.index, cas, name).await;
        let decision = self.policy.decide(&identity.smiles, &cas_smiles);
        match &decision {
            ReconcileDecision::AdoptCasBased { smiles } => {
                info!("[engine] fila {}: '{}' sin SMILES por nombre; se adopta {} vía CAS {}",
                      ctx.index + 1,
                      name,
                      smiles,
                      cas);
            }
            ReconcileDecision::Mismatch { name_smiles, cas_smiles } => {
                let message = format!("'{}' (original '{}'): SMILES por nombre {} difiere del SMILES por CAS {} ({}); se conserva el de nombre",
                                      name,
                                      ctx.query.original_name(),
                                      name_smiles,
                                      cas_smiles,
                                      cas);
                ctx.warn(WarningKind::SmilesMismatch, message);
            }
            ReconcileDecision::KeepNameBased => {}
        }
        decision.apply(&identity)
    }

    /// Último recurso: CAS esperado para nombres sin SMILES.
    async fn recover(&self, caches: &mut BatchCaches, ctx: &RowCtx<'_>, identity: ResolvedIdentity) -> ResolvedIdentity {
        if identity.smiles.is_found() {
            return identity;
        }
        let name = ctx.query.corrected_name();
        let Some(expected) = self.expected_cas.lookup(name) else {
            return identity;
        };
        match self.resolver.resolve_cas(&mut caches.cas, ctx.index, expected, name).await {
            Identifier::Found(smiles) => {
                info!("[engine] fila {}: '{}' recuperado con CAS esperado {} -> {}", ctx.index + 1, name, expected, smiles);
                ResolvedIdentity { cas: Identifier::Found(expected.to_string()),
                                   iupac: Identifier::Found(name.to_string()),
                                   smiles: Identifier::Found(smiles),
                                   source: IdentitySource::CorrectedCas }
            }
            Identifier::NotFound => {
                debug!("[engine] fila {}: CAS esperado {} tampoco dio SMILES", ctx.index + 1, expected);
                identity
            }
        }
    }
}
