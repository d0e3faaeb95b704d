//! Resolución de identificadores contra los puertos externos.
//!
//! Contrato:
//! - Como mucho una consulta por nombre corregido y una por CAS en cada lote
//!   (las cachés del lote se consultan antes).
//! - Cualquier fallo de un puerto (transporte, respuesta mal formada,
//!   ausencia, tiempo agotado) se degrada a `NotFound`; nunca aborta el lote.

use chem_domain::{Identifier, ResolvedIdentity};
use log::{debug, warn};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CasCache, IdentityCache};
use crate::cancel::CancelFlag;
use crate::errors::LookupError;
use crate::ports::{CasLookupPort, NameLookupPort};

/// Origen de la identidad devuelta por `resolve_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Ya estaba en la caché del lote; no hubo llamada externa.
    Cached(ResolvedIdentity),
    /// Resultado recién obtenido de la consulta por nombre.
    Fresh(ResolvedIdentity),
}

impl Resolution {
    pub fn identity(&self) -> &ResolvedIdentity {
        match self {
            Resolution::Cached(id) | Resolution::Fresh(id) => id,
        }
    }

    pub fn into_identity(self) -> ResolvedIdentity {
        match self {
            Resolution::Cached(id) | Resolution::Fresh(id) => id,
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, Resolution::Cached(_))
    }
}

pub struct LookupResolver {
    name_port: Arc<dyn NameLookupPort>,
    cas_port: Arc<dyn CasLookupPort>,
    timeout: Duration,
    cancel: CancelFlag,
}

impl LookupResolver {
    pub fn new(name_port: Arc<dyn NameLookupPort>,
               cas_port: Arc<dyn CasLookupPort>,
               timeout: Duration,
               cancel: CancelFlag)
               -> Self {
        Self { name_port, cas_port, timeout, cancel }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Ejecuta una llamada a un puerto con tiempo máximo y comprobando antes
    /// la cancelación.
    async fn guarded<T, F>(&self, call: F) -> Result<T, LookupError>
        where F: Future<Output = Result<T, LookupError>>
    {
        if self.cancel.is_cancelled() {
            return Err(LookupError::Cancelled);
        }
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::Timeout(self.timeout)),
        }
    }

    /// Resuelve un nombre corregido. En un fallo de caché consulta el puerto
    /// por nombre y guarda el resultado (también si es `NotFound`) antes de
    /// devolverlo. Una consulta cancelada no se cachea.
    pub async fn resolve_name(&self, cache: &mut IdentityCache, index: usize, corrected_name: &str) -> Resolution {
        if let Some(identity) = cache.get(corrected_name) {
            debug!("[resolver] fila {}: '{}' servido desde caché", index + 1, corrected_name);
            return Resolution::Cached(identity);
        }
        let outcome = self.guarded(self.name_port.lookup_name(corrected_name)).await;
        let identity = match outcome {
            Ok(hit) => hit.into_identity(),
            Err(LookupError::Cancelled) => {
                debug!("[resolver] fila {}: consulta por nombre omitida (cancelado)", index + 1);
                return Resolution::Fresh(ResolvedIdentity::not_found());
            }
            Err(e) => {
                warn!("[resolver] fila {}: {} no resolvió '{}': {}",
                      index + 1,
                      self.name_port.name(),
                      corrected_name,
                      e);
                ResolvedIdentity::not_found()
            }
        };
        cache.insert(corrected_name, identity.clone());
        Resolution::Fresh(identity)
    }

    /// SMILES para un CAS, pasando por la caché del lote.
    pub async fn resolve_cas(&self, cache: &mut CasCache, index: usize, cas: &str, compound_name: &str) -> Identifier {
        if let Some(smiles) = cache.get(cas) {
            debug!("[resolver] fila {}: CAS {} servido desde caché", index + 1, cas);
            return smiles.clone();
        }
        let outcome = self.guarded(self.cas_port.lookup_cas(cas, compound_name)).await;
        let smiles = match outcome {
            Ok(raw) => Identifier::parse(&raw),
            Err(LookupError::Cancelled) => return Identifier::NotFound,
            Err(e) => {
                warn!("[resolver] fila {}: {} no resolvió CAS {} ('{}'): {}",
                      index + 1,
                      self.cas_port.name(),
                      cas,
                      compound_name,
                      e);
                Identifier::NotFound
            }
        };
        cache.insert(cas, smiles.clone());
        smiles
    }
}

impl std::fmt::Debug for LookupResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupResolver")
         .field("name_port", &self.name_port.name())
         .field("cas_port", &self.cas_port.name())
         .field("timeout", &self.timeout)
         .finish()
    }
}
