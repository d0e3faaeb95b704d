//! Huella reproducible de un lote.
//!
//! Sólo entran las consultas e identidades por fila (y la versión del
//! motor); `run_id`, advertencias y marcas de tiempo quedan fuera, así que
//! dos ejecuciones con las mismas respuestas externas producen la misma
//! huella.

use chem_domain::BatchResult;
use serde_json::json;

use crate::constants::ENGINE_VERSION;
use crate::hashing::{hash_str, to_canonical_json};

pub fn batch_fingerprint(batch: &BatchResult) -> Result<String, serde_json::Error> {
    let rows = serde_json::to_value(batch.rows())?;
    let doc = json!({
        "engine_version": ENGINE_VERSION,
        "rows": rows,
    });
    Ok(hash_str(&to_canonical_json(&doc)))
}
