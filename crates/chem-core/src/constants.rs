//! Constantes del motor de resolución.

use std::time::Duration;

/// Versión lógica del motor. Forma parte de la huella del lote, así que un
/// cambio de comportamiento incompatible debe incrementarla.
pub const ENGINE_VERSION: &str = "R1.0";

/// Tiempo máximo por consulta externa si no se configura otro.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(15);
