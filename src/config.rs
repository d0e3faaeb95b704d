//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) una sola vez y construye `AppConfig`
//! con valores por defecto para todo lo que no esté definido.
use chem_policies::PacingPolicy;
use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::CoreError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Scripts de consulta por nombre y por CAS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    pub python_bin: PathBuf,
    pub name_script: PathBuf,
    pub cas_script: PathBuf,
    /// Tiempo máximo por consulta.
    pub timeout: Duration,
}

/// Herramienta de propiedades (HSP).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HspConfig {
    pub tool: PathBuf,
    /// Plantilla de argumentos; `{smiles}` se sustituye en cada llamada.
    pub args: Vec<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub lookup: LookupConfig,
    pub pacing: PacingPolicy,
    /// `None` si no hay herramienta configurada: no se calculan propiedades.
    pub hsp: Option<HspConfig>,
    pub corrections_file: Option<PathBuf>,
    pub expected_cas_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, CoreError> {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda de
    /// variables (el entorno del proceso en `from_env`).
    pub fn from_lookup<F>(get: F) -> Result<Self, CoreError>
        where F: Fn(&str) -> Option<String>
    {
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let path_or = |key: &str, default: &str| PathBuf::from(var(key).unwrap_or_else(|| default.to_string()));

        let lookup = LookupConfig { python_bin: path_or("CHEM_PYTHON_BIN", "python3"),
                                    name_script: path_or("CHEM_NAME_LOOKUP_SCRIPT", "get_compound_info2.py"),
                                    cas_script: path_or("CHEM_CAS_LOOKUP_SCRIPT", "get_smiles_from_cas.py"),
                                    timeout: parse_ms("CHEM_LOOKUP_TIMEOUT_MS", var("CHEM_LOOKUP_TIMEOUT_MS"), 15_000)? };

        let pacing_enabled = parse_bool("CHEM_PACING_ENABLED", var("CHEM_PACING_ENABLED"), true)?;
        let delay = parse_ms("CHEM_PACING_DELAY_MS", var("CHEM_PACING_DELAY_MS"), 1_000)?;
        let pacing = if pacing_enabled { PacingPolicy::fixed(delay) } else { PacingPolicy::Disabled };

        let hsp = match var("CHEM_HSP_TOOL") {
            Some(tool) => {
                let args = var("CHEM_HSP_ARGS").unwrap_or_else(|| "{smiles}".to_string())
                                               .split_whitespace()
                                               .map(str::to_string)
                                               .collect();
                Some(HspConfig { tool: PathBuf::from(tool),
                                 args,
                                 timeout: parse_ms("CHEM_HSP_TIMEOUT_MS", var("CHEM_HSP_TIMEOUT_MS"), 60_000)? })
            }
            None => None,
        };

        Ok(AppConfig { lookup,
                       pacing,
                       hsp,
                       corrections_file: var("CHEM_CORRECTIONS_FILE").map(PathBuf::from),
                       expected_cas_file: var("CHEM_EXPECTED_CAS_FILE").map(PathBuf::from) })
    }
}

fn parse_ms(key: &str, raw: Option<String>, default_ms: u64) -> Result<Duration, CoreError> {
    match raw {
        None => Ok(Duration::from_millis(default_ms)),
        Some(v) => v.parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|_| CoreError::Config(format!("{key} debe ser un entero en milisegundos, llegó '{v}'"))),
    }
}

fn parse_bool(key: &str, raw: Option<String>, default: bool) -> Result<bool, CoreError> {
    match raw.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(CoreError::Config(format!("{key} debe ser booleano, llegó '{other}'"))),
    }
}
