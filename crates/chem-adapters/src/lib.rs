//! chem-adapters: implementaciones de los puertos del core
//!
//! Cada puerto se resuelve invocando un proceso externo con tiempo máximo:
//! - `ScriptNameLookup`: script de consulta por nombre (`CAS\tIUPAC\tSMILES`).
//! - `ScriptCasLookup`: script de consulta por CAS (una línea con el SMILES).
//! - `HspToolAdapter`: herramienta de parámetros de Hansen (salida tabular).

pub mod cas_lookup;
pub mod hsp_tool;
pub mod name_lookup;
pub mod process;

pub use cas_lookup::ScriptCasLookup;
pub use hsp_tool::HspToolAdapter;
pub use name_lookup::ScriptNameLookup;
pub use process::ProcessSpec;
