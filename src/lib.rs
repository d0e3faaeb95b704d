//! chemresolve
//!
//! Resolución de nombres de compuestos a identificadores canónicos (CAS,
//! IUPAC, SMILES) sobre tablas TSV:
//! - `config`: variables de entorno y `.env`.
//! - `errors`: errores fatales de la aplicación.
//! - `table`: lectura y escritura de tablas y del paquete JSON.
//! - `pipeline`: una ejecución completa sobre una tabla ya leída.

pub mod config;
pub mod errors;
pub mod pipeline;
pub mod table;

pub use config::AppConfig;
pub use errors::CoreError;
