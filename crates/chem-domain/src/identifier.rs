// identifier.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Texto centinela para un identificador no resuelto. Coincide con el que
/// emiten los scripts de consulta externos, de modo que la tabla de salida
/// conserva el mismo formato.
pub const NOT_FOUND_TEXT: &str = "Not found";

/// Valor de un identificador químico (CAS, IUPAC o SMILES).
///
/// `NotFound` es un centinela explícito: nunca se representa como cadena
/// vacía ni como `null`, así las comprobaciones por subcadena aguas abajo
/// son predecibles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Identifier {
    Found(String),
    #[default]
    NotFound,
}

impl Identifier {
    /// Interpreta texto crudo de una fuente externa. Cadenas vacías y el
    /// centinela `Not found` (sin distinguir mayúsculas) pasan a `NotFound`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NOT_FOUND_TEXT) {
            Identifier::NotFound
        } else {
            Identifier::Found(trimmed.to_string())
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Identifier::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        !self.is_found()
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Identifier::Found(v) => Some(v.as_str()),
            Identifier::NotFound => None,
        }
    }

    /// Texto para tablas y mensajes: el valor o el centinela.
    pub fn as_text(&self) -> &str {
        self.as_deref().unwrap_or(NOT_FOUND_TEXT)
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Identifier::parse(&value)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier::parse(value)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.as_text().to_string()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

/// Heurística de forma para números CAS: sólo dígitos una vez eliminados
/// los guiones. Es la regla con la que se elige el CAS entre los sinónimos
/// de un compuesto; no verifica el dígito de control.
pub fn looks_like_cas(candidate: &str) -> bool {
    let digits: String = candidate.trim().chars().filter(|c| *c != '-').collect();
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
