//! Entrada y salida tabular.
//!
//! - Tabla de entrada: TSV con cabecera y una columna `name` (sin distinguir
//!   mayúsculas). Se conservan todas las columnas y su orden.
//! - Tabla de salida: columnas de entrada + `CAS`, `IUPAC`, `SMILES` +
//!   columnas de propiedades (unión en orden de primera aparición).
//! - Tablas auxiliares de correcciones y CAS esperados: dos columnas, sin
//!   cabecera, `#` para comentarios.
//! - Paquete de resultados JSON con la huella del lote.

use chem_core::constants::ENGINE_VERSION;
use chem_core::{batch_fingerprint, CorrectionTable, ExpectedCasTable, PropertyTable};
use chem_domain::BatchResult;
use indexmap::IndexSet;
use serde::Serialize;
use std::io::{Read, Write};

use crate::errors::CoreError;

pub const NAME_COLUMN: &str = "name";
pub const IDENTITY_COLUMNS: [&str; 3] = ["CAS", "IUPAC", "SMILES"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTable {
    headers: Vec<String>,
    records: Vec<Vec<String>>,
    name_column: usize,
}

impl InputTable {
    /// Lee una tabla separada por tabuladores.
    ///
    /// # Errores
    /// `CoreError::Table` si falta la columna `name` o el TSV es ilegible.
    pub fn read_tsv<R: Read>(reader: R) -> Result<Self, CoreError> {
        let mut rdr = csv::ReaderBuilder::new().delimiter(b'\t')
                                               .has_headers(true)
                                               .flexible(true)
                                               .from_reader(reader);
        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
        let name_column = headers.iter()
                                 .position(|h| h.eq_ignore_ascii_case(NAME_COLUMN))
                                 .ok_or_else(|| CoreError::Table(format!("falta la columna '{NAME_COLUMN}' (cabecera: {headers:?})")))?;

        let mut records = Vec::new();
        for record in rdr.records() {
            let mut fields: Vec<String> = record?.iter().map(str::to_string).collect();
            fields.resize(headers.len(), String::new());
            records.push(fields);
        }
        Ok(Self { headers, records, name_column })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Nombres de compuesto en orden de fila.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r[self.name_column].as_str())
    }

    /// Escribe la tabla enriquecida con identidades y propiedades.
    ///
    /// `properties` debe estar alineado con `batch.rows()` (puede estar vacío
    /// si no se calcularon).
    pub fn write_tsv<W: Write>(&self,
                               writer: W,
                               batch: &BatchResult,
                               properties: &[Option<PropertyTable>])
                               -> Result<(), CoreError> {
        if batch.len() != self.records.len() {
            return Err(CoreError::Internal(format!("{} filas de entrada y {} resultados", self.records.len(), batch.len())));
        }
        let property_columns: IndexSet<&str> = properties.iter().flatten().flat_map(|t| t.columns()).collect();

        let mut wtr = csv::WriterBuilder::new().delimiter(b'\t').from_writer(writer);
        let header = self.headers
                         .iter()
                         .map(String::as_str)
                         .chain(IDENTITY_COLUMNS)
                         .chain(property_columns.iter().copied());
        wtr.write_record(header)?;

        for (index, (record, row)) in self.records.iter().zip(batch.rows()).enumerate() {
            let props = properties.get(index).and_then(Option::as_ref);
            let identity = [row.identity.cas.as_text(), row.identity.iupac.as_text(), row.identity.smiles.as_text()];
            let extra = property_columns.iter().map(|c| props.and_then(|p| p.get(c)).unwrap_or(""));
            wtr.write_record(record.iter().map(String::as_str).chain(identity).chain(extra))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Lee pares `clave\tvalor` (sin cabecera, `#` comenta la línea).
pub fn read_pairs<R: Read>(reader: R) -> Result<Vec<(String, String)>, CoreError> {
    let mut rdr = csv::ReaderBuilder::new().delimiter(b'\t')
                                           .has_headers(false)
                                           .flexible(true)
                                           .comment(Some(b'#'))
                                           .from_reader(reader);
    let mut pairs = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        match (record.get(0), record.get(1), record.len()) {
            (Some(k), Some(v), 2) => pairs.push((k.trim().to_string(), v.trim().to_string())),
            (Some(k), None, 1) if k.trim().is_empty() => {}
            _ => return Err(CoreError::Table(format!("línea {line}: se esperaban 2 columnas, llegaron {}", record.len()))),
        }
    }
    Ok(pairs)
}

/// Correcciones adicionales sobre la tabla integrada.
pub fn load_corrections<R: Read>(reader: R) -> Result<CorrectionTable, CoreError> {
    let mut table = CorrectionTable::empty();
    for (typo, corrected) in read_pairs(reader)? {
        table.insert(&typo, &corrected).map_err(|e| CoreError::Table(e.to_string()))?;
    }
    Ok(table)
}

/// CAS esperados adicionales sobre la tabla integrada.
pub fn load_expected_cas<R: Read>(reader: R) -> Result<ExpectedCasTable, CoreError> {
    let mut table = ExpectedCasTable::empty();
    for (name, cas) in read_pairs(reader)? {
        table.insert(&name, &cas).map_err(|e| CoreError::Table(e.to_string()))?;
    }
    Ok(table)
}

/// Paquete JSON con el lote completo (filas, advertencias, cancelación),
/// las propiedades por fila y la huella reproducible.
#[derive(Debug, Serialize)]
pub struct ResultsBundle<'a> {
    pub engine_version: &'static str,
    pub fingerprint: String,
    pub batch: &'a BatchResult,
    pub properties: &'a [Option<PropertyTable>],
}

impl<'a> ResultsBundle<'a> {
    pub fn new(batch: &'a BatchResult, properties: &'a [Option<PropertyTable>]) -> Result<Self, CoreError> {
        Ok(Self { engine_version: ENGINE_VERSION, fingerprint: batch_fingerprint(batch)?, batch, properties })
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), CoreError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
