use chem_adapters::{HspToolAdapter, ProcessSpec, ScriptCasLookup, ScriptNameLookup};
use chem_core::{CancelFlag, CorrectionTable, ExpectedCasTable, PropertyStage, ResolutionEngine};
use chem_policies::PacingPolicy;
use chemresolve::config::AppConfig;
use chemresolve::errors::CoreError;
use chemresolve::pipeline::run_table;
use chemresolve::table::{load_corrections, load_expected_cas, InputTable, ResultsBundle};
use clap::Parser;
use log::{error, info, warn};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Resuelve nombres de compuestos a CAS, IUPAC y SMILES.
#[derive(Parser, Debug)]
#[command(name = "chemresolve", version, about)]
struct Cli {
    /// Tabla TSV de entrada con una columna `name`.
    input: PathBuf,

    /// Tabla TSV de salida (por defecto `<entrada>_resolved.tsv`).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Escribe además el paquete JSON de resultados.
    #[arg(long)]
    bundle: Option<PathBuf>,

    /// Sin pausas entre filas (servicios locales o stubs).
    #[arg(long)]
    no_pacing: bool,

    /// No calcula propiedades aunque haya herramienta configurada.
    #[arg(long)]
    skip_properties: bool,
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_else(|| "compounds".to_string());
    input.with_file_name(format!("{stem}_resolved.tsv"))
}

fn load_tables(config: &AppConfig) -> Result<(CorrectionTable, ExpectedCasTable), CoreError> {
    let mut corrections = CorrectionTable::builtin();
    if let Some(path) = &config.corrections_file {
        let extra = load_corrections(BufReader::new(File::open(path)?))?;
        info!("{} correcciones cargadas de {}", extra.len(), path.display());
        corrections.merge(extra);
    }
    let mut expected_cas = ExpectedCasTable::builtin();
    if let Some(path) = &config.expected_cas_file {
        let extra = load_expected_cas(BufReader::new(File::open(path)?))?;
        info!("{} CAS esperados cargados de {}", extra.len(), path.display());
        expected_cas.merge(extra);
    }
    Ok((corrections, expected_cas))
}

async fn run(cli: Cli) -> Result<(), CoreError> {
    let config = AppConfig::from_env()?;
    let (corrections, expected_cas) = load_tables(&config)?;
    let table = InputTable::read_tsv(BufReader::new(File::open(&cli.input)?))?;
    info!("{} filas leídas de {}", table.len(), cli.input.display());

    let lookup = &config.lookup;
    let name_port = ScriptNameLookup::new(ProcessSpec::new(&lookup.python_bin, lookup.timeout).with_arg(lookup.name_script.to_string_lossy()));
    let cas_port = ScriptCasLookup::new(ProcessSpec::new(&lookup.python_bin, lookup.timeout).with_arg(lookup.cas_script.to_string_lossy()));
    let pacing = if cli.no_pacing { PacingPolicy::Disabled } else { config.pacing };

    let cancel = CancelFlag::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupción recibida: se abandonan las filas restantes");
            on_signal.cancel();
        }
    });

    let mut engine = ResolutionEngine::builder(Arc::new(name_port), Arc::new(cas_port)).corrections(corrections)
                                                                                         .expected_cas(expected_cas)
                                                                                         .pacing(pacing)
                                                                                         .lookup_timeout(lookup.timeout)
                                                                                         .cancel_flag(cancel.clone())
                                                                                         .build();

    let stage = match (&config.hsp, cli.skip_properties) {
        (Some(hsp), false) => {
            let adapter = HspToolAdapter::new(ProcessSpec::new(&hsp.tool, hsp.timeout), hsp.args.clone());
            Some(PropertyStage::new(Arc::new(adapter), hsp.timeout).with_cancel_flag(cancel))
        }
        _ => None,
    };

    let out = run_table(&mut engine, stage.as_ref(), &table).await;

    let output = cli.output.unwrap_or_else(|| default_output(&cli.input));
    table.write_tsv(BufWriter::new(File::create(&output)?), &out.batch, &out.properties)?;
    info!("Tabla escrita en {}", output.display());

    if let Some(path) = cli.bundle {
        ResultsBundle::new(&out.batch, &out.properties)?.write_json(BufWriter::new(File::create(&path)?))?;
        info!("Paquete de resultados escrito en {}", path.display());
    }
    if let Some(row) = out.batch.cancelled_at() {
        warn!("Lote cancelado en la fila {}; las filas restantes quedan como 'Not found'", row + 1);
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{e}");
        std::process::exit(1);
    }
}
