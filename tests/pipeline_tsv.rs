//! Ejecución completa sobre tablas en memoria con puertos stub.

use async_trait::async_trait;
use chem_core::{CasLookupPort, LookupError, NameLookupHit, NameLookupPort, PropertyComputationPort, PropertyStage,
                PropertyTable, ResolutionEngine};
use chem_domain::WarningKind;
use chemresolve::pipeline::run_table;
use chemresolve::table::{InputTable, ResultsBundle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

struct Names;

#[async_trait]
impl NameLookupPort for Names {
    async fn lookup_name(&self, name: &str) -> Result<NameLookupHit, LookupError> {
        match name {
            "ethanol" | "EtOH" => Ok(NameLookupHit::new("64-17-5", "ethanol", "CCO")),
            "1-hexene" => Ok(NameLookupHit::new("592-41-6", "hex-1-ene", "CCCCCC")),
            _ => Err(LookupError::NotFound),
        }
    }
}

struct Cas;

#[async_trait]
impl CasLookupPort for Cas {
    async fn lookup_cas(&self, cas: &str, _name: &str) -> Result<String, LookupError> {
        match cas {
            "1120-36-1" => Ok("CCCCCCCCCCCCC=C".into()),
            _ => Err(LookupError::Transport("503 Service Unavailable".into())),
        }
    }
}

#[derive(Default)]
struct Hsp {
    calls: AtomicUsize,
}

#[async_trait]
impl PropertyComputationPort for Hsp {
    async fn compute(&self, smiles: &str) -> Result<PropertyTable, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(PropertyTable::new().with_value("dD", format!("{}", smiles.len())))
    }
}

const INPUT: &str = "Name\tsupplier\nethanol\tacme\n1-tetradecane\tacme\nEtOH\tother\n1-hexene\t\nunobtainium\tnone\n";

#[tokio::test]
async fn resolves_table_and_writes_enriched_tsv() {
    let table = InputTable::read_tsv(INPUT.as_bytes()).unwrap();
    let mut engine = ResolutionEngine::builder(Arc::new(Names), Arc::new(Cas)).build();
    let hsp = Arc::new(Hsp::default());
    let stage = PropertyStage::new(hsp.clone(), Duration::from_secs(1));

    let out = run_table(&mut engine, Some(&stage), &table).await;
    assert_eq!(out.batch.len(), 5);
    assert_eq!(out.properties.len(), 5);
    // CCO, CCCCCCCCCCCCC=C, CCCCCC: EtOH reutiliza el cálculo de ethanol
    assert_eq!(hsp.calls.load(Ordering::SeqCst), 3);

    let kinds: Vec<WarningKind> = out.batch.warnings().iter().map(|w| w.kind).collect();
    assert_eq!(kinds, vec![WarningKind::TypoCorrected, WarningKind::AlkeneMissingDoubleBond]);

    let mut buf = Vec::new();
    table.write_tsv(&mut buf, &out.batch, &out.properties).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Name\tsupplier\tCAS\tIUPAC\tSMILES\tdD");
    assert_eq!(lines[1], "ethanol\tacme\t64-17-5\tethanol\tCCO\t3");
    assert_eq!(lines[2], "1-tetradecane\tacme\t1120-36-1\t1-tetradecene\tCCCCCCCCCCCCC=C\t15");
    assert_eq!(lines[5], "unobtainium\tnone\tNot found\tNot found\tNot found\t");
}

#[tokio::test]
async fn bundle_fingerprint_ignores_run_id() {
    let table = InputTable::read_tsv(INPUT.as_bytes()).unwrap();
    let mut first = ResolutionEngine::builder(Arc::new(Names), Arc::new(Cas)).build();
    let mut second = ResolutionEngine::builder(Arc::new(Names), Arc::new(Cas)).build();
    let a = run_table(&mut first, None, &table).await;
    let b = run_table(&mut second, None, &table).await;
    assert!(a.properties.is_empty());

    let fa = ResultsBundle::new(&a.batch, &a.properties).unwrap().fingerprint;
    let fb = ResultsBundle::new(&b.batch, &b.properties).unwrap().fingerprint;
    assert_eq!(fa, fb);
}

#[tokio::test]
async fn cancelled_run_skips_properties_but_keeps_rows() {
    let table = InputTable::read_tsv(INPUT.as_bytes()).unwrap();
    let mut engine = ResolutionEngine::builder(Arc::new(Names), Arc::new(Cas)).build();
    engine.cancel_flag().cancel();
    let hsp = Arc::new(Hsp::default());
    let stage = PropertyStage::new(hsp.clone(), Duration::from_secs(1));

    let out = run_table(&mut engine, Some(&stage), &table).await;
    assert_eq!(out.batch.len(), 5);
    assert_eq!(out.batch.cancelled_at(), Some(0));
    assert!(out.properties.is_empty());
    assert_eq!(hsp.calls.load(Ordering::SeqCst), 0);

    let mut buf = Vec::new();
    table.write_tsv(&mut buf, &out.batch, &out.properties).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 6);
}
