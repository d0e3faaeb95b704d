//! Puertos reales contra scripts de shell que imitan a los de consulta.
#![cfg(unix)]

use chem_adapters::{HspToolAdapter, ProcessSpec, ScriptCasLookup, ScriptNameLookup};
use chem_core::{LookupError, NameLookupPort, PropertyStage, ResolutionEngine};
use chem_domain::{Identifier, IdentitySource, WarningKind};
use std::sync::Arc;
use std::time::Duration;

// `sh -c <script> stub <args...>`: los argumentos de cada llamada llegan como $1, $2...
fn shell(script: &str) -> ProcessSpec {
    ProcessSpec::new("sh", Duration::from_secs(5)).with_arg("-c")
                                                   .with_arg(script)
                                                   .with_arg("stub")
}

const NAME_SCRIPT: &str = r#"
case "$1" in
  ethanol) printf '64-17-5\tethanol\tCCO\n' ;;
  *) echo "ERROR: Request failed for $1" >&2; printf 'Not found\tNot found\tNot found\n' ;;
esac
"#;

const CAS_SCRIPT: &str = r#"
case "$1" in
  1120-36-1) echo 'CCCCCCCCCCCCC=C' ;;
  64-17-5) echo 'CCO' ;;
  *) echo 'Not found' ;;
esac
"#;

#[tokio::test]
async fn name_script_hit_and_miss() {
    let port = ScriptNameLookup::new(shell(NAME_SCRIPT));
    let hit = port.lookup_name("ethanol").await.unwrap();
    assert_eq!(hit.smiles, "CCO");
    assert_eq!(port.lookup_name("unobtainium").await, Err(LookupError::NotFound));
}

#[tokio::test]
async fn engine_over_scripts_resolves_tetradecane() {
    let name = Arc::new(ScriptNameLookup::new(shell(NAME_SCRIPT)));
    let cas = Arc::new(ScriptCasLookup::new(shell(CAS_SCRIPT)));
    let mut engine = ResolutionEngine::builder(name, cas).build();

    let batch = engine.resolve_batch(["ethanol", "1-tetradecane"]).await;
    assert_eq!(batch.rows()[0].identity.smiles, Identifier::Found("CCO".into()));
    let second = &batch.rows()[1].identity;
    assert_eq!(second.cas, Identifier::Found("1120-36-1".into()));
    assert_eq!(second.smiles, Identifier::Found("CCCCCCCCCCCCC=C".into()));
    assert_eq!(second.source, IdentitySource::CorrectedCas);
    assert_eq!(batch.warnings_of(WarningKind::TypoCorrected).count(), 1);
}

#[tokio::test]
async fn hsp_tool_output_becomes_property_table() {
    let tool = shell(r#"printf 'SMILES\tdD\tdP\tdH\n%s\t15.8\t8.8\t19.4\n' "$2""#);
    let adapter = HspToolAdapter::new(tool, vec!["-s".into(), "{smiles}".into()]);
    let name = Arc::new(ScriptNameLookup::new(shell(NAME_SCRIPT)));
    let cas = Arc::new(ScriptCasLookup::new(shell(CAS_SCRIPT)));
    let mut engine = ResolutionEngine::builder(name, cas).build();
    let batch = engine.resolve_batch(["ethanol", "unobtainium"]).await;

    let props = PropertyStage::new(Arc::new(adapter), Duration::from_secs(5)).compute_for(&batch).await;
    let ethanol = props[0].as_ref().unwrap();
    assert_eq!(ethanol.get("SMILES"), Some("CCO"));
    assert_eq!(ethanol.get("dH"), Some("19.4"));
    assert!(props[1].is_none());
}
