use chem_domain::{BatchResult, CompoundQuery, Identifier, IdentitySource, ResolvedIdentity, ValidationWarning,
                  WarningKind};
use serde_json::json;
use uuid::Uuid;

#[test]
fn test_identity_serializes_sentinel_text() {
    // NotFound se serializa como el texto centinela, nunca como null
    let id = ResolvedIdentity::name_based("Not found".into(), "hex-1-ene".into(), "C=CCCCC".into());
    let v = serde_json::to_value(&id).unwrap();
    assert_eq!(v, json!({"cas": "Not found", "iupac": "hex-1-ene", "smiles": "C=CCCCC", "source": "NameBased"}));
    let back: ResolvedIdentity = serde_json::from_value(v).unwrap();
    assert_eq!(back.cas, Identifier::NotFound);
}

#[test]
fn test_batch_keeps_row_order_and_warnings() {
    let mut batch = BatchResult::new(Uuid::new_v4());
    batch.push_row(CompoundQuery::new("ethanol"),
                   ResolvedIdentity::name_based("64-17-5".into(), "ethanol".into(), "CCO".into()));
    batch.push_row(CompoundQuery::corrected("1-tetradecane", "1-tetradecene"),
                   ResolvedIdentity { cas: "1120-36-1".into(),
                                      iupac: "1-tetradecene".into(),
                                      smiles: "CCCCCCCCCCCCC=C".into(),
                                      source: IdentitySource::CorrectedCas });
    batch.extend_warnings(vec![ValidationWarning::new(1, WarningKind::TypoCorrected, "nombre corregido")]);

    assert_eq!(batch.len(), 2);
    assert_eq!(batch.rows()[1].query.original_name(), "1-tetradecane");
    assert_eq!(batch.warnings_for_row(1).count(), 1);
    assert_eq!(batch.warnings_for_row(0).count(), 0);
    assert_eq!(batch.warnings_of(WarningKind::SmilesMismatch).count(), 0);
}

#[test]
fn test_cancellation_marker_keeps_first_row() {
    let mut batch = BatchResult::new(Uuid::new_v4());
    assert_eq!(batch.cancelled_at(), None);
    batch.mark_cancelled_at(3);
    batch.mark_cancelled_at(4);
    assert_eq!(batch.cancelled_at(), Some(3));
}

#[test]
fn test_warning_display_is_one_based() {
    let w = ValidationWarning::new(0, WarningKind::AlkeneMissingDoubleBond, "'1-hexene' sin enlace doble");
    assert_eq!(w.to_string(), "[fila 1] alkene_missing_double_bond: '1-hexene' sin enlace doble");
}

#[test]
fn test_identity_display() {
    let id = ResolvedIdentity::not_found();
    assert_eq!(id.to_string(), "<cas: Not found, iupac: Not found, smiles: Not found (name-based)>");
}
