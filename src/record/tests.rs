use super::*;
use crate::schema::{ColumnSchema, FixedRole};
use crate::vocabulary::ModificationVocabulary;
use proptest::prelude::*;

const HEADER: &str = "spectrum_title\tpeptide\texp_mass\tpep_mass\tmodification\tscore\tcharge";

fn builder(header: &str) -> MatchRecordBuilder {
    let schema = ColumnSchema::resolve(header).unwrap();
    MatchRecordBuilder::new(schema).spectrum_file("run01.mgf")
}

fn split(line: &str) -> Vec<&str> {
    line.split('\t').collect()
}

#[test]
fn test_build_derives_mz_without_mz_column() {
    let mut builder = builder(HEADER);
    let record = builder
        .build(1, &split("scan=10\tPEPTIDEK\t1000.5\t1000.49\t-\t42.5\t2"))
        .unwrap();

    assert_eq!(record.row_id, 1);
    assert_eq!(record.title, "scan=10");
    assert_eq!(record.rank, 1);
    assert_eq!(record.spectrum_key, "run01.mgf_cus_scan=10_rank_1");
    assert_eq!(record.sequence, "PEPTIDEK");
    assert!(record.modifications.is_empty());
    assert_eq!(record.modification_text, "-");
    assert!((record.mz - 500.25).abs() < 1e-9);
    assert!((record.mass_error - 0.01).abs() < 1e-9);
    assert_eq!(record.score, 42.5);
    assert_eq!(record.charge, 2);
    assert!(record.extras.is_empty());
}

#[test]
fn test_build_uses_mz_column_when_present() {
    let header = format!("{HEADER}\tmz");
    let mut builder = builder(&header);
    let record = builder
        .build(1, &split("s1\tPEPTIDEK\t1000.5\t1000.49\t-\t1\t2\t501.0"))
        .unwrap();
    assert_eq!(record.mz, 501.0);
}

#[test]
fn test_build_collects_extras_by_name() {
    let header = format!("protein\t{HEADER}\tq_value");
    let mut builder = builder(&header);
    let record = builder
        .build(3, &split("P12345\ts1\tPEPTIDEK\t1000\t1001\t-\t1\t2\t0.001"))
        .unwrap();

    assert_eq!(record.extras.len(), 2);
    assert_eq!(record.extras.get_index(0), Some((&"protein".to_string(), &"P12345".to_string())));
    assert_eq!(record.extras["q_value"], "0.001");
    assert!((record.mass_error + 1.0).abs() < 1e-9);
    assert!((record.abs_mass_error() - 1.0).abs() < 1e-9);
}

#[test]
fn test_ranks_follow_file_order() {
    let mut builder = builder(HEADER);
    let rows = [
        "s1\tAAA\t100\t100\t-\t3\t1",
        "s1\tBBB\t100\t100\t-\t2\t1",
        "s2\tCCC\t100\t100\t-\t9\t1",
        "s1\tDDD\t100\t100\t-\t1\t1",
    ];
    let ranks: Vec<(String, u32)> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let record = builder.build(i as u64 + 1, &split(row)).unwrap();
            (record.title, record.rank)
        })
        .collect();

    assert_eq!(
        ranks,
        vec![
            ("s1".to_string(), 1),
            ("s1".to_string(), 2),
            ("s2".to_string(), 1),
            ("s1".to_string(), 3),
        ]
    );
    assert_eq!(builder.ranks().distinct_titles(), 2);
    assert_eq!(builder.ranks().current_rank("s1"), Some(3));
}

#[test]
fn test_modification_with_mass_delta() {
    let mut builder = builder(HEADER);
    let record = builder
        .build(1, &split("s1\tPEPTMDEK\t100\t100\tOxidation@5[15.99]\t1\t2"))
        .unwrap();

    assert_eq!(record.modifications, vec![ModificationMatch::new("Oxidation", 5)]);
    assert_eq!(builder.vocabulary().to_vec(), vec!["Oxidation"]);

    builder
        .build(2, &split("s2\tPEPTMDEK\t100\t100\tOxidation@5[15.99]\t1\t2"))
        .unwrap();
    assert_eq!(builder.vocabulary().len(), 1);
}

#[test]
fn test_parse_modifications_list() {
    let mut vocab = ModificationVocabulary::new();
    let mods = parse_modifications(
        "Carbamidomethyl@3[57.02];Phospho@7[79.97];Carbamidomethyl@9",
        NO_MODIFICATION,
        &mut vocab,
    )
    .unwrap();

    assert_eq!(
        mods,
        vec![
            ModificationMatch::new("Carbamidomethyl", 3),
            ModificationMatch::new("Phospho", 7),
            ModificationMatch::new("Carbamidomethyl", 9),
        ]
    );
    assert_eq!(vocab.to_vec(), vec!["Carbamidomethyl", "Phospho"]);
}

#[test]
fn test_parse_modifications_none_marker() {
    let mut vocab = ModificationVocabulary::new();
    assert!(parse_modifications("-", "-", &mut vocab).unwrap().is_empty());
    assert!(parse_modifications("", "-", &mut vocab).unwrap().is_empty());
    assert!(parse_modifications("none", "none", &mut vocab).unwrap().is_empty());
    assert!(vocab.is_empty());
}

#[test]
fn test_parse_modifications_rejects_malformed_tokens() {
    let mut vocab = ModificationVocabulary::new();
    for bad in ["Oxidation", "Oxidation@", "Oxidation@x[1]", "@5", "Oxidation@-1"] {
        let err = parse_modifications(bad, "-", &mut vocab).unwrap_err();
        assert!(
            matches!(err, RowParseError::InvalidModification { .. }),
            "{bad} gave {err:?}"
        );
    }
    assert!(vocab.is_empty());
}

#[test]
fn test_parse_modifications_rejects_empty_tokens() {
    let mut vocab = ModificationVocabulary::new();
    for bad in ["Oxidation@1;;Phospho@2", ";Oxidation@1", ";", "Oxidation@1;;"] {
        let err = parse_modifications(bad, "-", &mut vocab).unwrap_err();
        assert!(
            matches!(err, RowParseError::InvalidModification { reason: "empty token", .. }),
            "{bad} gave {err:?}"
        );
    }
    // Nothing from a rejected field reaches the vocabulary
    assert!(vocab.is_empty());

    let mods = parse_modifications("Oxidation@1;Phospho@2;", "-", &mut vocab).unwrap();
    assert_eq!(mods.len(), 2);
    assert_eq!(vocab.to_vec(), vec!["Oxidation", "Phospho"]);
}

#[test]
fn test_parse_modifications_rejects_position_zero() {
    let mut vocab = ModificationVocabulary::new();
    let err = parse_modifications("Oxidation@0[15.99]", "-", &mut vocab).unwrap_err();
    assert_eq!(
        err,
        RowParseError::InvalidModification {
            token: "Oxidation@0[15.99]".to_string(),
            reason: "positions are 1-based",
        }
    );
    assert!(parse_modifications("Oxidation@1", "-", &mut vocab).is_ok());
}

#[test]
fn test_zero_charge_fails_when_mz_is_derived() {
    let mut builder = builder(HEADER);
    let err = builder
        .build(1, &split("s1\tPEPTIDEK\t1000\t1000\t-\t1\t0"))
        .unwrap_err();
    assert_eq!(err, RowParseError::ZeroCharge { exp_mass: 1000.0 });
}

#[test]
fn test_zero_charge_is_fine_with_mz_column() {
    let header = format!("{HEADER}\tmz");
    let mut builder = builder(&header);
    let record = builder
        .build(1, &split("s1\tPEPTIDEK\t1000\t1000\t-\t1\t0\t500"))
        .unwrap();
    assert_eq!(record.mz, 500.0);
}

#[test]
fn test_invalid_numbers_are_fatal() {
    let mut builder = builder(HEADER);
    let err = builder
        .build(1, &split("s1\tPEPTIDEK\tabc\t1000\t-\t1\t2"))
        .unwrap_err();
    assert_eq!(
        err,
        RowParseError::InvalidNumber {
            column: "exp_mass",
            value: "abc".to_string()
        }
    );

    let err = builder
        .build(2, &split("s1\tPEPTIDEK\t1000\t1000\t-\tNaN\t2"))
        .unwrap_err();
    assert!(matches!(err, RowParseError::InvalidNumber { column: "score", .. }));

    let err = builder
        .build(3, &split("s1\tPEPTIDEK\t1000\t1000\t-\t1\t2.5"))
        .unwrap_err();
    assert!(matches!(err, RowParseError::InvalidNumber { column: "charge", .. }));

    // Failed rows never consumed a rank
    assert_eq!(builder.ranks().current_rank("s1"), None);
}

#[test]
fn test_missing_role_is_a_parse_error() {
    let mut builder = builder("spectrum_title\tpeptide\tscore");
    let err = builder.build(1, &split("s1\tPEPTIDEK\t1")).unwrap_err();
    assert_eq!(err, RowParseError::MissingRole(FixedRole::ExpMass));
}

#[test]
fn test_short_row_is_a_parse_error() {
    let mut builder = builder(HEADER);
    let err = builder.build(1, &split("s1\tPEPTIDEK\t1000")).unwrap_err();
    assert_eq!(
        err,
        RowParseError::MissingField {
            column: "pep_mass".to_string(),
            index: 3,
            found: 3
        }
    );
}

#[test]
fn test_to_spectrum_match() {
    let mut builder = builder(HEADER);
    let record = builder
        .build(1, &split("s1\tPEPTMDEK\t1000.5\t1000\tOxidation@5\t12\t3"))
        .unwrap();
    let spectrum_match = record.to_spectrum_match();

    assert_eq!(spectrum_match.key, record.spectrum_key);
    let assumption = &spectrum_match.best_assumption;
    assert_eq!(assumption.peptide.sequence, "PEPTMDEK");
    assert_eq!(assumption.peptide.modifications.len(), 1);
    assert_eq!(assumption.charge, 3);
    assert_eq!(assumption.mass_error, 0.5);
    assert_eq!(assumption.raw_score, 12.0);
    assert_eq!(assumption.rank, 1);
    assert_eq!(assumption.advocate, UNKNOWN_ADVOCATE);

    let second = builder
        .build(2, &split("s1\tPEPTLDEK\t1000.5\t1000\t-\t11\t3"))
        .unwrap()
        .to_spectrum_match();
    assert_eq!(second.best_assumption.rank, 2);
    assert!(second.key.ends_with("_rank_2"));
}

#[test]
fn test_derive_mz() {
    assert!((derive_mz(1000.0, 2).unwrap() - 500.0).abs() < 1e-9);
    assert!((derive_mz(999.0, -3).unwrap() + 333.0).abs() < 1e-9);
    assert!(derive_mz(1.0, 0).is_err());
}

proptest! {
    /// Each title appearing k times gets ranks 1..=k in file order
    #[test]
    fn prop_ranks_are_contiguous_per_title(titles in prop::collection::vec(0u8..6, 1..200)) {
        let mut tracker = RankTracker::new();
        let mut seen: std::collections::HashMap<u8, Vec<u32>> = std::collections::HashMap::new();

        for title in &titles {
            let rank = tracker.next_rank(&format!("spectrum {title}"));
            seen.entry(*title).or_default().push(rank);
        }

        for ranks in seen.values() {
            let expected: Vec<u32> = (1..=ranks.len() as u32).collect();
            prop_assert_eq!(ranks, &expected);
        }
    }

    /// Bracketed mass deltas never change the parsed name or position
    #[test]
    fn prop_modification_tokens_parse(
        mods in prop::collection::vec(("[A-Z][a-z]{2,10}", 1u32..60, -100.0f64..100.0), 1..5)
    ) {
        let field = mods
            .iter()
            .map(|(name, pos, delta)| format!("{name}@{pos}[{delta:.4}]"))
            .collect::<Vec<_>>()
            .join(";");

        let mut vocab = ModificationVocabulary::new();
        let parsed = parse_modifications(&field, NO_MODIFICATION, &mut vocab).unwrap();

        prop_assert_eq!(parsed.len(), mods.len());
        for (parsed, (name, pos, _)) in parsed.iter().zip(&mods) {
            prop_assert_eq!(&parsed.name, name);
            prop_assert_eq!(parsed.position, *pos);
        }
        for (name, _, _) in &mods {
            prop_assert!(vocab.contains(name));
        }
    }
}
