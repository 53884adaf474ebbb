use super::*;

const FULL_HEADER: &str =
    "spectrum_title\tpeptide\texp_mass\tpep_mass\tmodification\tscore\tcharge";

#[test]
fn test_resolve_fixed_header_without_mz_or_extras() {
    let schema = ColumnSchema::resolve(FULL_HEADER).unwrap();

    assert_eq!(schema.width(), 7);
    assert_eq!(schema.index_of(FixedRole::SpectrumTitle), Some(0));
    assert_eq!(schema.index_of(FixedRole::Sequence), Some(1));
    assert_eq!(schema.index_of(FixedRole::ExpMass), Some(2));
    assert_eq!(schema.index_of(FixedRole::PepMass), Some(3));
    assert_eq!(schema.index_of(FixedRole::Modification), Some(4));
    assert_eq!(schema.index_of(FixedRole::Score), Some(5));
    assert_eq!(schema.index_of(FixedRole::Charge), Some(6));
    assert!(!schema.has(FixedRole::Mz));
    assert!(schema.extras().is_empty());
}

#[test]
fn test_resolve_extras_in_encounter_order() {
    let header = "q_value\tspectrum_title\tpeptide\tprotein\tmz\tdelta score";
    let schema = ColumnSchema::resolve(header).unwrap();

    assert_eq!(schema.index_of(FixedRole::SpectrumTitle), Some(1));
    assert_eq!(schema.index_of(FixedRole::Mz), Some(4));

    let extras: Vec<_> = schema.extra_columns().collect();
    assert_eq!(extras, vec![(0, "q_value"), (3, "protein"), (5, "delta score")]);

    assert_eq!(
        schema.role_at(3),
        Some(&ColumnRole::Extra {
            name: "protein".to_string(),
            position: 10
        })
    );
    assert_eq!(schema.extras().position("delta score"), Some(11));
}

#[test]
fn test_resolve_missing_spectrum_title_is_unsupported() {
    let err = ColumnSchema::resolve("title\tpeptide\tscore").unwrap_err();
    assert_eq!(err, SchemaError::MissingSpectrumTitle);

    let err = ColumnSchema::resolve("").unwrap_err();
    assert_eq!(err, SchemaError::EmptyInput);
}

#[test]
fn test_resolve_header_is_case_sensitive() {
    let err = ColumnSchema::resolve("Spectrum_Title\tpeptide").unwrap_err();
    assert_eq!(err, SchemaError::MissingSpectrumTitle);
}

#[test]
fn test_resolve_rejects_duplicates() {
    let err = ColumnSchema::resolve("spectrum_title\tscore\tscore").unwrap_err();
    assert_eq!(
        err,
        SchemaError::DuplicateColumn {
            name: "score".to_string(),
            index: 2
        }
    );

    let err = ColumnSchema::resolve("spectrum_title\tprotein\tprotein").unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateColumn { index: 2, .. }));
}

#[test]
fn test_resolve_leaves_stored_name_clashes_to_the_store() {
    // Identifier clashes are only detected when the table is created
    let schema = ColumnSchema::resolve("spectrum_title\tTitle\tProtein\tprotein").unwrap();
    assert_eq!(
        schema.extras().names().collect::<Vec<_>>(),
        vec!["Title", "Protein", "protein"]
    );
}

#[test]
fn test_resolve_rejects_empty_extra_name() {
    let err = ColumnSchema::resolve("spectrum_title\t\tpeptide").unwrap_err();
    assert_eq!(err, SchemaError::EmptyColumnName(1));
}

#[test]
fn test_resolve_drops_trailing_empty_tokens() {
    let schema = ColumnSchema::resolve(&format!("{FULL_HEADER}\t\t\r\n")).unwrap();
    assert_eq!(schema.width(), 7);
    assert!(schema.extras().is_empty());
    assert_eq!(schema, ColumnSchema::resolve(FULL_HEADER).unwrap());

    let schema = ColumnSchema::from_fields(["spectrum_title", "protein", ""]).unwrap();
    assert_eq!(schema.width(), 2);
    assert_eq!(schema.extras().position("protein"), Some(9));
}

#[test]
fn test_resolve_is_idempotent() {
    let header = "spectrum_title\tpeptide\tprotein\tq_value\r\n";
    let first = ColumnSchema::resolve(header).unwrap();
    let second = ColumnSchema::resolve(header).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.extras().names().collect::<Vec<_>>(), vec!["protein", "q_value"]);
}

#[test]
fn test_score_names() {
    let schema = ColumnSchema::resolve("spectrum_title\tscore\tprotein\tq_value").unwrap();
    assert_eq!(
        schema.score_names(),
        vec!["Score", "Modification", "protein", "q_value"]
    );
}

#[test]
fn test_create_match_table_sql_fixed_only() {
    let schema = ColumnSchema::resolve(FULL_HEADER).unwrap();
    assert_eq!(
        create_match_table_sql(&schema),
        "CREATE TABLE SpectrumMatch (RowId INTEGER PRIMARY KEY, Mz REAL, Title TEXT, \
         Sequence TEXT, MassError REAL, Blob BLOB, Score REAL, ModificationText TEXT)"
    );
}

#[test]
fn test_create_match_table_sql_quotes_extras() {
    let schema = ColumnSchema::resolve("spectrum_title\tdelta \"score\"\tq_value").unwrap();
    let sql = create_match_table_sql(&schema);
    assert!(sql.ends_with(", \"delta \"\"score\"\"\" TEXT, \"q_value\" TEXT)"));
}

#[test]
fn test_insert_sql_binds_every_column() {
    let schema = ColumnSchema::resolve("spectrum_title\tprotein").unwrap();
    assert_eq!(
        insert_match_sql(&schema),
        "INSERT INTO SpectrumMatch (RowId, Mz, Title, Sequence, MassError, Blob, Score, \
         ModificationText, \"protein\") VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
    );
    assert_eq!(
        insert_page_sql(),
        "INSERT INTO PageIndex (PageNumber, RowId) VALUES (?1, ?2)"
    );
}
