use super::columns;
use super::resolver::ColumnSchema;

/// Quote an SQL identifier, doubling embedded quotes.
///
/// Extra column names come straight from the file header, so they are always
/// quoted.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `CREATE TABLE` statement for the match table.
///
/// Fixed columns come first, followed by one `TEXT` column per extra column in
/// registry order.
///
/// # Example
///
/// ```
/// use psmdb::schema::{create_match_table_sql, ColumnSchema};
///
/// let schema = ColumnSchema::resolve("spectrum_title\tpeptide\tq_value").unwrap();
/// let sql = create_match_table_sql(&schema);
/// assert!(sql.ends_with("\"q_value\" TEXT)"));
/// ```
pub fn create_match_table_sql(schema: &ColumnSchema) -> String {
    let mut sql = format!(
        "CREATE TABLE {} ({} INTEGER PRIMARY KEY, {} REAL, {} TEXT, {} TEXT, {} REAL, {} BLOB, {} REAL, {} TEXT",
        columns::MATCH_TABLE,
        columns::ROW_ID,
        columns::MZ,
        columns::TITLE,
        columns::SEQUENCE,
        columns::MASS_ERROR,
        columns::BLOB,
        columns::SCORE,
        columns::MODIFICATION_TEXT,
    );
    for name in schema.extras().names() {
        sql.push_str(", ");
        sql.push_str(&quote_identifier(name));
        sql.push_str(" TEXT");
    }
    sql.push(')');
    sql
}

/// `CREATE TABLE` statement for the page index table
pub fn create_page_table_sql() -> String {
    format!(
        "CREATE TABLE {} ({} INTEGER NOT NULL, {} INTEGER PRIMARY KEY)",
        columns::PAGE_TABLE,
        columns::PAGE_NUMBER,
        columns::ROW_ID,
    )
}

/// Parameterized insert for one match row; parameter `?n` binds storage position `n`.
pub fn insert_match_sql(schema: &ColumnSchema) -> String {
    let mut names: Vec<String> = columns::FIXED_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .collect();
    names.extend(schema.extras().names().map(quote_identifier));

    let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("?{i}")).collect();

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        columns::MATCH_TABLE,
        names.join(", "),
        placeholders.join(", ")
    )
}

/// Parameterized insert for one page index entry: `(page number, row id)`
pub fn insert_page_sql() -> String {
    format!(
        "INSERT INTO {} ({}, {}) VALUES (?1, ?2)",
        columns::PAGE_TABLE,
        columns::PAGE_NUMBER,
        columns::ROW_ID,
    )
}
