use std::path::Path;

use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use rusqlite::{params, params_from_iter, Connection, ToSql};

use crate::blob;
use crate::record::SpectrumMatch;
use crate::schema::{columns, quote_identifier};

use super::error::StoreError;
use super::{MatchStore, SqlValue};

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlValue::Null => ToSqlOutput::Owned(Value::Null),
            SqlValue::Integer(v) => ToSqlOutput::Owned(Value::Integer(*v)),
            SqlValue::Real(v) => ToSqlOutput::Owned(Value::Real(*v)),
            SqlValue::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            SqlValue::Blob(v) => ToSqlOutput::Borrowed(ValueRef::Blob(v.as_slice())),
        })
    }
}

/// A match row read back from the store
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMatch {
    /// Source line number
    pub row_id: u64,
    /// Page the row was committed in
    pub page: usize,
    /// Precursor m/z
    pub mz: f64,
    /// Spectrum title
    pub title: String,
    /// Peptide sequence
    pub sequence: String,
    /// Absolute mass error
    pub mass_error: f64,
    /// Raw score
    pub score: f64,
    /// Modification field as written in the source file
    pub modification_text: String,
    /// Decoded blob
    pub spectrum_match: SpectrumMatch,
    /// Extra column values in storage order
    pub extras: Vec<(String, Option<String>)>,
}

struct RawRow {
    row_id: i64,
    mz: f64,
    title: String,
    sequence: String,
    mass_error: f64,
    blob: Vec<u8>,
    score: f64,
    modification_text: String,
    extras: Vec<(String, Option<String>)>,
}

/// [`MatchStore`] backed by a SQLite database.
///
/// Transactions are tracked through SQLite's own autocommit flag, so a
/// transaction SQLite rolled back by itself is never reported as open.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Ok(Self::from_connection(conn))
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self::from_connection(conn))
    }

    /// Wrap an existing connection
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Give the connection back
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    /// Whether a table exists
    pub fn table_exists(&self, table: &str) -> Result<bool, StoreError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Column names of a table in declaration order
    pub fn table_columns(&self, table: &str) -> Result<Vec<String>, StoreError> {
        let sql = format!("PRAGMA table_info({})", quote_identifier(table));
        let mut stmt = self.conn.prepare(&sql)?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Number of stored matches
    pub fn match_count(&self) -> Result<u64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {}", columns::MATCH_TABLE);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Number of committed pages
    pub fn page_count(&self) -> Result<usize, StoreError> {
        let sql = format!(
            "SELECT COALESCE(MAX({}), 0) FROM {}",
            columns::PAGE_NUMBER,
            columns::PAGE_TABLE
        );
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Row ids of a page in commit order
    pub fn page_row_ids(&self, page: usize) -> Result<Vec<u64>, StoreError> {
        let sql = format!(
            "SELECT {row_id} FROM {table} WHERE {page} = ?1 ORDER BY {row_id}",
            row_id = columns::ROW_ID,
            table = columns::PAGE_TABLE,
            page = columns::PAGE_NUMBER,
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let ids = stmt
            .query_map(params![page as i64], |row| row.get::<_, i64>(0))?
            .map(|id| id.map(|id| id as u64))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    /// Load every match of a page, decoding the blobs
    pub fn load_page(&self, page: usize) -> Result<Vec<StoredMatch>, StoreError> {
        let sql = format!(
            "SELECT m.* FROM {matches} m JOIN {pages} p ON p.{row_id} = m.{row_id} \
             WHERE p.{page} = ?1 ORDER BY m.{row_id}",
            matches = columns::MATCH_TABLE,
            pages = columns::PAGE_TABLE,
            row_id = columns::ROW_ID,
            page = columns::PAGE_NUMBER,
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let fixed = columns::FIXED_COLUMNS.len();
        let extra_names: Vec<String> = stmt
            .column_names()
            .iter()
            .skip(fixed)
            .map(|name| name.to_string())
            .collect();

        let raw_rows = stmt
            .query_map(params![page as i64], |row| {
                let mut extras = Vec::with_capacity(extra_names.len());
                for (offset, name) in extra_names.iter().enumerate() {
                    extras.push((name.clone(), row.get::<_, Option<String>>(fixed + offset)?));
                }
                Ok(RawRow {
                    row_id: row.get(0)?,
                    mz: row.get(1)?,
                    title: row.get(2)?,
                    sequence: row.get(3)?,
                    mass_error: row.get(4)?,
                    blob: row.get(5)?,
                    score: row.get(6)?,
                    modification_text: row.get(7)?,
                    extras,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        raw_rows
            .into_iter()
            .map(|raw| {
                let row_id = raw.row_id as u64;
                let spectrum_match = blob::decode(&raw.blob)
                    .map_err(|source| StoreError::Blob { row_id, source })?;
                Ok(StoredMatch {
                    row_id,
                    page,
                    mz: raw.mz,
                    title: raw.title,
                    sequence: raw.sequence,
                    mass_error: raw.mass_error,
                    score: raw.score,
                    modification_text: raw.modification_text,
                    spectrum_match,
                    extras: raw.extras,
                })
            })
            .collect()
    }
}

impl MatchStore for SqliteStore {
    fn execute(&mut self, sql: &str) -> Result<(), StoreError> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn begin(&mut self) -> Result<(), StoreError> {
        if self.in_transaction() {
            return Err(StoreError::TransactionAlreadyOpen);
        }
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    fn execute_batch(
        &mut self,
        sql: &str,
        rows: &[Vec<SqlValue>],
    ) -> Result<Vec<usize>, StoreError> {
        if !self.in_transaction() {
            return Err(StoreError::NoTransaction);
        }
        let mut stmt = self.conn.prepare_cached(sql)?;
        let mut affected = Vec::with_capacity(rows.len());
        for row in rows {
            affected.push(stmt.execute(params_from_iter(row.iter()))?);
        }
        Ok(affected)
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        if !self.in_transaction() {
            return Err(StoreError::NoTransaction);
        }
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    /// Rolling back without an open transaction is a no-op.
    fn rollback(&mut self) -> Result<(), StoreError> {
        if self.in_transaction() {
            self.conn.execute_batch("ROLLBACK")?;
        }
        Ok(())
    }

    fn in_transaction(&self) -> bool {
        !self.conn.is_autocommit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_table() -> SqliteStore {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .execute("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT, data BLOB, x REAL)")
            .unwrap();
        store
    }

    fn row(id: i64) -> Vec<SqlValue> {
        vec![
            SqlValue::Integer(id),
            SqlValue::Text(format!("row {id}")),
            SqlValue::Blob(vec![1, 2, 3]),
            SqlValue::Null,
        ]
    }

    fn count(store: &SqliteStore) -> i64 {
        store
            .connection()
            .query_row("SELECT COUNT(*) FROM t", [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn test_batch_commit() {
        let mut store = store_with_table();
        let sql = "INSERT INTO t (id, name, data, x) VALUES (?1, ?2, ?3, ?4)";

        assert!(!store.in_transaction());
        store.begin().unwrap();
        assert!(store.in_transaction());

        let affected = store.execute_batch(sql, &[row(1), row(2), row(3)]).unwrap();
        assert_eq!(affected, vec![1, 1, 1]);
        store.commit().unwrap();

        assert!(!store.in_transaction());
        assert_eq!(count(&store), 3);
    }

    #[test]
    fn test_rollback_discards_batch() {
        let mut store = store_with_table();
        let sql = "INSERT INTO t (id, name, data, x) VALUES (?1, ?2, ?3, ?4)";

        store.begin().unwrap();
        store.execute_batch(sql, &[row(1), row(2)]).unwrap();
        store.rollback().unwrap();

        assert_eq!(count(&store), 0);
        // A second rollback has nothing left to undo
        store.rollback().unwrap();
    }

    #[test]
    fn test_transaction_misuse() {
        let mut store = store_with_table();
        let sql = "INSERT INTO t (id, name, data, x) VALUES (?1, ?2, ?3, ?4)";

        assert!(matches!(
            store.execute_batch(sql, &[row(1)]),
            Err(StoreError::NoTransaction)
        ));
        assert!(matches!(store.commit(), Err(StoreError::NoTransaction)));

        store.begin().unwrap();
        assert!(matches!(store.begin(), Err(StoreError::TransactionAlreadyOpen)));
        store.rollback().unwrap();
    }

    #[test]
    fn test_constraint_violation_is_reported() {
        let mut store = store_with_table();
        let sql = "INSERT INTO t (id, name, data, x) VALUES (?1, ?2, ?3, ?4)";

        store.begin().unwrap();
        let err = store.execute_batch(sql, &[row(1), row(1)]).unwrap_err();
        assert!(matches!(err, StoreError::Sqlite(_)));
        store.rollback().unwrap();
        assert_eq!(count(&store), 0);
    }

    #[test]
    fn test_table_introspection() {
        let store = store_with_table();
        assert!(store.table_exists("t").unwrap());
        assert!(!store.table_exists("missing").unwrap());
        assert_eq!(
            store.table_columns("t").unwrap(),
            vec!["id", "name", "data", "x"]
        );
    }
}
