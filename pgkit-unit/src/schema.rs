//! Schema introspection used to check what a test left behind.

use pgkit_core::{DataProvider, PgResult};

const TABLES_QUERY: &str =
    "SELECT table_name::text FROM information_schema.tables WHERE table_schema = $1";

/// List the names of the tables in `schema`.
///
/// Names come back in whatever order the catalog returns them; sort them
/// before comparing.
pub fn list_tables<P>(db: &mut P, schema: &str) -> PgResult<Vec<String>>
where
    P: DataProvider + ?Sized,
{
    let rows = db.query(TABLES_QUERY, &[&schema])?;

    let mut tables = Vec::with_capacity(rows.len());
    for row in rows {
        tables.push(row.try_get::<_, String>(0)?);
    }

    Ok(tables)
}
