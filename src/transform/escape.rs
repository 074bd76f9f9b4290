//! SQL string literal escaping.

/// Double single quotes so the value can sit inside `'...'` in SQL text.
///
/// Not idempotent: escaping twice doubles the quotes again.
pub fn escape_sql(value: &str) -> String {
    value.replace('\'', "''")
}
