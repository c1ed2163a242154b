pub struct QueryBuilder;

impl QueryBuilder {
    /// Build a SELECT over the given columns of a whole table
    pub fn build_select_query(table: &str, columns: &[&str]) -> String {
        format!("SELECT {} FROM {}", columns.join(","), table)
    }

    /// Build an INSERT with one bind marker per column
    pub fn build_insert_query(table: &str, columns: &[&str]) -> String {
        let markers = vec!["?"; columns.len()].join(",");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(","),
            markers
        )
    }

    /// Build a DELETE matching every key column by equality
    pub fn build_delete_query(table: &str, key_columns: &[&str]) -> String {
        let where_clause = key_columns
            .iter()
            .map(|column| format!("{} = ?", column))
            .collect::<Vec<_>>()
            .join(" AND ");
        format!("DELETE FROM {} WHERE {}", table, where_clause)
    }
}
