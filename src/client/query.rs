use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A read against one gateway table, rendered as PostgREST query params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table: String,
    columns: String,
    filters: Vec<(String, String)>,
    order: Option<(String, Direction)>,
    limit: Option<usize>,
}

impl Query {
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            table: name.into(),
            columns: "*".to_string(),
            filters: vec![],
            order: None,
            limit: None,
        }
    }

    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.filter(column, format!("eq.{}", value))
    }

    pub fn gte(self, column: &str, value: impl Display) -> Self {
        self.filter(column, format!("gte.{}", value))
    }

    pub fn in_list<S: AsRef<str>>(self, column: &str, values: &[S]) -> Self {
        let joined = values
            .iter()
            .map(|v| quote_list_item(v.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        self.filter(column, format!("in.({})", joined))
    }

    pub fn order(mut self, column: &str, direction: Direction) -> Self {
        self.order = Some((column.to_string(), direction));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Filters only, for updates.
    pub fn filter_params(&self) -> Vec<(String, String)> {
        self.filters.clone()
    }

    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.columns.clone())];
        params.extend(self.filters.iter().cloned());
        if let Some((column, direction)) = &self.order {
            params.push((
                "order".to_string(),
                format!("{}.{}", column, direction.as_str()),
            ));
        }
        if let Some(n) = self.limit {
            params.push(("limit".to_string(), n.to_string()));
        }
        params
    }

    fn filter(mut self, column: &str, expr: String) -> Self {
        self.filters.push((column.to_string(), expr));
        self
    }
}

fn quote_list_item(value: &str) -> String {
    if value.contains([',', '(', ')', '"', ' ']) {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(query: &Query) -> Vec<(String, String)> {
        query.params()
    }

    #[test]
    fn renders_filters_order_and_limit_in_order() {
        let query = Query::table("reviews")
            .eq("is_approved", true)
            .order("created_at", Direction::Desc)
            .limit(10);

        assert_eq!(
            pairs(&query),
            vec![
                ("select".to_string(), "*".to_string()),
                ("is_approved".to_string(), "eq.true".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
        assert_eq!(query.table_name(), "reviews");
    }

    #[test]
    fn in_list_quotes_reserved_characters() {
        let query = Query::table("messages")
            .select("id")
            .in_list("project_id", &["a1", "b,2"]);

        assert_eq!(
            query.filter_params(),
            vec![("project_id".to_string(), "in.(a1,\"b,2\")".to_string())]
        );
        assert_eq!(query.params()[0], ("select".to_string(), "id".to_string()));
    }
}
