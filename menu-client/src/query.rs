//! PostgREST query builder
//!
//! Builds the query string of a `/rest/v1/{table}` request: column
//! projection with embedded resources, equality filters and ordering,
//! including ordering inside an embedded (joined) collection.

/// One `order` term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
    /// Embedded resource the ordering applies to (`menu_items.order=...`)
    pub referenced_table: Option<String>,
}

impl Order {
    fn key(&self) -> String {
        match &self.referenced_table {
            Some(table) => format!("{table}.order"),
            None => "order".to_string(),
        }
    }

    fn term(&self) -> String {
        let direction = if self.ascending { "asc" } else { "desc" };
        format!("{}.{}", self.column, direction)
    }
}

/// Query against one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    table: String,
    select: Option<String>,
    filters: Vec<(String, String)>,
    orders: Vec<Order>,
}

impl TableQuery {
    /// Start a query on `table`
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            select: None,
            filters: Vec::new(),
            orders: Vec::new(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Column projection, e.g. `id, name, categories (name)`
    ///
    /// Whitespace outside double quotes is dropped.
    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(clean_columns(columns));
        self
    }

    /// `column=eq.value`
    pub fn eq(mut self, column: &str, value: impl std::fmt::Display) -> Self {
        self.filters.push((column.to_string(), format!("eq.{value}")));
        self
    }

    /// Order the top-level rows
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.orders.push(Order {
            column: column.to_string(),
            ascending,
            referenced_table: None,
        });
        self
    }

    /// Order the rows of an embedded collection
    pub fn order_referenced(mut self, table: &str, column: &str, ascending: bool) -> Self {
        self.orders.push(Order {
            column: column.to_string(),
            ascending,
            referenced_table: Some(table.to_string()),
        });
        self
    }

    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Query string pairs in a stable order: select, filters, orders
    ///
    /// Several orderings of the same collection are merged into one
    /// comma-separated `order` value.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(select) = &self.select {
            pairs.push(("select".to_string(), select.clone()));
        }
        pairs.extend(self.filters.iter().cloned());

        let mut order_pairs: Vec<(String, String)> = Vec::new();
        for order in &self.orders {
            let key = order.key();
            match order_pairs.iter_mut().find(|(k, _)| *k == key) {
                Some((_, value)) => {
                    value.push(',');
                    value.push_str(&order.term());
                }
                None => order_pairs.push((key, order.term())),
            }
        }
        pairs.extend(order_pairs);
        pairs
    }
}

fn clean_columns(columns: &str) -> String {
    let mut quoted = false;
    columns
        .chars()
        .filter(|c| {
            if *c == '"' {
                quoted = !quoted;
            }
            quoted || !c.is_whitespace()
        })
        .collect()
}
