//! Query parameter builders for the store's REST dialect.
//!
//! The store understands PostgREST-style query strings: ordering as
//! `order=column.direction` and filters as `column=op.value`. Only the
//! operators the application actually issues are modeled.

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn wire(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Ordering of query results, rendered to the `order` parameter.
///
/// # Example
///
/// ```
/// use store_client::query::Order;
///
/// assert_eq!(Order::asc("id").to_param(), "id.asc");
/// assert_eq!(Order::desc("name").then_asc("id").to_param(), "name.desc,id.asc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    fields: Vec<(String, Direction)>,
}

impl Order {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            fields: vec![(field.into(), Direction::Asc)],
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            fields: vec![(field.into(), Direction::Desc)],
        }
    }

    pub fn then_asc(mut self, field: impl Into<String>) -> Self {
        self.fields.push((field.into(), Direction::Asc));
        self
    }

    pub fn then_desc(mut self, field: impl Into<String>) -> Self {
        self.fields.push((field.into(), Direction::Desc));
        self
    }

    pub fn to_param(&self) -> String {
        self.fields
            .iter()
            .map(|(field, direction)| format!("{field}.{}", direction.wire()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// A row filter, rendered to one `column=op.value` query pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Equality: `column=eq.value`
    Eq(String, String),
    /// Membership: `column=in.(a,b,c)`
    In(String, Vec<String>),
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Eq(column.into(), value.into())
    }

    pub fn in_set(column: impl Into<String>, values: impl IntoIterator<Item = String>) -> Self {
        Filter::In(column.into(), values.into_iter().collect())
    }

    /// Renders to a `(column, value)` query pair. Values are passed through
    /// verbatim; the HTTP layer percent-encodes the assembled query string
    /// exactly once.
    pub fn to_pair(&self) -> (String, String) {
        match self {
            Filter::Eq(column, value) => (column.clone(), format!("eq.{value}")),
            Filter::In(column, values) => (column.clone(), format!("in.({})", values.join(","))),
        }
    }
}
