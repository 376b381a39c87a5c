//! Query-string builder for the provider's REST API.

use crate::content::resource::Resource;

/// Filters and shaping for a `select` call.
///
/// ```
/// use ethio_football::provider::Query;
///
/// let query = Query::new()
///     .select("*,home_team:teams!home_team_id(name_en)")
///     .eq("league_slug", "premier")
///     .order("date", true)
///     .limit(20);
/// assert_eq!(
///     query.to_pairs(),
///     vec![
///         ("select".to_string(), "*,home_team:teams!home_team_id(name_en)".to_string()),
///         ("league_slug".to_string(), "eq.premier".to_string()),
///         ("order".to_string(), "date.asc".to_string()),
///         ("limit".to_string(), "20".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<(String, bool)>,
    limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every column of a collection in its listing order.
    pub fn for_resource(resource: Resource) -> Self {
        let query = Self::new().select("*");
        match resource.order() {
            Some((column, ascending)) => query.order(column, ascending),
            None => query,
        }
    }

    /// Column list, including relation expansions such as
    /// `*,team:teams!team_slug(name_en)`.
    pub fn select(mut self, expr: impl Into<String>) -> Self {
        self.select = Some(expr.into());
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl AsRef<str>) -> Self {
        self.filters
            .push((column.into(), format!("eq.{}", value.as_ref())));
        self
    }

    pub fn order(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order = Some((column.into(), ascending));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 3);
        if let Some(select) = &self.select {
            pairs.push(("select".to_string(), select.clone()));
        }
        pairs.extend(self.filters.iter().cloned());
        if let Some((column, ascending)) = &self.order {
            let direction = if *ascending { "asc" } else { "desc" };
            pairs.push(("order".to_string(), format!("{column}.{direction}")));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_has_no_pairs() {
        assert!(Query::new().to_pairs().is_empty());
    }

    #[test]
    fn test_resource_listing_order() {
        let pairs = Query::for_resource(Resource::TopScorers).to_pairs();
        assert_eq!(pairs[0], ("select".to_string(), "*".to_string()));
        assert_eq!(pairs[1], ("order".to_string(), "goals.desc".to_string()));
    }

    #[test]
    fn test_multiple_filters_keep_order() {
        let pairs = Query::new()
            .eq("is_current", "true")
            .eq("slug", "2024-25")
            .order("start_date", false)
            .to_pairs();
        assert_eq!(
            pairs,
            vec![
                ("is_current".to_string(), "eq.true".to_string()),
                ("slug".to_string(), "eq.2024-25".to_string()),
                ("order".to_string(), "start_date.desc".to_string()),
            ]
        );
    }
}
