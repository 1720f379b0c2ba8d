//! Route to logical endpoint table.

use crate::cache::CacheKey;
use crate::http::request::Query;
use crate::routing::Resource;

/// One listing a route warms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTarget {
    pub resource: Resource,
    pub query: Query,
}

impl RouteTarget {
    pub fn new(resource: Resource, query: Query) -> Self {
        Self { resource, query }
    }

    /// The cache key the listing facade reads for the same filters.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(self.resource.logical_name(), &self.query)
    }
}

/// Static mapping from UI routes to the listings they render.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<(String, Vec<RouteTarget>)>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The guide's page routes: one listing page per resource showing active
    /// records, and a home page showing featured tours and restaurants.
    pub fn standard() -> Self {
        let active = Query::new().flag("active", true);
        let featured = Query::new().flag("featured", true);

        let mut table = Self::new().route(
            "/",
            vec![
                RouteTarget::new(Resource::Tours, featured.clone()),
                RouteTarget::new(Resource::Restaurants, featured),
            ],
        );
        for resource in Resource::ALL {
            table = table.route(
                format!("/{}", resource.logical_name()),
                vec![RouteTarget::new(resource, active.clone())],
            );
        }
        table
    }

    /// Add or replace a route.
    pub fn route(mut self, path: impl Into<String>, targets: Vec<RouteTarget>) -> Self {
        let path = normalize_path(&path.into());
        self.routes.retain(|(existing, _)| *existing != path);
        self.routes.push((path, targets));
        self
    }

    /// Listings for `path`. A route also covers its sub-paths
    /// (`/tours/42` warms `/tours`); `/` matches only itself.
    pub fn lookup(&self, path: &str) -> &[RouteTarget] {
        let path = normalize_path(path);
        self.routes
            .iter()
            .filter(|(route, _)| covers(route, &path))
            .max_by_key(|(route, _)| route.len())
            .map(|(_, targets)| targets.as_slice())
            .unwrap_or(&[])
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|(path, _)| path.as_str())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_matches('/');
    format!("/{}", trimmed)
}

fn covers(route: &str, path: &str) -> bool {
    if route == "/" {
        return path == "/";
    }
    path == route
        || path
            .strip_prefix(route)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let table = RouteTable::standard();
        assert_eq!(table.len(), Resource::ALL.len() + 1);

        let tours = table.lookup("/tours");
        assert_eq!(tours.len(), 1);
        assert_eq!(tours[0].resource, Resource::Tours);
        assert_eq!(tours[0].query.get("active"), Some("true"));

        let home = table.lookup("/");
        let resources: Vec<_> = home.iter().map(|t| t.resource).collect();
        assert_eq!(resources, vec![Resource::Tours, Resource::Restaurants]);
        assert!(home.iter().all(|t| t.query.get("featured") == Some("true")));
    }

    #[test]
    fn test_lookup_matches_segments() {
        let table = RouteTable::standard();
        assert_eq!(table.lookup("/tours/42")[0].resource, Resource::Tours);
        assert_eq!(table.lookup("tours/")[0].resource, Resource::Tours);
        assert_eq!(table.lookup("/tours?x=1")[0].resource, Resource::Tours);
        assert!(table.lookup("/toursim").is_empty());
        assert!(table.lookup("/about").is_empty());
    }

    #[test]
    fn test_route_replaces_existing() {
        let table = RouteTable::new()
            .route("/eat", vec![RouteTarget::new(Resource::Restaurants, Query::new())])
            .route("/eat/", vec![]);
        assert_eq!(table.len(), 1);
        assert!(table.lookup("/eat").is_empty());
    }

    #[test]
    fn test_target_key_matches_listing_key() {
        let target = RouteTarget::new(Resource::Tours, Query::new().flag("active", true));
        assert_eq!(
            target.cache_key(),
            CacheKey::new("tours", &Query::new().flag("active", true))
        );
    }
}
