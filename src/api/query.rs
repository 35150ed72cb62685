//! Query Keys and Cache
//!
//! Requests are identified by resource plus sorted filter parameters.
//! Mutations invalidate the keys of the mutated resource and of the
//! resources that display it.

use std::collections::{BTreeMap, HashMap};

use leptos::prelude::*;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ApiClient, ApiError};

/// Characters left unescaped in query values (RFC 3986 unreserved)
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Server-backed resource types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Ministries,
    Departments,
    Positions,
    Attributes,
    Users,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Self::Ministries,
        Self::Departments,
        Self::Positions,
        Self::Attributes,
        Self::Users,
    ];

    /// Collection path on the API
    pub fn path(&self) -> &'static str {
        match self {
            Self::Ministries => "ministries",
            Self::Departments => "departments",
            Self::Positions => "positions",
            Self::Attributes => "attributes",
            Self::Users => "users",
        }
    }

    /// Resources whose cached data goes stale when this one is mutated
    pub fn related(&self) -> &'static [Resource] {
        match self {
            // Departments and users display ministry names
            Self::Ministries => &[Self::Ministries, Self::Departments, Self::Users],
            Self::Departments => &[Self::Departments, Self::Positions],
            Self::Positions => &[Self::Positions],
            Self::Attributes => &[Self::Attributes],
            Self::Users => &[Self::Users],
        }
    }
}

/// Identifies one cached request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: Resource,
    pub id: Option<u32>,
    pub params: BTreeMap<String, String>,
}

impl QueryKey {
    pub fn list(resource: Resource) -> Self {
        Self {
            resource,
            id: None,
            params: BTreeMap::new(),
        }
    }

    pub fn detail(resource: Resource, id: u32) -> Self {
        Self {
            id: Some(id),
            ..Self::list(resource)
        }
    }

    /// Add a filter parameter; blank values are dropped
    pub fn with_param(mut self, name: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        if !value.trim().is_empty() {
            self.params.insert(name.to_string(), value.trim().to_string());
        }
        self
    }

    /// Percent-encoded `a=1&b=2`, sorted by name
    pub fn query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, QUERY_VALUE),
                    utf8_percent_encode(v, QUERY_VALUE)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Request path relative to the API base; doubles as the cache key
    pub fn path(&self) -> String {
        let mut path = self.resource.path().to_string();
        if let Some(id) = self.id {
            path.push_str(&format!("/{}", id));
        }
        let query = self.query_string();
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query);
        }
        path
    }
}

/// Cached JSON responses by key
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, serde_json::Value>,
}

impl QueryCache {
    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let value = self.entries.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    pub fn insert<T: Serialize>(&mut self, key: QueryKey, value: &T) {
        if let Ok(json) = serde_json::to_value(value) {
            self.entries.insert(key, json);
        }
    }

    /// Drop every entry of the given resources
    pub fn invalidate(&mut self, resources: &[Resource]) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !resources.contains(&key.resource));
        before - self.entries.len()
    }

    /// Drop every entry
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn bump(versions: &mut HashMap<Resource, u32>, resources: &[Resource]) {
    for r in resources {
        *versions.entry(*r).or_insert(0) += 1;
    }
}

/// Shared query state provided via context.
///
/// Screens read `version(resource)` inside an `Effect` and refetch when it
/// changes; `invalidate` bumps versions and drops cached responses.
#[derive(Clone, Copy)]
pub struct QueryClient {
    versions: RwSignal<HashMap<Resource, u32>>,
    cache: StoredValue<QueryCache>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self {
            versions: RwSignal::new(HashMap::new()),
            cache: StoredValue::new(QueryCache::default()),
        }
    }

    /// Tracked read of a resource's version
    pub fn version(&self, resource: Resource) -> u32 {
        self.versions.with(|v| v.get(&resource).copied().unwrap_or(0))
    }

    /// Mark a resource and its related resources stale
    pub fn invalidate(&self, resource: Resource) {
        let related = resource.related();
        let dropped = self.cache.try_update_value(|cache| cache.invalidate(related)).unwrap_or(0);
        web_sys::console::log_1(&format!("[API] invalidate {:?} ({} cached entries dropped)", related, dropped).into());
        self.versions.update(|versions| bump(versions, related));
    }

    /// Forget every cached response and mark all resources stale.
    /// Runs whenever the signed-in user changes.
    pub fn clear(&self) {
        let dropped = self.cache.try_update_value(QueryCache::clear).unwrap_or(0);
        web_sys::console::log_1(&format!("[API] cache cleared ({} entries dropped)", dropped).into());
        self.versions.try_update(|versions| bump(versions, &Resource::ALL));
    }

    /// Cached response for `key`, fetching on a miss
    pub async fn fetch<T>(&self, client: &ApiClient, key: QueryKey) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Serialize,
    {
        if let Some(hit) = self.cache.with_value(|cache| cache.get::<T>(&key)) {
            return Ok(hit);
        }
        let value: T = client.get(&key.path()).await?;
        self.cache.update_value(|cache| cache.insert(key, &value));
        Ok(value)
    }
}

pub fn use_query_client() -> QueryClient {
    expect_context::<QueryClient>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_ignore_param_insertion_order() {
        let a = QueryKey::list(Resource::Positions)
            .with_param("department_id", 4)
            .with_param("q", "analyst");
        let b = QueryKey::list(Resource::Positions)
            .with_param("q", "analyst")
            .with_param("department_id", 4);
        assert_eq!(a, b);
        assert_eq!(a.path(), "positions?department_id=4&q=analyst");
    }

    #[test]
    fn blank_params_are_dropped() {
        let key = QueryKey::list(Resource::Users).with_param("q", "  ");
        assert_eq!(key.path(), "users");
        assert_eq!(QueryKey::detail(Resource::Users, 9).path(), "users/9");
    }

    #[test]
    fn query_values_are_encoded() {
        let key = QueryKey::list(Resource::Ministries).with_param("q", "santé & finances");
        assert_eq!(key.query_string(), "q=sant%C3%A9%20%26%20finances");
    }

    #[test]
    fn related_resources_include_self() {
        for resource in Resource::ALL {
            assert!(resource.related().contains(&resource));
        }
        assert!(Resource::Ministries.related().contains(&Resource::Departments));
        assert!(Resource::Departments.related().contains(&Resource::Positions));
    }

    #[test]
    fn invalidation_drops_related_entries() {
        let mut cache = QueryCache::default();
        cache.insert(QueryKey::list(Resource::Ministries), &vec![1, 2]);
        cache.insert(QueryKey::list(Resource::Departments).with_param("ministry_id", 1), &vec![3]);
        cache.insert(QueryKey::list(Resource::Positions), &vec![4]);
        cache.insert(QueryKey::list(Resource::Attributes), &vec![5]);

        let dropped = cache.invalidate(Resource::Ministries.related());
        assert_eq!(dropped, 2);
        assert_eq!(cache.get::<Vec<u32>>(&QueryKey::list(Resource::Positions)), Some(vec![4]));
        assert_eq!(cache.get::<Vec<u32>>(&QueryKey::list(Resource::Ministries)), None);

        cache.invalidate(Resource::Departments.related());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clearing_empties_cache_and_bumps_every_version() {
        let mut cache = QueryCache::default();
        cache.insert(QueryKey::list(Resource::Users), &vec![1]);
        cache.insert(QueryKey::detail(Resource::Ministries, 2), &"Finance");
        assert_eq!(cache.clear(), 2);
        assert!(cache.is_empty());
        assert_eq!(cache.get::<Vec<u32>>(&QueryKey::list(Resource::Users)), None);

        let mut versions = HashMap::from([(Resource::Users, 3)]);
        bump(&mut versions, &Resource::ALL);
        assert_eq!(versions[&Resource::Users], 4);
        for resource in Resource::ALL {
            assert!(versions[&resource] >= 1);
        }
    }
}
