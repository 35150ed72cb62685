//! Resource CRUD
//!
//! Generic list/create/update/delete calls shared by every resource screen.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ApiClient, ApiError, QueryClient, QueryKey, Resource};

pub async fn list<T>(queries: &QueryClient, client: &ApiClient, key: QueryKey) -> Result<Vec<T>, ApiError>
where
    T: DeserializeOwned + Serialize,
{
    queries.fetch(client, key).await
}

pub async fn get<T>(queries: &QueryClient, client: &ApiClient, resource: Resource, id: u32) -> Result<T, ApiError>
where
    T: DeserializeOwned + Serialize,
{
    queries.fetch(client, QueryKey::detail(resource, id)).await
}

pub async fn create<D, T>(queries: &QueryClient, client: &ApiClient, resource: Resource, draft: &D) -> Result<T, ApiError>
where
    D: Serialize,
    T: DeserializeOwned,
{
    let created = client.post(resource.path(), draft).await?;
    queries.invalidate(resource);
    Ok(created)
}

pub async fn update<D, T>(
    queries: &QueryClient,
    client: &ApiClient,
    resource: Resource,
    id: u32,
    draft: &D,
) -> Result<T, ApiError>
where
    D: Serialize,
    T: DeserializeOwned,
{
    let updated = client.put(&QueryKey::detail(resource, id).path(), draft).await?;
    queries.invalidate(resource);
    Ok(updated)
}

pub async fn delete(queries: &QueryClient, client: &ApiClient, resource: Resource, id: u32) -> Result<(), ApiError> {
    client.delete(&QueryKey::detail(resource, id).path()).await?;
    queries.invalidate(resource);
    Ok(())
}
