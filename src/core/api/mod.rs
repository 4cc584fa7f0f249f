//! Typed access to the REST resources consumed by the dashboards.
//!
//! Everything here goes through [`ApiGateway`], so every call carries the
//! bearer token and gets the single refresh-and-retry on 401.

pub mod colleges;
pub mod routes;
pub mod users;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::error::ApiError;
use crate::core::gateway::{ApiGateway, Navigator, Transport};

/// Top-level REST collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Resource {
    #[display("users")]
    Users,
    #[display("vehicles")]
    Vehicles,
    #[display("trips")]
    Trips,
    #[display("routes")]
    Routes,
    #[display("colleges")]
    Colleges,
}

impl Resource {
    /// Collection path, e.g. `/trips/`
    pub fn collection(self) -> String {
        format!("/{}/", self)
    }

    /// Item path, e.g. `/trips/12/`
    pub fn item(self, id: i64) -> String {
        format!("/{}/{}/", self, id)
    }

    /// Action sub-resource, e.g. `/colleges/3/verify/`
    pub fn action(self, id: i64, action: &str) -> String {
        format!("/{}/{}/{}/", self, id, action)
    }
}

pub async fn list<R, T, N>(gateway: &ApiGateway<T, N>, resource: Resource) -> Result<Vec<R>, ApiError>
where
    R: DeserializeOwned,
    T: Transport,
    N: Navigator,
{
    gateway.get_json(&resource.collection()).await
}

pub async fn fetch<R, T, N>(
    gateway: &ApiGateway<T, N>,
    resource: Resource,
    id: i64,
) -> Result<R, ApiError>
where
    R: DeserializeOwned,
    T: Transport,
    N: Navigator,
{
    gateway.get_json(&resource.item(id)).await
}

pub async fn create<B, R, T, N>(
    gateway: &ApiGateway<T, N>,
    resource: Resource,
    body: &B,
) -> Result<R, ApiError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
    T: Transport,
    N: Navigator,
{
    gateway.post_json(&resource.collection(), body).await
}

pub async fn remove<T, N>(gateway: &ApiGateway<T, N>, resource: Resource, id: i64) -> Result<(), ApiError>
where
    T: Transport,
    N: Navigator,
{
    gateway.delete(&resource.item(id)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_paths() {
        assert_eq!(Resource::Vehicles.collection(), "/vehicles/");
        assert_eq!(Resource::Trips.item(12), "/trips/12/");
        assert_eq!(Resource::Colleges.action(3, "verify"), "/colleges/3/verify/");
        assert_eq!(Resource::Users.action(8, "deny"), "/users/8/deny/");
    }
}
