//! College (institution) endpoints

use crate::core::api::Resource;
use crate::core::error::ApiError;
use crate::core::gateway::{ApiGateway, ApiRequest, FormField, Navigator, Transport};
use crate::core::models::{College, CollegeRegistration};

pub async fn list<T: Transport, N: Navigator>(
    gateway: &ApiGateway<T, N>,
) -> Result<Vec<College>, ApiError> {
    gateway.get_json(&Resource::Colleges.collection()).await
}

/// Colleges users may sign up under
pub async fn verified<T: Transport, N: Navigator>(
    gateway: &ApiGateway<T, N>,
) -> Result<Vec<College>, ApiError> {
    let colleges = list(gateway).await?;
    Ok(colleges.into_iter().filter(|c| c.is_verified).collect())
}

/// Colleges waiting for a system administrator's decision
pub async fn unverified<T: Transport, N: Navigator>(
    gateway: &ApiGateway<T, N>,
) -> Result<Vec<College>, ApiError> {
    gateway.get_json("/colleges/unverified/").await
}

pub async fn verify<T: Transport, N: Navigator>(
    gateway: &ApiGateway<T, N>,
    college_id: i64,
) -> Result<(), ApiError> {
    tracing::info!("Verifying college {}", college_id);
    gateway
        .post_empty(&Resource::Colleges.action(college_id, "verify"))
        .await
}

pub async fn deny<T: Transport, N: Navigator>(
    gateway: &ApiGateway<T, N>,
    college_id: i64,
) -> Result<(), ApiError> {
    tracing::info!("Denying college {}", college_id);
    gateway
        .post_empty(&Resource::Colleges.action(college_id, "deny"))
        .await
}

/// Multipart body for `POST /colleges/`
pub fn registration_form(registration: &CollegeRegistration) -> Vec<FormField> {
    let mut fields = vec![
        FormField::text("name", &registration.name),
        FormField::text("address", &registration.address),
        FormField::text("email", &registration.email),
    ];
    fields.extend(
        registration
            .colors
            .iter()
            .map(|color| FormField::text("colors", color)),
    );
    fields.push(FormField::file("logo_img", registration.logo.clone()));
    fields
}

pub async fn register<T: Transport, N: Navigator>(
    gateway: &ApiGateway<T, N>,
    registration: &CollegeRegistration,
) -> Result<College, ApiError> {
    let request =
        ApiRequest::post(Resource::Colleges.collection()).multipart(registration_form(registration));
    gateway.send(request).await?.json()
}
