//! User sign-up and driver verification endpoints

use serde_json::Value;

use crate::core::api::Resource;
use crate::core::error::ApiError;
use crate::core::gateway::{ApiGateway, ApiRequest, FormField, Navigator, Transport};
use crate::core::models::{DriverRegistration, PassengerRegistration, UserProfile, UserRole};

/// Register a passenger. The server answers with the created user.
pub async fn register_passenger<T: Transport, N: Navigator>(
    gateway: &ApiGateway<T, N>,
    registration: &PassengerRegistration,
) -> Result<Value, ApiError> {
    tracing::info!("Registering passenger: {}", registration.email);
    gateway
        .post_json(&Resource::Users.collection(), &registration.to_payload())
        .await
}

/// Multipart body for a driver sign-up; one `attachments` part per document
pub fn driver_form(registration: &DriverRegistration) -> Vec<FormField> {
    let mut fields = vec![
        FormField::text("first_name", &registration.first_name),
        FormField::text("last_name", &registration.last_name),
        FormField::text("username", &registration.username),
        FormField::text("email", &registration.email),
        FormField::text("personal_id", &registration.personal_id),
        FormField::text("address", &registration.address),
        FormField::text("phone", &registration.phone),
        FormField::text("code", registration.code.as_deref().unwrap_or_default()),
        FormField::text("user_type", UserRole::Driver.code()),
        FormField::text("college", registration.college),
        FormField::text("password", &registration.password),
    ];
    fields.extend(
        registration
            .attachments
            .iter()
            .map(|attachment| FormField::file("attachments", attachment.clone())),
    );
    fields
}

pub async fn register_driver<T: Transport, N: Navigator>(
    gateway: &ApiGateway<T, N>,
    registration: &DriverRegistration,
) -> Result<Value, ApiError> {
    tracing::info!(
        "Registering driver: {} ({} documents)",
        registration.email,
        registration.attachments.len()
    );
    let request = ApiRequest::post(Resource::Users.collection()).multipart(driver_form(registration));
    gateway.send(request).await?.json()
}

/// Users waiting for verification by an administrator
pub async fn unverified<T: Transport, N: Navigator>(
    gateway: &ApiGateway<T, N>,
) -> Result<Vec<UserProfile>, ApiError> {
    gateway.get_json("/users/unverified/").await
}

pub async fn verify<T: Transport, N: Navigator>(
    gateway: &ApiGateway<T, N>,
    user_id: i64,
) -> Result<(), ApiError> {
    gateway
        .post_empty(&Resource::Users.action(user_id, "verify"))
        .await
}

pub async fn deny<T: Transport, N: Navigator>(
    gateway: &ApiGateway<T, N>,
    user_id: i64,
) -> Result<(), ApiError> {
    gateway
        .post_empty(&Resource::Users.action(user_id, "deny"))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Attachment;

    #[test]
    fn test_driver_form_has_one_part_per_document() {
        let registration = DriverRegistration {
            first_name: "Luis".into(),
            last_name: "Mora".into(),
            username: "lmora".into(),
            email: "luis@example.edu".into(),
            personal_id: "9988".into(),
            address: "Calle 9".into(),
            phone: "3100000000".into(),
            code: None,
            college: 2,
            password: "secret1".into(),
            attachments: vec![
                Attachment::new("license.pdf", "application/pdf", vec![0u8; 4]),
                Attachment::new("soat.pdf", "application/pdf", vec![0u8; 2]),
            ],
        };

        let fields = driver_form(&registration);

        assert!(fields.contains(&FormField::text("user_type", "3")));
        assert!(fields.contains(&FormField::text("college", "2")));
        assert!(fields.contains(&FormField::text("code", "")));
        let documents = fields
            .iter()
            .filter(|f| matches!(f, FormField::File { name, .. } if name == "attachments"))
            .count();
        assert_eq!(documents, 2);
    }
}
