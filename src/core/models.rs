//! Domain models shared by the session core, the resource API and the views

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::error::ApiError;

/// Login credentials. Only ever serialized into the login request body.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Access/refresh token pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Cached copy of the authenticated user.
///
/// Fields the client does not model are kept in `extra` so the profile
/// survives a storage round-trip unchanged. `user_type` and `college` are
/// kept as sent; they are only interpreted when read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub user_type: Value,
    /// College id, or the nested college record
    #[serde(default)]
    pub college: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Decode the role code. Unknown codes are an error, never a fallback.
    pub fn role(&self) -> Result<UserRole, ApiError> {
        let code = match &self.user_type {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        code.ok_or_else(|| ApiError::UnknownRole(self.user_type.to_string()))
            .and_then(UserRole::try_from)
    }

    /// Id of the user's college, whether sent as an id or as a record
    pub fn college_id(&self) -> Option<i64> {
        match self.college.as_ref()? {
            Value::Number(n) => n.as_i64(),
            Value::Object(record) => record
                .get("college_id")
                .or_else(|| record.get("id"))
                .and_then(Value::as_i64),
            _ => None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Closed set of user roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum UserRole {
    #[display("System administrator")]
    SystemAdmin,
    #[display("College administrator")]
    CollegeAdmin,
    #[display("Driver")]
    Driver,
    #[display("Passenger")]
    Passenger,
}

impl UserRole {
    pub fn code(self) -> i64 {
        match self {
            UserRole::SystemAdmin => 1,
            UserRole::CollegeAdmin => 2,
            UserRole::Driver => 3,
            UserRole::Passenger => 4,
        }
    }
}

impl TryFrom<i64> for UserRole {
    type Error = ApiError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(UserRole::SystemAdmin),
            2 => Ok(UserRole::CollegeAdmin),
            3 => Ok(UserRole::Driver),
            4 => Ok(UserRole::Passenger),
            other => Err(ApiError::UnknownRole(other.to_string())),
        }
    }
}

/// Error produced when a numeric code does not name a known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} code: {code}")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub code: u8,
}

/// Defines an enum that travels over the wire as a small integer code.
macro_rules! coded_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident = $code:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "u8", into = "u8")]
        pub enum $name {
            $($variant),+
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                match value {
                    $($name::$variant => $code),+
                }
            }
        }

        impl TryFrom<u8> for $name {
            type Error = UnknownCode;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok($name::$variant),)+
                    _ => Err(UnknownCode { kind: $kind, code }),
                }
            }
        }
    };
}

coded_enum!(
    /// Passenger affiliation with the college
    PassengerType, "passenger type" {
        Student = 1,
        Professor = 2,
        Staff = 3,
    }
);

coded_enum!(
    VehicleType, "vehicle type" {
        Van = 1,
        Bike = 2,
        Bus = 3,
        Car = 4,
        Skateboard = 5,
        Tricycle = 6,
    }
);

coded_enum!(
    /// Service area a vehicle is registered for
    VehicleCategory, "vehicle category" {
        Metropolitan = 1,
        Campus = 2,
        Intermunicipal = 3,
    }
);

/// College (institution) as returned by `/colleges/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct College {
    pub college_id: i64,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub colors: Vec<String>,
}

/// File uploaded as one multipart part
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Passenger sign-up data
#[derive(Debug, Clone)]
pub struct PassengerRegistration {
    pub first_name: String,
    pub last_name: String,
    pub personal_id: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub phone: String,
    pub code: String,
    pub college: i64,
    pub passenger_type: PassengerType,
}

impl PassengerRegistration {
    /// Passengers don't pick a username; it is derived from their name.
    pub fn username(&self) -> String {
        format!("{}{}", self.first_name, self.last_name).to_lowercase()
    }

    /// JSON body for `POST /users/`
    pub fn to_payload(&self) -> Value {
        serde_json::json!({
            "first_name": self.first_name,
            "last_name": self.last_name,
            "username": self.username(),
            "personal_id": self.personal_id,
            "email": self.email,
            "password": self.password,
            "address": self.address,
            "phone": self.phone,
            "code": self.code,
            "college": self.college,
            "user_type": UserRole::Passenger.code(),
            "passenger_type": self.passenger_type,
            "attachments": [],
        })
    }
}

/// Driver sign-up data; drivers upload supporting documents
#[derive(Debug, Clone)]
pub struct DriverRegistration {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub personal_id: String,
    pub address: String,
    pub phone: String,
    pub code: Option<String>,
    pub college: i64,
    pub password: String,
    pub attachments: Vec<Attachment>,
}

/// Institution sign-up data
#[derive(Debug, Clone)]
pub struct CollegeRegistration {
    pub name: String,
    pub address: String,
    pub email: String,
    pub colors: Vec<String>,
    pub logo: Attachment,
}

/// Map point collected while drawing a route
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Result of the remote route optimizer. `coordinates` is the polyline to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedRoute {
    #[serde(default)]
    pub coordinates: Vec<Coordinate>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(user_type: i64) -> UserProfile {
        serde_json::from_value(json!({
            "id": 7,
            "first_name": "Ana",
            "last_name": "Ruiz",
            "user_type": user_type,
            "college": 2,
            "email": "ana@example.edu"
        }))
        .unwrap()
    }

    #[test]
    fn test_role_dispatch_codes() {
        assert_eq!(profile(1).role().unwrap(), UserRole::SystemAdmin);
        assert_eq!(profile(2).role().unwrap(), UserRole::CollegeAdmin);
        assert_eq!(profile(3).role().unwrap(), UserRole::Driver);
        assert_eq!(profile(4).role().unwrap(), UserRole::Passenger);
    }

    #[test]
    fn test_unknown_role_is_an_error() {
        let err = profile(9).role().unwrap_err();
        assert!(matches!(err, ApiError::UnknownRole(ref code) if code == "9"));
    }

    #[test]
    fn test_role_code_sent_as_string() {
        let user: UserProfile =
            serde_json::from_value(json!({ "id": 3, "user_type": "3" })).unwrap();
        assert_eq!(user.role().unwrap(), UserRole::Driver);
    }

    #[test]
    fn test_missing_or_malformed_role_fails_on_dispatch() {
        let missing: UserProfile = serde_json::from_value(json!({ "id": 3 })).unwrap();
        assert!(matches!(missing.role(), Err(ApiError::UnknownRole(ref code)) if code == "null"));

        let malformed: UserProfile =
            serde_json::from_value(json!({ "id": 3, "user_type": "driver" })).unwrap();
        assert!(matches!(malformed.role(), Err(ApiError::UnknownRole(_))));
    }

    #[test]
    fn test_college_as_id_or_record() {
        assert_eq!(profile(4).college_id(), Some(2));

        let nested: UserProfile = serde_json::from_value(json!({
            "id": 7,
            "user_type": 4,
            "college": { "college_id": 5, "name": "Univalle" }
        }))
        .unwrap();
        assert_eq!(nested.college_id(), Some(5));
        assert_eq!(nested.college.as_ref().unwrap()["name"], json!("Univalle"));

        let none: UserProfile = serde_json::from_value(json!({ "id": 7, "user_type": 4 })).unwrap();
        assert_eq!(none.college_id(), None);
    }

    #[test]
    fn test_profile_keeps_unmodelled_fields() {
        let user = profile(4);
        assert_eq!(user.extra.get("email"), Some(&json!("ana@example.edu")));

        let restored: UserProfile =
            serde_json::from_str(&serde_json::to_string(&user).unwrap()).unwrap();
        assert_eq!(restored, user);
        assert_eq!(restored.full_name(), "Ana Ruiz");
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("ana", "secret1");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("ana"));
        assert!(!debug.contains("secret1"));
    }

    #[test]
    fn test_coded_enums_use_integer_codes() {
        assert_eq!(serde_json::to_value(VehicleType::Tricycle).unwrap(), json!(6));
        assert_eq!(
            serde_json::from_value::<VehicleCategory>(json!(2)).unwrap(),
            VehicleCategory::Campus
        );
        assert!(serde_json::from_value::<PassengerType>(json!(7)).is_err());
        assert_eq!(
            PassengerType::try_from(9).unwrap_err().to_string(),
            "unknown passenger type code: 9"
        );
    }

    #[test]
    fn test_passenger_payload() {
        let registration = PassengerRegistration {
            first_name: "Ana".into(),
            last_name: "Ruiz".into(),
            personal_id: "1020".into(),
            email: "ana@example.edu".into(),
            password: "secret1".into(),
            address: "Calle 5".into(),
            phone: "3001234567".into(),
            code: "2024001".into(),
            college: 3,
            passenger_type: PassengerType::Student,
        };

        let payload = registration.to_payload();
        assert_eq!(payload["username"], json!("anaruiz"));
        assert_eq!(payload["user_type"], json!(4));
        assert_eq!(payload["passenger_type"], json!(1));
        assert_eq!(payload["college"], json!(3));
        assert_eq!(payload["attachments"], json!([]));
    }
}
