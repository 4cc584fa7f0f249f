//! API gateway: bearer attachment and single refresh-and-retry on 401

mod client;
pub mod middleware;
mod request;
mod transport;

#[cfg(not(feature = "ssr"))]
pub use client::BrowserNavigator;
pub use client::{ApiGateway, Navigator, NoopNavigator};
pub use middleware::{MAX_AUTH_RETRIES, RequestContext};
pub use request::{AUTHORIZATION, ApiRequest, ApiResponse, FormField, Method, RequestBody};
#[cfg(not(feature = "ssr"))]
pub use transport::FetchTransport;
#[cfg(feature = "ssr")]
pub use transport::ReqwestTransport;
pub use transport::{DefaultTransport, Transport};
