//! Application configuration from environment variables.
//!
//! On the server, load configuration using `Config::from_env()` after calling
//! `dotenvy::dotenv()`. The browser bundle has no environment at runtime, so
//! `Config::for_client()` reads the same variables at compile time.

/// Default REST API root
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
/// Default route the client is sent to when its session ends
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root URL of the REST API, without a trailing slash
    /// Example: https://api.uguee.example/api
    pub api_base_url: String,

    /// Client route of the login page
    pub login_route: String,
}

impl Config {
    pub fn new(api_base_url: impl Into<String>, login_route: impl Into<String>) -> Self {
        let api_base_url: String = api_base_url.into();
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            login_route: login_route.into(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("UGUEE_API_URL").ok(),
            std::env::var("UGUEE_LOGIN_ROUTE").ok(),
        )
    }

    /// Configuration baked into the client bundle at build time
    pub fn for_client() -> Self {
        Self::from_values(
            option_env!("UGUEE_API_URL").map(str::to_string),
            option_env!("UGUEE_LOGIN_ROUTE").map(str::to_string),
        )
    }

    fn from_values(api_base_url: Option<String>, login_route: Option<String>) -> Self {
        Self::new(
            api_base_url
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            login_route
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOGIN_ROUTE.to_string()),
        )
    }

    /// Config to render with: the one the server provided, else the
    /// build-time client config
    pub fn provided_or_client(provided: Option<Config>) -> Self {
        provided.unwrap_or_else(Self::for_client)
    }

    /// True when the browser bundle would talk to a different API than this
    pub fn differs_from_client(&self) -> bool {
        *self != Self::for_client()
    }

    /// Absolute URL for an API path such as `/login/`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL, DEFAULT_LOGIN_ROUTE)
    }
}
