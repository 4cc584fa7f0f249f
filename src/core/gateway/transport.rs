//! HTTP transports the gateway sends requests through
//!
//! The server build (and native tests) use `reqwest`; the browser bundle
//! uses `gloo-net` over `fetch`.

use crate::core::error::ApiError;
use crate::core::gateway::request::{ApiRequest, ApiResponse};

/// Sends one fully-built request and returns the raw response.
///
/// Non-2xx statuses are not errors at this level; only failures to complete
/// the exchange are.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn execute(&self, url: &str, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

#[cfg(feature = "ssr")]
pub use self::native::ReqwestTransport;

#[cfg(not(feature = "ssr"))]
pub use self::browser::FetchTransport;

/// Transport used by the application in the current build
#[cfg(feature = "ssr")]
pub type DefaultTransport = ReqwestTransport;

/// Transport used by the application in the current build
#[cfg(not(feature = "ssr"))]
pub type DefaultTransport = FetchTransport;

#[cfg(feature = "ssr")]
mod native {
    use reqwest::multipart::{Form, Part};

    use super::Transport;
    use crate::core::error::ApiError;
    use crate::core::gateway::request::{
        ApiRequest, ApiResponse, FormField, Method, RequestBody,
    };

    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    fn form(fields: &[FormField]) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for field in fields {
            form = match field {
                FormField::Text { name, value } => form.text(name.clone(), value.clone()),
                FormField::File { name, attachment } => {
                    let part = Part::bytes(attachment.bytes.clone())
                        .file_name(attachment.file_name.clone())
                        .mime_str(&attachment.content_type)
                        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
                    form.part(name.clone(), part)
                }
            };
        }
        Ok(form)
    }

    impl Transport for ReqwestTransport {
        async fn execute(&self, url: &str, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
            let mut builder = self.client.request(method(request.method), url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder = match &request.body {
                RequestBody::Empty => builder,
                RequestBody::Json(value) => builder.json(value),
                RequestBody::Multipart(fields) => builder.multipart(form(fields)?),
            };

            let response = builder
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .bytes()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;

            Ok(ApiResponse::new(status, body.to_vec()))
        }
    }
}

#[cfg(not(feature = "ssr"))]
mod browser {
    use gloo_net::http::{Method as HttpMethod, RequestBuilder};

    use super::Transport;
    use crate::core::error::ApiError;
    use crate::core::gateway::request::{
        ApiRequest, ApiResponse, FormField, Method, RequestBody,
    };

    #[derive(Debug, Clone, Copy, Default)]
    pub struct FetchTransport;

    impl FetchTransport {
        pub fn new() -> Self {
            Self
        }
    }

    fn method(method: Method) -> HttpMethod {
        match method {
            Method::Get => HttpMethod::GET,
            Method::Post => HttpMethod::POST,
            Method::Put => HttpMethod::PUT,
            Method::Patch => HttpMethod::PATCH,
            Method::Delete => HttpMethod::DELETE,
        }
    }

    fn js_error(e: wasm_bindgen::JsValue) -> ApiError {
        ApiError::InvalidRequest(format!("{:?}", e))
    }

    fn form_data(fields: &[FormField]) -> Result<web_sys::FormData, ApiError> {
        let form = web_sys::FormData::new().map_err(js_error)?;
        for field in fields {
            match field {
                FormField::Text { name, value } => {
                    form.append_with_str(name, value).map_err(js_error)?;
                }
                FormField::File { name, attachment } => {
                    let parts = js_sys::Array::new();
                    parts.push(&js_sys::Uint8Array::from(attachment.bytes.as_slice()));
                    let options = web_sys::BlobPropertyBag::new();
                    options.set_type(&attachment.content_type);
                    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                        .map_err(js_error)?;
                    form.append_with_blob_and_filename(name, &blob, &attachment.file_name)
                        .map_err(js_error)?;
                }
            }
        }
        Ok(form)
    }

    impl Transport for FetchTransport {
        async fn execute(&self, url: &str, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
            let mut builder = RequestBuilder::new(url).method(method(request.method));
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let prepared = match &request.body {
                RequestBody::Empty => builder.build(),
                RequestBody::Json(value) => builder.json(value),
                RequestBody::Multipart(fields) => builder.body(form_data(fields)?),
            }
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

            let response = prepared
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let status = response.status();
            let body = response
                .binary()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;

            Ok(ApiResponse::new(status, body))
        }
    }
}
