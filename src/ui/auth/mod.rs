//! Authentication UI module
//!
//! Reactive auth context and the login form.

mod context;
mod login_form;

pub use context::{
    AuthContext, ClientGateway, ClientNavigator, provide_auth_context, use_auth_context,
};
pub use login_form::LoginForm;
