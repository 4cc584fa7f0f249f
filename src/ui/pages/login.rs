//! Login page component
//!
//! A standalone page for user login, redirects to dashboard on success.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::ui::auth::{LoginForm, use_auth_context};

/// Login page component
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth_context();

    // Redirect if already authenticated
    Effect::new(move |_| {
        if auth.is_authenticated() {
            let navigate = use_navigate();
            navigate("/dashboard", Default::default());
        }
    });

    let on_success = move |_| {
        let navigate = use_navigate();
        navigate("/dashboard", Default::default());
    };

    view! {
        <div class="min-h-screen flex flex-col">
            <header class="border-b">
                <div class="max-w-7xl mx-auto px-4 h-16 flex items-center">
                    <A href="/" attr:class="text-xl font-bold">"Ugüee"</A>
                </div>
            </header>

            <main class="flex-1 flex items-center justify-center p-4">
                <LoginForm on_success=Callback::new(on_success) />
            </main>
        </div>
    }
}
