use leptos::prelude::*;
use leptos_router::components::A;

use crate::ui::auth::use_auth_context;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth_context();

    view! {
        <div class="min-h-screen flex flex-col items-center justify-center p-4 text-center">
            <h1 class="text-5xl font-bold mb-4">"Ugüee"</h1>
            <p class="text-lg mb-8 max-w-md">
                "Shared rides for university communities."
            </p>
            {move || {
                if auth.is_authenticated() {
                    view! {
                        <A href="/dashboard" attr:class="px-6 py-3 bg-emerald-600 text-white rounded-lg">
                            "Go to dashboard"
                        </A>
                    }
                    .into_any()
                } else {
                    view! {
                        <A href="/login" attr:class="px-6 py-3 bg-emerald-600 text-white rounded-lg">
                            "Sign in"
                        </A>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
