//! Login form component

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::context::use_auth_context;

/// Username/password form. Field validation is left to the server.
#[component]
pub fn LoginForm(
    /// Callback when login is successful
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth_context();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        auth.clear_error();

        let username_val = username.get();
        let password_val = password.get();

        spawn_local(async move {
            // Failures are already published on `auth.error`
            if auth.login(username_val, password_val).await.is_ok() {
                if let Some(callback) = on_success {
                    callback.run(());
                }
            }
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-6 w-full max-w-md mx-auto rounded-xl shadow-lg p-6 border">
            <div class="text-center">
                <h2 class="text-2xl font-bold">"Sign in"</h2>
                <p class="mt-2 text-sm">"Use your institutional account"</p>
            </div>

            {move || {
                auth.error.get().map(|error| {
                    view! {
                        <div class="p-3 bg-red-100 border border-red-300 rounded-lg">
                            <p class="text-sm text-red-700">{error}</p>
                        </div>
                    }
                })
            }}

            <div>
                <label for="username" class="block text-sm font-medium mb-1">"Username"</label>
                <input
                    type="text"
                    id="username"
                    name="username"
                    autocomplete="username"
                    class="w-full px-3 py-2 border rounded-lg"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
            </div>

            <div>
                <label for="password" class="block text-sm font-medium mb-1">"Password"</label>
                <input
                    type="password"
                    id="password"
                    name="password"
                    autocomplete="current-password"
                    class="w-full px-3 py-2 border rounded-lg"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
            </div>

            <button
                type="submit"
                class="w-full py-2.5 px-4 bg-emerald-600 text-white font-medium rounded-lg disabled:opacity-50"
                disabled=move || auth.loading.get()
            >
                {move || if auth.loading.get() { "Signing in..." } else { "Sign In" }}
            </button>
        </form>
    }
}
