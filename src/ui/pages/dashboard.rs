//! Dashboard page component
//!
//! Dispatches on the signed-in user's role. System administrators get the
//! college verification queue; the other roles get their landing panels.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::core::api::colleges;
use crate::core::models::{College, UserProfile, UserRole};
use crate::ui::auth::use_auth_context;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth_context();

    // Send anonymous visitors to the login page. Storage is checked too so a
    // session that has not been restored into the signal yet is not lost.
    Effect::new(move |_| {
        if auth.user.get().is_none() && auth.gateway().auth().current_user().is_none() {
            let navigate = use_navigate();
            navigate("/login", Default::default());
        }
    });

    let on_logout = move |_| {
        auth.logout();
        let navigate = use_navigate();
        navigate("/login", Default::default());
    };

    view! {
        <div class="min-h-screen flex flex-col">
            <header class="border-b">
                <div class="max-w-7xl mx-auto px-4 h-16 flex items-center justify-between">
                    <span class="text-xl font-bold">"Ugüee"</span>
                    <div class="flex items-center gap-4">
                        <span class="text-sm">
                            {move || auth.user.get().map(|user| user.full_name()).unwrap_or_default()}
                        </span>
                        <button class="px-3 py-1.5 border rounded-lg text-sm" on:click=on_logout>
                            "Sign out"
                        </button>
                    </div>
                </div>
            </header>

            <main class="flex-1 max-w-7xl w-full mx-auto p-4">
                {move || auth.user.get().map(role_panel)}
            </main>
        </div>
    }
}

fn role_panel(user: UserProfile) -> AnyView {
    match user.role() {
        Ok(UserRole::SystemAdmin) => view! { <CollegeVerificationPanel /> }.into_any(),
        Ok(role) => view! { <RoleWelcome user=user role=role /> }.into_any(),
        Err(e) => {
            leptos::logging::error!("Cannot render dashboard for user {}: {}", user.id, e);
            view! {
                <div class="p-4 bg-red-100 border border-red-300 rounded-lg">
                    <p class="text-red-700 font-medium">"Your account has an unrecognized role."</p>
                    <p class="text-sm text-red-700">{e.to_string()}</p>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
fn RoleWelcome(user: UserProfile, role: UserRole) -> impl IntoView {
    let summary = match role {
        UserRole::CollegeAdmin => "Review the members and drivers of your college.",
        UserRole::Driver => "Publish routes and manage your vehicles.",
        UserRole::Passenger => "Find a trip to your campus.",
        UserRole::SystemAdmin => "",
    };

    view! {
        <section class="space-y-2">
            <h2 class="text-2xl font-semibold">{format!("Welcome, {}", user.first_name)}</h2>
            <p class="text-sm uppercase tracking-wide">{role.to_string()}</p>
            <p>{summary}</p>
        </section>
    }
}

/// Unverified colleges with verify/deny actions
#[component]
fn CollegeVerificationPanel() -> impl IntoView {
    let auth = use_auth_context();
    let pending = RwSignal::new(Vec::<College>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            let gateway = auth.gateway();
            match colleges::unverified(gateway.as_ref()).await {
                Ok(list) => {
                    pending.set(list);
                    error.set(None);
                }
                Err(e) => {
                    auth.observe_error(&e);
                    error.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        });
    };

    // Fetch on mount (client-side only)
    Effect::new(move |_| load());

    let decide = move |college_id: i64, approve: bool| {
        spawn_local(async move {
            let gateway = auth.gateway();
            let result = if approve {
                colleges::verify(gateway.as_ref(), college_id).await
            } else {
                colleges::deny(gateway.as_ref(), college_id).await
            };
            match result {
                Ok(()) => pending.update(|list| list.retain(|c| c.college_id != college_id)),
                Err(e) => {
                    auth.observe_error(&e);
                    error.set(Some(e.user_message()));
                }
            }
        });
    };

    view! {
        <section class="space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-semibold">"Colleges awaiting verification"</h2>
                <button class="px-3 py-1.5 border rounded-lg text-sm" on:click=move |_| load()>
                    "Reload"
                </button>
            </div>

            {move || {
                error.get().map(|message| {
                    view! {
                        <div class="p-3 bg-red-100 border border-red-300 rounded-lg">
                            <p class="text-sm text-red-700">{message}</p>
                        </div>
                    }
                })
            }}

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="text-sm">"Loading..."</p> }
            >
                <Show
                    when=move || !pending.with(Vec::is_empty)
                    fallback=|| view! { <p class="text-sm">"No colleges are waiting for review."</p> }
                >
                    <ul class="divide-y border rounded-lg">
                        <For
                            each=move || pending.get()
                            key=|college| college.college_id
                            children=move |college: College| {
                                let id = college.college_id;
                                view! {
                                    <li class="p-4 flex items-center justify-between gap-4">
                                        <div>
                                            <p class="font-medium">{college.name}</p>
                                            <p class="text-sm">{college.email}</p>
                                            <p class="text-sm">{college.address}</p>
                                        </div>
                                        <div class="flex gap-2">
                                            <button
                                                class="px-3 py-1.5 bg-emerald-600 text-white rounded-lg text-sm"
                                                on:click=move |_| decide(id, true)
                                            >
                                                "Verify"
                                            </button>
                                            <button
                                                class="px-3 py-1.5 bg-red-600 text-white rounded-lg text-sm"
                                                on:click=move |_| decide(id, false)
                                            >
                                                "Deny"
                                            </button>
                                        </div>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </Show>
        </section>
    }
}
