//! Home Page
//!
//! Entry point: open an analysis run by id.

use leptos::*;
use leptos_router::*;

use crate::api;

#[component]
pub fn Home() -> impl IntoView {
    let run_id = create_rw_signal(String::new());
    let navigate = use_navigate();

    let open = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let id = run_id.get_untracked();
        let id = id.trim();
        if !id.is_empty() {
            let encoded: String = js_sys::encode_uri_component(id).into();
            navigate(&format!("/analysis/{}", encoded), Default::default());
        }
    };

    view! {
        <div class="max-w-xl mx-auto space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Analysis Runs"</h1>
                <p class="text-gray-500 dark:text-gray-400 mt-1">
                    "Follow the live activity of a run"
                </p>
            </div>

            <form class="flex space-x-2" on:submit=open>
                <input
                    type="text"
                    placeholder="Run id"
                    class="flex-1 px-4 py-2 rounded-lg bg-gray-100 dark:bg-gray-700 border border-gray-300 dark:border-gray-600"
                    prop:value=move || run_id.get()
                    on:input=move |ev| run_id.set(event_target_value(&ev))
                />
                <button
                    type="submit"
                    class="px-6 py-2 bg-primary-600 hover:bg-primary-700 text-white rounded-lg font-medium transition-colors"
                >
                    "Open"
                </button>
            </form>

            <p class="text-xs text-gray-500">
                {move || format!("API: {}", api::get_api_base())}
            </p>
        </div>
    }
}
