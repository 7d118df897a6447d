//! Analysis Page
//!
//! Activity of one analysis run, addressed by `/analysis/:id`.

use leptos::*;
use leptos_router::*;

use crate::components::ActivityFeed;

#[component]
pub fn Analysis() -> impl IntoView {
    let params = use_params_map();
    let run_id = Signal::derive(move || {
        params.with(|p| p.get("id").cloned().unwrap_or_default())
    });

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Activity"</h1>
                    <p class="text-gray-500 dark:text-gray-400 mt-1 font-mono">
                        {move || run_id.get()}
                    </p>
                </div>
                <A href="/" class="text-sm text-primary-400 hover:underline">"← All runs"</A>
            </div>

            <ActivityFeed subject=run_id />
        </div>
    }
}
