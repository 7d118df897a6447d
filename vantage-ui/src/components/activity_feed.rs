//! Activity Feed Component
//!
//! Live activity log of one analysis run. Fetches once on mount and, while
//! active, every [`POLL_INTERVAL_MS`]. Each response replaces the list.

use gloo_timers::callback::Interval;
use leptos::*;

use crate::api::{self, ActivityEntry};

pub const POLL_INTERVAL_MS: u32 = 3000;

/// Scrolling activity log for `subject`
#[component]
pub fn ActivityFeed(
    /// Analysis run id
    #[prop(into)]
    subject: Signal<String>,
    /// Keep polling after the first fetch
    #[prop(into, default = MaybeSignal::Static(true))]
    active: MaybeSignal<bool>,
) -> impl IntoView {
    let entries = create_rw_signal(Vec::<ActivityEntry>::new());
    let container = create_node_ref::<html::Div>();

    // Bumped on every rebind; fetches from older generations are dropped
    let generation = store_value(0u64);
    let issued = store_value(0u64);
    let applied = store_value(0u64);
    let poll = store_value(None::<Interval>);

    let fetch = move |gen: u64, id: String| {
        issued.update_value(|seq| *seq += 1);
        let seq = issued.get_value();

        spawn_local(async move {
            match api::fetch_activity(&id).await {
                Ok(log) => {
                    let current = generation.try_get_value() == Some(gen)
                        && applied.try_get_value().is_some_and(|last| seq > last);
                    if !current {
                        return;
                    }
                    applied.set_value(seq);
                    if entries.with_untracked(|shown| *shown != log) {
                        entries.set(log);
                    }
                }
                Err(e) => {
                    web_sys::console::warn_1(
                        &format!("Failed to fetch activity for {}: {}", id, e).into(),
                    );
                }
            }
        });
    };

    create_effect(move |previous: Option<String>| {
        let id = subject.get();
        let active = active.get();

        // Drops (and so cancels) the running interval
        poll.set_value(None);
        generation.update_value(|g| *g += 1);
        applied.set_value(0);

        if previous.is_some_and(|prev| prev != id) {
            entries.set(Vec::new());
        }

        if id.trim().is_empty() {
            return id;
        }

        let gen = generation.get_value();
        fetch(gen, id.clone());

        if active {
            let poll_id = id.clone();
            poll.set_value(Some(Interval::new(POLL_INTERVAL_MS, move || {
                fetch(gen, poll_id.clone());
            })));
        }

        id
    });

    on_cleanup(move || {
        let _ = poll.try_set_value(None);
        let _ = generation.try_update_value(|g| *g += 1);
    });

    // Jump to the newest entry whenever the list changes
    create_effect(move |_| {
        entries.with(|_| ());
        request_animation_frame(move || {
            if let Some(el) = container.get_untracked() {
                el.set_scroll_top(el.scroll_height());
            }
        });
    });

    view! {
        <div
            node_ref=container
            class="activity-feed bg-gray-800 rounded-xl p-4 h-96 overflow-y-auto font-mono text-sm space-y-1"
        >
            {move || {
                let list = entries.get();
                if list.is_empty() {
                    view! {
                        <div class="text-gray-500 italic">"No activity yet."</div>
                    }.into_view()
                } else {
                    list.into_iter()
                        .map(|entry| view! { <ActivityRow entry=entry /> })
                        .collect_view()
                }
            }}
        </div>
    }
}

#[component]
fn ActivityRow(entry: ActivityEntry) -> impl IntoView {
    let (color, icon) = entry.kind.style();
    let clock = entry.clock_label();

    view! {
        <div class="flex items-start space-x-2">
            <span class=format!("{} w-4 shrink-0", color)>{icon}</span>
            <span class="text-gray-500 shrink-0">{clock}</span>
            <span class="text-gray-200">{entry.message}</span>
            {entry.phase.map(|phase| view! {
                <span class="text-xs text-gray-400 bg-gray-700 rounded px-1">{phase}</span>
            })}
        </div>
    }
}
