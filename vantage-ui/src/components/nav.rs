//! Navigation Component
//!
//! Header bar with brand, links and the theme toggle.

use leptos::*;
use leptos_router::*;

use crate::state::theme::{use_theme, Theme};

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="bg-white dark:bg-gray-800 border-b border-gray-200 dark:border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"🔭"</span>
                        <span class="text-xl font-bold">"Vantage"</span>
                    </A>

                    <div class="flex items-center space-x-1">
                        <A
                            href="/"
                            class="px-4 py-2 rounded-lg hover:bg-gray-200 dark:hover:bg-gray-700 transition-colors"
                            active_class="bg-gray-200 dark:bg-gray-700"
                        >
                            "Runs"
                        </A>
                        <ThemeToggle />
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Light/dark switch
#[component]
fn ThemeToggle() -> impl IntoView {
    let ctx = use_theme();

    view! {
        <button
            class="px-3 py-2 rounded-lg hover:bg-gray-200 dark:hover:bg-gray-700 transition-colors"
            title="Toggle theme"
            on:click=move |_| ctx.toggle_theme()
        >
            {move || match ctx.theme.get() {
                Theme::Dark => "☀",
                Theme::Light => "🌙",
            }}
        </button>
    }
}
