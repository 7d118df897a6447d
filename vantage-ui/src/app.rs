//! App Root Component
//!
//! Main application component with routing and the theme provider.

use leptos::*;
use leptos_router::*;

use crate::components::{Nav, ThemeTransition};
use crate::pages::{Analysis, Home};
use crate::state::theme::provide_theme_context;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide theme state to all components
    provide_theme_context();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-50 text-gray-900 dark:bg-gray-900 dark:text-white flex flex-col">
                // Navigation header with theme toggle
                <Nav />

                // Main content area
                <main class="flex-1 container mx-auto px-4 py-8">
                    <Routes>
                        <Route path="/" view=Home />
                        <Route path="/analysis/:id" view=Analysis />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                // Theme switch overlay
                <ThemeTransition />
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-500 dark:text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 text-white rounded-lg font-medium transition-colors"
            >
                "Go to Runs"
            </A>
        </div>
    }
}
