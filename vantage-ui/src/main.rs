//! Vantage Dashboard
//!
//! Analysis run dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Light/dark theme with an animated switch overlay
//! - Live activity log of an analysis run, polled from the API
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the dashboard API over HTTP with the browser's
//! session cookies.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
