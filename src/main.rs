#![allow(warnings)]
//! Org Chart Frontend Entry Point

mod actions;
mod api;
mod app;
mod components;
mod config;
mod context;
mod entities;
mod models;
mod org_chart;
mod palette;
mod routes;
mod session;
mod shortcuts;
mod store;
mod tree;
mod validation;
mod view_state;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
