mod api_underlying;
mod image_upload;
mod scanner;
mod server_api;

use dioxus::prelude::*;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus_web::launch::launch_cfg(App, dioxus_web::Config::default());
}

#[component]
fn App() -> Element {
    rsx! {
        div { class: "container",
            h1 { "🥗 AI Food Scanner" }
            scanner::view {}
        }
    }
}
