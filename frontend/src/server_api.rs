mod analyze;
mod basic;

use crate::api_underlying::Underlying;
use nutriscan_common::config;
use once_cell::sync::Lazy;
use std::sync::Arc;

fn server_base_url() -> String {
    config::get("SERVER_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

pub struct ApiClient {
    pub basic: basic::BasicApi,
    pub analyze: analyze::AnalyzeApi,
}

static API_CLIENT: Lazy<Arc<ApiClient>> = Lazy::new(|| Arc::new(new_client(server_base_url())));

pub fn get_client() -> Arc<ApiClient> {
    API_CLIENT.clone()
}

fn new_client(base_url: String) -> ApiClient {
    let underlying = Underlying::new_shared(base_url);
    ApiClient {
        basic: basic::BasicApi {
            underlying: Arc::clone(&underlying),
        },
        analyze: analyze::AnalyzeApi {
            underlying: Arc::clone(&underlying),
        },
    }
}
