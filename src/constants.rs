use std::env;

// Backend address is env-configurable; the default matches the local
// development backend.
lazy_static::lazy_static! {
    pub static ref BACKEND_URL: String = env::var("PITWALL_BACKEND_URL")
        .unwrap_or_else(|_| "http://localhost:8000".to_string());
}
