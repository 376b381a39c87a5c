mod core;
mod fetch_utils;
pub mod http_client;
mod source;
pub mod urls;

pub use core::ContentApi;
pub use http_client::create_http_client_with_timeout;
pub use source::{HttpSource, RecordSource};
pub use urls::build_collection_url;

pub(crate) use fetch_utils::{parse_json_array, read_success_body, request_error};
