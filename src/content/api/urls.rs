//! URL building utilities for the same-origin content API

use crate::content::resource::Resource;

/// Builds the collection URL for a resource.
///
/// # Example
/// ```
/// use ethio_football::content::api::build_collection_url;
/// use ethio_football::content::Resource;
///
/// let url = build_collection_url("https://ethiofootball.example/", Resource::TopScorers);
/// assert_eq!(url, "https://ethiofootball.example/api/top-scorers");
/// ```
pub fn build_collection_url(api_base_url: &str, resource: Resource) -> String {
    format!("{}/api/{}", api_base_url.trim_end_matches('/'), resource.path())
}
