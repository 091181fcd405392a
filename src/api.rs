use log::info;
use reqwest::header;

use crate::{scanner::scan_document, schema::Genre};

pub const USER_AGENT: &str = "Aidoku";
pub const GENRE_ENDPOINT: &str = "/?s=genre&post_type=wp-manga";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to fetch {url}: {source}")]
    Network { url: String, source: reqwest::Error },
    #[error("The response from {url} is not valid UTF-8: {source}")]
    Decode {
        url: String,
        source: std::string::FromUtf8Error,
    },
}

pub fn reqwest_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().connection_verbose(true).build()
}

fn trim_base_url(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

pub fn genre_url(base_url: &str, endpoint: &str) -> String {
    format!("{}{endpoint}", trim_base_url(base_url))
}

pub fn referer(base_url: &str) -> String {
    format!("{}/", trim_base_url(base_url))
}

pub fn genre_request(
    client: &reqwest::Client,
    base_url: &str,
    endpoint: &str,
) -> reqwest::Result<reqwest::Request> {
    client
        .get(genre_url(base_url, endpoint))
        .header(header::USER_AGENT, USER_AGENT)
        .header(header::REFERER, referer(base_url))
        .build()
}

pub async fn fetch_genres(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<Vec<Genre>, FetchError> {
    fetch_genres_from(client, base_url, GENRE_ENDPOINT).await
}

pub async fn fetch_genres_from(
    client: &reqwest::Client,
    base_url: &str,
    endpoint: &str,
) -> Result<Vec<Genre>, FetchError> {
    let url = genre_url(base_url, endpoint);
    let network = |source| FetchError::Network {
        url: url.clone(),
        source,
    };
    info!("Fetching {url}");
    let request = genre_request(client, base_url, endpoint).map_err(network)?;
    let response = client
        .execute(request)
        .await
        .and_then(|response| response.error_for_status())
        .map_err(network)?;
    let body = response.bytes().await.map_err(network)?;
    let document =
        String::from_utf8(body.to_vec()).map_err(|source| FetchError::Decode { url, source })?;
    let genres = scan_document(&document);
    info!("Found {} genres", genres.len());
    Ok(genres)
}
