use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::{
    api::{fetch_genres, fetch_genres_from, FetchError},
    fs_json_util::{read_json, write_json_tab_indented, ReadJsonError},
    schema::{FilterFile, Genre},
};

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("The filter file {path:?} is not a JSON array of objects: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("An I/O error occurred on {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<ReadJsonError> for SyncError {
    fn from(e: ReadJsonError) -> Self {
        match e {
            ReadJsonError::Io { path, source } => Self::Io { path, source },
            ReadJsonError::Json { path, source, .. } => Self::Parse { path, source },
        }
    }
}

/// Replaces `options` and `ids` of every genre filter. Returns how many were updated.
pub fn apply_genres(filters: &mut FilterFile, genres: &[Genre]) -> usize {
    let mut updated = 0;
    for filter in filters.iter_mut().filter(|filter| filter.is_genre()) {
        filter.set_genres(genres);
        updated += 1;
    }
    updated
}

pub async fn update_filter_file(
    client: &reqwest::Client,
    path: &Path,
    base_url: &str,
) -> Result<(), SyncError> {
    let mut filters: FilterFile = read_json(path)?;
    let genres = fetch_genres(client, base_url).await?;
    save_genres(path, &mut filters, &genres)
}

/// Same as [`update_filter_file`], with the genre page at `endpoint` instead of the default search.
pub async fn update_filter_file_from(
    client: &reqwest::Client,
    path: &Path,
    base_url: &str,
    endpoint: &str,
) -> Result<(), SyncError> {
    let mut filters: FilterFile = read_json(path)?;
    let genres = fetch_genres_from(client, base_url, endpoint).await?;
    save_genres(path, &mut filters, &genres)
}

/// Merges `genres` and overwrites the file in one write.
fn save_genres(path: &Path, filters: &mut FilterFile, genres: &[Genre]) -> Result<(), SyncError> {
    if genres.is_empty() {
        warn!("No genre was found; genre filters will be emptied");
    }

    let updated = apply_genres(filters, genres);
    if updated == 0 {
        warn!("No filter in {path:?} is marked as a genre filter");
    }
    info!("Updated {updated} of {} filters", filters.len());

    write_json_tab_indented(path, &*filters).map_err(|source| SyncError::Io {
        path: path.to_owned(),
        source,
    })
}
