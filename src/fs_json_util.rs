use std::{fmt::Debug, io::BufReader, path::PathBuf};

use fs_err::File;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

#[derive(Debug, thiserror::Error)]
pub enum ReadJsonError {
    #[error("An I/O error occurred while reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("While trying to parse {path:?} as {type_name}: {source}")]
    Json {
        path: PathBuf,
        type_name: &'static str,
        source: serde_json::Error,
    },
}

pub fn read_json<P: Into<PathBuf> + Debug, T: for<'de> Deserialize<'de>>(
    path: P,
) -> Result<T, ReadJsonError> {
    let path = path.into();
    let file = File::open(&path).map_err(|source| ReadJsonError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        if source.is_io() {
            ReadJsonError::Io {
                path,
                source: source.into(),
            }
        } else {
            ReadJsonError::Json {
                path,
                type_name: std::any::type_name::<T>(),
                source,
            }
        }
    })
}

/// Tab-indented JSON with non-ASCII characters written as-is and a trailing newline.
pub fn to_tab_indented_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Serializes the whole value first, so nothing is written if serialization fails.
pub fn write_json_tab_indented<P: Into<PathBuf>, T: Serialize + ?Sized>(
    path: P,
    value: &T,
) -> std::io::Result<()> {
    let bytes = to_tab_indented_json(value)?;
    fs_err::write(path.into(), bytes)
}
