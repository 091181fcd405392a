use derive_more::{AsRef, Display, From};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, PartialEq, Eq, Debug, From, AsRef, Display, Serialize, Deserialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct GenreId(String);

#[derive(Clone, PartialEq, Eq, Debug, From, AsRef, Display, Serialize, Deserialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct GenreName(String);

/// One checkbox option of the genre filter.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Genre {
    pub id: GenreId,
    pub name: GenreName,
}

impl Genre {
    /// Returns `None` unless `id` is non-empty and `name` has something left after trimming.
    pub fn new(id: impl Into<String>, name: &str) -> Option<Self> {
        let id = id.into();
        let name = name.trim();
        if id.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self {
            id: id.into(),
            name: name.to_owned().into(),
        })
    }
}

pub const GENRE_MARKER_KEY: &str = "isGenre";
pub const OPTIONS_KEY: &str = "options";
pub const IDS_KEY: &str = "ids";

/// A single filter definition.
///
/// Only `isGenre`, `options` and `ids` are interpreted; every other field
/// is carried through untouched, in its original order.
#[derive(Clone, PartialEq, Debug, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSpec(Map<String, Value>);

impl FilterSpec {
    pub fn is_genre(&self) -> bool {
        self.0.get(GENRE_MARKER_KEY).map_or(false, is_truthy)
    }

    /// Overwrites `options` and `ids` wholesale, index-aligned with `genres`.
    pub fn set_genres(&mut self, genres: &[Genre]) {
        let (options, ids) = genres
            .iter()
            .map(|genre| {
                (
                    Value::from(genre.name.to_string()),
                    Value::from(genre.id.to_string()),
                )
            })
            .unzip();
        self.0.insert(OPTIONS_KEY.to_owned(), Value::Array(options));
        self.0.insert(IDS_KEY.to_owned(), Value::Array(ids));
    }
}

pub type FilterFile = Vec<FilterSpec>;

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
