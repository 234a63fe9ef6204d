//! Cache keys and the skip sentinel.
//!
//! A [`QueryKey`] names one logical subscription: the procedure path plus its
//! input. Keys are compared only through [`hash_key`], a stable JSON rendering
//! (`serde_json` objects keep their keys sorted), so two inputs that serialize
//! to the same document share a key no matter how they were built.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use smallvec::SmallVec;

use crate::error::Result;

pub type PathSegments = SmallVec<[String; 4]>;

/// Input of a subscription, or the sentinel meaning "not available yet".
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Input {
    #[default]
    Skip,
    Value(Value),
}

/// The skip sentinel.
pub const SKIP: Input = Input::Skip;

impl Input {
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Input::Value(serde_json::to_value(value)?))
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Input::Skip)
    }

    /// What a transport receives: `None` for the sentinel and for JSON `null`.
    pub fn effective(&self) -> Option<&Value> {
        match self {
            Input::Skip | Input::Value(Value::Null) => None,
            Input::Value(v) => Some(v),
        }
    }
}

impl From<Value> for Input {
    fn from(value: Value) -> Self {
        Input::Value(value)
    }
}

/// Comparable output of [`hash_key`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyHash(String);

impl KeyHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QueryKey {
    path: PathSegments,
    input: Input,
}

impl QueryKey {
    pub fn new<I, S>(path: I, input: Input) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path: PathSegments = path.into_iter().map(Into::into).collect();
        debug_assert!(!path.is_empty(), "procedure path must not be empty");
        Self { path, input }
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    /// `["post", "onAdd"]` -> `"post.onAdd"`
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }

    pub fn key_hash(&self) -> KeyHash {
        hash_key(self)
    }
}

/// Deterministic hash of a key: `[[path..], {"input": .., "type": "subscription"}]`.
/// The `input` entry is absent for the skip sentinel.
pub fn hash_key(key: &QueryKey) -> KeyHash {
    let mut meta = Map::new();
    if let Input::Value(v) = &key.input {
        meta.insert("input".to_owned(), v.clone());
    }
    meta.insert("type".to_owned(), Value::from("subscription"));

    let path: Vec<Value> = key.path.iter().map(|s| Value::from(s.as_str())).collect();
    KeyHash(Value::Array(vec![Value::Array(path), Value::Object(meta)]).to_string())
}
