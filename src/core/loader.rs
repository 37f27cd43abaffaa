use crate::domain::ports::ContentSource;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A candidate location that could not be loaded, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct Miss {
    pub location: String,
    pub reason: String,
}

/// Result of trying a list of candidates in order.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub document: Option<Value>,
    pub loaded_from: Option<String>,
    pub misses: Vec<Miss>,
}

pub struct ContentLoader<S: ContentSource> {
    source: S,
}

impl<S: ContentSource> ContentLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Try each candidate in order and return the first one that parses as
    /// JSON. Failures are logged and recorded, never returned.
    pub async fn load_first<L: AsRef<str>>(&self, candidates: &[L]) -> LoadOutcome {
        let mut outcome = LoadOutcome::default();

        for candidate in candidates {
            let location = candidate.as_ref();
            let parsed = match self.source.fetch(location).await {
                Ok(bytes) => serde_json::from_slice::<Value>(&bytes).map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };

            match parsed {
                Ok(document) => {
                    tracing::debug!("Loaded {}", location);
                    outcome.document = Some(document);
                    outcome.loaded_from = Some(location.to_string());
                    return outcome;
                }
                Err(reason) => {
                    tracing::warn!("Could not load {}: {}", location, reason);
                    outcome.misses.push(Miss {
                        location: location.to_string(),
                        reason,
                    });
                }
            }
        }

        outcome
    }

    /// Load a list document, substituting `default` when nothing loads or the
    /// document is not a list of `T`.
    pub async fn load_list_or<T, L>(&self, candidates: &[L], default: Vec<T>) -> Vec<T>
    where
        T: DeserializeOwned,
        L: AsRef<str>,
    {
        let outcome = self.load_first(candidates).await;
        match outcome.document {
            Some(document) => list_or_default(document, default),
            None => {
                tracing::debug!("No candidate loaded, using defaults");
                default
            }
        }
    }
}

/// Shape check applied to every loaded list document: anything but a list
/// yields `default`; entries that are not a `T` are dropped one by one.
pub fn list_or_default<T: DeserializeOwned>(document: Value, default: Vec<T>) -> Vec<T> {
    let Value::Array(entries) = document else {
        tracing::warn!("Content document is not a list, using defaults");
        return default;
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("Skipping content entry {}: {}", position, e);
                None
            }
        })
        .collect()
}
