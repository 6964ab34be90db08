//! Error types for decoding and rendering.
//!
//! The merge engine itself never fails; only the collaborators around it do.

use thiserror::Error;

use crate::types::Scope;

#[derive(Error, Debug)]
pub enum TiersError {
    #[error("Failed to decode {scope} configuration{}: {source}", describe_target(.target))]
    Decode {
        scope: Scope,
        target: Option<String>,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to render {what}: {source}")]
    Render {
        what: &'static str,
        #[source]
        source: std::fmt::Error,
    },
}

fn describe_target(target: &Option<String>) -> String {
    match target {
        Some(target) => format!(" for '{target}'"),
        None => String::new(),
    }
}

pub type TiersResult<T> = Result<T, TiersError>;

impl TiersError {
    pub fn decode(scope: Scope, target: Option<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            scope,
            target,
            source,
        }
    }
}
