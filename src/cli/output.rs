//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ListkitError;

/// Map domain errors to the message printed on stderr.
pub fn map_error(e: &ListkitError) -> String {
    match e {
        ListkitError::NotAuthenticated => {
            "Not authenticated. Run `listkit login` first.".to_string()
        }
        ListkitError::Fetch(err) => err.message.clone(),
        other => other.to_string(),
    }
}
