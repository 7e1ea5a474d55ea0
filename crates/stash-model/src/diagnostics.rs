use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::error;

/// Logs a raw upstream document so a broken response can be reproduced offline.
pub(crate) fn log_raw_document(prefix: &str, document: &[u8]) {
    error!(target: "stash_model::diagnostics", "{}: base64 bytes:", prefix);
    error!(target: "stash_model::diagnostics", "{}", STANDARD.encode(document));
    error!(target: "stash_model::diagnostics", "END");
}
