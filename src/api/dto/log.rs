//! DTOs for the diagnostic log endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LogTailQuery {
    /// Number of trailing lines to return (default 30).
    pub lines: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct LogTailResponse {
    pub file: String,
    pub lines: Vec<String>,
}
