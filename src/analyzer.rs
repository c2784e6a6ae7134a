//! Watermark detection in an existing changelog.
use log::*;
use regex::Regex;
use std::{io::ErrorKind, path::Path, sync::LazyLock};
use tokio::fs;

use crate::Result;

// "#123" not preceded by a word character or "&" (html entities)
static REFERENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(?:^|[^\w&])#(?<id>\d+)\b").unwrap());

/// Finds the highest pull request id already recorded in a changelog.
pub struct IdsAnalyzer;

impl IdsAnalyzer {
    /// Highest `#<id>` reference in the content, or 0 when there is none.
    pub fn highest_id(content: &str) -> u64 {
        REFERENCE_REGEX
            .captures_iter(content)
            .filter_map(|captures| captures["id"].parse::<u64>().ok())
            .max()
            .unwrap_or(0)
    }

    /// Same as [`IdsAnalyzer::highest_id`] for a file; a missing file has
    /// no references. Bytes that are not UTF-8 are scanned lossily.
    pub async fn highest_id_in_file(path: &Path) -> Result<u64> {
        match fs::read(path).await {
            Ok(bytes) => {
                Ok(Self::highest_id(&String::from_utf8_lossy(&bytes)))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "no changelog found at {}: starting from 0",
                    path.display()
                );
                Ok(0)
            }
            Err(err) => Err(err.into()),
        }
    }
}
