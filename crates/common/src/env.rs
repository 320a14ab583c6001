//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::debug;

/// Ensure the parent directory of a data file exists, creating it when missing.
pub async fn ensure_parent_dir(file: impl AsRef<Path>) -> anyhow::Result<()> {
    let file = file.as_ref();
    let Some(parent) = file.parent() else { return Ok(()) };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    if tokio::fs::metadata(parent).await.is_err() {
        debug!(dir = %parent.display(), "creating data directory");
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_parent() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("ship_env_{}", uuid::Uuid::new_v4()));
        let file = root.join("nested").join("ships.json");
        ensure_parent_dir(&file).await?;
        assert!(tokio::fs::metadata(root.join("nested")).await?.is_dir());
        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn bare_file_name_is_fine() -> anyhow::Result<()> {
        ensure_parent_dir("ships.json").await
    }
}
