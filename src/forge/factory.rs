//! Factory for creating forge implementations based on configuration.

use crate::{
    Result,
    forge::{
        config::RemoteConfig, github::Github, manager::ForgeManager,
        traits::Forge,
    },
};

/// Factory for creating forge implementations.
pub struct ForgeFactory;

impl ForgeFactory {
    /// Create a ForgeManager instance for the configured remote.
    pub async fn create(config: &RemoteConfig) -> Result<ForgeManager> {
        let forge = Self::create_github(config).await?;
        Ok(ForgeManager::new(forge))
    }

    async fn create_github(config: &RemoteConfig) -> Result<Box<dyn Forge>> {
        Ok(Box::new(Github::new(config.clone()).await?))
    }
}
