//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository
//! instances based on runtime configuration.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::RepositoryConfig;
use super::repositories::LocalRepository;
#[cfg(feature = "remote-repo")]
use super::repositories::RemoteRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use super::RemoteConfig;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Remote record-store implementation
    Remote,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("remote", "local")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "remote" | "record-store" => Ok(Self::Remote),
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variables.
    ///
    /// Reads `REPOSITORY_TYPE`. Defaults to Remote when a record-store URL is
    /// present, otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var("RECORD_STORE_URL").is_ok() {
            Self::Remote
        } else {
            Self::Local
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use pulsepoint::db::{RepositoryFactory, RepositoryType};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let local_repo = RepositoryFactory::create_local();
///     let _ = local_repo.health_check().await?;
///     Ok(())
/// }
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `remote_config` - Connection settings (required for Remote)
    pub fn create(
        repo_type: RepositoryType,
        remote_config: Option<&RemoteConfig>,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Remote => {
                #[cfg(feature = "remote-repo")]
                {
                    let config = remote_config.ok_or_else(|| {
                        RepositoryError::configuration(
                            "Remote repository requires RemoteConfig",
                        )
                    })?;
                    let remote = Self::create_remote(config)?;
                    Ok(remote as Arc<dyn FullRepository>)
                }
                #[cfg(not(feature = "remote-repo"))]
                {
                    let _ = remote_config;
                    Err(RepositoryError::configuration(
                        "Remote repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create a remote record-store repository.
    #[cfg(feature = "remote-repo")]
    pub fn create_remote(config: &RemoteConfig) -> RepositoryResult<Arc<RemoteRepository>> {
        let repo = RemoteRepository::new(config.clone())?;
        Ok(Arc::new(repo))
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create repository from environment configuration.
    ///
    /// Reads `REPOSITORY_TYPE` to determine which repository to create.
    /// Defaults to Remote when a record-store URL is set, otherwise Local.
    pub fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = RepositoryType::from_env();

        match repo_type {
            RepositoryType::Remote => {
                #[cfg(feature = "remote-repo")]
                {
                    let config =
                        RemoteConfig::from_env().map_err(RepositoryError::configuration)?;
                    let remote = Self::create_remote(&config)?;
                    Ok(remote as Arc<dyn FullRepository>)
                }
                #[cfg(not(feature = "remote-repo"))]
                {
                    Err(RepositoryError::configuration(
                        "Remote repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create repository from a TOML configuration file.
    pub fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_repository_config(&config)
    }

    /// Create repository from the default configuration file location.
    ///
    /// Searches for `repository.toml` in standard locations.
    pub fn from_default_config() -> RepositoryResult<Arc<dyn FullRepository>> {
        let config = RepositoryConfig::from_default_location()?;
        Self::from_repository_config(&config)
    }

    fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        match repo_type {
            RepositoryType::Remote => {
                #[cfg(feature = "remote-repo")]
                {
                    let remote_config = config.to_remote_config()?.ok_or_else(|| {
                        RepositoryError::configuration(
                            "Remote repository requires record-store configuration",
                        )
                    })?;
                    let remote = Self::create_remote(&remote_config)?;
                    Ok(remote as Arc<dyn FullRepository>)
                }
                #[cfg(not(feature = "remote-repo"))]
                {
                    Err(RepositoryError::configuration(
                        "Remote repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }
}

/// Builder for configuring repository creation.
///
/// # Example
/// ```ignore
/// use pulsepoint::db::{RepositoryBuilder, RepositoryType};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let repo = RepositoryBuilder::new()
///         .repository_type(RepositoryType::Local)
///         .build()?;
///     Ok(())
/// }
/// ```
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
    #[cfg(feature = "remote-repo")]
    remote_config: Option<RemoteConfig>,
}

impl RepositoryBuilder {
    /// Create a new repository builder with default settings.
    ///
    /// Defaults to Remote when configured, otherwise Local.
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::from_env(),
            #[cfg(feature = "remote-repo")]
            remote_config: None,
        }
    }

    /// Set the repository type.
    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    /// Set the remote connection settings.
    #[cfg(feature = "remote-repo")]
    pub fn remote_config(mut self, config: RemoteConfig) -> Self {
        self.remote_config = Some(config);
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, RepositoryError> {
        self.repo_type = RepositoryType::from_env();

        if self.repo_type == RepositoryType::Remote {
            #[cfg(feature = "remote-repo")]
            {
                let config = RemoteConfig::from_env().map_err(RepositoryError::configuration)?;
                self.remote_config = Some(config);
            }
            #[cfg(not(feature = "remote-repo"))]
            {
                return Err(RepositoryError::configuration(
                    "Remote repository feature not enabled",
                ));
            }
        }

        Ok(self)
    }

    /// Load configuration from a TOML file.
    pub fn from_config_file<P: AsRef<Path>>(
        mut self,
        config_path: P,
    ) -> Result<Self, RepositoryError> {
        let repo_config = RepositoryConfig::from_file(config_path)?;

        self.repo_type = repo_config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        if self.repo_type == RepositoryType::Remote {
            #[cfg(feature = "remote-repo")]
            {
                let config = repo_config.to_remote_config()?.ok_or_else(|| {
                    RepositoryError::configuration(
                        "Remote repository requires record-store configuration",
                    )
                })?;
                self.remote_config = Some(config);
            }
            #[cfg(not(feature = "remote-repo"))]
            {
                return Err(RepositoryError::configuration(
                    "Remote repository feature not enabled",
                ));
            }
        }

        Ok(self)
    }

    /// Build the repository instance.
    pub fn build(self) -> RepositoryResult<Arc<dyn FullRepository>> {
        #[cfg(feature = "remote-repo")]
        let remote_config = self.remote_config.as_ref();
        #[cfg(not(feature = "remote-repo"))]
        let remote_config = None;

        RepositoryFactory::create(self.repo_type, remote_config)
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
