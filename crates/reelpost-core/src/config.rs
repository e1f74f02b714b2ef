//! Configuration module
//!
//! Configuration is read from the environment (optionally seeded from a `.env` file)
//! and covers the object storage backend, the document store backend, logging and the
//! publish wizard's presentation settings.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::constants::{MAX_ANIMATION_SPEED_MULTIPLIER, POSTS_COLLECTION};
use crate::storage_types::{DocumentBackend, StorageBackend};
use crate::validation::is_valid_segment;

const DEFAULT_LOCAL_STORAGE_PATH: &str = "./data/objects";
const DEFAULT_LOCAL_STORAGE_BASE_URL: &str = "http://localhost:3000/objects";
const DEFAULT_DOCUMENT_STORE_PATH: &str = "./data/documents";
const DEFAULT_ANIMATION_SPEED_MULTIPLIER: f64 = 1.0;

/// What to do with an uploaded thumbnail when the record write that should reference it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrphanPolicy {
    /// Delete the uploaded object so no unreferenced thumbnail is left behind
    #[default]
    DeleteUploaded,
    /// Leave the object in place
    Keep,
}

impl FromStr for OrphanPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "delete" | "delete_uploaded" => Ok(OrphanPolicy::DeleteUploaded),
            "keep" => Ok(OrphanPolicy::Keep),
            _ => Err(anyhow::anyhow!("Invalid orphan policy: {}", s)),
        }
    }
}

impl Display for OrphanPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            OrphanPolicy::DeleteUploaded => write!(f, "delete"),
            OrphanPolicy::Keep => write!(f, "keep"),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// Base configuration shared by every front end
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub environment: String,
    pub log_format: LogFormat,
}

/// Publisher configuration
#[derive(Clone, Debug)]
pub struct PublisherConfig {
    pub base: BaseConfig,
    // Object storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub aws_region: Option<String>,
    pub local_storage_path: String,
    pub local_storage_base_url: String,
    // Document store configuration
    pub document_backend: DocumentBackend,
    pub document_store_path: String,
    pub database_url: Option<String>,
    pub posts_collection: String,
    // Wizard behavior
    pub animation_speed_multiplier: f64,
    pub orphan_policy: OrphanPolicy,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<PublisherConfig>);

impl Default for Config {
    fn default() -> Self {
        Config(Box::new(PublisherConfig::default()))
    }
}

impl Config {
    fn as_publisher(&self) -> &PublisherConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = PublisherConfig::from_env()?;
        let config = Config(Box::new(config));
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_publisher().validate()
    }

    pub fn environment(&self) -> &str {
        &self.as_publisher().base.environment
    }

    pub fn log_format(&self) -> LogFormat {
        self.as_publisher().base.log_format
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_publisher().storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.as_publisher().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.as_publisher().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_publisher().s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.as_publisher().aws_region.as_deref()
    }

    pub fn local_storage_path(&self) -> &str {
        &self.as_publisher().local_storage_path
    }

    pub fn local_storage_base_url(&self) -> &str {
        &self.as_publisher().local_storage_base_url
    }

    pub fn document_backend(&self) -> DocumentBackend {
        self.as_publisher().document_backend
    }

    pub fn document_store_path(&self) -> &str {
        &self.as_publisher().document_store_path
    }

    pub fn database_url(&self) -> Option<&str> {
        self.as_publisher().database_url.as_deref()
    }

    pub fn posts_collection(&self) -> &str {
        &self.as_publisher().posts_collection
    }

    pub fn animation_speed_multiplier(&self) -> f64 {
        self.as_publisher().animation_speed_multiplier
    }

    pub fn orphan_policy(&self) -> OrphanPolicy {
        self.as_publisher().orphan_policy
    }
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            base: BaseConfig {
                environment: "development".to_string(),
                log_format: LogFormat::Text,
            },
            storage_backend: StorageBackend::Local,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            aws_region: None,
            local_storage_path: DEFAULT_LOCAL_STORAGE_PATH.to_string(),
            local_storage_base_url: DEFAULT_LOCAL_STORAGE_BASE_URL.to_string(),
            document_backend: DocumentBackend::File,
            document_store_path: DEFAULT_DOCUMENT_STORE_PATH.to_string(),
            database_url: None,
            posts_collection: POSTS_COLLECTION.to_string(),
            animation_speed_multiplier: DEFAULT_ANIMATION_SPEED_MULTIPLIER,
            orphan_policy: OrphanPolicy::default(),
        }
    }
}

impl PublisherConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let log_format = match lookup("LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => LogFormat::Text,
        };

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::Local,
        };

        let document_backend = match lookup("DOCUMENT_BACKEND") {
            Some(value) => value.parse()?,
            None => DocumentBackend::File,
        };

        let animation_speed_multiplier = match lookup("ANIMATION_SPEED_MULTIPLIER") {
            Some(value) => value.trim().parse::<f64>().map_err(|_| {
                anyhow::anyhow!("ANIMATION_SPEED_MULTIPLIER must be a number, got {:?}", value)
            })?,
            None => DEFAULT_ANIMATION_SPEED_MULTIPLIER,
        };

        let orphan_policy = match lookup("ORPHAN_POLICY") {
            Some(value) => value.parse()?,
            None => OrphanPolicy::default(),
        };

        Ok(PublisherConfig {
            base: BaseConfig {
                environment,
                log_format,
            },
            storage_backend,
            s3_bucket: lookup("S3_BUCKET"),
            s3_region: lookup("S3_REGION"),
            s3_endpoint: lookup("S3_ENDPOINT"),
            aws_region: lookup("AWS_REGION"),
            local_storage_path: lookup("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|| DEFAULT_LOCAL_STORAGE_PATH.to_string()),
            local_storage_base_url: lookup("LOCAL_STORAGE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_LOCAL_STORAGE_BASE_URL.to_string()),
            document_backend,
            document_store_path: lookup("DOCUMENT_STORE_PATH")
                .unwrap_or_else(|| DEFAULT_DOCUMENT_STORE_PATH.to_string()),
            database_url: lookup("DATABASE_URL"),
            posts_collection: lookup("POSTS_COLLECTION")
                .unwrap_or_else(|| POSTS_COLLECTION.to_string()),
            animation_speed_multiplier,
            orphan_policy,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let multiplier = self.animation_speed_multiplier;
        if !multiplier.is_finite() || multiplier <= 0.0 || multiplier > MAX_ANIMATION_SPEED_MULTIPLIER {
            return Err(anyhow::anyhow!(
                "ANIMATION_SPEED_MULTIPLIER must be greater than 0 and at most {}",
                MAX_ANIMATION_SPEED_MULTIPLIER
            ));
        }

        if !is_valid_segment(&self.posts_collection) {
            return Err(anyhow::anyhow!(
                "POSTS_COLLECTION must be 1-256 characters of [A-Za-z0-9._-], got {:?}",
                self.posts_collection
            ));
        }

        if self.storage_backend == StorageBackend::S3 {
            if self.s3_bucket.is_none() {
                return Err(anyhow::anyhow!(
                    "S3_BUCKET is required when STORAGE_BACKEND=s3"
                ));
            }
            if self.s3_region.is_none() && self.aws_region.is_none() {
                return Err(anyhow::anyhow!(
                    "S3_REGION or AWS_REGION is required when STORAGE_BACKEND=s3"
                ));
            }
        }

        if self.document_backend == DocumentBackend::Postgres && self.database_url.is_none() {
            return Err(anyhow::anyhow!(
                "DATABASE_URL is required when DOCUMENT_BACKEND=postgres"
            ));
        }

        Ok(())
    }
}
