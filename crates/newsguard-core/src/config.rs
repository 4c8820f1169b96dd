use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_PORT: u16 = 10000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub artifacts: ArtifactConfig,
    pub training: TrainingConfig,
    pub vectorizer: VectorizerConfig,
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    pub dir: String,
    pub vectorizer_file: String,
    pub model_file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub fake_csv: String,
    pub real_csv: String,
    pub text_column: String,
    pub test_size: f64,
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// Terms present in more than this fraction of documents are dropped.
    pub max_df: f64,
    pub min_df: usize,
    pub stop_words: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub c: f64,
    pub max_iter: usize,
    pub tol: Option<f64>,
    pub n_iter_no_change: usize,
    pub shuffle: bool,
    pub fit_intercept: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            artifacts: ArtifactConfig::default(),
            training: TrainingConfig::default(),
            vectorizer: VectorizerConfig::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: DEFAULT_PORT }
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
            vectorizer_file: "vectorizer.json".to_string(),
            model_file: "model.json".to_string(),
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            fake_csv: "Fake.csv".to_string(),
            real_csv: "True.csv".to_string(),
            text_column: "text".to_string(),
            test_size: 0.2,
            seed: 42,
        }
    }
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self { max_df: 0.7, min_df: 1, stop_words: true }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 50,
            tol: Some(1e-3),
            n_iter_no_change: 5,
            shuffle: true,
            fit_intercept: true,
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Ok(Self::load_from(Path::new("."), &env_name)?)
    }

    /// Load with config files looked up under `base` instead of the working directory.
    pub fn load_from(base: &Path, env_name: &str) -> Result<Self> {
        let config: Self = Self::figment(base, env_name)
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, then `config.toml`, then `config.<env>.toml`, then `APP_*`
    /// (nested with `__`), then `PORT`.
    pub fn figment(base: &Path, env_name: &str) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(base.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base.join("config.test.toml"))),
            _ => {}
        }
        figment
            .merge(Env::prefixed("APP_").split("__"))
            .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()))
    }

    pub fn validate(&self) -> Result<()> {
        let t = &self.training;
        if !(t.test_size > 0.0 && t.test_size < 1.0) {
            return Err(Error::InvalidConfig(format!("training.test_size must be in (0, 1), got {}", t.test_size)));
        }
        if t.text_column.trim().is_empty() {
            return Err(Error::InvalidConfig("training.text_column must not be empty".to_string()));
        }
        let v = &self.vectorizer;
        if !(v.max_df > 0.0 && v.max_df <= 1.0) {
            return Err(Error::InvalidConfig(format!("vectorizer.max_df must be in (0, 1], got {}", v.max_df)));
        }
        let c = &self.classifier;
        if c.c <= 0.0 {
            return Err(Error::InvalidConfig(format!("classifier.c must be positive, got {}", c.c)));
        }
        if c.max_iter == 0 {
            return Err(Error::InvalidConfig("classifier.max_iter must be at least 1".to_string()));
        }
        if self.artifacts.vectorizer_file == self.artifacts.model_file {
            return Err(Error::InvalidConfig("artifact file names must differ".to_string()));
        }
        Ok(())
    }

    pub fn artifact_dir(&self) -> PathBuf {
        expand_path(&self.artifacts.dir)
    }

    pub fn vectorizer_path(&self) -> PathBuf {
        resolve_with_base(&self.artifact_dir(), &self.artifacts.vectorizer_file)
    }

    pub fn model_path(&self) -> PathBuf {
        resolve_with_base(&self.artifact_dir(), &self.artifacts.model_file)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_trainer_conventions() {
        let config = Config::default();
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.training.seed, 42);
        assert!((config.training.test_size - 0.2).abs() < f64::EPSILON);
        assert!((config.vectorizer.max_df - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.classifier.max_iter, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_rejects_out_of_range() {
        let mut config = Config::default();
        config.training.test_size = 1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.vectorizer.max_df = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.classifier.c = -1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.artifacts.model_file = config.artifacts.vectorizer_file.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn artifact_paths_join_dir() {
        let mut config = Config::default();
        config.artifacts.dir = "/srv/models".to_string();
        assert_eq!(config.vectorizer_path(), PathBuf::from("/srv/models/vectorizer.json"));
        assert_eq!(config.model_path(), PathBuf::from("/srv/models/model.json"));
    }

    #[test]
    fn resolve_keeps_absolute() {
        let base = Path::new("/base");
        assert_eq!(resolve_with_base(base, "/abs/file"), PathBuf::from("/abs/file"));
        assert_eq!(resolve_with_base(base, "rel"), PathBuf::from("/base/rel"));
    }
}
