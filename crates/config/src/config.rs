use std::path::PathBuf;

/// Application configuration carrying every file location the pipeline
/// touches. Built once (usually via [`Config::from_env`]) and passed by
/// reference into each operation; there are no process-wide path globals.
#[derive(Debug, Clone)]
pub struct Config {
    /// Monthly quality-control dataset (CSV with a header row).
    pub dataset_path: PathBuf,

    /// Unified labeled base the classifier is trained on.
    pub training_base_path: PathBuf,

    /// Fused classification pipeline artifact.
    pub model_path: PathBuf,

    /// Standalone fitted vectorizer artifact.
    pub vectorizer_path: PathBuf,

    /// Classification history log.
    pub log_path: PathBuf,

    /// Maximum age of a log entry, in days, before it is purged.
    pub retention_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/quality_control_outubro.csv"),
            training_base_path: PathBuf::from("data/base_de_dados_unificada.csv"),
            model_path: PathBuf::from("model/modelo_classificacao.json"),
            vectorizer_path: PathBuf::from("model/vectorizer.json"),
            log_path: PathBuf::from("data/logs/log_classificacoes.csv"),
            retention_days: 30,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables, falling back to the
    /// defaults above for anything unset.
    ///
    /// Recognized variables:
    /// - `SIGMA_DATASET_PATH`: monthly dataset file
    /// - `SIGMA_TRAINING_BASE_PATH`: labeled training base
    /// - `SIGMA_MODEL_PATH`: fused pipeline artifact
    /// - `SIGMA_VECTORIZER_PATH`: standalone vectorizer artifact
    /// - `SIGMA_LOG_PATH`: classification log file
    /// - `SIGMA_RETENTION_DAYS`: log retention horizon in days
    #[must_use]
    pub fn from_env() -> Self {
        // Load .env file
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Some(path) = env_path("SIGMA_DATASET_PATH") {
            config.dataset_path = path;
        }
        if let Some(path) = env_path("SIGMA_TRAINING_BASE_PATH") {
            config.training_base_path = path;
        }
        if let Some(path) = env_path("SIGMA_MODEL_PATH") {
            config.model_path = path;
        }
        if let Some(path) = env_path("SIGMA_VECTORIZER_PATH") {
            config.vectorizer_path = path;
        }
        if let Some(path) = env_path("SIGMA_LOG_PATH") {
            config.log_path = path;
        }
        if let Ok(days) = std::env::var("SIGMA_RETENTION_DAYS")
            && let Ok(days) = days.parse()
        {
            config.retention_days = days;
        }

        config
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name).ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_point_at_known_locations() {
        let config = Config::default();
        assert_eq!(
            config.model_path,
            PathBuf::from("model/modelo_classificacao.json")
        );
        assert_eq!(config.vectorizer_path, PathBuf::from("model/vectorizer.json"));
        assert_eq!(config.retention_days, 30);
    }
}
