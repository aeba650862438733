//! Configuration loading and assistant factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use lingo_core::engine::DEFAULT_DISTRACTORS;
use lingo_core::store::DEFAULT_STORE_FILE;
use lingo_core::traits::{Assistant, DisabledAssistant};

use crate::openai::OpenAiAssistant;

/// Environment variable holding the OpenAI key.
pub const OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";

/// Which assistant backend to use.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AssistantConfig {
    OpenAI {
        api_key: String,
        #[serde(default)]
        model: Option<String>,
        #[serde(default)]
        base_url: Option<String>,
    },
    #[default]
    Disabled,
}

impl std::fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssistantConfig::OpenAI {
                api_key: _,
                model,
                base_url,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("model", model)
                .field("base_url", base_url)
                .finish(),
            AssistantConfig::Disabled => f.write_str("Disabled"),
        }
    }
}

/// Quiz settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Wrong options shown per round.
    #[serde(default = "default_distractors")]
    pub distractors: usize,
    /// Fixed seed for reproducible quizzes.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            distractors: default_distractors(),
            seed: None,
        }
    }
}

fn default_distractors() -> usize {
    DEFAULT_DISTRACTORS
}

/// Top-level lingo configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LingoConfig {
    /// Where the term dictionary is persisted.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// Assistant backend.
    #[serde(default)]
    pub assistant: AssistantConfig,
    /// Quiz settings.
    #[serde(default)]
    pub quiz: QuizConfig,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_FILE)
}

impl Default for LingoConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            assistant: AssistantConfig::default(),
            quiz: QuizConfig::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Resolve env vars in an assistant config.
fn resolve_assistant_config(config: &AssistantConfig) -> AssistantConfig {
    match config {
        AssistantConfig::OpenAI {
            api_key,
            model,
            base_url,
        } => AssistantConfig::OpenAI {
            api_key: resolve_env_vars(api_key),
            model: model.as_ref().map(|m| resolve_env_vars(m)),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
        },
        AssistantConfig::Disabled => AssistantConfig::Disabled,
    }
}

/// Apply an `OPENAI_API_KEY`-style override to an assistant config.
fn apply_key_override(config: AssistantConfig, key: Option<String>) -> AssistantConfig {
    let Some(key) = key.filter(|k| !k.trim().is_empty()) else {
        return config;
    };
    match config {
        AssistantConfig::OpenAI {
            model, base_url, ..
        } => AssistantConfig::OpenAI {
            api_key: key,
            model,
            base_url,
        },
        AssistantConfig::Disabled => AssistantConfig::OpenAI {
            api_key: key,
            model: None,
            base_url: None,
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `lingo.toml` in the current directory
/// 2. `~/.config/lingo/config.toml`
///
/// `OPENAI_API_KEY` enables (or re-keys) the OpenAI assistant.
pub fn load_config() -> Result<LingoConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<LingoConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("lingo.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<LingoConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => LingoConfig::default(),
    };

    config.assistant = apply_key_override(
        resolve_assistant_config(&config.assistant),
        std::env::var(OPENAI_KEY_VAR).ok(),
    );

    anyhow::ensure!(
        config.quiz.distractors >= 1,
        "quiz.distractors must be at least 1"
    );

    debug!(
        path = ?config_path,
        assistant = ?config.assistant,
        "configuration loaded"
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lingo"))
}

/// Create the assistant described by `config`.
///
/// An OpenAI entry whose key resolved to nothing yields a disabled
/// assistant, so hosts only ever need to check the capability flag.
pub fn create_assistant(config: &AssistantConfig) -> Box<dyn Assistant> {
    match config {
        AssistantConfig::OpenAI {
            api_key,
            model,
            base_url,
        } if !api_key.trim().is_empty() => {
            info!("AI assistant enabled (openai)");
            Box::new(OpenAiAssistant::new(
                api_key.trim(),
                model.clone(),
                base_url.clone(),
            ))
        }
        _ => {
            debug!("AI assistant disabled");
            Box::new(DisabledAssistant)
        }
    }
}

#[cfg(test)]
mod tests {
    use lingo_core::traits::Capability;

    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_LINGO_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_LINGO_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_LINGO_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${_LINGO_UNSET_VAR}"), "");
        std::env::remove_var("_LINGO_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = LingoConfig::default();
        assert_eq!(config.store_path, PathBuf::from("slang.json"));
        assert_eq!(config.assistant, AssistantConfig::Disabled);
        assert_eq!(config.quiz.distractors, 3);
        assert_eq!(config.quiz.seed, None);
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
store_path = "data/slang.json"

[assistant]
type = "openai"
api_key = "sk-test"
model = "gpt-4o"

[quiz]
distractors = 2
seed = 99
"#;
        let config: LingoConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.store_path, PathBuf::from("data/slang.json"));
        assert!(matches!(
            config.assistant,
            AssistantConfig::OpenAI { ref model, .. } if model.as_deref() == Some("gpt-4o")
        ));
        assert_eq!(config.quiz.distractors, 2);
        assert_eq!(config.quiz.seed, Some(99));
    }

    #[test]
    fn parse_disabled_assistant() {
        let config: LingoConfig = toml::from_str("[assistant]\ntype = \"disabled\"\n").unwrap();
        assert_eq!(config.assistant, AssistantConfig::Disabled);
    }

    #[test]
    fn key_override_enables_openai() {
        let config = apply_key_override(AssistantConfig::Disabled, Some("sk-env".into()));
        assert!(matches!(
            config,
            AssistantConfig::OpenAI { ref api_key, .. } if api_key == "sk-env"
        ));

        let configured = AssistantConfig::OpenAI {
            api_key: "sk-file".into(),
            model: Some("gpt-4o".into()),
            base_url: None,
        };
        let config = apply_key_override(configured.clone(), Some("sk-env".into()));
        assert!(matches!(
            config,
            AssistantConfig::OpenAI { ref api_key, ref model, .. }
                if api_key == "sk-env" && model.as_deref() == Some("gpt-4o")
        ));

        assert_eq!(apply_key_override(configured.clone(), Some("  ".into())), configured);
        assert_eq!(apply_key_override(configured.clone(), None), configured);
    }

    #[test]
    fn empty_key_disables_assistant() {
        let config = AssistantConfig::OpenAI {
            api_key: String::new(),
            model: None,
            base_url: None,
        };
        assert_eq!(create_assistant(&config).capability(), Capability::Disabled);
        assert_eq!(
            create_assistant(&AssistantConfig::Disabled).capability(),
            Capability::Disabled
        );

        let config = AssistantConfig::OpenAI {
            api_key: "sk-test".into(),
            model: None,
            base_url: None,
        };
        let assistant = create_assistant(&config);
        assert_eq!(assistant.capability(), Capability::Enabled);
        assert_eq!(assistant.name(), "openai");
    }

    #[test]
    fn debug_masks_api_key() {
        let config = AssistantConfig::OpenAI {
            api_key: "sk-secret".into(),
            model: None,
            base_url: None,
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn explicit_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn zero_distractors_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lingo.toml");
        std::fs::write(&path, "[quiz]\ndistractors = 0\n").unwrap();
        let err = load_config_from(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("distractors"));
    }
}
