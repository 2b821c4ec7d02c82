use crate::domain::model::{FailurePolicy, HeaderPolicy};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ImportError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub import: ImportSection,
    pub repository: RepositoryConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSection {
    pub root_dir: Option<String>,
    pub header_policy: HeaderPolicy,
    pub failure_policy: FailurePolicy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

impl ImportConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| ImportError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ImportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SHOP_API_TOKEN})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(root_dir) = &self.import.root_dir {
            validation::root_dir("import.root_dir", root_dir)?;
        }

        if let Some(endpoint) = &self.repository.endpoint {
            validation::endpoint_url("repository.endpoint", endpoint)?;
        }

        if let Some(token) = &self.repository.token {
            validation::not_blank("repository.token", token)?;
        }

        if let Some(timeout) = self.repository.timeout_seconds {
            validation::at_least("repository.timeout_seconds", timeout, 1)?;
        }

        Ok(())
    }
}

impl ConfigProvider for ImportConfig {
    fn root_dir(&self) -> Option<&str> {
        self.import.root_dir.as_deref()
    }

    fn header_policy(&self) -> HeaderPolicy {
        self.import.header_policy
    }

    fn failure_policy(&self) -> FailurePolicy {
        self.import.failure_policy
    }
}

impl Validate for ImportConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
