use crate::core::route_finder::RoutePatterns;
use crate::utils::error::{Result, ToolError};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// `--config` 指定的 TOML 檔，所有欄位皆為選填
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    pub icon: Option<IconConfig>,
    pub routes: Option<RoutesConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IconConfig {
    pub input: Option<String>,
    pub output: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoutesConfig {
    pub source: Option<String>,
    pub route_marker: Option<String>,
    pub path_fragment: Option<String>,
    pub function_marker: Option<String>,
}

impl ToolsConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ToolError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BACKEND_DIR})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").expect("static regex is valid");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn icon_input(&self) -> Option<&str> {
        self.icon.as_ref().and_then(|i| i.input.as_deref())
    }

    pub fn icon_output(&self) -> Option<&str> {
        self.icon.as_ref().and_then(|i| i.output.as_deref())
    }

    pub fn route_source(&self) -> Option<&str> {
        self.routes.as_ref().and_then(|r| r.source.as_deref())
    }

    /// 以設定檔覆蓋預設的比對條件
    pub fn route_patterns(&self) -> RoutePatterns {
        let mut patterns = RoutePatterns::default();
        if let Some(routes) = &self.routes {
            if let Some(marker) = &routes.route_marker {
                patterns.route_marker = marker.clone();
            }
            if let Some(fragment) = &routes.path_fragment {
                patterns.path_fragment = fragment.clone();
            }
            if let Some(marker) = &routes.function_marker {
                patterns.function_marker = marker.clone();
            }
        }
        patterns
    }
}

impl Validate for ToolsConfig {
    fn validate(&self) -> Result<()> {
        if let Some(input) = self.icon_input() {
            validate_path("icon.input", input)?;
        }
        if let Some(output) = self.icon_output() {
            validate_path("icon.output", output)?;
        }
        if let Some(source) = self.route_source() {
            validate_path("routes.source", source)?;
        }
        if let Some(routes) = &self.routes {
            if let Some(marker) = &routes.route_marker {
                validate_non_empty_string("routes.route_marker", marker)?;
            }
            if let Some(fragment) = &routes.path_fragment {
                validate_non_empty_string("routes.path_fragment", fragment)?;
            }
            if let Some(marker) = &routes.function_marker {
                validate_non_empty_string("routes.function_marker", marker)?;
            }
        }
        Ok(())
    }
}
