use crate::core::{CatalogSource, RawProduct};
use crate::utils::error::{CartError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_required_field,
    validate_unique_ids, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub session: Option<SessionConfig>,
    #[serde(default)]
    pub products: Vec<RawProduct>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub name: String,
    pub description: Option<String>,
    /// 啟動時把每個商品加入購物車一次
    pub preload: Option<bool>,
}

impl CatalogConfig {
    /// 從 TOML 檔案載入商品目錄
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CartError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CartError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SHOES_PRICE})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CartError::ConfigValidationError {
            field: "environment".to_string(),
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn preload(&self) -> bool {
        self.session
            .as_ref()
            .and_then(|session| session.preload)
            .unwrap_or(true)
    }

    /// Empty until `[session]` is present; `validate` reports the missing table.
    pub fn session_name(&self) -> &str {
        self.session
            .as_ref()
            .map(|session| session.name.as_str())
            .unwrap_or("")
    }
}

impl CatalogSource for CatalogConfig {
    fn products(&self) -> &[RawProduct] {
        &self.products
    }
}

impl Validate for CatalogConfig {
    // 個別商品的價格與名稱由掃描器處理，這裡只檢查整體結構
    fn validate(&self) -> Result<()> {
        let session = validate_required_field("session", &self.session)?;
        validate_non_empty_string("session.name", &session.name)?;
        validate_positive_number("products", self.products.len(), 1)?;
        validate_unique_ids("products.id", self.products.iter().map(|p| p.id.as_str()))?;
        Ok(())
    }
}
