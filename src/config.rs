use chrono::NaiveDate;

use crate::error::{ConfigError, PipelineError};
use crate::infrastructure::Credentials;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 点名表图片路径
    pub image_path: String,
    /// 操作员标记文件（TOML）
    pub marks_file: String,
    /// 报告输出文件
    pub report_file: String,
    /// 报告日期，未设置时使用运行当天
    pub report_date: Option<NaiveDate>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- Vision API 配置 ---
    pub vision_api_key: Option<String>,
    pub vision_access_token: Option<String>,
    pub vision_endpoint: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_path: "lista.png".to_string(),
            marks_file: "marcacao.toml".to_string(),
            report_file: "relatorio.txt".to_string(),
            report_date: None,
            verbose_logging: false,
            vision_api_key: None,
            vision_access_token: None,
            vision_endpoint: "https://vision.googleapis.com/v1/images:annotate".to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl Config {
    /// 从环境变量加载配置（会先尝试读取 .env）
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 从任意键值来源加载配置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let report_date = match non_empty("REPORT_DATE") {
            Some(value) => Some(
                NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
                    ConfigError::InvalidDate {
                        var_name: "REPORT_DATE".to_string(),
                        value,
                    }
                })?,
            ),
            None => None,
        };

        Ok(Self {
            image_path: lookup("ATTENDANCE_IMAGE").unwrap_or(default.image_path),
            marks_file: lookup("MARKS_FILE").unwrap_or(default.marks_file),
            report_file: lookup("REPORT_FILE").unwrap_or(default.report_file),
            report_date,
            verbose_logging: lookup("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            vision_api_key: non_empty("VISION_API_KEY"),
            vision_access_token: non_empty("VISION_ACCESS_TOKEN"),
            vision_endpoint: lookup("VISION_ENDPOINT").unwrap_or(default.vision_endpoint),
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
        })
    }

    /// 解析 OCR 服务凭据，访问令牌优先于 API key
    pub fn credentials(&self) -> Result<Credentials, PipelineError> {
        if let Some(token) = &self.vision_access_token {
            return Ok(Credentials::AccessToken(token.clone()));
        }
        if let Some(key) = &self.vision_api_key {
            return Ok(Credentials::ApiKey(key.clone()));
        }
        Err(PipelineError::MissingCredentials)
    }

    /// 报告日期，未配置时取本地当天
    pub fn report_date_or_today(&self) -> NaiveDate {
        self.report_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_without_env() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.image_path, "lista.png");
        assert_eq!(config.marks_file, "marcacao.toml");
        assert_eq!(config.request_timeout_secs, 60);
        assert!(config.report_date.is_none());
        assert!(config.vision_api_key.is_none());
    }

    #[test]
    fn test_overrides_and_bad_numbers() {
        let config = config_from(&[
            ("ATTENDANCE_IMAGE", "foto.jpg"),
            ("REQUEST_TIMEOUT_SECS", "abc"),
            ("VERBOSE_LOGGING", "true"),
            ("REPORT_DATE", "2024-05-03"),
        ])
        .unwrap();
        assert_eq!(config.image_path, "foto.jpg");
        assert_eq!(config.request_timeout_secs, 60);
        assert!(config.verbose_logging);
        assert_eq!(config.report_date, NaiveDate::from_ymd_opt(2024, 5, 3));
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let err = config_from(&[("REPORT_DATE", "03/05/2024")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDate { .. }));
    }

    #[test]
    fn test_missing_credentials() {
        let config = config_from(&[("VISION_API_KEY", "  ")]).unwrap();
        assert_eq!(
            config.credentials().unwrap_err(),
            PipelineError::MissingCredentials
        );
    }

    #[test]
    fn test_access_token_wins_over_api_key() {
        let config = config_from(&[
            ("VISION_API_KEY", "key"),
            ("VISION_ACCESS_TOKEN", "token"),
        ])
        .unwrap();
        assert_eq!(
            config.credentials().unwrap(),
            Credentials::AccessToken("token".to_string())
        );
    }
}
