use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::marketing::DEFAULT_MARKETING_FEE;

/// 폼 초기값 세트. 딜러십 표준 지표를 기본으로 한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultInputs {
    /// 대당 평균 이익 [USD]
    pub avg_profit_per_sale: f64,
    /// 예약 시승 1건당 비용 [USD]
    pub cost_per_test_drive: f64,
    /// 성약률 [%]
    pub close_rate_percent: f64,
    /// 광고 예산 [USD]
    pub ad_spend_budget: f64,
    /// 고정 프로그램 수수료 [USD]
    pub marketing_fee: f64,
}

impl Default for DefaultInputs {
    fn default() -> Self {
        Self {
            avg_profit_per_sale: 1_500.0,
            cost_per_test_drive: 45.0,
            close_rate_percent: 22.5,
            ad_spend_budget: 15_000.0,
            marketing_fee: DEFAULT_MARKETING_FEE,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 언어 코드 (auto/en-us/ko-kr)
    pub language: String,
    /// 언어팩 디렉터리 (없으면 내장 문자열 사용)
    pub language_pack_dir: Option<String>,
    /// GUI 창 투명도 (0.3~1.0)
    pub window_alpha: f32,
    /// 폼 초기값
    pub defaults: DefaultInputs,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            window_alpha: 1.0,
            defaults: DefaultInputs::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 직렬화/역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ConfigError::Serde(e) => write!(f, "설정 파싱 오류: {e}"),
            ConfigError::Serialize(e) => write!(f, "설정 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    let path = Path::new("config.toml");
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg)?;
        Ok(cfg)
    }
}

fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write("config.toml", content)?;
    Ok(())
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        save_config(self)
    }
}
