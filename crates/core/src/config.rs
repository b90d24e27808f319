//! 설정 관리 — bmcwatch.toml 파싱 및 런타임 설정
//!
//! [`BmcwatchConfig`]는 모니터 전체의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`BMCWATCH_BMC_IPMITOOL_PATH=/usr/bin/ipmitool` 형식)
//! 3. 설정 파일 (`bmcwatch.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), bmcwatch_core::error::BmcwatchError> {
//! use bmcwatch_core::config::BmcwatchConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = BmcwatchConfig::load("bmcwatch.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = BmcwatchConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BmcwatchError, ConfigError};

/// bmcwatch 통합 설정
///
/// `bmcwatch.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BmcwatchConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// BMC 질의 도구 설정
    #[serde(default)]
    pub bmc: BmcConfig,
    /// SEL 모니터 설정
    #[serde(default)]
    pub sel: SelConfig,
    /// 알림 싱크 설정
    #[serde(default)]
    pub sink: SinkConfig,
}

impl BmcwatchConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, BmcwatchError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, BmcwatchError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BmcwatchError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                BmcwatchError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, BmcwatchError> {
        toml::from_str(toml_str).map_err(|e| {
            BmcwatchError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `BMCWATCH_{SECTION}_{FIELD}`
    /// 예: `BMCWATCH_SINK_PATH=/var/log/bmcwatch/alerts.log`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "BMCWATCH_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "BMCWATCH_GENERAL_LOG_FORMAT");

        // BMC
        override_string(&mut self.bmc.ipmitool_path, "BMCWATCH_BMC_IPMITOOL_PATH");

        // SEL
        override_bool(&mut self.sel.enabled, "BMCWATCH_SEL_ENABLED");

        // Sink
        override_string(&mut self.sink.path, "BMCWATCH_SINK_PATH");
        override_string(&mut self.sink.ident, "BMCWATCH_SINK_IDENT");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), BmcwatchError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        // ipmitool 경로 검증
        if self.bmc.ipmitool_path.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "bmc.ipmitool_path".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }

        // 싱크 경로/식별자 검증
        if self.sink.path.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "sink.path".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }
        if self.sink.ident.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "sink.ident".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// BMC 질의 도구 설정
///
/// SEL 조회/시각 동기화는 모두 외부 `ipmitool` 바이너리 호출로 수행됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BmcConfig {
    /// ipmitool 바이너리 경로
    pub ipmitool_path: String,
}

impl Default for BmcConfig {
    fn default() -> Self {
        Self {
            ipmitool_path: "ipmitool".to_owned(),
        }
    }
}

/// SEL 모니터 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelConfig {
    /// 활성화 여부 (비활성 시 run은 아무 것도 하지 않고 성공)
    pub enabled: bool,
}

impl Default for SelConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// 알림 싱크 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// 알림이 축적되는 append-only 로그 파일 경로
    pub path: String,
    /// 싱크 라인 접두부에 기록되는 프로세스 식별자
    pub ident: String,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            path: "/var/log/bmcwatch/alerts.log".to_owned(),
            ident: "bmcwatch".to_owned(),
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => tracing::warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}
