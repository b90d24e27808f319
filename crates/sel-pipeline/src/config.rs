//! SEL 파이프라인 설정
//!
//! [`SelPipelineConfig`]는 core의 [`BmcwatchConfig`](bmcwatch_core::config::BmcwatchConfig)를
//! 기반으로 SEL 파이프라인 전용 설정을 제공합니다.
//!
//! # 사용 예시
//! ```ignore
//! use bmcwatch_core::config::BmcwatchConfig;
//! use bmcwatch_sel_pipeline::config::SelPipelineConfig;
//!
//! let core_config = BmcwatchConfig::default();
//! let config = SelPipelineConfig::from_core(&core_config);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SelPipelineError;

/// SEL 파이프라인 설정
///
/// core의 `BmcwatchConfig` 각 섹션에서 파생되며, 파이프라인 내부에서
/// 사용하는 추가 설정을 포함합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelPipelineConfig {
    /// 활성화 여부
    pub enabled: bool,
    /// ipmitool 실행 파일 경로
    pub ipmitool_path: String,
    /// 알림 싱크 파일 경로
    pub sink_path: String,
    /// 싱크 라인에 기록할 프로그램 식별자
    pub sink_ident: String,

    // --- 확장 설정 (core에 없는 추가 필드) ---
    /// SEL 목록 한 줄의 최대 바이트 수 (초과 시 해당 줄은 건너뜀)
    pub max_line_bytes: usize,
    /// true면 알림을 분류만 하고 싱크에 기록하지 않음
    pub dry_run: bool,
}

impl Default for SelPipelineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ipmitool_path: "ipmitool".to_owned(),
            sink_path: "/var/log/bmcwatch/alerts.log".to_owned(),
            sink_ident: "bmcwatch".to_owned(),
            max_line_bytes: 8192,
            dry_run: false,
        }
    }
}

impl SelPipelineConfig {
    /// core의 `BmcwatchConfig`에서 파이프라인 설정을 생성합니다.
    ///
    /// core 설정에 없는 확장 필드는 기본값이 적용됩니다.
    pub fn from_core(core: &bmcwatch_core::config::BmcwatchConfig) -> Self {
        Self {
            enabled: core.sel.enabled,
            ipmitool_path: core.bmc.ipmitool_path.clone(),
            sink_path: core.sink.path.clone(),
            sink_ident: core.sink.ident.clone(),
            ..Self::default()
        }
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), SelPipelineError> {
        const MAX_LINE_BYTES: usize = 1_048_576; // 1 MiB

        if self.ipmitool_path.trim().is_empty() {
            return Err(SelPipelineError::Config {
                field: "ipmitool_path".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        if self.sink_path.trim().is_empty() {
            return Err(SelPipelineError::Config {
                field: "sink_path".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        if self.sink_ident.trim().is_empty() {
            return Err(SelPipelineError::Config {
                field: "sink_ident".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        if self.max_line_bytes == 0 || self.max_line_bytes > MAX_LINE_BYTES {
            return Err(SelPipelineError::Config {
                field: "max_line_bytes".to_owned(),
                reason: format!("must be 1-{}", MAX_LINE_BYTES),
            });
        }

        Ok(())
    }
}

/// 파이프라인 설정 빌더
///
/// 3개 이상의 설정 필드가 있으므로 빌더 패턴을 사용합니다.
#[derive(Default)]
pub struct SelPipelineConfigBuilder {
    config: SelPipelineConfig,
}

impl SelPipelineConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 활성화 여부를 설정합니다.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    /// ipmitool 실행 파일 경로를 설정합니다.
    pub fn ipmitool_path(mut self, path: impl Into<String>) -> Self {
        self.config.ipmitool_path = path.into();
        self
    }

    /// 알림 싱크 파일 경로를 설정합니다.
    pub fn sink_path(mut self, path: impl Into<String>) -> Self {
        self.config.sink_path = path.into();
        self
    }

    /// 싱크 식별자를 설정합니다.
    pub fn sink_ident(mut self, ident: impl Into<String>) -> Self {
        self.config.sink_ident = ident.into();
        self
    }

    /// SEL 한 줄의 최대 바이트 수를 설정합니다.
    pub fn max_line_bytes(mut self, bytes: usize) -> Self {
        self.config.max_line_bytes = bytes;
        self
    }

    /// dry-run 모드를 설정합니다.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.config.dry_run = dry_run;
        self
    }

    /// 설정을 검증하고 `SelPipelineConfig`를 생성합니다.
    pub fn build(self) -> Result<SelPipelineConfig, SelPipelineError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SelPipelineConfig::default();
        config.validate().unwrap();
    }

    #[test]
    fn from_core_preserves_values() {
        let mut core = bmcwatch_core::config::BmcwatchConfig::default();
        core.bmc.ipmitool_path = "/usr/local/bin/ipmitool".to_owned();
        core.sink.path = "/var/log/test/alerts.log".to_owned();
        core.sink.ident = "pmon".to_owned();
        core.sel.enabled = false;

        let config = SelPipelineConfig::from_core(&core);
        assert_eq!(config.ipmitool_path, "/usr/local/bin/ipmitool");
        assert_eq!(config.sink_path, "/var/log/test/alerts.log");
        assert_eq!(config.sink_ident, "pmon");
        assert!(!config.enabled);
        // 확장 필드는 기본값
        assert_eq!(config.max_line_bytes, 8192);
        assert!(!config.dry_run);
    }

    #[test]
    fn validate_rejects_empty_ipmitool_path() {
        let config = SelPipelineConfig {
            ipmitool_path: "  ".to_owned(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_sink_ident() {
        let config = SelPipelineConfig {
            sink_ident: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_max_line_bytes() {
        let config = SelPipelineConfig {
            max_line_bytes: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_oversized_max_line_bytes() {
        let config = SelPipelineConfig {
            max_line_bytes: 2_000_000,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn builder_creates_valid_config() {
        let config = SelPipelineConfigBuilder::new()
            .ipmitool_path("/opt/ipmitool")
            .sink_path("/tmp/alerts.log")
            .dry_run(true)
            .build()
            .unwrap();
        assert_eq!(config.ipmitool_path, "/opt/ipmitool");
        assert_eq!(config.sink_path, "/tmp/alerts.log");
        assert!(config.dry_run);
    }

    #[test]
    fn builder_rejects_invalid_config() {
        let result = SelPipelineConfigBuilder::new()
            .max_line_bytes(0)
            .build();
        assert!(result.is_err());
    }
}
