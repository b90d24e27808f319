//! 에러 타입 — 도메인별 에러 정의

/// bmcwatch 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum BmcwatchError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 모니터 실행 에러
    #[error("monitor error: {0}")]
    Monitor(#[from] MonitorError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 모니터 실행 에러
///
/// SEL 소스(BMC 질의 도구)와 알림 싱크는 외부 협력자이므로
/// 실패 원인을 굵은 단위로만 구분합니다. 세부 에러는
/// `bmcwatch-sel-pipeline`의 도메인 에러가 담당합니다.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// SEL 소스(BMC 질의) 실패
    #[error("sel source failed: {0}")]
    Source(String),

    /// 알림 싱크 기록/조회 실패
    #[error("alert sink failed: {0}")]
    Sink(String),

    /// 파이프라인 내부 에러
    #[error("pipeline failed: {0}")]
    Pipeline(String),
}
