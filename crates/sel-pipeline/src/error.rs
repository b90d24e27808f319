//! SEL 파이프라인 에러 타입
//!
//! [`SelPipelineError`]는 SEL 파이프라인 내부에서 발생하는 모든 에러를 표현합니다.
//! `From<SelPipelineError> for BmcwatchError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.

use bmcwatch_core::error::{BmcwatchError, MonitorError};

/// SEL 파이프라인 도메인 에러
///
/// SEL 레코드 파싱, BMC 질의, 싱크 기록, 설정 검증 등 파이프라인
/// 내부의 모든 에러 상황을 포괄합니다.
#[derive(Debug, thiserror::Error)]
pub enum SelPipelineError {
    /// SEL 레코드 파싱 실패
    #[error("sel record error: line {line_no}: {reason}")]
    Record {
        /// SEL 목록 내 행 번호 (1부터 시작)
        line_no: usize,
        /// 실패 사유
        reason: String,
    },

    /// 타임스탬프 파싱 실패
    #[error("timestamp error: '{text}': {reason}")]
    Timestamp {
        /// 파싱을 시도한 원본 텍스트
        text: String,
        /// 실패 사유
        reason: String,
    },

    /// BMC 질의 명령 실패 (프로세스 실행 실패, 비정상 종료 코드 포함)
    #[error("bmc command error: {command}: {reason}")]
    Bmc {
        /// 실행한 명령 (예: "ipmitool sel list")
        command: String,
        /// 실패 사유
        reason: String,
    },

    /// 알림 싱크 기록/조회 실패
    #[error("alert sink error: {path}: {reason}")]
    Sink {
        /// 싱크 파일 경로
        path: String,
        /// 실패 사유
        reason: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 정규식 컴파일 에러
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl From<SelPipelineError> for BmcwatchError {
    fn from(err: SelPipelineError) -> Self {
        let kind = match &err {
            SelPipelineError::Bmc { .. } => MonitorError::Source(err.to_string()),
            SelPipelineError::Sink { .. } => MonitorError::Sink(err.to_string()),
            _ => MonitorError::Pipeline(err.to_string()),
        };
        BmcwatchError::Monitor(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_error_display() {
        let err = SelPipelineError::Record {
            line_no: 7,
            reason: "expected at least 6 fields, got 3".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("6 fields"));
    }

    #[test]
    fn bmc_error_display() {
        let err = SelPipelineError::Bmc {
            command: "ipmitool sel list".to_owned(),
            reason: "exit status 1".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("ipmitool sel list"));
        assert!(msg.contains("exit status 1"));
    }

    #[test]
    fn bmc_error_converts_to_source() {
        let err = SelPipelineError::Bmc {
            command: "ipmitool sel time get".to_owned(),
            reason: "no such file".to_owned(),
        };
        let top: BmcwatchError = err.into();
        assert!(matches!(
            top,
            BmcwatchError::Monitor(MonitorError::Source(_))
        ));
    }

    #[test]
    fn sink_error_converts_to_sink() {
        let err = SelPipelineError::Sink {
            path: "/var/log/bmcwatch/alerts.log".to_owned(),
            reason: "permission denied".to_owned(),
        };
        let top: BmcwatchError = err.into();
        assert!(matches!(top, BmcwatchError::Monitor(MonitorError::Sink(_))));
    }

    #[test]
    fn other_errors_convert_to_pipeline() {
        let err = SelPipelineError::Timestamp {
            text: "13/45/2024 99:00:00".to_owned(),
            reason: "invalid date".to_owned(),
        };
        let top: BmcwatchError = err.into();
        assert!(matches!(
            top,
            BmcwatchError::Monitor(MonitorError::Pipeline(_))
        ));
    }
}
