//! 도메인 타입 — SEL 이벤트와 알림의 공통 타입
//!
//! 모든 크레이트가 공유하는 데이터 구조를 정의합니다.
//! 파이프라인과 CLI는 이 타입들을 사용하여 이벤트와 알림을 교환합니다.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// SEL 타임스탬프 텍스트 형식 (`MM/DD/YYYY HH:MM:SS`)
///
/// 이벤트 레코드의 날짜/시각 필드, BMC 시계 조회 출력, 싱크 히스토리
/// 라인의 타임스탬프가 모두 이 형식을 공유합니다.
pub const SEL_TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// 알림 태그 접두부
///
/// 싱크에 기록되는 모든 알림 라인은 `%PMON-0-<CODE>` 태그로 시작합니다.
/// 히스토리 복원 시 이 접두부로 자기 자신이 기록한 라인만 걸러냅니다.
pub const ALERT_TAG_PREFIX: &str = "%PMON-0-";

/// `MM/DD/YYYY HH:MM:SS` 텍스트를 타임스탬프로 파싱합니다.
pub fn parse_sel_timestamp(text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(text.trim(), SEL_TIMESTAMP_FORMAT)
}

/// 타임스탬프를 `MM/DD/YYYY HH:MM:SS` 텍스트로 렌더링합니다.
pub fn format_sel_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(SEL_TIMESTAMP_FORMAT).to_string()
}

/// 이벤트 상태
///
/// SEL 레코드의 마지막 필드입니다. 인식되지 않는 값은 원문을 보존하여
/// 알림 라인에 그대로 다시 기록됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventState {
    Asserted,
    Deasserted,
    /// 인식되지 않거나 비어 있는 상태 값 (원문 보존)
    Unknown(String),
}

impl EventState {
    /// 상태 필드 텍스트를 파싱합니다.
    pub fn from_field(field: &str) -> Self {
        match field.trim() {
            "Asserted" => Self::Asserted,
            "Deasserted" => Self::Deasserted,
            other => Self::Unknown(other.to_owned()),
        }
    }
}

impl fmt::Display for EventState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asserted => write!(f, "Asserted"),
            Self::Deasserted => write!(f, "Deasserted"),
            Self::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

/// 이벤트 범주
///
/// 제목의 첫 공백 구분 토큰으로 결정됩니다. 닫힌 변형 집합으로
/// 범주별 분류 규칙이 고정되며, 알 수 없는 토큰은 원문을 담습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    Fan,
    Temperature,
    Power,
    Voltage,
    /// 그 외 범주 (제목 첫 토큰 원문)
    Other(String),
}

impl EventCategory {
    /// 제목에서 범주를 유도합니다.
    ///
    /// 첫 공백 구분 토큰만 봅니다. 빈 제목은 `Other("")`가 됩니다.
    pub fn from_title(title: &str) -> Self {
        let token = title.split_whitespace().next().unwrap_or("");
        match token {
            "Fan" => Self::Fan,
            "Temperature" => Self::Temperature,
            "Power" => Self::Power,
            "Voltage" => Self::Voltage,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fan => write!(f, "Fan"),
            Self::Temperature => write!(f, "Temperature"),
            Self::Power => write!(f, "Power"),
            Self::Voltage => write!(f, "Voltage"),
            Self::Other(token) => write!(f, "{token}"),
        }
    }
}

/// SEL 이벤트
///
/// BMC 시스템 이벤트 로그의 레코드 하나를 나타냅니다.
/// `timestamp`가 중복 제거 키입니다. 같은 초에 발생한 두 이벤트는
/// 내용이 달라도 같은 이벤트로 취급됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelEvent {
    /// 이벤트 발생 시각 (초 단위 해상도)
    pub timestamp: NaiveDateTime,
    /// 제목 첫 토큰에서 유도된 범주
    pub category: EventCategory,
    /// 원문 제목
    pub title: String,
    /// 원문 메시지
    pub message: String,
    /// 상태
    pub state: EventState,
}

impl fmt::Display for SelEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            format_sel_timestamp(self.timestamp),
            self.title,
            self.message,
            self.state,
        )
    }
}

/// 정규화된 알림 코드
///
/// 범주별 분류 규칙의 결과입니다. 싱크 태그는 [`ALERT_TAG_PREFIX`]와
/// 합쳐 `%PMON-0-FAN_UNPLUG` 형태가 됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertCode {
    FanUnplug,
    FanPlugIn,
    FanFailed,
    TempHigh,
    TempLow,
    TempError,
    PsuUnplug,
    PsuPlugIn,
    PsuFailed,
    VolHigh,
    VolLow,
    VolError,
    /// 알려지지 않은 범주 (`OTHER_<category>`, 토큰 원문 유지)
    Other(String),
}

impl AlertCode {
    /// 태그 접두부를 포함한 전체 싱크 태그를 렌더링합니다.
    pub fn tag(&self) -> String {
        format!("{ALERT_TAG_PREFIX}{self}")
    }
}

impl fmt::Display for AlertCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FanUnplug => write!(f, "FAN_UNPLUG"),
            Self::FanPlugIn => write!(f, "FAN_PLUG_IN"),
            Self::FanFailed => write!(f, "FAN_FAILED"),
            Self::TempHigh => write!(f, "TEMP_HIGH"),
            Self::TempLow => write!(f, "TEMP_LOW"),
            Self::TempError => write!(f, "TEMP_ERROR"),
            Self::PsuUnplug => write!(f, "PSU_UNPLUG"),
            Self::PsuPlugIn => write!(f, "PSU_PLUG_IN"),
            Self::PsuFailed => write!(f, "PSU_FAILED"),
            Self::VolHigh => write!(f, "VOL_HIGH"),
            Self::VolLow => write!(f, "VOL_LOW"),
            Self::VolError => write!(f, "VOL_ERROR"),
            Self::Other(category) => write!(f, "OTHER_{category}"),
        }
    }
}

/// 방출 알림 레코드
///
/// 분류기가 생성하고 알림 싱크에 정확히 한 줄로 기록됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    /// 레코드 ID (추적/JSON 출력용, 싱크 라인 형식에는 포함되지 않음)
    pub id: String,
    /// 정규화된 알림 코드
    pub code: AlertCode,
    /// 파생 원본 이벤트 (타임스탬프가 중복 제거 키)
    pub event: SelEvent,
    /// 심각도 (이 모니터는 항상 Warning)
    pub severity: Severity,
}

impl AlertRecord {
    /// 새 알림 레코드를 생성합니다. 심각도는 Warning으로 고정됩니다.
    pub fn new(code: AlertCode, event: SelEvent) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            code,
            event,
            severity: Severity::Warning,
        }
    }

    /// 싱크에 기록되는 알림 라인을 렌더링합니다.
    ///
    /// 형식: `%PMON-0-<CODE> : <MM/DD/YYYY> <HH:MM:SS> | <title> | <message> | <state>`
    ///
    /// 원본 이벤트의 타임스탬프가 본문에 그대로 들어가므로 다음 실행의
    /// 히스토리 복원이 이 라인에서 중복 제거 키를 되읽을 수 있습니다.
    pub fn sink_line(&self) -> String {
        format!(
            "{} : {} | {} | {} | {}",
            self.code.tag(),
            format_sel_timestamp(self.event.timestamp),
            self.event.title,
            self.event.message,
            self.event.state,
        )
    }
}

impl fmt::Display for AlertRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}",
            self.severity,
            self.code,
            format_sel_timestamp(self.event.timestamp),
        )
    }
}

/// 심각도 레벨
///
/// syslog 계열 순서를 따릅니다.
/// `Ord` 구현으로 비교가 가능합니다 (`Debug < Info < ... < Critical`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    /// 디버그 메시지
    Debug,
    /// 정보성 이벤트
    #[default]
    Info,
    /// 정상이지만 주목할 조건
    Notice,
    /// 경고 — 이 모니터가 방출하는 모든 알림의 고정 레벨
    Warning,
    /// 오류
    Error,
    /// 치명적 — 즉시 대응 필요
    Critical,
}

impl Severity {
    /// 문자열에서 심각도를 파싱합니다.
    ///
    /// 대소문자를 구분하지 않습니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" | "informational" => Some(Self::Info),
            "notice" => Some(Self::Notice),
            "warning" | "warn" => Some(Self::Warning),
            "error" | "err" => Some(Self::Error),
            "critical" | "crit" => Some(Self::Critical),
            _ => None,
        }
    }

    /// 싱크 라인 접두부에 쓰이는 소문자 레이블
    pub fn syslog_label(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Notice => "notice",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "crit",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "Debug"),
            Self::Info => write!(f, "Info"),
            Self::Notice => write!(f, "Notice"),
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event(title: &str, message: &str, state: &str) -> SelEvent {
        let timestamp = parse_sel_timestamp("03/01/2024 10:00:00").unwrap();
        SelEvent {
            timestamp,
            category: EventCategory::from_title(title),
            title: title.to_owned(),
            message: message.to_owned(),
            state: EventState::from_field(state),
        }
    }

    #[test]
    fn timestamp_parse_and_format_roundtrip() {
        let ts = parse_sel_timestamp("03/01/2024 10:00:00").unwrap();
        assert_eq!(format_sel_timestamp(ts), "03/01/2024 10:00:00");
    }

    #[test]
    fn timestamp_parse_trims_whitespace() {
        let ts = parse_sel_timestamp("  03/01/2024 10:00:00  ").unwrap();
        assert_eq!(format_sel_timestamp(ts), "03/01/2024 10:00:00");
    }

    #[test]
    fn timestamp_parse_rejects_iso_format() {
        assert!(parse_sel_timestamp("2024-03-01 10:00:00").is_err());
        assert!(parse_sel_timestamp("garbage").is_err());
        assert!(parse_sel_timestamp("").is_err());
    }

    #[test]
    fn timestamp_parse_rejects_invalid_date() {
        assert!(parse_sel_timestamp("13/01/2024 10:00:00").is_err());
        assert!(parse_sel_timestamp("02/30/2024 10:00:00").is_err());
    }

    #[test]
    fn event_state_from_field() {
        assert_eq!(EventState::from_field("Asserted"), EventState::Asserted);
        assert_eq!(
            EventState::from_field(" Deasserted "),
            EventState::Deasserted
        );
        assert_eq!(
            EventState::from_field("Flapping"),
            EventState::Unknown("Flapping".to_owned())
        );
        assert_eq!(
            EventState::from_field(""),
            EventState::Unknown(String::new())
        );
    }

    #[test]
    fn event_state_display_preserves_unknown_text() {
        assert_eq!(EventState::Asserted.to_string(), "Asserted");
        assert_eq!(EventState::Deasserted.to_string(), "Deasserted");
        assert_eq!(
            EventState::Unknown("Flapping".to_owned()).to_string(),
            "Flapping"
        );
    }

    #[test]
    fn category_from_title_first_token() {
        assert_eq!(EventCategory::from_title("Fan FAN1"), EventCategory::Fan);
        assert_eq!(
            EventCategory::from_title("Temperature CPU1_TEMP"),
            EventCategory::Temperature
        );
        assert_eq!(
            EventCategory::from_title("Power Supply PSU2"),
            EventCategory::Power
        );
        assert_eq!(
            EventCategory::from_title("Voltage P12V"),
            EventCategory::Voltage
        );
    }

    #[test]
    fn category_from_title_unknown_token_preserved() {
        assert_eq!(
            EventCategory::from_title("Chassis Intrusion"),
            EventCategory::Other("Chassis".to_owned())
        );
    }

    #[test]
    fn category_from_title_empty() {
        assert_eq!(
            EventCategory::from_title(""),
            EventCategory::Other(String::new())
        );
        assert_eq!(
            EventCategory::from_title("   "),
            EventCategory::Other(String::new())
        );
    }

    #[test]
    fn category_from_title_leading_whitespace() {
        assert_eq!(EventCategory::from_title("  Fan FAN3"), EventCategory::Fan);
    }

    #[test]
    fn alert_code_display_table() {
        assert_eq!(AlertCode::FanUnplug.to_string(), "FAN_UNPLUG");
        assert_eq!(AlertCode::FanPlugIn.to_string(), "FAN_PLUG_IN");
        assert_eq!(AlertCode::FanFailed.to_string(), "FAN_FAILED");
        assert_eq!(AlertCode::TempHigh.to_string(), "TEMP_HIGH");
        assert_eq!(AlertCode::TempLow.to_string(), "TEMP_LOW");
        assert_eq!(AlertCode::TempError.to_string(), "TEMP_ERROR");
        assert_eq!(AlertCode::PsuUnplug.to_string(), "PSU_UNPLUG");
        assert_eq!(AlertCode::PsuPlugIn.to_string(), "PSU_PLUG_IN");
        assert_eq!(AlertCode::PsuFailed.to_string(), "PSU_FAILED");
        assert_eq!(AlertCode::VolHigh.to_string(), "VOL_HIGH");
        assert_eq!(AlertCode::VolLow.to_string(), "VOL_LOW");
        assert_eq!(AlertCode::VolError.to_string(), "VOL_ERROR");
    }

    #[test]
    fn alert_code_other_preserves_token_case() {
        assert_eq!(
            AlertCode::Other("Chassis".to_owned()).to_string(),
            "OTHER_Chassis"
        );
    }

    #[test]
    fn alert_code_tag_has_prefix() {
        assert_eq!(AlertCode::FanUnplug.tag(), "%PMON-0-FAN_UNPLUG");
        assert_eq!(
            AlertCode::Other("Chassis".to_owned()).tag(),
            "%PMON-0-OTHER_Chassis"
        );
    }

    #[test]
    fn alert_record_new_is_warning() {
        let record = AlertRecord::new(
            AlertCode::TempHigh,
            sample_event("Temperature CPU1", "Upper Critical going high", "Asserted"),
        );
        assert_eq!(record.severity, Severity::Warning);
        assert_eq!(record.code, AlertCode::TempHigh);
    }

    #[test]
    fn sink_line_format() {
        let record = AlertRecord::new(
            AlertCode::TempHigh,
            sample_event("Temperature CPU1", "Upper Critical going high", "Asserted"),
        );
        assert_eq!(
            record.sink_line(),
            "%PMON-0-TEMP_HIGH : 03/01/2024 10:00:00 | Temperature CPU1 | Upper Critical going high | Asserted"
        );
    }

    #[test]
    fn sink_line_empty_message() {
        let record = AlertRecord::new(
            AlertCode::FanFailed,
            sample_event("Fan FAN1", "", "Flapping"),
        );
        assert_eq!(
            record.sink_line(),
            "%PMON-0-FAN_FAILED : 03/01/2024 10:00:00 | Fan FAN1 |  | Flapping"
        );
    }

    #[test]
    fn sink_line_embeds_reparsable_timestamp() {
        let record = AlertRecord::new(
            AlertCode::PsuUnplug,
            sample_event("Power Supply PSU1", "Power Supply lost", "Asserted"),
        );
        let line = record.sink_line();
        assert!(line.contains("03/01/2024 10:00:00"));
        assert!(line.starts_with(ALERT_TAG_PREFIX));
    }

    #[test]
    fn sel_event_display() {
        let event = sample_event("Fan FAN1", "fault detected", "Asserted");
        let display = event.to_string();
        assert!(display.contains("03/01/2024 10:00:00"));
        assert!(display.contains("Fan FAN1"));
        assert!(display.contains("Asserted"));
    }

    #[test]
    fn alert_record_display() {
        let record = AlertRecord::new(
            AlertCode::VolLow,
            sample_event("Voltage P12V", "Lower Critical going low", "Asserted"),
        );
        let display = record.to_string();
        assert!(display.contains("Warning"));
        assert!(display.contains("VOL_LOW"));
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Notice);
        assert!(Severity::Notice < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Critical);
    }

    #[test]
    fn severity_default_is_info() {
        assert_eq!(Severity::default(), Severity::Info);
    }

    #[test]
    fn severity_from_str_loose() {
        assert_eq!(Severity::from_str_loose("warning"), Some(Severity::Warning));
        assert_eq!(Severity::from_str_loose("WARN"), Some(Severity::Warning));
        assert_eq!(Severity::from_str_loose("crit"), Some(Severity::Critical));
        assert_eq!(
            Severity::from_str_loose("informational"),
            Some(Severity::Info)
        );
        assert_eq!(Severity::from_str_loose("unknown"), None);
    }

    #[test]
    fn severity_syslog_label() {
        assert_eq!(Severity::Warning.syslog_label(), "warning");
        assert_eq!(Severity::Critical.syslog_label(), "crit");
    }

    #[test]
    fn severity_serialize_deserialize() {
        let severity = Severity::Warning;
        let json = serde_json::to_string(&severity).unwrap();
        let deserialized: Severity = serde_json::from_str(&json).unwrap();
        assert_eq!(severity, deserialized);
    }

    #[test]
    fn sel_event_serialize_roundtrip() {
        let event = sample_event("Power Supply PSU1", "Presence detected", "Deasserted");
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: SelEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event.timestamp, deserialized.timestamp);
        assert_eq!(event.title, deserialized.title);
        assert_eq!(event.state, deserialized.state);
    }
}
