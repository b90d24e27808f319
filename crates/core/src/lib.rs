#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

// --- 주요 타입 re-export ---
// 각 모듈의 핵심 타입을 크레이트 루트에서 바로 사용할 수 있도록 합니다.

// 에러
pub use error::{BmcwatchError, ConfigError, MonitorError};

// 설정
pub use config::BmcwatchConfig;

// 파이프라인 trait
pub use pipeline::{AlertSink, SelSource};

// 도메인 타입
pub use types::{
    ALERT_TAG_PREFIX, AlertCode, AlertRecord, EventCategory, EventState, SEL_TIMESTAMP_FORMAT,
    SelEvent, Severity, format_sel_timestamp, parse_sel_timestamp,
};
