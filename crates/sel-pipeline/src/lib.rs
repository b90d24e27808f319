#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`source`]: ipmitool 서브프로세스 기반 SEL 소스
//! - [`parser`]: 파이프 구분 SEL 레코드 파서
//! - [`history`]: 싱크 히스토리 재구성 (중복 제거 집합)
//! - [`classify`]: 카테고리별 분류 규칙표
//! - [`clock`]: BMC 시계 드리프트 보정
//! - [`sink`]: append 전용 파일 알림 싱크
//! - [`pipeline`]: 실행 오케스트레이션 (단계 상태 기계)
//! - [`config`]: 파이프라인 설정 (core 설정 확장)
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! IpmiSelSource -> SelParser -> classify -> FileAlertSink
//!       |              |           |            |
//!  ipmitool 호출   6필드 레코드   규칙표     %PMON-0- 태그 라인
//!       |
//!  clock::reconcile (실행 첫 단계)    history::scan (싱크 되읽기)
//! ```

pub mod classify;
pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod parser;
pub mod pipeline;
pub mod sink;
pub mod source;

// --- 주요 타입 re-export ---

// 파이프라인
pub use pipeline::{RunOutcome, RunReport, RunStage, SelPipeline};

// 설정
pub use config::{SelPipelineConfig, SelPipelineConfigBuilder};

// 에러
pub use error::SelPipelineError;

// 소스/싱크
pub use sink::FileAlertSink;
pub use source::IpmiSelSource;

// 파서/분류/히스토리/시계
pub use classify::classify;
pub use clock::{ClockSync, reconcile};
pub use history::{HistoryScanner, HistorySet};
pub use parser::{ParsedListing, SelParser};
