//! IPMI SEL 레코드 파서
//!
//! `ipmitool sel list` 출력의 파이프(`|`) 구분 레코드를
//! [`SelEvent`]로 변환합니다.
//!
//! # SEL 레코드 형식
//! ```text
//! <id> | <date> | <time> | <title> | <message> | <state>
//! ```
//! 예: `   1 | 03/01/2024 | 10:15:22 | Fan FAN1 |  | Deasserted`
//!
//! 두 번째부터 여섯 번째 필드가 순서대로 날짜, 시각, 제목, 메시지,
//! 상태입니다. 필드가 6개 미만이거나 타임스탬프가 유효하지 않은 줄은
//! 건너뛰고 집계만 합니다. 한 줄의 오류가 전체 조회를 중단시키지 않습니다.

use bmcwatch_core::types::{EventCategory, EventState, SelEvent, parse_sel_timestamp};

use crate::error::SelPipelineError;

/// SEL 레코드 한 줄이 가져야 하는 최소 필드 수
const MIN_RECORD_FIELDS: usize = 6;

/// IPMI SEL 목록 파서
pub struct SelParser {
    /// 한 줄의 최대 허용 크기 (바이트)
    max_line_bytes: usize,
}

/// SEL 목록 전체 파싱 결과
#[derive(Debug, Default)]
pub struct ParsedListing {
    /// 파싱에 성공한 이벤트 (SEL 출력 순서 유지)
    pub events: Vec<SelEvent>,
    /// 건너뛴 줄 수
    pub skipped: usize,
}

impl SelParser {
    /// 기본 설정으로 새 파서를 생성합니다.
    pub fn new() -> Self {
        Self {
            max_line_bytes: 8192, // 8 KiB
        }
    }

    /// 한 줄의 최대 허용 크기를 설정합니다.
    pub fn with_max_line_bytes(mut self, bytes: usize) -> Self {
        self.max_line_bytes = bytes;
        self
    }

    /// SEL 레코드 한 줄을 파싱합니다.
    ///
    /// `line_no`는 에러 메시지에 포함되는 1부터 시작하는 행 번호입니다.
    pub fn parse_line(&self, line_no: usize, line: &str) -> Result<SelEvent, SelPipelineError> {
        if line.len() > self.max_line_bytes {
            return Err(SelPipelineError::Record {
                line_no,
                reason: format!(
                    "line too long: {} bytes (max {})",
                    line.len(),
                    self.max_line_bytes
                ),
            });
        }

        let fields: Vec<&str> = line.split('|').collect();
        if fields.len() < MIN_RECORD_FIELDS {
            return Err(SelPipelineError::Record {
                line_no,
                reason: format!(
                    "expected at least {} fields, got {}",
                    MIN_RECORD_FIELDS,
                    fields.len()
                ),
            });
        }

        let date = fields[1].trim();
        let time = fields[2].trim();
        let title = fields[3].trim();
        let message = fields[4].trim();
        let state = fields[5].trim();

        let timestamp_text = format!("{date} {time}");
        let timestamp =
            parse_sel_timestamp(&timestamp_text).map_err(|err| SelPipelineError::Record {
                line_no,
                reason: format!("invalid timestamp '{timestamp_text}': {err}"),
            })?;

        Ok(SelEvent {
            timestamp,
            category: EventCategory::from_title(title),
            title: title.to_owned(),
            message: message.to_owned(),
            state: EventState::from_field(state),
        })
    }

    /// SEL 목록 전체를 파싱합니다.
    ///
    /// 빈 줄은 조용히 건너뛰고, malformed 줄은 경고 로그와 함께
    /// `skipped`로 집계합니다.
    pub fn parse_listing(&self, listing: &str) -> ParsedListing {
        let mut result = ParsedListing::default();

        for (idx, line) in listing.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let line_no = idx + 1;
            match self.parse_line(line_no, line) {
                Ok(event) => result.events.push(event),
                Err(err) => {
                    result.skipped += 1;
                    tracing::warn!(line_no, error = %err, "skipping malformed sel record");
                }
            }
        }

        result
    }
}

impl Default for SelParser {
    fn default() -> Self {
        Self::new()
    }
}
