//! 알림 히스토리 재구성
//!
//! 싱크에 기록된 과거 알림 라인을 다시 읽어 타임스탬프 집합
//! ([`HistorySet`])을 복원합니다. 전용 저장소 없이 싱크 자체를 기록
//! 원장으로 사용하므로, 같은 이벤트가 프로세스 재시작 후에도 중복
//! 통보되지 않습니다.
//!
//! 스캔은 싱크 I/O와 분리된 순수 함수입니다. 싱크에서 라인을 읽는
//! 것은 파이프라인의 몫이고, 여기서는 라인 집합에서 타임스탬프만
//! 추출합니다.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use regex::Regex;

use bmcwatch_core::types::parse_sel_timestamp;

use crate::error::SelPipelineError;

/// 과거에 통보한 이벤트 타임스탬프 집합
///
/// SEL 이벤트의 초 단위 타임스탬프가 중복 제거의 키입니다. 같은 초에
/// 기록된 이벤트는 하나로 접힙니다.
pub type HistorySet = HashSet<NaiveDateTime>;

/// 싱크 히스토리 스캐너
///
/// 라인 어디에든 나타나는 `MM/DD/YYYY HH:MM:SS` 패턴을 찾아 집합으로
/// 복원합니다. 패턴이 없거나 파싱할 수 없는 라인은 개별적으로
/// 건너뛰며, 한 라인의 오류가 전체 재구성을 중단시키지 않습니다.
pub struct HistoryScanner {
    /// 타임스탬프 패턴 (생성 시 한 번만 컴파일)
    pattern: Regex,
}

impl HistoryScanner {
    /// 새 스캐너를 생성합니다.
    pub fn new() -> Result<Self, SelPipelineError> {
        let pattern = Regex::new(r"\d{2}/\d{2}/\d{4} \d{2}:\d{2}:\d{2}")?;
        Ok(Self { pattern })
    }

    /// 싱크 라인들에서 히스토리 집합을 재구성합니다.
    pub fn scan<I, S>(&self, lines: I) -> HistorySet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut history = HistorySet::new();
        let mut skipped = 0usize;

        for line in lines {
            match self.extract_timestamp(line.as_ref()) {
                Some(timestamp) => {
                    history.insert(timestamp);
                }
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!(skipped, "history lines without parsable timestamp");
        }

        history
    }

    /// 한 라인에서 첫 번째 타임스탬프 패턴을 찾아 파싱합니다.
    fn extract_timestamp(&self, line: &str) -> Option<NaiveDateTime> {
        let matched = self.pattern.find(line)?;
        parse_sel_timestamp(matched.as_str()).ok()
    }
}
