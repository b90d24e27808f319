//! 실행 오케스트레이션 -- 시계 보정/히스토리/조회/분류/통보의 전체 흐름
//!
//! [`SelPipeline`]은 한 번의 스케줄 실행(run)을 수행합니다. 단계는
//! 엄격히 순차적입니다.
//!
//! ```text
//! Start -> ClockSynced -> HistoryLoaded -> EventsFetched -> Classifying -> Done
//! ```
//!
//! 어느 단계에서든 소스/싱크 I/O가 실패하면 흡수 상태인 Aborted로
//! 전이하며, 재시도 전이는 없습니다. 중단은 [`RunOutcome::Aborted`]로
//! 반환될 뿐 `Result::Err`로 전파되지 않습니다. 스케줄러에게는 어떤
//! 실패도 신호하지 않고, 다음 주기 실행이 스스로 복구합니다.

use serde::{Deserialize, Serialize};

use bmcwatch_core::error::BmcwatchError;
use bmcwatch_core::pipeline::{AlertSink, SelSource};
use bmcwatch_core::types::{ALERT_TAG_PREFIX, AlertRecord};

use crate::classify::classify;
use crate::clock::{self, ClockSync};
use crate::config::SelPipelineConfig;
use crate::error::SelPipelineError;
use crate::history::{HistoryScanner, HistorySet};
use crate::parser::SelParser;

/// 실행 단계
///
/// 중단 보고에서 "마지막으로 도달한 단계"를 가리키는 데 사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStage {
    /// 실행 시작, 아직 아무 단계도 완료하지 않음
    Start,
    /// BMC 시계 보정 완료
    ClockSynced,
    /// 싱크 히스토리 재구성 완료
    HistoryLoaded,
    /// SEL 목록 조회 완료
    EventsFetched,
    /// 분류/통보 진행 중
    Classifying,
    /// 전체 단계 완료
    Done,
}

impl RunStage {
    /// 로깅용 단계 이름
    pub fn name(&self) -> &'static str {
        match self {
            RunStage::Start => "start",
            RunStage::ClockSynced => "clock_synced",
            RunStage::HistoryLoaded => "history_loaded",
            RunStage::EventsFetched => "events_fetched",
            RunStage::Classifying => "classifying",
            RunStage::Done => "done",
        }
    }
}

/// 한 번의 실행 결과
///
/// 실행은 완료되거나 중단될 뿐 에러를 반환하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// 전체 단계 완료
    Completed(RunReport),
    /// 단계 도중 중단
    Aborted {
        /// 마지막으로 도달한 단계
        stage: RunStage,
        /// 중단 사유
        reason: String,
    },
}

impl RunOutcome {
    /// 완료 여부
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }

    /// 완료된 경우 보고서를 돌려줍니다.
    pub fn report(&self) -> Option<&RunReport> {
        match self {
            RunOutcome::Completed(report) => Some(report),
            RunOutcome::Aborted { .. } => None,
        }
    }
}

/// 실행 보고서
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// 실행 고유 ID
    pub run_id: String,
    /// 시계 보정 결과 (비활성 실행에서는 None)
    pub clock: Option<ClockSync>,
    /// 조회한 SEL 이벤트 수 (파싱 성공 기준)
    pub events_fetched: usize,
    /// 파싱 단계에서 건너뛴 줄 수
    pub parse_skipped: usize,
    /// 히스토리에 이미 있어 건너뛴 이벤트 수
    pub already_alerted: usize,
    /// 분류 규칙이 억제한 이벤트 수
    pub suppressed: usize,
    /// 싱크에 기록한 알림 수
    pub emitted: usize,
    /// 생성된 알림 레코드 (dry-run에서도 채워짐)
    pub alerts: Vec<AlertRecord>,
    /// dry-run 실행 여부
    pub dry_run: bool,
}

impl RunReport {
    fn empty(run_id: String) -> Self {
        Self {
            run_id,
            clock: None,
            events_fetched: 0,
            parse_skipped: 0,
            already_alerted: 0,
            suppressed: 0,
            emitted: 0,
            alerts: Vec::new(),
            dry_run: false,
        }
    }
}

/// SEL 모니터 파이프라인
///
/// 소스와 싱크 구현에 대해 제네릭이므로, 테스트는 목 구현을 주입하고
/// 프로덕션은 [`IpmiSelSource`](crate::source::IpmiSelSource)와
/// [`FileAlertSink`](crate::sink::FileAlertSink)를 사용합니다.
///
/// # 사용 예시
/// ```ignore
/// use bmcwatch_sel_pipeline::{FileAlertSink, IpmiSelSource, SelPipeline, SelPipelineConfig};
///
/// let config = SelPipelineConfig::default();
/// let source = IpmiSelSource::new(&config.ipmitool_path);
/// let sink = FileAlertSink::new(&config.sink_path, &config.sink_ident);
/// let pipeline = SelPipeline::new(config, source, sink)?;
/// let outcome = pipeline.run().await;
/// ```
pub struct SelPipeline<S, K> {
    /// 파이프라인 설정
    config: SelPipelineConfig,
    /// SEL 소스
    source: S,
    /// 알림 싱크
    sink: K,
    /// 레코드 파서
    parser: SelParser,
    /// 히스토리 스캐너
    scanner: HistoryScanner,
}

impl<S, K> SelPipeline<S, K>
where
    S: SelSource,
    K: AlertSink,
{
    /// 설정을 검증하고 새 파이프라인을 생성합니다.
    pub fn new(config: SelPipelineConfig, source: S, sink: K) -> Result<Self, SelPipelineError> {
        config.validate()?;
        let parser = SelParser::new().with_max_line_bytes(config.max_line_bytes);
        let scanner = HistoryScanner::new()?;
        Ok(Self {
            config,
            source,
            sink,
            parser,
            scanner,
        })
    }

    /// 파이프라인 설정
    pub fn config(&self) -> &SelPipelineConfig {
        &self.config
    }

    /// 한 번의 모니터 실행을 수행합니다.
    pub async fn run(&self) -> RunOutcome {
        let run_id = uuid::Uuid::new_v4().to_string();

        if !self.config.enabled {
            tracing::info!(run_id = %run_id, "sel pipeline disabled, skipping run");
            return RunOutcome::Completed(RunReport::empty(run_id));
        }

        tracing::info!(
            run_id = %run_id,
            source = self.source.name(),
            sink = self.sink.name(),
            dry_run = self.config.dry_run,
            "starting sel monitor run"
        );

        // 1. BMC 시계 보정 (항상 첫 단계, 무조건 수행)
        let clock_sync = match clock::reconcile(&self.source).await {
            Ok(sync) => sync,
            Err(err) => return Self::abort(RunStage::Start, &err),
        };

        // 2. 히스토리 재구성 (이벤트 조회 전에 완료되어야 함)
        let mut history = match self.load_history().await {
            Ok(history) => history,
            Err(err) => return Self::abort(RunStage::ClockSynced, &err),
        };

        // 3. SEL 목록 조회
        let listing = match self.source.fetch_sel().await {
            Ok(listing) => listing,
            Err(err) => return Self::abort(RunStage::HistoryLoaded, &err),
        };

        // 파싱은 실패하지 않으므로 EventsFetched 단계에서는 중단이 없습니다
        let parsed = self.parser.parse_listing(&listing);

        let mut report = RunReport {
            run_id: run_id.clone(),
            clock: Some(clock_sync),
            events_fetched: parsed.events.len(),
            parse_skipped: parsed.skipped,
            dry_run: self.config.dry_run,
            ..RunReport::empty(run_id)
        };

        // 4. 분류 + 통보
        for event in &parsed.events {
            if history.contains(&event.timestamp) {
                report.already_alerted += 1;
                continue;
            }

            let Some(alert) = classify(event) else {
                report.suppressed += 1;
                continue;
            };

            if !self.config.dry_run {
                if let Err(err) = self.sink.append(alert.severity, &alert.sink_line()).await {
                    return Self::abort(RunStage::Classifying, &err);
                }
                report.emitted += 1;
            }

            // 같은 초의 후속 이벤트는 같은 이벤트로 취급
            history.insert(event.timestamp);
            report.alerts.push(alert);
        }

        tracing::info!(
            run_id = %report.run_id,
            stage = RunStage::Done.name(),
            events_fetched = report.events_fetched,
            parse_skipped = report.parse_skipped,
            already_alerted = report.already_alerted,
            suppressed = report.suppressed,
            emitted = report.emitted,
            "sel monitor run complete"
        );

        RunOutcome::Completed(report)
    }

    /// 싱크에서 과거 알림 라인을 읽어 히스토리 집합을 복원합니다.
    async fn load_history(&self) -> Result<HistorySet, BmcwatchError> {
        let lines = self.sink.read_tagged(ALERT_TAG_PREFIX).await?;
        let history = self.scanner.scan(&lines);
        tracing::debug!(
            lines = lines.len(),
            unique_timestamps = history.len(),
            "reconstructed alert history"
        );
        Ok(history)
    }

    fn abort(stage: RunStage, err: &BmcwatchError) -> RunOutcome {
        tracing::error!(stage = stage.name(), error = %err, "sel monitor run aborted");
        RunOutcome::Aborted {
            stage,
            reason: err.to_string(),
        }
    }
}
