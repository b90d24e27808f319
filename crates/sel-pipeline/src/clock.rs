//! BMC 시계 보정
//!
//! BMC의 현재 시각을 읽어 호스트 시각과의 차이를 분 단위로 계산하고,
//! 차이가 0이 아니면 한 번의 set 명령으로 BMC 시계를 호스트 시각에
//! 맞춥니다. SEL 이벤트 타임스탬프가 중복 제거의 키이므로, BMC 시계가
//! 틀어져 있으면 같은 장애가 다른 타임스탬프로 다시 통보될 수 있습니다.
//! 그래서 매 실행의 첫 단계로 무조건 수행합니다.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use bmcwatch_core::error::BmcwatchError;
use bmcwatch_core::pipeline::SelSource;
use bmcwatch_core::types::parse_sel_timestamp;

use crate::error::SelPipelineError;

/// 시계 보정 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockSync {
    /// BMC가 보고한 시각
    pub bmc_time: NaiveDateTime,
    /// 호스트 시각과의 차이 (분 단위 반올림, BMC가 앞서면 양수)
    pub drift_minutes: i64,
    /// set 명령을 보냈는지 여부
    pub corrected: bool,
}

/// BMC 시계를 호스트 시각과 맞춥니다.
///
/// 차이가 0분으로 반올림되면 set 명령을 보내지 않습니다.
pub async fn reconcile<S: SelSource>(source: &S) -> Result<ClockSync, BmcwatchError> {
    reconcile_at(source, Local::now().naive_local()).await
}

/// 주어진 호스트 시각을 기준으로 보정합니다.
///
/// 테스트에서 호스트 시각을 고정할 때 사용합니다.
pub async fn reconcile_at<S: SelSource>(
    source: &S,
    host_now: NaiveDateTime,
) -> Result<ClockSync, BmcwatchError> {
    let raw = source.read_clock().await?;
    let bmc_time = parse_bmc_time(&raw)?;

    let drift_minutes = drift_in_minutes(bmc_time, host_now);
    let corrected = drift_minutes != 0;

    if corrected {
        tracing::info!(drift_minutes, bmc_time = %bmc_time, "correcting bmc clock");
        source.sync_clock().await?;
    } else {
        tracing::debug!(bmc_time = %bmc_time, "bmc clock within tolerance");
    }

    Ok(ClockSync {
        bmc_time,
        drift_minutes,
        corrected,
    })
}

/// BMC가 보고한 시각 문자열을 파싱합니다.
fn parse_bmc_time(raw: &str) -> Result<NaiveDateTime, SelPipelineError> {
    let text = raw.trim();
    parse_sel_timestamp(text).map_err(|err| SelPipelineError::Timestamp {
        text: text.to_owned(),
        reason: err.to_string(),
    })
}

/// 두 시각의 차이를 분 단위로 반올림합니다.
fn drift_in_minutes(bmc_time: NaiveDateTime, host_now: NaiveDateTime) -> i64 {
    let delta_seconds = (bmc_time - host_now).num_seconds();
    (delta_seconds as f64 / 60.0).round() as i64
}
