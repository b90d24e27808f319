//! 이벤트 분류기
//!
//! [`SelEvent`]를 카테고리별 규칙표에 따라 [`AlertRecord`]로 변환하거나
//! 통보를 억제합니다. 분류는 순수 함수이며 I/O가 없고, 같은 이벤트에
//! 대해 항상 같은 코드를 돌려줍니다.
//!
//! 억제는 Power 카테고리에만 존재합니다. 그 외 카테고리는 항상 알림을
//! 만듭니다.

use bmcwatch_core::types::{AlertCode, AlertRecord, EventCategory, EventState, SelEvent};

/// 이벤트를 분류하여 알림 레코드를 만들거나 억제합니다.
///
/// `None`은 Power 카테고리의 의도적 억제로, 에러가 아닙니다.
pub fn classify(event: &SelEvent) -> Option<AlertRecord> {
    let code = match &event.category {
        EventCategory::Fan => Some(classify_fan(event)),
        EventCategory::Temperature => Some(level_code(
            &event.message,
            AlertCode::TempHigh,
            AlertCode::TempLow,
            AlertCode::TempError,
        )),
        EventCategory::Voltage => Some(level_code(
            &event.message,
            AlertCode::VolHigh,
            AlertCode::VolLow,
            AlertCode::VolError,
        )),
        EventCategory::Power => classify_power(event),
        EventCategory::Other(name) => Some(AlertCode::Other(name.clone())),
    };

    code.map(|code| AlertRecord::new(code, event.clone()))
}

/// Fan 규칙
///
/// 상태로 1차 판정한 뒤, 메시지가 비어 있지 않으면 상태와 무관하게
/// FAILED로 덮어씁니다. BMC 메시지는 거의 항상 비어 있지 않으므로
/// UNPLUG / PLUG_IN 분기는 메시지가 빈 레코드에서만 도달합니다.
fn classify_fan(event: &SelEvent) -> AlertCode {
    if !event.message.is_empty() {
        return AlertCode::FanFailed;
    }

    match event.state {
        EventState::Deasserted => AlertCode::FanUnplug,
        EventState::Asserted => AlertCode::FanPlugIn,
        EventState::Unknown(_) => AlertCode::FanFailed,
    }
}

/// Temperature / Voltage 공통 레벨 판정
///
/// 메시지의 `Upper` / `Lower` 토큰은 대소문자를 구분합니다.
fn level_code(message: &str, high: AlertCode, low: AlertCode, fallback: AlertCode) -> AlertCode {
    if message.contains("Upper") {
        high
    } else if message.contains("Lower") {
        low
    } else {
        fallback
    }
}

/// Power 규칙
///
/// 메시지와 상태를 함께 평가하며, 규칙표에 없는 조합은 억제합니다.
fn classify_power(event: &SelEvent) -> Option<AlertCode> {
    let code = if event.message.contains("lost") {
        match event.state {
            EventState::Asserted => Some(AlertCode::PsuUnplug),
            EventState::Deasserted => Some(AlertCode::PsuPlugIn),
            EventState::Unknown(_) => None,
        }
    } else if event.message.contains("Presence") {
        match event.state {
            EventState::Deasserted => Some(AlertCode::PsuUnplug),
            EventState::Asserted => Some(AlertCode::PsuPlugIn),
            EventState::Unknown(_) => None,
        }
    } else if event.message.contains("Failure") && matches!(event.state, EventState::Asserted) {
        Some(AlertCode::PsuFailed)
    } else {
        None
    };

    if code.is_none() {
        tracing::debug!(
            title = %event.title,
            message = %event.message,
            state = %event.state,
            "suppressing power event with no matching rule"
        );
    }

    code
}
