//! 파이프라인 trait — 소스/싱크 확장 포인트 정의

use std::future::Future;

use crate::error::BmcwatchError;
use crate::types::Severity;

/// SEL 이벤트 소스 trait
///
/// BMC 질의를 추상화합니다. 프로덕션 구현은 외부 `ipmitool` 바이너리를
/// 호출하고, 테스트는 고정 출력을 돌려주는 목 구현을 사용합니다.
pub trait SelSource: Send + Sync {
    /// 소스 이름 (로깅용)
    fn name(&self) -> &str;

    /// SEL 전체 목록을 원시 텍스트로 가져옵니다 (레코드당 한 줄).
    fn fetch_sel(&self) -> impl Future<Output = Result<String, BmcwatchError>> + Send;

    /// BMC 시계를 `MM/DD/YYYY HH:MM:SS` 형식 한 줄로 읽습니다.
    fn read_clock(&self) -> impl Future<Output = Result<String, BmcwatchError>> + Send;

    /// BMC 시계를 호스트 현재 시각으로 맞춥니다.
    fn sync_clock(&self) -> impl Future<Output = Result<(), BmcwatchError>> + Send;
}

/// 알림 싱크 trait
///
/// append 전용 로그 시설을 추상화합니다. 이전 실행이 남긴 라인을
/// 태그로 되읽을 수 있어야 중복 제거가 성립합니다.
pub trait AlertSink: Send + Sync {
    /// 싱크 이름 (로깅용)
    fn name(&self) -> &str;

    /// 한 줄을 주어진 심각도로 덧붙입니다.
    fn append(
        &self,
        severity: Severity,
        line: &str,
    ) -> impl Future<Output = Result<(), BmcwatchError>> + Send;

    /// `tag`를 포함하는 기존 라인들을 삽입 순서로 돌려줍니다.
    fn read_tagged(
        &self,
        tag: &str,
    ) -> impl Future<Output = Result<Vec<String>, BmcwatchError>> + Send;
}
