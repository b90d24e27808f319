//! ipmitool 기반 SEL 소스
//!
//! [`IpmiSelSource`]는 외부 `ipmitool` 프로세스를 호출하여
//! [`SelSource`] trait을 구현합니다. BMC와의 통신은 전적으로
//! ipmitool에 위임하며, 이 모듈은 표준 출력 텍스트만 다룹니다.
//!
//! | 연산 | 명령 |
//! |---|---|
//! | SEL 목록 조회 | `ipmitool sel list` |
//! | BMC 시각 조회 | `ipmitool sel time get` |
//! | BMC 시각 설정 | `ipmitool sel time set now` |

use std::future::Future;

use bmcwatch_core::error::BmcwatchError;
use bmcwatch_core::pipeline::SelSource;

use crate::error::SelPipelineError;

/// ipmitool 프로세스를 호출하는 SEL 소스
#[derive(Debug, Clone)]
pub struct IpmiSelSource {
    /// ipmitool 실행 파일 경로
    ipmitool_path: String,
}

impl IpmiSelSource {
    /// 지정한 ipmitool 경로로 새 소스를 생성합니다.
    pub fn new(ipmitool_path: impl Into<String>) -> Self {
        Self {
            ipmitool_path: ipmitool_path.into(),
        }
    }

    /// ipmitool 하위 명령을 실행하고 표준 출력을 돌려줍니다.
    ///
    /// 실행 자체의 실패와 0이 아닌 종료 코드를 모두 소스 I/O 실패로
    /// 취급합니다. 표준 출력은 lossy UTF-8로 디코딩합니다.
    async fn run(&self, args: &[&str]) -> Result<String, SelPipelineError> {
        let command_line = format!("{} {}", self.ipmitool_path, args.join(" "));

        let output = tokio::process::Command::new(&self.ipmitool_path)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|err| SelPipelineError::Bmc {
                command: command_line.clone(),
                reason: err.to_string(),
            })?;

        if !output.status.success() {
            let exit = match output.status.code() {
                Some(code) => format!("exit status {code}"),
                None => "terminated by signal".to_owned(),
            };
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SelPipelineError::Bmc {
                command: command_line,
                reason: format!("{exit}: {}", stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl SelSource for IpmiSelSource {
    fn name(&self) -> &str {
        "ipmitool"
    }

    fn fetch_sel(&self) -> impl Future<Output = Result<String, BmcwatchError>> + Send {
        async move { Ok(self.run(&["sel", "list"]).await?) }
    }

    fn read_clock(&self) -> impl Future<Output = Result<String, BmcwatchError>> + Send {
        async move { Ok(self.run(&["sel", "time", "get"]).await?) }
    }

    fn sync_clock(&self) -> impl Future<Output = Result<(), BmcwatchError>> + Send {
        async move {
            self.run(&["sel", "time", "set", "now"]).await?;
            Ok(())
        }
    }
}
