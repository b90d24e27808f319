//! 파일 알림 싱크
//!
//! [`FileAlertSink`]는 append 전용 텍스트 파일로 [`AlertSink`] trait을
//! 구현합니다. 각 라인 앞에 기록 시각(RFC 3339)과 식별자, 심각도
//! 레이블을 붙여 syslog와 비슷한 모양을 만듭니다.
//!
//! ```text
//! 2024-03-01T10:00:05+09:00 bmcwatch.warning: %PMON-0-FAN_UNPLUG : 03/01/2024 10:00:00 | Fan FAN1 |  | Deasserted
//! ```
//!
//! 파일이 없으면 첫 append 때 만들고, `read_tagged`는 파일이 없을 때
//! 빈 목록을 돌려줍니다 (첫 실행 시나리오).

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{Local, SecondsFormat};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use bmcwatch_core::error::BmcwatchError;
use bmcwatch_core::pipeline::AlertSink;
use bmcwatch_core::types::Severity;

use crate::error::SelPipelineError;

/// append 전용 파일 싱크
#[derive(Debug, Clone)]
pub struct FileAlertSink {
    /// 로그 파일 경로
    path: PathBuf,
    /// 라인에 기록할 프로그램 식별자
    ident: String,
}

impl FileAlertSink {
    /// 새 파일 싱크를 생성합니다.
    pub fn new(path: impl Into<PathBuf>, ident: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ident: ident.into(),
        }
    }

    /// 싱크 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sink_error(&self, err: std::io::Error) -> SelPipelineError {
        SelPipelineError::Sink {
            path: self.path.display().to_string(),
            reason: err.to_string(),
        }
    }

    async fn append_line(&self, severity: Severity, line: &str) -> Result<(), SelPipelineError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|err| self.sink_error(err))?;
            }
        }

        let stamped = format!(
            "{} {}.{}: {}\n",
            Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            self.ident,
            severity.syslog_label(),
            line
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|err| self.sink_error(err))?;
        file.write_all(stamped.as_bytes())
            .await
            .map_err(|err| self.sink_error(err))?;
        file.flush().await.map_err(|err| self.sink_error(err))?;

        Ok(())
    }

    async fn read_lines_tagged(&self, tag: &str) -> Result<Vec<String>, SelPipelineError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(self.sink_error(err)),
        };

        Ok(content
            .lines()
            .filter(|line| line.contains(tag))
            .map(str::to_owned)
            .collect())
    }
}

impl AlertSink for FileAlertSink {
    fn name(&self) -> &str {
        "file"
    }

    fn append(
        &self,
        severity: Severity,
        line: &str,
    ) -> impl Future<Output = Result<(), BmcwatchError>> + Send {
        async move { Ok(self.append_line(severity, line).await?) }
    }

    fn read_tagged(
        &self,
        tag: &str,
    ) -> impl Future<Output = Result<Vec<String>, BmcwatchError>> + Send {
        async move { Ok(self.read_lines_tagged(tag).await?) }
    }
}
