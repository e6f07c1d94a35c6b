//! # 结果模型与引用归一化
//!
//! ## 设计思路
//!
//! - `HostResult` 表示宿主回调带回的原始数据（状态 + 可选引用 + 可选错误原因）
//! - `OperationOutcome` 是路由器产出的统一结果，前端只需处理三种分支
//! - 交付给前端前，带 `file:` 前缀的引用统一去掉 scheme，下游拿到与 scheme 无关的路径

use once_cell::sync::Lazy;
use regex::Regex;

use super::AcquireError;

/// 匹配文件 scheme 前缀：`file:`、`file://`+绝对路径、`file://localhost`+绝对路径。
static FILE_SCHEME_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:file):(?://(?:localhost)?(?P<root>/))?")
        .expect("file scheme pattern is a valid regex")
});

/// 去掉引用上的文件 scheme 前缀；其它 scheme（如 `content://`）保持不变。
///
/// 只认空 authority 与 `localhost`；`file://host/path` 这类远程 authority
/// 只去掉 `file:`，交付 `//host/path`，保留主机信息。
///
/// # 示例
/// ```rust
/// use image_acquire::acquisition::normalize_reference;
///
/// assert_eq!(normalize_reference("file:/storage/a.jpg"), "/storage/a.jpg");
/// assert_eq!(normalize_reference("file:///tmp/x.jpg"), "/tmp/x.jpg");
/// assert_eq!(normalize_reference("content://media/1"), "content://media/1");
/// ```
pub fn normalize_reference(reference: &str) -> String {
    FILE_SCHEME_PREFIX.replace(reference, "${root}").into_owned()
}

/// 一次操作的最终结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    Success(String),
    Cancelled,
    Failed(AcquireError),
}

impl OperationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// 成功时的资源引用。
    pub fn reference(&self) -> Option<&str> {
        match self {
            Self::Success(reference) => Some(reference),
            _ => None,
        }
    }

    /// 折叠为 `Result`，取消映射为 `AcquireError::UserCancelled`。
    pub fn into_result(self) -> Result<String, AcquireError> {
        match self {
            Self::Success(reference) => Ok(reference),
            Self::Cancelled => Err(AcquireError::UserCancelled),
            Self::Failed(error) => Err(error),
        }
    }
}

/// 宿主回调的完成状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStatus {
    Ok,
    Cancelled,
    Error,
}

/// 宿主回调携带的原始数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostResult {
    pub status: HostStatus,
    pub reference: Option<String>,
    pub error: Option<String>,
}

impl HostResult {
    pub fn ok(reference: Option<String>) -> Self {
        Self {
            status: HostStatus::Ok,
            reference,
            error: None,
        }
    }

    pub fn cancelled() -> Self {
        Self {
            status: HostStatus::Cancelled,
            reference: None,
            error: None,
        }
    }

    pub fn error(reason: impl Into<String>) -> Self {
        Self {
            status: HostStatus::Error,
            reference: None,
            error: Some(reason.into()),
        }
    }
}
