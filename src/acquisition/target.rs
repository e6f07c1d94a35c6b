//! # 拍照目标预分配
//!
//! 发出拍照请求前预先分配一个资源引用，宿主把照片写入该位置；
//! 回调到达时由路由器取回并消费，消费后即丢弃。

use std::path::Path;

use chrono::Local;

use super::{AcquireConfig, AcquireError};

/// 预分配的拍照目标（不透明资源引用）。
///
/// 不实现 `Clone`：同一目标只能被消费一次。
#[derive(Debug, PartialEq, Eq)]
pub struct PendingTarget {
    reference: String,
}

impl PendingTarget {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// 消费目标，取出引用。
    pub fn into_reference(self) -> String {
        self.reference
    }
}

/// 目标分配器，可由宿主替换（例如改为 content provider 引用）。
pub trait TargetAllocator {
    fn allocate(&mut self, config: &AcquireConfig) -> Result<PendingTarget, AcquireError>;
}

/// 默认分配器：`file:<dir>/<prefix><timestamp><suffix><ext>`。
#[derive(Debug, Default)]
pub struct TimestampTargetAllocator;

impl TargetAllocator for TimestampTargetAllocator {
    fn allocate(&mut self, config: &AcquireConfig) -> Result<PendingTarget, AcquireError> {
        if config.target_dir.trim().is_empty() {
            return Err(AcquireError::InvalidConfig("target_dir 不能为空".to_string()));
        }

        let timestamp = Local::now().format(&config.date_format).to_string();
        let file_name = format!(
            "{}{}{}{}",
            config.file_prefix, timestamp, config.file_suffix, config.file_extension
        );
        let path = Path::new(&config.target_dir).join(file_name);

        Ok(PendingTarget::new(format!("file:{}", path.to_string_lossy())))
    }
}
