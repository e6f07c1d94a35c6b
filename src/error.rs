//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `AppError` 枚举，替代各模块中分散的
//! `.map_err(|e| e.to_string())`、`format!(...)`、`expect()` 等不一致模式。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `AcquireError` 与 `std::io::Error` 提供 `From` 转换，无需手动 map。
//! - 实现 `Serialize` 将错误序列化为字符串，便于传给前端。

use serde::Serialize;

use crate::acquisition::AcquireError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 采集流水线错误
    #[error("{0}")]
    Acquire(#[from] AcquireError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 设置文件读写或校验失败
    #[error("设置错误: {0}")]
    Settings(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_errors_keep_their_message() {
        let err: AppError = AcquireError::PermissionDenied.into();
        assert_eq!(err.to_string(), "permission denied");
    }

    #[test]
    fn serializes_as_plain_string() {
        let err = AppError::Settings("bad json".to_string());
        let json = serde_json::to_string(&err).expect("serialize error");
        assert_eq!(json, "\"设置错误: bad json\"");
    }
}
