//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载采集链路中的所有失败原因，避免字符串拼接式错误处理。
//! `Display` 文本即为前端收到的 `Failed(reason)` 原因文本，调用侧可按分支匹配。
//!
//! 注意：用户取消不是错误，正常流程中以 `OperationOutcome::Cancelled` 表达；
//! `UserCancelled` 仅用于把结果折叠成 `Result` 的场景。

/// 图片采集统一错误类型。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AcquireError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("no applicable case")]
    CapabilityUnavailable,

    #[error("operation already in progress")]
    OperationInProgress,

    #[error("result missing")]
    ResultMissing,

    #[error("cancelled by the user")]
    UserCancelled,

    #[error("unrecognized operation")]
    UnrecognizedOperation,

    #[error("picking image failed")]
    PickFailed,

    #[error("taking picture failed")]
    CaptureFailed,

    #[error("{0}")]
    Underlying(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("front-end not bound")]
    NotBound,
}

impl AcquireError {
    /// 稳定错误码，供前端按码分支展示。
    pub fn code(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "E_PERMISSION_DENIED",
            Self::CapabilityUnavailable => "E_CAPABILITY_UNAVAILABLE",
            Self::OperationInProgress => "E_IN_PROGRESS",
            Self::ResultMissing => "E_RESULT_MISSING",
            Self::UserCancelled => "E_CANCELLED",
            Self::UnrecognizedOperation => "E_UNRECOGNIZED_OPERATION",
            Self::PickFailed => "E_PICK_FAILED",
            Self::CaptureFailed => "E_CAPTURE_FAILED",
            Self::Underlying(_) => "E_UNDERLYING",
            Self::InvalidConfig(_) => "E_INVALID_CONFIG",
            Self::NotBound => "E_NOT_BOUND",
        }
    }

    /// 出错所在的流水线阶段（用于日志与诊断）。
    ///
    /// `Underlying` 可能来自裁剪步骤或自定义选择的路径解析，统一标为 `underlying`。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission",
            Self::CapabilityUnavailable | Self::OperationInProgress | Self::NotBound => "dispatch",
            Self::CaptureFailed => "capture",
            Self::PickFailed => "pick",
            Self::Underlying(_) => "underlying",
            Self::UserCancelled | Self::ResultMissing | Self::UnrecognizedOperation => "route",
            Self::InvalidConfig(_) => "config",
        }
    }

    /// 是否为用户主动取消（取消永远不应作为错误展示给用户）。
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::UserCancelled)
    }
}

impl From<AcquireError> for String {
    fn from(error: AcquireError) -> Self {
        error.to_string()
    }
}
