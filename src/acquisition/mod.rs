//! # 图片采集模块（acquisition）
//!
//! ## 设计思路
//!
//! 该模块将“入口选择 → 能力探测 → 权限协商 → 宿主请求 → 结果路由 → 终态上报”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `probe`：宿主能力与权限状态查询
//! - `permission`：权限请求 / 说明对话框 / 单次重试状态机
//! - `dispatcher`：按入口给出下一步计划，并负责拍照目标分配
//! - `router`：按操作标签消费回调、映射结果、归一化引用
//! - `coordinator`：持有前端绑定与状态，串联以上各步
//! - `host`：外部 UI 层需要实现的端口
//! - `config/error/intent/outcome/target/resolver`：配置、错误、数据模型与钩子
//!
//! ## 新同事快速上手
//!
//! 可以按下面顺序理解调用链：
//!
//! ```text
//! 用户点击
//!    ↓
//! coordinator.rs（begin：重新探测能力）
//!    ↓
//! dispatcher.rs（在途检查 + 能力检查 → DispatchPlan）
//!    ├─ permission.rs（仅拍照：授权 / 说明对话框 / 单次重试）
//!    └─ target.rs（授权后分配拍照目标）
//!    ↓
//! host.rs（发出宿主请求，立即返回）
//!    ⋯ 宿主回调 ⋯
//! router.rs（标签 → OperationOutcome，去掉 file: 前缀）
//!    ↓
//! coordinator.rs（上报前端；拍照成功则自动发起裁剪）
//! ```

mod config;
mod coordinator;
mod dispatcher;
mod error;
mod host;
mod intent;
mod outcome;
mod permission;
mod probe;
mod resolver;
mod router;
mod target;

pub use config::{
    AcquireConfig, CompressFormat, CropOptions, CropPreset, CropShape, Guidelines,
    RequestSizeOption, ScaleType,
};
pub use coordinator::Coordinator;
pub use dispatcher::{AcquisitionDispatcher, DispatchPlan};
pub use error::AcquireError;
pub use host::AcquireHost;
pub use intent::{AcquisitionIntent, OperationTag};
pub use outcome::{normalize_reference, HostResult, HostStatus, OperationOutcome};
pub use permission::{
    NegotiationState, NegotiationStep, PermissionNegotiator, PermissionState, RationaleChoice,
};
pub use probe::{CapabilityProbe, ProbeSnapshot, StaticProbe};
pub use resolver::{PassThroughResolver, PathResolver};
pub use router::{ResultRouter, Routed};
pub use target::{PendingTarget, TargetAllocator, TimestampTargetAllocator};
