//! # 图片采集协调器 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │              前端 (实现 AcquireHost 的 UI 层)              │
//! │                                                          │
//! │  入口按钮 ── 权限说明对话框 ── 结果展示                   │
//! │       ↕  (宿主请求 / 回调 / OperationOutcome)            │
//! └───────┼──────────────────────────────────────────────────┘
//!         ↕ AcquireHost (端口 trait)
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            核心 (Rust)                           │
//! │                                                          │
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  │                                                       │
//! │  ├─ settings ─── JSON 设置文件 (serde_json)               │
//! │  │                                                       │
//! │  └─ acquisition  采集流水线                               │
//! │      ├─ probe        相机能力 / 权限探测                  │
//! │      ├─ permission   权限协商 (单次重试)                  │
//! │      ├─ dispatcher   入口分发 + 拍照目标分配              │
//! │      ├─ router       按标签路由回调 + file: 归一化        │
//! │      └─ coordinator  前端绑定 + 链式推进                  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，对外暴露的返回类型 |
//! | [`acquisition`] | 拍照 / 图库选择 / 裁剪流水线的状态机与路由 |
//! | [`settings`] | 采集设置的加载、校验与保存 |

pub mod error;
pub mod acquisition;
pub mod settings;
