use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::acquisition::AcquireConfig;
use crate::error::AppError;

/// 设置文件的默认文件名。
pub const SETTINGS_FILE_NAME: &str = "acquire-settings.json";

/// 持久化的采集设置。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquireSettings {
    /// 启动时是否在日志中输出完整配置。
    pub log_config: bool,
    pub acquire: AcquireConfig,
}

impl AcquireSettings {
    /// 从 JSON 文件加载设置；文件不存在时返回默认值。
    pub fn load_from_path(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            log::info!("⚙️ 设置文件不存在，使用默认值: {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&content)
            .map_err(|e| AppError::Settings(format!("解析设置文件失败: {}", e)))?;
        settings
            .acquire
            .validate()
            .map_err(|e| AppError::Settings(format!("设置校验失败: {}", e)))?;

        log::info!("⚙️ 已加载设置: {}", path.display());
        Ok(settings)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), AppError> {
        self.acquire
            .validate()
            .map_err(|e| AppError::Settings(format!("设置校验失败: {}", e)))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Settings(format!("序列化设置失败: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}
