use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::phrases::FileStore;

/// 应用配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub greeting: GreetingConfig,
    #[serde(default)]
    pub author: AuthorConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 记录文件路径，空字符串表示使用数据目录
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreetingConfig {
    /// 覆盖系统设备名
    #[serde(default)]
    pub device_name: String,
    /// 取不到设备名时使用，默认 "User"
    #[serde(default = "default_fallback_name")]
    pub fallback_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorConfig {
    #[serde(default = "default_developer")]
    pub developer: String,
}

fn default_fallback_name() -> String {
    "User".to_string()
}
fn default_developer() -> String {
    "SuperDragon777".to_string()
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            device_name: String::new(),
            fallback_name: default_fallback_name(),
        }
    }
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            developer: default_developer(),
        }
    }
}

impl StorageConfig {
    /// 实际使用的记录文件路径
    pub fn phrases_path(&self) -> PathBuf {
        if self.path.trim().is_empty() {
            FileStore::default_path()
        } else {
            PathBuf::from(self.path.trim())
        }
    }
}

/// 获取配置文件路径
pub fn config_path() -> PathBuf {
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("easter-words");
    config_dir.join("config.toml")
}

/// 加载配置，文件不存在则创建默认配置
pub fn load_config() -> Result<AppConfig, String> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig, String> {
    if path.exists() {
        let content = fs::read_to_string(path).map_err(|e| format!("读取配置失败: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("解析配置失败: {e}"))
    } else {
        let config = AppConfig::default();
        save_config_to(&config, path)?;
        log::info!("已创建默认配置: {}", path.display());
        Ok(config)
    }
}

/// 保存配置到文件
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("创建配置目录失败: {e}"))?;
    }
    let content = toml::to_string_pretty(config).map_err(|e| format!("序列化配置失败: {e}"))?;
    fs::write(path, content).map_err(|e| format!("写入配置失败: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sub").join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());
        assert_eq!(config.greeting.fallback_name, "User");
        assert_eq!(config.author.developer, "SuperDragon777");
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.greeting.device_name = "Pixel".to_string();
        config.storage.path = "/tmp/words.json".to_string();
        save_config_to(&config, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.storage.phrases_path(), PathBuf::from("/tmp/words.json"));
    }

    #[test]
    fn test_partial_config_takes_defaults() {
        let config: AppConfig = toml::from_str("[greeting]\ndevice_name = \"desk\"\n").unwrap();
        assert_eq!(config.greeting.device_name, "desk");
        assert_eq!(config.greeting.fallback_name, "User");
        assert_eq!(config.author, AuthorConfig::default());
        assert_eq!(config.storage.phrases_path(), FileStore::default_path());
    }

    #[test]
    fn test_invalid_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[greeting\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(err.starts_with("解析配置失败"));
    }
}
