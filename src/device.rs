/// 获取设备的可读名称，用于问候语
pub trait DeviceName {
    fn device_name(&self) -> Option<String>;
}

/// 系统设备名：配置覆盖 → 设备名 → 主机名
#[derive(Debug, Clone, Default)]
pub struct SystemDeviceName {
    override_name: Option<String>,
}

impl SystemDeviceName {
    pub fn new(override_name: &str) -> Self {
        Self {
            override_name: non_empty(override_name.to_string()),
        }
    }
}

impl DeviceName for SystemDeviceName {
    fn device_name(&self) -> Option<String> {
        if let Some(name) = &self.override_name {
            return Some(name.clone());
        }
        whoami::fallible::devicename()
            .ok()
            .and_then(non_empty)
            .or_else(|| whoami::fallible::hostname().ok().and_then(non_empty))
    }
}

/// 固定名称
#[derive(Debug, Clone)]
pub struct FixedDeviceName(pub String);

impl DeviceName for FixedDeviceName {
    fn device_name(&self) -> Option<String> {
        non_empty(self.0.clone())
    }
}

fn non_empty(name: String) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
