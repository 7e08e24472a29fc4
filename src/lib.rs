pub mod commands;
pub mod config;
pub mod device;
pub mod magic_words;
pub mod phrases;
pub mod screen;

use commands::App;
use config::{load_config, AppConfig};
use device::SystemDeviceName;
use phrases::{FileStore, PhraseRegistry};
use std::io;

pub fn run() -> Result<(), String> {
    env_logger::init();

    let config = load_config().unwrap_or_else(|e| {
        log::error!("加载配置失败: {e}，使用默认配置");
        AppConfig::default()
    });

    let phrases_path = config.storage.phrases_path();
    log::info!("记录文件: {}", phrases_path.display());
    let registry = PhraseRegistry::open(FileStore::new(phrases_path));
    let device = SystemDeviceName::new(&config.greeting.device_name);
    let mut app = App::new(registry, device, &config);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    screen::run_session(&mut app, stdin.lock(), &mut stdout).map_err(|e| {
        log::error!("会话异常结束: {e}");
        e
    })
}
