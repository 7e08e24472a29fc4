use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use crate::magic_words::Command;

/// 记录存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("读写记录文件 {path} 失败: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("序列化记录失败: {0}")]
    Encode(#[from] serde_json::Error),
}

/// 单个持久化槽位：整份记录作为一个 blob 读写
pub trait PhraseStore {
    /// 槽位为空时返回 None
    fn read(&self) -> Result<Option<String>, StoreError>;
    /// 整体替换槽位内容
    fn write(&mut self, blob: &str) -> Result<(), StoreError>;
    /// 删除槽位，不存在时不报错
    fn remove(&mut self) -> Result<(), StoreError>;
}

/// 基于 JSON 文件的存储
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 默认记录文件路径
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("easter-words")
            .join("phrases.json")
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PhraseStore for FileStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn write(&mut self, blob: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        // 先写临时文件再 rename，读者只会看到完整的旧值或新值
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, blob).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            self.io_error(e)
        })
    }

    fn remove(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// 内存存储，嵌入和测试用
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl PhraseStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.blob.clone())
    }

    fn write(&mut self, blob: &str) -> Result<(), StoreError> {
        self.blob = Some(blob.to_string());
        Ok(())
    }

    fn remove(&mut self) -> Result<(), StoreError> {
        self.blob = None;
        Ok(())
    }
}

/// 持久化格式：{"phrases": [...]}
#[derive(Debug, Default, Serialize, Deserialize)]
struct PhrasesData {
    #[serde(default)]
    phrases: Vec<String>,
}

/// 已发现的词，按发现顺序排列且不重复
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseSet {
    members: Vec<String>,
}

impl PhraseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.members.iter().any(|p| p == phrase)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.members.iter()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.members.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.members
    }

    fn insert(&mut self, phrase: &str) -> bool {
        if self.contains(phrase) {
            return false;
        }
        self.members.push(phrase.to_string());
        true
    }

    fn remove(&mut self, phrase: &str) -> bool {
        match self.members.iter().position(|p| p == phrase) {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }
}

impl FromIterator<String> for PhraseSet {
    /// 重复项只保留第一次出现
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = PhraseSet::new();
        for phrase in iter {
            set.insert(&phrase);
        }
        set
    }
}

/// 序列化整份记录
pub fn encode(set: &PhraseSet) -> Result<String, serde_json::Error> {
    serde_json::to_string(&PhrasesData {
        phrases: set.members.clone(),
    })
}

/// 反序列化；格式不对返回 None
pub fn decode(blob: &str) -> Option<PhraseSet> {
    serde_json::from_str::<PhrasesData>(blob)
        .ok()
        .map(|data| data.phrases.into_iter().collect())
}

/// 词记录：内存中的唯一副本，也是存储的唯一写入者
pub struct PhraseRegistry<S: PhraseStore> {
    store: S,
    phrases: PhraseSet,
}

impl<S: PhraseStore> PhraseRegistry<S> {
    /// 打开存储并加载已有记录
    pub fn open(store: S) -> Self {
        let mut registry = Self {
            store,
            phrases: PhraseSet::new(),
        };
        registry.load();
        registry
    }

    /// 从存储加载；槽位为空、读取失败或格式错误都视为空记录
    pub fn load(&mut self) -> PhraseSet {
        let phrases = match self.store.read() {
            Ok(Some(blob)) => decode(&blob).unwrap_or_else(|| {
                log::warn!("记录格式无法解析，按空记录处理");
                PhraseSet::new()
            }),
            Ok(None) => PhraseSet::new(),
            Err(e) => {
                log::warn!("读取记录失败: {e}，按空记录处理");
                PhraseSet::new()
            }
        };
        log::debug!("已加载 {} 条记录", phrases.len());
        self.phrases = phrases.clone();
        phrases
    }

    pub fn phrases(&self) -> &PhraseSet {
        &self.phrases
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 记录一个新发现的词，返回 (最新记录, 是否有变化)；重复的词不写存储
    pub fn record(&mut self, command: Command) -> (PhraseSet, bool) {
        let trigger = command.trigger();
        let changed = self.phrases.insert(trigger);
        if changed {
            log::info!("发现新词: {trigger}");
            self.persist();
        }
        (self.phrases.clone(), changed)
    }

    /// 删除一个词，不存在时什么也不做
    pub fn delete(&mut self, phrase: &str) -> PhraseSet {
        if self.phrases.remove(phrase) {
            log::info!("删除词: {phrase}");
            self.persist();
        }
        self.phrases.clone()
    }

    /// 清空记录并删除存储槽位
    pub fn clear(&mut self) -> PhraseSet {
        self.phrases = PhraseSet::new();
        if let Err(e) = self.store.remove() {
            log::error!("清空记录失败: {e}");
        }
        log::info!("已清空全部记录");
        self.phrases.clone()
    }

    /// 序列化整份记录并替换存储内容
    pub fn save(&mut self, set: &PhraseSet) -> Result<(), StoreError> {
        let blob = encode(set)?;
        self.store.write(&blob)?;
        self.phrases = set.clone();
        Ok(())
    }

    fn persist(&mut self) {
        let set = self.phrases.clone();
        if let Err(e) = self.save(&set) {
            log::error!("保存记录失败: {e}");
        }
    }
}
