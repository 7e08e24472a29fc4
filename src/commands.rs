use crate::config::AppConfig;
use crate::device::DeviceName;
use crate::magic_words::{self, Command, MatchResult};
use crate::phrases::{PhraseRegistry, PhraseSet, PhraseStore};

/// 底部导航的两个页面
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Home,
    Words,
}

/// 界面状态快照，每次变更整体替换
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub tab: Tab,
    pub phrases: PhraseSet,
}

/// 匹配成功后弹出的对话框；title 为用户原始输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Greeting { title: String, name: String },
    Author { title: String, developer: String },
}

/// 提交输入的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Dialog(Dialog),
    Exit,
    NoMatch,
}

/// 词条详情
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseDetail {
    pub phrase: String,
    pub description: &'static str,
}

/// 应用控制器：组合匹配、记录和设备名
pub struct App<S: PhraseStore, D: DeviceName> {
    registry: PhraseRegistry<S>,
    device: D,
    fallback_name: String,
    developer: String,
    state: UiState,
}

impl<S: PhraseStore, D: DeviceName> App<S, D> {
    pub fn new(registry: PhraseRegistry<S>, device: D, config: &AppConfig) -> Self {
        let state = UiState {
            tab: Tab::Home,
            phrases: registry.phrases().clone(),
        };
        Self {
            registry,
            device,
            fallback_name: config.greeting.fallback_name.clone(),
            developer: config.author.developer.clone(),
            state,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// 当前已发现的词（显示顺序）
    pub fn phrases(&self) -> &PhraseSet {
        &self.state.phrases
    }

    pub fn registry(&self) -> &PhraseRegistry<S> {
        &self.registry
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.state = UiState {
            tab,
            phrases: self.state.phrases.clone(),
        };
    }

    /// 提交输入框内容
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        let command = match magic_words::match_text(text) {
            MatchResult::Command(command) => command,
            MatchResult::NoMatch => {
                log::debug!("未匹配: {:?}", text);
                return SubmitOutcome::NoMatch;
            }
        };

        let (phrases, _changed) = self.registry.record(command);
        self.replace_phrases(phrases);

        let title = text.to_string();
        match command {
            Command::Hello => {
                let name = self
                    .device
                    .device_name()
                    .unwrap_or_else(|| self.fallback_name.clone());
                SubmitOutcome::Dialog(Dialog::Greeting { title, name })
            }
            Command::Author => SubmitOutcome::Dialog(Dialog::Author {
                title,
                developer: self.developer.clone(),
            }),
            Command::Exit => {
                log::info!("收到 exit，准备退出");
                SubmitOutcome::Exit
            }
        }
    }

    /// 词条详情；phrase 为规范化后的形式
    pub fn detail(&self, phrase: &str) -> PhraseDetail {
        PhraseDetail {
            phrase: magic_words::normalize(phrase),
            description: magic_words::describe(phrase),
        }
    }

    pub fn delete(&mut self, phrase: &str) {
        let phrases = self.registry.delete(&magic_words::normalize(phrase));
        self.replace_phrases(phrases);
    }

    pub fn clear(&mut self) {
        let phrases = self.registry.clear();
        self.replace_phrases(phrases);
    }

    fn replace_phrases(&mut self, phrases: PhraseSet) {
        self.state = UiState {
            tab: self.state.tab,
            phrases,
        };
    }
}
