/// 未知词条的描述
pub const UNKNOWN_DESCRIPTION: &str = "Unknown command";

/// 魔法词指令（固定词表）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Hello,
    Author,
    Exit,
}

/// 匹配结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// 匹配到魔法词
    Command(Command),
    /// 未匹配，界面不做任何响应
    NoMatch,
}

impl Command {
    pub const ALL: [Command; 3] = [Command::Hello, Command::Author, Command::Exit];

    /// 规范化后的触发词
    pub fn trigger(self) -> &'static str {
        match self {
            Command::Hello => "hello",
            Command::Author => "author",
            Command::Exit => "exit",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Hello => {
                "Greeting command that displays a welcome message with your device name."
            }
            Command::Author => "Shows information about the developer of this application.",
            Command::Exit => "Closes the application and returns to the shell.",
        }
    }

    /// 按触发词查找（输入须已规范化）
    pub fn from_trigger(trigger: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.trigger() == trigger)
    }
}

/// trim 后转小写
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// 精确匹配（规范化后完全相等）
pub fn match_text(text: &str) -> MatchResult {
    match Command::from_trigger(&normalize(text)) {
        Some(command) => MatchResult::Command(command),
        None => MatchResult::NoMatch,
    }
}

/// 词条描述；记录里可能残留旧版本的词，不能假设一定在词表中
pub fn describe(phrase: &str) -> &'static str {
    Command::from_trigger(&normalize(phrase))
        .map(Command::description)
        .unwrap_or(UNKNOWN_DESCRIPTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_triggers_ignoring_case_and_whitespace() {
        for command in Command::ALL {
            let t = command.trigger();
            assert_eq!(match_text(t), MatchResult::Command(command));
            assert_eq!(match_text(&t.to_uppercase()), MatchResult::Command(command));
            assert_eq!(
                match_text(&format!(" \t{}\n ", t)),
                MatchResult::Command(command)
            );
        }
        assert_eq!(match_text("  Hello  "), MatchResult::Command(Command::Hello));
        assert_eq!(match_text("AuThOr"), MatchResult::Command(Command::Author));
    }

    #[test]
    fn test_no_partial_or_prefix_match() {
        for text in ["", "   ", "hell", "hello!", "hello world", "exits", "h e l l o", "goodbye"] {
            assert_eq!(match_text(text), MatchResult::NoMatch, "input {text:?}");
        }
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe("author"), Command::Author.description());
        assert_eq!(describe(" HELLO "), Command::Hello.description());
        assert_eq!(describe("goodbye"), UNKNOWN_DESCRIPTION);
        assert_eq!(describe(""), UNKNOWN_DESCRIPTION);
    }

    #[test]
    fn test_from_trigger_requires_normalized_input() {
        assert_eq!(Command::from_trigger("exit"), Some(Command::Exit));
        assert_eq!(Command::from_trigger("Exit"), None);
    }
}
