use std::io::{self, BufRead, Write};

use crate::commands::{App, Dialog, PhraseDetail, SubmitOutcome, Tab};
use crate::device::DeviceName;
use crate::phrases::{PhraseSet, PhraseStore};

/// 一行输入对应的界面动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    Navigate(Tab),
    /// 提交到输入框
    Submit(String),
    Show(String),
    /// Words 页的列表序号，从 1 开始
    ShowIndex(usize),
    Delete(String),
    Clear,
    Help,
    Quit,
    Unknown(String),
}

/// 解析一行输入；以 ':' 开头的是菜单/导航动作
pub fn parse_action(line: &str, tab: Tab) -> ScreenAction {
    let trimmed = line.trim();
    if let Some(rest) = trimmed.strip_prefix(':') {
        let (id, arg) = match rest.split_once(char::is_whitespace) {
            Some((id, arg)) => (id, arg.trim()),
            None => (rest, ""),
        };
        return match id {
            "home" => ScreenAction::Navigate(Tab::Home),
            "words" => ScreenAction::Navigate(Tab::Words),
            "show" if !arg.is_empty() => ScreenAction::Show(arg.to_string()),
            "delete" if !arg.is_empty() => ScreenAction::Delete(arg.to_string()),
            "clear" => ScreenAction::Clear,
            "help" => ScreenAction::Help,
            "quit" => ScreenAction::Quit,
            _ => ScreenAction::Unknown(rest.to_string()),
        };
    }

    if tab == Tab::Words {
        if trimmed.is_empty() {
            return ScreenAction::Navigate(Tab::Words);
        }
        if let Ok(index) = trimmed.parse::<usize>() {
            return ScreenAction::ShowIndex(index);
        }
    }
    ScreenAction::Submit(line.to_string())
}

fn io_err(e: io::Error) -> String {
    format!("终端输出失败: {e}")
}

pub fn render_nav(out: &mut impl Write, tab: Tab) -> io::Result<()> {
    let (home, words) = match tab {
        Tab::Home => ("[Home]", " Words "),
        Tab::Words => (" Home ", "[Words]"),
    };
    writeln!(out, "---- {home} {words} ----")
}

pub fn render_home(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Use your imagination")
}

pub fn render_words(out: &mut impl Write, phrases: &PhraseSet) -> io::Result<()> {
    writeln!(out, "Words")?;
    if phrases.is_empty() {
        return writeln!(out, "No words discovered yet");
    }
    for (i, phrase) in phrases.iter().enumerate() {
        writeln!(out, "{:>3}. {}", i + 1, phrase)?;
    }
    Ok(())
}

pub fn render_dialog(out: &mut impl Write, dialog: &Dialog) -> io::Result<()> {
    match dialog {
        Dialog::Greeting { title, name } => {
            writeln!(out, "«{title}»")?;
            writeln!(out, "Hello, {name} and Rust developing world!")?;
            writeln!(out, "[Yo!]")
        }
        Dialog::Author { title, developer } => {
            writeln!(out, "«{title}»")?;
            writeln!(out, "Developer: {developer}")?;
            writeln!(out, "[OK]")
        }
    }
}

pub fn render_detail(out: &mut impl Write, detail: &PhraseDetail) -> io::Result<()> {
    writeln!(out, "«{}»", detail.phrase)?;
    writeln!(out, "Description:")?;
    writeln!(out, "{}", detail.description)?;
    writeln!(out, "[OK]  (:delete {} to remove)", detail.phrase)
}

pub fn render_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, ":home            input screen")?;
    writeln!(out, ":words           discovered words")?;
    writeln!(out, ":show <word>     word description")?;
    writeln!(out, ":delete <word>   forget a word")?;
    writeln!(out, ":clear           forget all words")?;
    writeln!(out, ":quit            leave")
}

fn render_screen<S: PhraseStore, D: DeviceName>(
    app: &App<S, D>,
    out: &mut impl Write,
) -> io::Result<()> {
    let state = app.state();
    render_nav(out, state.tab)?;
    match state.tab {
        Tab::Home => render_home(out),
        Tab::Words => render_words(out, &state.phrases),
    }
}

/// 交互循环，直到输入结束、exit 或 :quit
pub fn run_session<S, D, R, W>(app: &mut App<S, D>, input: R, out: &mut W) -> Result<(), String>
where
    S: PhraseStore,
    D: DeviceName,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    render_screen(app, out).map_err(io_err)?;

    loop {
        write!(out, "> ").map_err(io_err)?;
        out.flush().map_err(io_err)?;

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => return Err(format!("读取输入失败: {e}")),
            None => break,
        };

        match parse_action(&line, app.state().tab) {
            ScreenAction::Navigate(tab) => {
                app.select_tab(tab);
                render_screen(app, out).map_err(io_err)?;
            }
            ScreenAction::Submit(text) => {
                if app.state().tab != Tab::Home {
                    app.select_tab(Tab::Home);
                    render_screen(app, out).map_err(io_err)?;
                }
                match app.submit(&text) {
                    SubmitOutcome::Dialog(dialog) => render_dialog(out, &dialog).map_err(io_err)?,
                    SubmitOutcome::Exit => break,
                    SubmitOutcome::NoMatch => {}
                }
            }
            ScreenAction::Show(phrase) => {
                render_detail(out, &app.detail(&phrase)).map_err(io_err)?;
            }
            ScreenAction::ShowIndex(index) => {
                let phrase = index
                    .checked_sub(1)
                    .and_then(|i| app.phrases().get(i))
                    .map(str::to_string);
                match phrase {
                    Some(phrase) => render_detail(out, &app.detail(&phrase)).map_err(io_err)?,
                    None => writeln!(out, "No word #{index}").map_err(io_err)?,
                }
            }
            ScreenAction::Delete(phrase) => {
                app.delete(&phrase);
                if app.state().tab == Tab::Words {
                    render_screen(app, out).map_err(io_err)?;
                }
            }
            ScreenAction::Clear => {
                write!(out, "Are you sure you want to delete all words? [y/N] ").map_err(io_err)?;
                out.flush().map_err(io_err)?;
                let answer = match lines.next() {
                    Some(Ok(answer)) => answer,
                    Some(Err(e)) => return Err(format!("读取输入失败: {e}")),
                    None => break,
                };
                if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
                    app.clear();
                    render_screen(app, out).map_err(io_err)?;
                }
            }
            ScreenAction::Help => render_help(out).map_err(io_err)?,
            ScreenAction::Quit => break,
            ScreenAction::Unknown(id) => {
                writeln!(out, "Unknown action :{id} (try :help)").map_err(io_err)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_menu_actions() {
        assert_eq!(parse_action(":words", Tab::Home), ScreenAction::Navigate(Tab::Words));
        assert_eq!(parse_action(" :home ", Tab::Words), ScreenAction::Navigate(Tab::Home));
        assert_eq!(
            parse_action(":delete  hello ", Tab::Words),
            ScreenAction::Delete("hello".to_string())
        );
        assert_eq!(
            parse_action(":show author", Tab::Home),
            ScreenAction::Show("author".to_string())
        );
        assert_eq!(parse_action(":clear", Tab::Words), ScreenAction::Clear);
        assert_eq!(parse_action(":quit", Tab::Home), ScreenAction::Quit);
        assert_eq!(
            parse_action(":delete", Tab::Words),
            ScreenAction::Unknown("delete".to_string())
        );
        assert_eq!(
            parse_action(":fly away", Tab::Home),
            ScreenAction::Unknown("fly away".to_string())
        );
    }

    #[test]
    fn test_parse_plain_text() {
        assert_eq!(
            parse_action("  Hello  ", Tab::Home),
            ScreenAction::Submit("  Hello  ".to_string())
        );
        assert_eq!(parse_action("2", Tab::Home), ScreenAction::Submit("2".to_string()));
        assert_eq!(parse_action(" 2 ", Tab::Words), ScreenAction::ShowIndex(2));
        assert_eq!(parse_action("", Tab::Words), ScreenAction::Navigate(Tab::Words));
        assert_eq!(
            parse_action("exit", Tab::Words),
            ScreenAction::Submit("exit".to_string())
        );
    }

    #[test]
    fn test_render_words() {
        let mut out = Vec::new();
        render_words(&mut out, &PhraseSet::new()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Words\nNo words discovered yet\n");

        let phrases: PhraseSet = ["hello", "exit"].iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        render_words(&mut out, &phrases).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Words\n  1. hello\n  2. exit\n");
    }

    #[test]
    fn test_render_greeting() {
        let mut out = Vec::new();
        let dialog = Dialog::Greeting {
            title: "Hello".to_string(),
            name: "desk".to_string(),
        };
        render_dialog(&mut out, &dialog).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "«Hello»\nHello, desk and Rust developing world!\n[Yo!]\n"
        );
    }
}
