use std::path::PathBuf;

use clap::Args;
use reedline::{
    default_emacs_keybindings, ColumnarMenu, Completer, DefaultPrompt, DefaultPromptSegment,
    Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder, Reedline, ReedlineEvent,
    ReedlineMenu, Signal, Span, Suggestion,
};

use common::prelude::{Namespace, NamespaceError};
use drivefs_daemon::state::AppState;

const HISTORY_FILE_NAME: &str = "history.txt";
const HISTORY_CAPACITY: usize = 1000;

/// Interactive session on a private, in-process namespace
#[derive(Args, Debug, Clone)]
pub struct Shell;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
    #[error("shell task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Shell {
    type Error = ShellError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let history = AppState::drivefs_dir(ctx.config_path.clone())
            .ok()
            .map(|dir| dir.join(HISTORY_FILE_NAME));

        // reedline blocks on the terminal
        tokio::task::spawn_blocking(move || run(history)).await??;
        Ok("bye".to_string())
    }
}

fn run(history: Option<PathBuf>) -> Result<(), ShellError> {
    let mut line_editor = line_editor(history);
    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("drivefs".to_string()),
        DefaultPromptSegment::Empty,
    );
    let mut namespace = Namespace::new();

    println!("drivefs shell. Type 'help' for commands, 'exit' to quit.");

    loop {
        let line = match line_editor.read_line(&prompt)? {
            Signal::Success(line) => line,
            Signal::CtrlC => {
                println!("^C (use 'exit' to quit)");
                continue;
            }
            Signal::CtrlD => return Ok(()),
        };

        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("Error: {}", e);
                continue;
            }
        };

        match command.apply(&mut namespace) {
            Ok(Outcome::Print(text)) => println!("{}", text),
            Ok(Outcome::Exit) => return Ok(()),
            Err(e) => println!("Error: {}", e),
        }
    }
}

fn line_editor(history: Option<PathBuf>) -> Reedline {
    let completion_menu = Box::new(ColumnarMenu::default().with_name("completion_menu"));

    let mut keybindings = default_emacs_keybindings();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );

    let mut line_editor = Reedline::create()
        .with_completer(Box::new(ShellCompleter))
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_edit_mode(Box::new(Emacs::new(keybindings)));

    if let Some(history) = history.and_then(open_history) {
        line_editor = line_editor.with_history(Box::new(history));
    }

    line_editor
}

/// History is best effort: the shell still runs without it
fn open_history(history_path: PathBuf) -> Option<FileBackedHistory> {
    if let Some(parent) = history_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::debug!("shell history directory unavailable: {}", e);
        }
    }
    match FileBackedHistory::with_file(HISTORY_CAPACITY, history_path) {
        Ok(history) => Some(history),
        Err(e) => {
            tracing::debug!("shell history unavailable: {}", e);
            None
        }
    }
}

const COMMANDS: &[(&str, &str, &str)] = &[
    ("drive", "drive NAME", "Create a drive"),
    ("folder", "folder PATH NAME", "Create a folder under PATH"),
    ("file", "file PATH NAME", "Create an empty file under PATH"),
    ("write", "write PATH CONTENT...", "Replace the content of a file"),
    ("read", "read PATH", "Print the content of a file"),
    ("mv", "mv SRC DST", "Move SRC into the folder DST"),
    ("rm", "rm PATH", "Delete an entity and everything beneath it"),
    ("ls", "ls [PATH]", "List a folder, or the drives when PATH is omitted"),
    ("stat", "stat PATH", "Show metadata for an entity"),
    ("drives", "drives", "List drives"),
    ("help", "help", "Show this help"),
    ("exit", "exit", "Leave the shell"),
];

struct ShellCompleter;

impl Completer for ShellCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let line_to_pos = &line[..pos];
        let prefix = line_to_pos.trim_start();
        // only the command word is completed
        if prefix.contains(char::is_whitespace) {
            return Vec::new();
        }
        let start = pos - prefix.len();

        COMMANDS
            .iter()
            .filter(|(name, _, _)| name.starts_with(prefix))
            .map(|(name, _, description)| Suggestion {
                value: name.to_string(),
                description: Some(description.to_string()),
                style: None,
                extra: None,
                span: Span::new(start, pos),
                append_whitespace: true,
                match_indices: None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Create {
        path: String,
        kind: &'static str,
        name: String,
    },
    Write {
        path: String,
        content: String,
    },
    Read(String),
    Move {
        source: String,
        destination: String,
    },
    Remove(String),
    List(Option<String>),
    Stat(String),
    Drives,
    Help,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Print(String),
    Exit,
}

/// Split off the first whitespace-delimited word
fn next_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.find(char::is_whitespace) {
        Some(end) => Some((&input[..end], &input[end..])),
        None => Some((input, "")),
    }
}

fn usage(command: &str) -> &'static str {
    COMMANDS
        .iter()
        .find(|(name, _, _)| *name == command)
        .map(|(_, usage, _)| *usage)
        .unwrap_or("help")
}

impl ShellCommand {
    /// Parse one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let Some((command, rest)) = next_word(line) else {
            return Ok(None);
        };

        let args: Vec<&str> = rest.split_whitespace().collect();
        let parsed = match (command, args.as_slice()) {
            ("drive", [name]) => ShellCommand::Create {
                path: String::new(),
                kind: "drive",
                name: name.to_string(),
            },
            ("folder", [path, name]) => ShellCommand::Create {
                path: path.to_string(),
                kind: "folder",
                name: name.to_string(),
            },
            ("file", [path, name]) => ShellCommand::Create {
                path: path.to_string(),
                kind: "file",
                name: name.to_string(),
            },
            ("write", [_, ..]) => {
                // content is everything after the path, inner spacing kept
                let (path, content) = next_word(rest).ok_or(ParseError::Usage(usage("write")))?;
                ShellCommand::Write {
                    path: path.to_string(),
                    content: content.trim_start().to_string(),
                }
            }
            ("read", [path]) => ShellCommand::Read(path.to_string()),
            ("mv", [source, destination]) => ShellCommand::Move {
                source: source.to_string(),
                destination: destination.to_string(),
            },
            ("rm", [path]) => ShellCommand::Remove(path.to_string()),
            ("ls", []) => ShellCommand::List(None),
            ("ls", [path]) => ShellCommand::List(Some(path.to_string())),
            ("stat", [path]) => ShellCommand::Stat(path.to_string()),
            ("drives", []) => ShellCommand::Drives,
            ("help", _) => ShellCommand::Help,
            ("exit" | "quit", _) => ShellCommand::Exit,
            (known, _) if COMMANDS.iter().any(|(name, _, _)| *name == known) => {
                return Err(ParseError::Usage(usage(known)))
            }
            (unknown, _) => return Err(ParseError::Unknown(unknown.to_string())),
        };

        Ok(Some(parsed))
    }

    /// Run the command against `namespace`
    pub fn apply(self, namespace: &mut Namespace) -> Result<Outcome, NamespaceError> {
        let text = match self {
            ShellCommand::Create { path, kind, name } => {
                let kind = namespace.create(&path, kind, &name)?;
                format!("{} {} created successfully.", kind.title(), name)
            }
            ShellCommand::Write { path, content } => {
                namespace.write(&path, content)?;
                format!("Content written to {}.", path)
            }
            ShellCommand::Read(path) => namespace.read(&path)?.to_string(),
            ShellCommand::Move {
                source,
                destination,
            } => {
                namespace.mv(&source, &destination)?;
                format!("Moved {} to {}.", source, destination)
            }
            ShellCommand::Remove(path) => {
                namespace.delete(&path)?;
                format!("Entity at {} deleted successfully.", path)
            }
            ShellCommand::List(Some(path)) => namespace
                .ls(&path)?
                .into_iter()
                .map(|entry| format!("{}\t{}", entry.kind, entry.name))
                .collect::<Vec<_>>()
                .join("\n"),
            ShellCommand::List(None) | ShellCommand::Drives => namespace.drives().join("\n"),
            ShellCommand::Stat(path) => {
                let stat = namespace.stat(&path)?;
                let mut lines = vec![
                    format!("name:     {}", stat.name),
                    format!("type:     {}", stat.kind),
                    format!("created:  {}", stat.created_at),
                    format!("updated:  {}", stat.updated_at),
                ];
                if let Some(size) = stat.size {
                    lines.push(format!("size:     {}", size));
                }
                if let Some(mime) = stat.mime_type {
                    lines.push(format!("mime:     {}", mime));
                }
                if let Some(children) = stat.children {
                    lines.push(format!("children: {}", children));
                }
                lines.join("\n")
            }
            ShellCommand::Help => COMMANDS
                .iter()
                .map(|(_, usage, description)| format!("  {:<24}{}", usage, description))
                .collect::<Vec<_>>()
                .join("\n"),
            ShellCommand::Exit => return Ok(Outcome::Exit),
        };

        Ok(Outcome::Print(text))
    }
}
