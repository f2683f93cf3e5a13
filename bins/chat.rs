use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use common::utils::{display, logging};
use configs::{AppConfig, LogFormat};
use models::{Message, User};
use service::chat::ChatService;
use service::storage::{ChatStore, MemoryStore};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{error, info};
use uuid::Uuid;

const MENU: &str = "\nCommands:\n1. Send message\n2. View messages\n3. Search messages\n4. Delete messages\n5. List users\n6. Logout\nChoice: ";

type Input = Lines<BufReader<Stdin>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Send,
    View,
    Search,
    Delete,
    ListUsers,
    Logout,
}

impl Command {
    fn parse(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::Send),
            "2" => Some(Self::View),
            "3" => Some(Self::Search),
            "4" => Some(Self::Delete),
            "5" => Some(Self::ListUsers),
            "6" => Some(Self::Logout),
            _ => None,
        }
    }
}

fn init_logging(cfg: &AppConfig) {
    match cfg.logging.format {
        LogFormat::Compact => logging::init_logging_default(&cfg.logging.filter),
        LogFormat::Json => logging::init_logging_json(&cfg.logging.filter),
    }
    info!(service = "chat", event = "logger_init", "tracing subscriber initialized");
}

/// Print `text`, then read one trimmed line. `None` means stdin is closed.
async fn prompt(input: &mut Input, text: &str) -> anyhow::Result<Option<String>> {
    print!("{text}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?.map(|line| line.trim().to_string()))
}

fn render<S: ChatStore>(svc: &ChatService<S>, msg: &Message, ts_fmt: &str) -> String {
    let sender = svc.get_user(msg.sender_id).map(|u| u.username).unwrap_or_else(|| "Unknown".to_string());
    display::render_message(&sender, &msg.content, msg.timestamp, ts_fmt)
}

fn print_messages<S: ChatStore>(svc: &ChatService<S>, msgs: &[Message], ts_fmt: &str, empty: &str) {
    if msgs.is_empty() {
        println!("{empty}");
        return;
    }
    for msg in msgs {
        println!("{}", render(svc, msg, ts_fmt));
    }
}

async fn run<S: ChatStore>(svc: ChatService<S>, ts_fmt: String) -> anyhow::Result<()> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut current: Option<User> = None;
    println!("Simple Chat Application");

    loop {
        let Some(user) = current.clone() else {
            let Some(name) = prompt(&mut input, "Enter username (or 'exit' to quit): ").await? else { break };
            if name == "exit" {
                break;
            }
            if name.is_empty() {
                continue;
            }
            match svc.register_or_login(&name) {
                Ok(user) => {
                    println!("Welcome, {}!", user.username);
                    current = Some(user);
                }
                Err(e) => println!("Error: {e}"),
            }
            continue;
        };

        let Some(choice) = prompt(&mut input, MENU).await? else { break };
        match Command::parse(&choice) {
            Some(Command::Send) => {
                let Some(recipient) = prompt(&mut input, "Enter recipient username: ").await? else { break };
                let Some(content) = prompt(&mut input, "Enter message: ").await? else { break };
                match svc.send_message(user.id, &recipient, &content) {
                    Ok(_) => println!("Message sent!"),
                    Err(e) => println!("Error: {e}"),
                }
            }
            Some(Command::View) => {
                print_messages(&svc, &svc.get_messages(user.id), &ts_fmt, "No messages.");
            }
            Some(Command::Search) => {
                let Some(keyword) = prompt(&mut input, "Enter search keyword: ").await? else { break };
                print_messages(&svc, &svc.search_messages(&keyword), &ts_fmt, "No messages found.");
            }
            Some(Command::Delete) => {
                let Some(keyword) = prompt(&mut input, "Enter keyword of messages to delete: ").await? else { break };
                if svc.delete_message(user.id, &keyword) {
                    println!("Messages deleted.");
                } else {
                    println!("No matching messages.");
                }
            }
            Some(Command::ListUsers) => {
                println!("\nRegistered users:");
                for u in svc.list_users() {
                    println!("- {}", u.username);
                }
            }
            Some(Command::Logout) => {
                println!("Goodbye, {}!", user.username);
                current = None;
            }
            None => println!("Invalid choice"),
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cfg = match AppConfig::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            logging::init_logging_default(logging::DEFAULT_FILTER);
            error!(service = "chat", event = "config_invalid", error = %e, "failed to load configuration");
            eprintln!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&cfg);

    let session_id = Uuid::new_v4();
    let version = env!("CARGO_PKG_VERSION");

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "chat", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    // the single store for this process, injected into the service
    let store = Arc::new(MemoryStore::new());
    let svc = ChatService::new(store);
    let ts_fmt = cfg.display.timestamp_format.clone();

    info!(service = "chat", event = "start", %session_id, version, "chat session starting");

    let exit_code = rt.block_on(async move {
        tokio::select! {
            res = run(svc, ts_fmt) => match res {
                Ok(()) => {
                    info!(service = "chat", event = "stop", %session_id, "chat session ended");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!(service = "chat", event = "run_failed", error = %e, "interactive loop failed");
                    ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service = "chat", event = "shutdown_signal", %session_id, "received Ctrl+C, shutting down");
                println!();
                ExitCode::SUCCESS
            }
        }
    });

    // stdin reads park a blocking thread; do not wait for it
    rt.shutdown_background();
    exit_code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_menu_choices() {
        assert_eq!(Command::parse("1"), Some(Command::Send));
        assert_eq!(Command::parse(" 4 "), Some(Command::Delete));
        assert_eq!(Command::parse("6"), Some(Command::Logout));
        assert_eq!(Command::parse("7"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn render_resolves_sender_or_falls_back() -> anyhow::Result<()> {
        let svc = ChatService::new(Arc::new(MemoryStore::new()));
        let alice = svc.register_or_login("alice")?;
        svc.register_or_login("bob")?;

        let known = svc.send_message(alice.id, "bob", "hi")?;
        let line = render(&svc, &known, "%Y");
        assert!(line.ends_with("] alice: hi"), "{line}");

        let orphan = svc.send_message(Uuid::new_v4(), "bob", "boo")?;
        assert!(render(&svc, &orphan, "%Y").ends_with("] Unknown: boo"));
        Ok(())
    }
}
