use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use piee_chat::ChatService;
use piee_chat::config::Config;
use piee_chat::models::ModelSelection;
use piee_chat::persona;

const GREETING: &str =
    "Hey! 🌻 I'm Piee — your smart and friendly AI companion. You can ask me anything! 😊";

const FAREWELL: &str = "Bye! 🌻 It was wonderful chatting with you. Have a beautiful day!";

#[tokio::main]
async fn main() -> Result<()> {
    // Log to stderr so replies on stdout stay clean
    tracing_subscriber::fmt()
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let offline = std::env::args().any(|arg| arg == "--offline");
    let config = Config::load();

    println!("{GREETING}");

    if offline {
        offline_loop().await
    } else {
        chat_loop(&config).await
    }
}

fn prompt() -> Result<()> {
    print!("you> ");
    std::io::stdout().flush()?;
    Ok(())
}

/// Interactive loop against the configured backend. Sends are serialized by
/// construction: the next line is not read until the reply has been printed.
async fn chat_loop(config: &Config) -> Result<()> {
    let mut service = ChatService::new(config)?;
    let mut history: Vec<String> = Vec::new();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            prompt()?;
            continue;
        }
        if line == "/quit" {
            break;
        }
        if let Some(name) = line.strip_prefix("/model ") {
            service.select_model(ModelSelection::from_name(name.trim()));
            println!(
                "piee> Okay, I'll use {} from now on! ✨",
                service.model().model_id()
            );
            prompt()?;
            continue;
        }

        history.push(line.to_string());
        let reply = service.answer(&history).await;
        println!("piee> {reply}");
        history.push(reply);
        prompt()?;
    }

    println!("piee> {FAREWELL}");
    Ok(())
}

/// Canned-response mode; no network, no credentials.
async fn offline_loop() -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            prompt()?;
            continue;
        }
        if line == "/quit" {
            break;
        }
        let reply = persona::offline_reply(line, &mut rand::thread_rng());
        println!("piee> {reply}");
        prompt()?;
    }

    println!("piee> {FAREWELL}");
    Ok(())
}
