//! CLI argument parsing and the interactive REPL.

use std::io::Write;

use clap::Parser;

use crate::config::ConfabConfig;
use crate::conversation::Conversation;
use crate::error::Result;
use crate::models::ChatModel;
use crate::provider::OpenAiProvider;

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful technical assistant";

/// Confab — terminal chat CLI
#[derive(Parser, Debug)]
#[command(name = "confab", version, about = "Chat with an OpenAI model from the terminal")]
pub struct Cli {
    /// Model to chat with (gpt-4, gpt-4-32k)
    #[arg(short, long, default_value = "gpt-4")]
    pub model: ChatModel,

    /// System prompt seeding the conversation
    #[arg(short, long, default_value = DEFAULT_SYSTEM_PROMPT)]
    pub system: String,

    /// Sampling temperature (0.0 - 1.0)
    #[arg(short, long, default_value_t = 0.5)]
    pub temperature: f64,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Run the interactive REPL until EOF or `quit`.
///
/// Lines starting with `>` read the message body from the named file;
/// everything else is sent verbatim.
pub async fn run(cli: Cli) -> Result<()> {
    let config = ConfabConfig::from_env();
    let provider = OpenAiProvider::new(&config)?;
    let mut conversation = Conversation::new(Box::new(provider), cli.system)?
        .with_model(cli.model)?
        .with_temperature(cli.temperature)?;

    let stdin = std::io::stdin();
    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim_end_matches(['\r', '\n']);

        let message = if let Some(filename) = line.strip_prefix('>') {
            let filename = filename.trim();
            match std::fs::read_to_string(filename) {
                Ok(contents) => {
                    println!("{contents}");
                    contents
                }
                Err(_) => {
                    println!("File {filename} not found");
                    continue;
                }
            }
        } else if line == "quit" {
            break;
        } else {
            line.to_string()
        };

        let reply = conversation.send(message).await?;
        println!("Assistant: {reply}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_with_defaults() {
        let cli = Cli::try_parse_from(["confab"]).unwrap();
        assert_eq!(cli.model, ChatModel::Gpt4);
        assert_eq!(cli.system, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(cli.temperature, 0.5);
    }

    #[test]
    fn parse_with_all_options() {
        let cli = Cli::try_parse_from([
            "confab",
            "--model",
            "gpt-4-32k",
            "--system",
            "Answer in haiku",
            "--temperature",
            "0.9",
        ])
        .unwrap();
        assert_eq!(cli.model, ChatModel::Gpt4_32k);
        assert_eq!(cli.system, "Answer in haiku");
        assert_eq!(cli.temperature, 0.9);
    }

    #[test]
    fn parse_rejects_unknown_model() {
        assert!(Cli::try_parse_from(["confab", "--model", "gpt-99"]).is_err());
    }
}
