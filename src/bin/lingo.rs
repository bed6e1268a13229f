//! Terminal front end for the translation proxy.

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use lingo_proxy::client::{HttpProxyApi, SourceSelection, TranslatorForm};
use lingo_proxy::languages::is_auto_detect;

#[derive(Debug, Parser)]
#[command(name = "lingo", about = "Translate text through a running lingo-proxy")]
struct Args {
    /// Proxy base URL
    #[arg(long, env = "LINGO_PROXY_URL", default_value = "http://localhost:8000")]
    proxy: String,

    /// Initial target language
    #[arg(long, short = 't', default_value = "ES")]
    to: String,

    /// Initial source language, `auto` to detect
    #[arg(long, short = 'f', default_value = "auto")]
    from: String,
}

fn source_selection(raw: &str) -> SourceSelection {
    if is_auto_detect(raw) {
        SourceSelection::Auto
    } else {
        SourceSelection::Language(raw.trim().to_ascii_uppercase())
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Help,
    To(&'a str),
    From(&'a str),
    Swap,
    Languages,
    Unknown(&'a str),
    Translate(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    match line.split_once(' ').unwrap_or((line, "")) {
        (":quit" | ":q", _) => Command::Quit,
        (":help", _) => Command::Help,
        (":to", code) => Command::To(code.trim()),
        (":from", code) => Command::From(code.trim()),
        (":swap", _) => Command::Swap,
        (":langs", _) => Command::Languages,
        (cmd, _) if cmd.starts_with(':') => Command::Unknown(cmd),
        _ => Command::Translate(line),
    }
}

fn print_help() {
    println!("Type text and press Enter to translate.");
    println!("  :to CODE     set target language");
    println!("  :from CODE   set source language (auto to detect)");
    println!("  :swap        swap languages, reuse the last result");
    println!("  :langs       list supported languages");
    println!("  :quit        exit");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lingo_proxy=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut form = TranslatorForm::new(HttpProxyApi::new(args.proxy));
    form.set_target(args.to.to_ascii_uppercase());
    form.set_source(source_selection(&args.from));
    form.init().await;

    print_help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end();
        match parse_command(line) {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::To(code) => form.set_target(code.to_ascii_uppercase()),
            Command::From(code) => form.set_source(source_selection(code)),
            Command::Swap => {
                if !form.swap_languages() {
                    println!("Pick a concrete source language that is also a target first.");
                }
            }
            Command::Languages => {
                if form.state().languages.is_empty() {
                    println!("Language list unavailable.");
                }
                for language in &form.state().languages {
                    println!("  {:<6} {}", language.code, language.name);
                }
            }
            Command::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                print_help();
            }
            Command::Translate(text) => {
                form.set_text(text);
                form.translate().await;
                let state = form.state();
                match (&state.result, &state.error) {
                    (Some(result), _) => println!("{}", result),
                    (None, Some(error)) => println!("error: {}", error),
                    (None, None) => {}
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_commands() {
        assert_eq!(parse_command(":q"), Command::Quit);
        assert_eq!(parse_command(":to  de"), Command::To("de"));
        assert_eq!(parse_command(":from auto"), Command::From("auto"));
        assert_eq!(parse_command(":langs"), Command::Languages);
    }

    #[test]
    fn test_mistyped_command_is_not_translated() {
        assert_eq!(parse_command(":form DE"), Command::Unknown(":form"));
        assert_eq!(parse_command(":"), Command::Unknown(":"));
    }

    #[test]
    fn test_plain_text_is_translated() {
        assert_eq!(parse_command("hello world"), Command::Translate("hello world"));
        assert_eq!(parse_command("to be or not"), Command::Translate("to be or not"));
    }
}
