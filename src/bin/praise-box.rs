use clap::Parser;
use colored::*;
use praise_box::builder::PoemAdapterBuilder;
use praise_box::clipboard::{CopyIndicator, SystemClipboard};
use praise_box::config::Config;
use praise_box::controller::{Controller, Phase, PraiseCard};
use praise_box::praise::PraiseCatalog;
use praise_box::PoemAdapter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use spinners::{Spinner, Spinners};
use std::io::{self, Write};

/// Command line arguments for the praise box
#[derive(Parser)]
#[clap(
    name = "praise-box",
    about = "디지털 칭찬 상자: write a name, get an acrostic praise poem"
)]
struct CliArgs {
    /// Name to praise (2-5 characters). Starts an interactive session when omitted
    #[arg(index = 1)]
    name: Option<String>,

    /// Seed for praise phrase selection
    #[arg(long)]
    seed: Option<u64>,

    /// Model name to use
    #[arg(long)]
    model: Option<String>,

    /// API key, overriding API_KEY
    #[arg(long)]
    api_key: Option<String>,

    /// Base URL for the API
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Copy the poem to the clipboard (one-shot mode)
    #[arg(long)]
    copy: bool,
}

fn separator() -> ColoredString {
    "─".repeat(50).bright_black()
}

/// Prints a finished card
fn print_card(card: &PraiseCard) {
    println!();
    println!(
        "{} {}",
        "✨".bright_yellow(),
        format!("{}님을 위한 칭찬!", card.name).bold()
    );
    println!("   {}", format!("\"{}\"", card.praise).italic().bright_black());
    println!();
    for line in card.poem.lines() {
        println!("   {}", line.bright_white());
    }
    println!();
}

/// Runs one generation with a spinner while loading
async fn run_generation(controller: &mut Controller, adapter: &PoemAdapter) -> Phase {
    if !controller.validate_name() {
        return controller.phase();
    }
    let mut sp = Spinner::new(
        Spinners::Dots12,
        "AI가 열심히 칭찬을 만들고 있어요...".bright_magenta().to_string(),
    );
    let phase = controller.generate(adapter).await;
    sp.stop();
    print!("\r\x1B[K");
    phase
}

/// Copies the poem, reporting failures as a blocking alert
fn copy_poem(
    clipboard: &mut Option<SystemClipboard>,
    indicator: &mut CopyIndicator,
    card: &PraiseCard,
    rl: &mut DefaultEditor,
) {
    if clipboard.is_none() {
        match SystemClipboard::new() {
            Ok(cb) => *clipboard = Some(cb),
            Err(e) => {
                eprintln!("{} {}", "Alert:".bright_red(), e.user_message());
                let _ = rl.readline("(Enter) ");
                return;
            }
        }
    }
    let result = match clipboard.as_mut() {
        Some(cb) => indicator.copy(cb, &card.poem.text),
        None => return,
    };
    match result {
        Ok(()) if indicator.is_copied() => println!("{} 복사되었어요!", "✓".bright_green()),
        Ok(()) => {}
        Err(e) => {
            eprintln!("{} {}", "Alert:".bright_red(), e.user_message());
            let _ = rl.readline("(Enter) ");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    praise_box::init_logging();
    let args = CliArgs::parse();

    let mut config = Config::from_env();
    if let Some(key) = args.api_key.clone() {
        config.api_key = Some(key);
    }
    if let Some(model) = args.model.clone() {
        config.model = model;
    }
    if let Some(url) = args.base_url.clone() {
        config.base_url = url;
    }
    if let Some(timeout) = args.timeout {
        config.timeout_seconds = Some(timeout);
    }

    let adapter = PoemAdapterBuilder::from_config(&config)
        .build()
        .map_err(|e| format!("Failed to build adapter: {}", e))?;

    let catalog = PraiseCatalog::default();
    let mut controller = match args.seed {
        Some(seed) => Controller::seeded(catalog, seed),
        None => Controller::new(catalog),
    };

    if let Some(name) = args.name {
        controller.set_name(name);
        match run_generation(&mut controller, &adapter).await {
            Phase::Success => {
                if let Some(card) = controller.card() {
                    print_card(card);
                    if args.copy {
                        let mut indicator = CopyIndicator::new();
                        let mut cb = SystemClipboard::new()?;
                        indicator.copy(&mut cb, &card.poem.text)?;
                        println!("{} 복사되었어요!", "✓".bright_green());
                    }
                }
            }
            _ => {
                let message = controller.error().unwrap_or("칭찬 생성 중 오류가 발생했습니다.");
                eprintln!("{} {}", "Error:".bright_red(), message);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    println!("{}", "디지털 칭찬 상자".bright_cyan().bold());
    println!("{}", controller.headline());
    println!("{}", "Type 'exit' to quit".bright_black());
    println!("{}", separator());

    let mut rl = DefaultEditor::new()?;
    let mut clipboard: Option<SystemClipboard> = None;
    let mut indicator = CopyIndicator::new();

    'outer: loop {
        io::stdout().flush()?;
        let line = match rl.readline("이름 (2~5자) > ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{} {:?}", "Error:".bright_red(), err);
                break;
            }
        };
        if line.trim().is_empty() || line.trim().eq_ignore_ascii_case("exit") {
            break;
        }
        let _ = rl.add_history_entry(line.trim());

        controller.set_name(line);
        match run_generation(&mut controller, &adapter).await {
            Phase::Success => {}
            _ => {
                if let Some(message) = controller.error() {
                    println!("{} {}", "!".bright_red(), message.red());
                }
                println!("{}", separator());
                continue;
            }
        }

        let card = match controller.card() {
            Some(card) => card.clone(),
            None => continue,
        };
        print_card(&card);
        println!("{}", controller.headline().bright_green());
        indicator.clear();

        loop {
            let choice = match rl.readline("[c] 복사  [r] 다른 주인공 뽑기  [q] 종료 > ") {
                Ok(choice) => choice,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break 'outer,
                Err(err) => {
                    eprintln!("{} {:?}", "Error:".bright_red(), err);
                    break 'outer;
                }
            };
            match choice.trim() {
                "c" | "C" => copy_poem(&mut clipboard, &mut indicator, &card, &mut rl),
                "q" | "Q" | "exit" => break 'outer,
                "" | "r" | "R" => {
                    controller.reset();
                    indicator.clear();
                    println!("{}", separator());
                    println!("{}", controller.headline());
                    break;
                }
                _ => {}
            }
        }
    }

    println!("{}", "👋 Goodbye!".bright_cyan());
    Ok(())
}
