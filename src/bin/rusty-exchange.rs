//! rusty-exchange CLI - interactive currency converter
//!
//! ## Example Usage
//!
//! ```bash
//! # Catalog, conversion and 30-day history (Frankfurter)
//! rusty-exchange
//!
//! # Quick code-to-code conversion (exchangerate-api.com)
//! rusty-exchange simple
//!
//! # Custom config and debug logging
//! rusty-exchange --verbose --config ./exchange.toml session
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rusty_exchange::conversion::{convert_amount, format_conversion, ConversionResult};
use rusty_exchange::error::{ConverterError, Result as ExchangeResult};
use rusty_exchange::history::{HistoricalSeries, HistoryQuery};
use rusty_exchange::prelude::*;
use rusty_exchange::session::parse_amount;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

/// rusty-exchange: convert amounts between currencies at today's rates
#[derive(Parser)]
#[command(name = "rusty-exchange")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive currency converter", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick currencies from the catalog, convert and show recent history (default)
    Session,

    /// Convert between two currency codes with a single rate lookup
    Simple,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(Commands::Session) {
        Commands::Session => run_session(&config),
        Commands::Simple => run_simple(&config),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "error" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Run `f` while a spinner shows `message`
fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> T {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = f();
    pb.finish_and_clear();
    result
}

/// Provider wrapper that shows a spinner while a request is in flight
struct Spinning<P> {
    inner: P,
}

impl<P: RateProvider> RateProvider for Spinning<P> {
    fn currencies(&self) -> ExchangeResult<Vec<Currency>> {
        with_spinner("Loading currencies...", || self.inner.currencies())
    }

    fn latest(&self, amount: f64, from: &Currency, to: &Currency) -> ExchangeResult<ConversionResult> {
        with_spinner("Fetching latest rate...", || self.inner.latest(amount, from, to))
    }

    fn history(&self, query: &HistoryQuery) -> ExchangeResult<HistoricalSeries> {
        with_spinner("Fetching rate history...", || self.inner.history(query))
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Prompter reading answers from stdin
///
/// A terminal failure ends the current question like closed input does; the
/// underlying error is kept for the caller to raise once the session is over.
struct TerminalPrompter {
    stdin: io::Stdin,
    failure: Option<io::Error>,
}

impl TerminalPrompter {
    fn new() -> Self {
        Self {
            stdin: io::stdin(),
            failure: None,
        }
    }

    fn read_answer(&mut self, question: &str) -> io::Result<Option<String>> {
        print!("{}: ", question.bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if self.stdin.lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Surface a terminal failure seen while prompting
    fn check(&mut self) -> anyhow::Result<()> {
        match self.failure.take() {
            Some(e) => Err(anyhow::Error::new(e).context("Terminal I/O failed")),
            None => Ok(()),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn show_catalog(&mut self, catalog: &[Currency]) {
        println!();
        println!("{}", "Available currencies".cyan().bold());
        for (i, currency) in catalog.iter().enumerate() {
            println!(
                "  {:>3} - {} {}",
                i + 1,
                currency.display_name,
                format!("({})", currency.code).dimmed()
            );
        }
        println!();
    }

    fn ask(&mut self, question: &str) -> ExchangeResult<String> {
        match self.read_answer(question) {
            Ok(Some(answer)) => Ok(answer),
            Ok(None) => Err(ConverterError::Validation("No input provided".to_string())),
            Err(e) => {
                log::debug!("Prompt '{}' failed: {}", question, e);
                self.failure = Some(e);
                Err(ConverterError::Validation("Input aborted".to_string()))
            }
        }
    }

    fn notify(&mut self, message: &str) {
        println!("{}", message.cyan());
    }
}

fn run_session(config: &Config) -> anyhow::Result<()> {
    let provider = Spinning {
        inner: FrankfurterClient::from_config(config)?,
    };
    let session = Session::new(&provider, config);
    let mut prompter = TerminalPrompter::new();

    println!("{}", "Currency converter".green().bold());
    println!("{}", "==================".green());
    println!();

    let mut state = session.run(&mut prompter);
    prompter.check()?;
    let mut reported = 0;

    loop {
        reported = report(&state, reported);

        if state.pair().is_none() {
            break;
        }
        match prompter.ask("Swap currencies and convert again? (y/N)") {
            Ok(answer) if answer.eq_ignore_ascii_case("y") => {
                state = session.refresh(state.swap_currencies(), &mut prompter);
            }
            _ => break,
        }
    }

    prompter.check()
}

/// Print the session outcome; returns how many issues have been shown so far
fn report(state: &SessionState, already_reported: usize) -> usize {
    for issue in state.issues.iter().skip(already_reported) {
        eprintln!("{} {}", "Error:".red().bold(), issue);
    }

    let Some(pair) = state.pair() else {
        return state.issues.len();
    };

    println!();
    if let Some(converted) = state.converted_amount() {
        println!(
            "{}",
            format_conversion(state.amount, &pair.base.code, converted, &pair.quote.code)
                .green()
                .bold()
        );
    }
    println!(
        "  {} {} -> {}: {:.4}",
        "Rate".bold(),
        pair.base.display_name,
        pair.quote.display_name,
        state.rate
    );

    if state.series.is_empty() {
        println!("  {}", "No rate history available".dimmed());
    } else {
        println!();
        println!(
            "{}",
            format!("History ({} snapshots)", state.series.len()).cyan().bold()
        );
        for point in &state.series {
            println!("  {}  {:>14.4}", point.label.dimmed(), point.value);
        }
    }
    println!();

    state.issues.len()
}

/// Ask a `simple` question; terminal failures take precedence over input errors
fn ask_simple(prompter: &mut TerminalPrompter, question: &str) -> anyhow::Result<String> {
    let answer = prompter.ask(question);
    prompter.check()?;
    Ok(answer?)
}

fn run_simple(config: &Config) -> anyhow::Result<()> {
    let client = ExchangeRateApiClient::from_config(config)?;
    let mut prompter = TerminalPrompter::new();

    println!("{}", "Ex: (BRL) - Brazilian Real".dimmed());
    let base = ask_simple(&mut prompter, "Current currency")?.to_uppercase();
    let target = ask_simple(&mut prompter, "Convert to")?.to_uppercase();

    let answer = ask_simple(&mut prompter, "Amount to convert")?;
    let amount = match parse_amount(&answer, config.default_amount) {
        Ok(amount) => amount,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            return Ok(());
        }
    };

    if Currency::from_code(&base).same_as(&Currency::from_code(&target)) {
        println!("{}", format_conversion(amount, &base, amount, &target).green().bold());
        return Ok(());
    }

    match with_spinner("Fetching rates...", || client.rate(&base, &target)) {
        Ok(rate) => {
            let converted = convert_amount(amount, rate);
            println!("{}", format_conversion(amount, &base, converted, &target).green().bold());
        }
        Err(e) => {
            eprintln!("{} Error converting currency: {}", "Error:".red().bold(), e);
        }
    }

    Ok(())
}
