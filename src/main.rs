//! Wordle Suggest CLI
//!
//! Interactive command-line front end for the next-guess suggester.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use wordle_suggest::{
    load_dictionary, Dictionary, EvaluationRule, RoundReport, Suggester, SuggesterConfig,
    Suggestion, Word,
};

const COMMANDS_TEXT: &str = include_str!("text/commands.txt");

#[derive(Debug, Parser)]
#[command(name = "wordle-suggest", version, about = "Suggests the next Wordle guess")]
struct Cli {
    /// Word list to use instead of the built-in one (one word per line)
    #[arg(long, global = true)]
    words: Option<PathBuf>,

    /// Number of candidates scored each round
    #[arg(long, global = true, default_value_t = 100)]
    window: usize,

    /// Number of remaining candidates shown after each round
    #[arg(long, global = true, default_value_t = 20)]
    preview: usize,

    /// Score with official duplicate-letter feedback instead of simple membership
    #[arg(long, global = true)]
    standard_feedback: bool,

    /// Guess limit for solve and benchmark
    #[arg(long, global = true, default_value_t = 6)]
    max_rounds: usize,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the opening suggestion and exit
    Suggest,
    /// Play against a known answer and print every round
    Solve { target: String },
    /// Play every dictionary word and report the guess distribution
    Benchmark,
    /// Interactive session (the default)
    Interactive,
}

impl Cli {
    fn config(&self) -> SuggesterConfig {
        SuggesterConfig {
            sample_window: self.window,
            preview_len: self.preview,
            max_rounds: self.max_rounds,
            rule: if self.standard_feedback {
                EvaluationRule::Standard
            } else {
                EvaluationRule::Membership
            },
            ..SuggesterConfig::default()
        }
    }

    fn dictionary(&self) -> Result<Dictionary> {
        match &self.words {
            Some(path) => Dictionary::from_file(path)
                .with_context(|| format!("loading word list {}", path.display())),
            None => load_dictionary().context("loading built-in word list"),
        }
    }
}

struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    fn new(message: &'static str) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let handle = thread::spawn(move || {
            let frames = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
            let mut i = 0;
            while running_clone.load(Ordering::Relaxed) {
                print!("\r{} {}", frames[i % frames.len()], message);
                let _ = io::stdout().flush();
                thread::sleep(Duration::from_millis(80));
                i += 1;
            }
            print!("\r{}\r", " ".repeat(message.len() + 3));
            let _ = io::stdout().flush();
        });
        Self {
            running,
            handle: Some(handle),
        }
    }

    fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

fn print_suggestion(suggestion: &Suggestion) {
    println!("Suggested word: {}", suggestion.word.to_uppercase());
    match suggestion.entropy {
        Some(entropy) => println!(
            "  Entropy: {:.3} bits (score {:.3})",
            entropy, suggestion.score
        ),
        None => println!("  Chosen as {:?}", suggestion.reason),
    }
    println!("  Candidates remaining: {}", suggestion.remaining);
}

fn print_words(words: &[Word]) {
    for (i, word) in words.iter().enumerate() {
        if i > 0 && i % 10 == 0 {
            println!();
        }
        print!("{:>8}", word.to_uppercase());
    }
    println!();
}

fn print_report(report: &RoundReport) {
    println!();
    println!("Guess: {}", report.guess.to_uppercase());
    println!("Feedback: {}", report.pattern);
    println!(
        "Eliminated {} words ({} → {})",
        report.eliminated(),
        report.before,
        report.remaining
    );

    if report.solved {
        println!();
        println!("🎉 Solved!");
    } else if report.is_exhausted() {
        println!();
        println!("⚠️  No words match this feedback.");
        println!("The feedback may contain a mistake. Use 'reset' to start over.");
    } else {
        println!("Remaining:");
        print_words(&report.preview);
        if let Some(suggestion) = &report.suggestion {
            println!();
            print_suggestion(suggestion);
        }
    }
    println!();
}

fn print_solve(suggester: &mut Suggester, target: Word) {
    println!("Solving for: {}", target.to_uppercase());
    println!();

    let guesses = suggester.solve_for_target(target);
    for (i, (guess, pattern)) in guesses.iter().enumerate() {
        println!("Guess {}: {} → {}", i + 1, guess.to_uppercase(), pattern);
    }

    println!();
    match guesses.last() {
        Some((_, pattern)) if pattern.is_win() => {
            println!("✓ Solved in {} guesses!", guesses.len())
        }
        _ => println!(
            "✗ Failed to solve within {} guesses.",
            suggester.config().max_rounds
        ),
    }
}

fn run_interactive(mut suggester: Suggester) -> Result<()> {
    println!("Loaded {} words.", suggester.dictionary().len());
    println!("Type 'help' for commands.");
    println!();

    if let Some(suggestion) = suggester.suggest() {
        print_suggestion(&suggestion);
        println!();
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0].to_lowercase().as_str() {
            "help" | "h" | "?" => println!("{}", COMMANDS_TEXT),
            "quit" | "exit" | "q" => {
                println!("Goodbye!");
                break;
            }
            "suggest" | "s" => match suggester.suggest() {
                Some(suggestion) => {
                    println!();
                    print_suggestion(&suggestion);
                    println!();
                }
                None => println!("No possible words remaining. Use 'reset' to start over."),
            },
            "feedback" | "f" | "fb" => {
                if parts.len() < 3 {
                    println!("Usage: feedback <word> <marks>");
                    println!("Example: feedback crane gyxxx");
                    continue;
                }
                match suggester.submit_str(parts[1], parts[2]) {
                    Ok(report) => print_report(&report),
                    Err(e) => println!("{}", e),
                }
            }
            "remaining" | "r" | "left" => {
                println!();
                println!("Remaining possibilities: {}", suggester.remaining_count());
                print_words(suggester.preview());
                println!();
            }
            "history" => {
                for (i, (guess, pattern)) in suggester.state().history().iter().enumerate() {
                    println!("{}. {} {}", i + 1, guess.to_uppercase(), pattern);
                }
                println!("Constraints: {}", suggester.state().constraints());
            }
            "solve" => {
                let Some(target) = parts.get(1) else {
                    println!("Usage: solve <target_word>");
                    continue;
                };
                match target.parse::<Word>() {
                    Ok(target) => {
                        println!();
                        suggester.reset();
                        print_solve(&mut suggester, target);
                        println!();
                        suggester.reset();
                    }
                    Err(e) => println!("{}", e),
                }
            }
            "reset" => {
                println!("Reset. {} words available.", suggester.dictionary().len());
                if let Some(suggestion) = suggester.reset() {
                    print_suggestion(&suggestion);
                }
            }
            _ => {
                println!("Unknown command: {}", parts[0]);
                println!("Type 'help' for available commands.");
            }
        }
    }
    Ok(())
}

fn run_benchmark(suggester: &Suggester) {
    println!(
        "Running benchmark on all {} words...",
        suggester.dictionary().len()
    );

    let spinner = Spinner::new("Computing...");
    let start = Instant::now();
    let distribution = suggester.benchmark_guess_distribution();
    let elapsed = start.elapsed();
    spinner.stop();

    let total: usize = distribution.iter().map(|(_, c)| c).sum();
    let max_rounds = suggester.config().max_rounds;
    let solved: Vec<_> = distribution
        .iter()
        .filter(|(g, _)| *g <= max_rounds)
        .collect();
    let solved_total: usize = solved.iter().map(|(_, c)| c).sum();
    let solved_guesses: usize = solved.iter().map(|(g, c)| g * c).sum();

    println!("Guess distribution:");
    for (guesses, count) in &solved {
        let pct = *count as f64 / total as f64 * 100.0;
        let bar = "█".repeat((*count * 40 / total).max(1));
        println!("  {} guesses: {:>5} ({:>5.1}%) {}", guesses, count, pct, bar);
    }
    println!();
    if solved_total > 0 {
        println!(
            "Average guesses (solved): {:.3}",
            solved_guesses as f64 / solved_total as f64
        );
    }
    println!("Total words: {}", total);
    println!("Time elapsed: {:.2?}", elapsed);

    let failures = total - solved_total;
    if failures > 0 {
        println!("Words not solved in {} guesses: {}", max_rounds, failures);
    } else {
        println!("✓ All words solved within {} guesses!", max_rounds);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let dictionary = cli.dictionary()?;
    let mut suggester = Suggester::new(dictionary, cli.config());

    match &cli.command {
        Some(Command::Suggest) => match suggester.suggest() {
            Some(suggestion) => print_suggestion(&suggestion),
            None => bail!("no words available"),
        },
        Some(Command::Solve { target }) => {
            let target: Word = target.parse()?;
            print_solve(&mut suggester, target);
        }
        Some(Command::Benchmark) => run_benchmark(&suggester),
        Some(Command::Interactive) | None => run_interactive(suggester)?,
    }
    Ok(())
}
