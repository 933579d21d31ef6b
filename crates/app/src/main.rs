use std::fmt;
use std::io;
use std::path::PathBuf;

use auscult_core::Clock;
use auscult_core::catalog::{ADULT_DECK_ID, PAEDIATRIC_DECK_ID};
use services::{AudioPlayer, Simulator, SimulatorConfig, WardDecks, load_deck};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod repl;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid seed value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--seed <u64>] [--adult-deck <json>] [--paeds-deck <json>]");
    eprintln!("                      [--no-stethoscope-gate]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  built-in adult and congenital ward decks, random option order");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  AUSCULT_SEED, AUSCULT_ADULT_DECK, AUSCULT_PAEDS_DECK, AUSCULT_LOG");
}

#[derive(Debug)]
struct Args {
    seed: Option<u64>,
    adult_deck: Option<PathBuf>,
    paeds_deck: Option<PathBuf>,
    require_stethoscope: bool,
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidSeed { raw })
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut seed = std::env::var("AUSCULT_SEED").ok().map(parse_seed).transpose()?;
        let mut adult_deck = std::env::var_os("AUSCULT_ADULT_DECK").map(PathBuf::from);
        let mut paeds_deck = std::env::var_os("AUSCULT_PAEDS_DECK").map(PathBuf::from);
        let mut require_stethoscope = true;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => seed = Some(parse_seed(require_value(args, "--seed")?)?),
                "--adult-deck" => {
                    adult_deck = Some(PathBuf::from(require_value(args, "--adult-deck")?));
                }
                "--paeds-deck" => {
                    paeds_deck = Some(PathBuf::from(require_value(args, "--paeds-deck")?));
                }
                "--no-stethoscope-gate" => require_stethoscope = false,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            seed,
            adult_deck,
            paeds_deck,
            require_stethoscope,
        })
    }

    fn config(&self) -> SimulatorConfig {
        SimulatorConfig::new()
            .with_shuffle_seed(self.seed)
            .with_require_stethoscope(self.require_stethoscope)
    }
}

/// Terminal stand-in for a platform player: it logs what would play.
#[derive(Debug, Default)]
struct TracingAudioPlayer {
    playing: Option<String>,
}

impl AudioPlayer for TracingAudioPlayer {
    fn play(&mut self, candidates: &[String]) {
        info!(?candidates, "playing clip");
        self.playing = candidates.first().cloned();
    }

    fn stop(&mut self) {
        if let Some(src) = self.playing.take() {
            debug!(%src, "stopped clip");
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("AUSCULT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_decks(args: &Args) -> Result<WardDecks, Box<dyn std::error::Error>> {
    let mut decks = WardDecks::builtin()?;
    if let Some(path) = &args.adult_deck {
        decks.adult = load_deck(ADULT_DECK_ID, path)?;
    }
    if let Some(path) = &args.paeds_deck {
        decks.paediatric = load_deck(PAEDIATRIC_DECK_ID, path)?;
    }
    Ok(decks)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let decks = load_decks(&args)?;
    let mut simulator = Simulator::new(
        args.config(),
        decks,
        Clock::system(),
        TracingAudioPlayer::default(),
    )?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    repl::run(&mut simulator, stdin.lock(), stdout.lock())?;
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
