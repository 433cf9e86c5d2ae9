//! `reveal_demo` - scroll a chapter file and print each reveal frame
//!
//! Steps progress from 0 to 1, printing the reveal window with markers shown
//! as `{glyph}` and every cue fired along the way.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin reveal_demo -- chapter.txt
//! cargo run --bin reveal_demo -- chapter.txt --steps 20 --window 3
//! cargo run --bin reveal_demo -- chapter.txt --every-crossing --back
//! ```

use scrollcue::{CueFired, FirePolicy, LogLevel, ReaderSession, RevealOptions, set_log_callback};
use std::ffi::OsString;
use std::path::PathBuf;

// ============================================================================
// CLI Parsing
// ============================================================================

const HELP_TEXT: &str = "reveal_demo - progressive reveal of a chapter file

USAGE:
    reveal_demo <FILE> [OPTIONS]

OPTIONS:
    -h, --help              Print this help message and exit
    --steps <N>             Progress samples from 0 to 1 (default: 10)
    --window <N>            Lines in the reveal window (default: 5)
    --every-crossing        Fire cues again on every forward crossing
    --back                  Scroll back to the start after reaching the end
    -v, --verbose           Print engine log messages to stderr
";

/// Demo configuration.
#[derive(Debug)]
pub struct Config {
    pub path: PathBuf,
    pub steps: u32,
    pub window_lines: usize,
    pub fire_policy: FirePolicy,
    pub scroll_back: bool,
    pub verbose: bool,
}

/// Result of CLI parsing.
pub enum ParseResult {
    Config(Config),
    Help,
    Error(String),
}

impl Config {
    /// Parse configuration from command-line arguments.
    pub fn from_args<I>(args: I) -> ParseResult
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut path = None;
        let mut steps = 10;
        let mut window_lines = scrollcue::reveal::DEFAULT_WINDOW_LINES;
        let mut fire_policy = FirePolicy::OncePerSession;
        let mut scroll_back = false;
        let mut verbose = false;

        let mut args = args.into_iter();
        // Skip program name
        args.next();

        while let Some(arg) = args.next() {
            let arg_str = arg.to_string_lossy();
            match arg_str.as_ref() {
                "-h" | "--help" => return ParseResult::Help,
                "--steps" => match next_number(&mut args, "--steps") {
                    Ok(n) => steps = n,
                    Err(msg) => return ParseResult::Error(msg),
                },
                "--window" => match next_number(&mut args, "--window") {
                    Ok(n) => window_lines = n as usize,
                    Err(msg) => return ParseResult::Error(msg),
                },
                "--every-crossing" => fire_policy = FirePolicy::EveryForwardCrossing,
                "--back" => scroll_back = true,
                "-v" | "--verbose" => verbose = true,
                other if other.starts_with('-') => {
                    return ParseResult::Error(format!("Unknown option: {other}"));
                }
                _ => {
                    if path.is_some() {
                        return ParseResult::Error("Only one FILE may be given".to_string());
                    }
                    path = Some(PathBuf::from(&arg));
                }
            }
        }

        match path {
            Some(path) => ParseResult::Config(Config {
                path,
                steps,
                window_lines,
                fire_policy,
                scroll_back,
                verbose,
            }),
            None => ParseResult::Error("Missing FILE argument".to_string()),
        }
    }
}

fn next_number<I>(args: &mut I, flag: &str) -> Result<u32, String>
where
    I: Iterator<Item = OsString>,
{
    let Some(value) = args.next() else {
        return Err(format!("{flag} requires a value"));
    };
    let value = value.to_string_lossy();
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("Invalid {flag} value: {value} (must be positive integer)")),
    }
}

// ============================================================================
// Entry Point
// ============================================================================

fn main() {
    match Config::from_args(std::env::args_os()) {
        ParseResult::Config(config) => {
            if let Err(err) = run(&config) {
                eprintln!("Error: {err}");
                std::process::exit(1);
            }
        }
        ParseResult::Help => print!("{HELP_TEXT}"),
        ParseResult::Error(msg) => {
            eprintln!("Error: {msg}");
            eprintln!("Run with --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn run(config: &Config) -> scrollcue::Result<()> {
    if config.verbose {
        set_log_callback(|level, msg| {
            let tag = match level {
                LogLevel::Debug => "debug",
                LogLevel::Info => "info",
                LogLevel::Warn => "warn",
                LogLevel::Error => "error",
            };
            eprintln!("[{tag}] {msg}");
        });
    }

    let options = RevealOptions::default()
        .with_window_lines(config.window_lines)
        .with_fire_policy(config.fire_policy);
    let mut session = ReaderSession::new(options)?;
    session.load_file(&config.path)?;

    let forward = (0..=config.steps).map(|s| f64::from(s) / f64::from(config.steps));
    let backward = (0..config.steps)
        .rev()
        .map(|s| f64::from(s) / f64::from(config.steps))
        .filter(|_| config.scroll_back);

    for progress in forward.chain(backward) {
        let frame = session.update(progress);
        println!(
            "== progress {progress:.2} ({:.1}% visible, line {}) ==",
            frame.reveal.percent(),
            frame.reveal.target_line + 1
        );
        for line in &frame.lines {
            println!("{:>4} | {}", line.line + 1, line.marked_text());
        }
        for event in &frame.fired {
            println!("  fired {}", describe(event));
        }
    }
    Ok(())
}

fn describe(event: &CueFired) -> String {
    let mut out = format!("{}/{}", event.cue_type, event.effect);
    for (key, value) in event.params.iter() {
        out.push_str(&format!(" {key}={value}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(strs: &[&str]) -> Vec<OsString> {
        strs.iter().map(|s| OsString::from(*s)).collect()
    }

    #[test]
    fn test_defaults() {
        let ParseResult::Config(config) = Config::from_args(args(&["reveal_demo", "cap.txt"]))
        else {
            panic!("Expected Config");
        };
        assert_eq!(config.path, PathBuf::from("cap.txt"));
        assert_eq!(config.steps, 10);
        assert_eq!(config.window_lines, 5);
        assert_eq!(config.fire_policy, FirePolicy::OncePerSession);
        assert!(!config.scroll_back);
    }

    #[test]
    fn test_flags() {
        let result = Config::from_args(args(&[
            "reveal_demo",
            "--steps",
            "4",
            "cap.txt",
            "--window",
            "2",
            "--every-crossing",
            "--back",
        ]));
        let ParseResult::Config(config) = result else {
            panic!("Expected Config");
        };
        assert_eq!(config.steps, 4);
        assert_eq!(config.window_lines, 2);
        assert_eq!(config.fire_policy, FirePolicy::EveryForwardCrossing);
        assert!(config.scroll_back);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            Config::from_args(args(&["reveal_demo"])),
            ParseResult::Error(_)
        ));
        assert!(matches!(
            Config::from_args(args(&["reveal_demo", "cap.txt", "--steps", "0"])),
            ParseResult::Error(_)
        ));
        assert!(matches!(
            Config::from_args(args(&["reveal_demo", "--bogus"])),
            ParseResult::Error(_)
        ));
        assert!(matches!(
            Config::from_args(args(&["reveal_demo", "--help"])),
            ParseResult::Help
        ));
    }

    #[test]
    fn test_describe_event() {
        let cues = scrollcue::parse_cues("[cue:sound|thunder|volume=0.8|pan=left]");
        let event = CueFired::from(&cues[0]);
        assert_eq!(describe(&event), "sound/thunder volume=0.8 pan=left");
    }
}
