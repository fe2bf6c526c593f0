//! Headless Console Runner
//!
//! Drives a console from a line-oriented script and prints the resulting
//! state. Used for testing and for reproducing console behaviour without a
//! host application.

use std::io::{self, Read};
use std::process::ExitCode;
use std::time::Instant;

use devconsole::core::{BrowseDirection, Console, CursorMove, EditCommand};
use devconsole::input::page_size;
use devconsole::{ConsoleConfig, ConsoleContext, Error};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Parse command line arguments
    let mut cols: Option<usize> = None;
    let mut rows: Option<usize> = None;
    let mut config_file: Option<String> = None;
    let mut script_file: Option<String> = None;
    let mut output_format = OutputFormat::Text;
    let mut show_help = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--cols" => {
                i += 1;
                if i < args.len() {
                    cols = args[i].parse().ok();
                }
            },
            "-r" | "--rows" => {
                i += 1;
                if i < args.len() {
                    rows = args[i].parse().ok();
                }
            },
            "--config" => {
                i += 1;
                if i < args.len() {
                    config_file = Some(args[i].clone());
                }
            },
            "-j" | "--json" => {
                output_format = OutputFormat::Json;
            },
            "-t" | "--text" => {
                output_format = OutputFormat::Text;
            },
            "-h" | "--help" => {
                show_help = true;
            },
            _ => {
                if script_file.is_none() && !args[i].starts_with('-') {
                    script_file = Some(args[i].clone());
                }
            },
        }
        i += 1;
    }

    if show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    let mut config = match &config_file {
        Some(path) => match ConsoleConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path, e);
                return ExitCode::FAILURE;
            },
        },
        None => ConsoleConfig::default(),
    };
    if let Some(cols) = cols {
        config.columns = cols;
    }
    if let Some(rows) = rows {
        config.rows = rows;
    }

    // Read the script
    let script = match &script_file {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path, e);
                return ExitCode::FAILURE;
            },
        },
        None => {
            let mut data = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut data) {
                eprintln!("Error reading stdin: {}", e);
                return ExitCode::FAILURE;
            }
            data
        },
    };

    let mut runner = match Runner::new(config) {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("Error creating console: {}", e);
            return ExitCode::FAILURE;
        },
    };

    for (number, line) in script.lines().enumerate() {
        if let Err(e) = runner.run_line(line) {
            eprintln!("line {}: {}", number + 1, e);
            return ExitCode::FAILURE;
        }
    }

    let snapshot = match runner.context.focused_mut() {
        Ok(console) => console.snapshot(),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        },
    };

    match output_format {
        OutputFormat::Text => print!("{}", snapshot.to_text()),
        OutputFormat::Json => match snapshot.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing snapshot: {}", e);
                return ExitCode::FAILURE;
            },
        },
    }

    ExitCode::SUCCESS
}

#[derive(Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

/// Why a script line could not be run
#[derive(Debug)]
enum ScriptError {
    UnknownDirective(String),
    UnknownKey(String),
    BadScroll(String),
    Console(Error),
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptError::UnknownDirective(d) => write!(f, "unknown directive '{}'", d),
            ScriptError::UnknownKey(k) => write!(f, "unknown key '{}'", k),
            ScriptError::BadScroll(n) => write!(f, "scroll expects a line count, got '{}'", n),
            ScriptError::Console(e) => write!(f, "{}", e),
        }
    }
}

impl From<Error> for ScriptError {
    fn from(e: Error) -> Self {
        ScriptError::Console(e)
    }
}

/// A visible console plus a simulated clock for slide transitions
struct Runner {
    context: ConsoleContext,
    clock: Instant,
}

impl Runner {
    fn new(config: ConsoleConfig) -> Result<Self, Error> {
        let mut context = ConsoleContext::new(config);
        context.create()?;
        context.set_visibility(true)?;
        context.set_callback(run_command)?;
        Ok(Self {
            context,
            clock: Instant::now(),
        })
    }

    fn run_line(&mut self, line: &str) -> Result<(), ScriptError> {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let (directive, rest) = line.split_once(' ').unwrap_or((line, ""));
        match directive {
            "type" => self.type_text(rest),
            "submit" => self.send(EditCommand::Submit),
            "enter" => {
                self.type_text(rest)?;
                self.send(EditCommand::Submit)
            },
            "print" => {
                self.context.print(format!("{}\n", rest))?;
                Ok(())
            },
            "history" => {
                self.context.add_history(rest)?;
                Ok(())
            },
            "key" => {
                let command = self.key_command(rest.trim())?;
                self.send(command)
            },
            "scroll" => {
                let delta = rest
                    .trim()
                    .parse()
                    .map_err(|_| ScriptError::BadScroll(rest.to_string()))?;
                self.send(EditCommand::ScrollOutput(delta))
            },
            other => Err(ScriptError::UnknownDirective(other.to_string())),
        }
    }

    fn type_text(&mut self, text: &str) -> Result<(), ScriptError> {
        for c in text.chars() {
            match self.context.handle_input(EditCommand::InsertChar(c), self.clock) {
                Ok(_) => {},
                Err(e @ (Error::CapacityExceeded { .. } | Error::UnsupportedChar(_))) => {
                    tracing::warn!(%e, "keystroke rejected");
                },
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn send(&mut self, command: EditCommand) -> Result<(), ScriptError> {
        self.context.handle_input(command, self.clock)?;
        if command == EditCommand::ToggleVisibility {
            // Let the slide run to completion before the next line
            self.clock += self.context.config().slide_duration();
            self.context.tick(self.clock);
        }
        Ok(())
    }

    fn key_command(&self, name: &str) -> Result<EditCommand, ScriptError> {
        let page = page_size(self.context.config().rows) as isize;
        let command = match name {
            "backspace" => EditCommand::DeleteBackward,
            "delete" => EditCommand::DeleteForward,
            "left" => EditCommand::MoveCursor(CursorMove::Left),
            "right" => EditCommand::MoveCursor(CursorMove::Right),
            "home" => EditCommand::MoveCursor(CursorMove::Home),
            "end" => EditCommand::MoveCursor(CursorMove::End),
            "up" => EditCommand::ScrollHistory(BrowseDirection::Older),
            "down" => EditCommand::ScrollHistory(BrowseDirection::Newer),
            "pageup" => EditCommand::ScrollOutput(-page),
            "pagedown" => EditCommand::ScrollOutput(page),
            "toggle" => EditCommand::ToggleVisibility,
            other => return Err(ScriptError::UnknownKey(other.to_string())),
        };
        Ok(command)
    }
}

/// Submit callback: a handful of built-in commands
fn run_command(console: &mut Console, line: &str) {
    let (command, args) = line.trim().split_once(' ').unwrap_or((line.trim(), ""));
    match command {
        "" => {},
        "echo" => console.output(format!("{}\n", args)),
        "help" => console.output("Commands: echo <text>, help, history\n"),
        "history" => {
            let entries: Vec<String> = console.history().iter().map(str::to_string).collect();
            for (n, entry) in entries.iter().enumerate() {
                console.output_fmt(format_args!("{:>3}  {}\n", n + 1, entry));
            }
        },
        other => console.output_fmt(format_args!("Unknown command: {}\n", other)),
    }
}

fn print_help() {
    println!("Headless Console Runner");
    println!();
    println!("Usage: console-headless [OPTIONS] [SCRIPT]");
    println!();
    println!("Options:");
    println!("  -c, --cols <N>       Set console width (default: 80)");
    println!("  -r, --rows <N>       Set console height (default: 25)");
    println!("      --config <PATH>  Load a JSON console configuration");
    println!("  -j, --json           Output snapshot as JSON");
    println!("  -t, --text           Output snapshot as text (default)");
    println!("  -h, --help           Show this help message");
    println!();
    println!("If no script is specified, reads from stdin.");
    println!();
    println!("Script directives, one per line:");
    println!("  type <text>      Type text into the input line");
    println!("  submit           Press enter");
    println!("  enter <text>     Type text and press enter");
    println!("  print <text>     Print a line to the console");
    println!("  history <text>   Add a history entry");
    println!("  key <name>       backspace, delete, left, right, home, end,");
    println!("                   up, down, pageup, pagedown, toggle");
    println!("  scroll <n>       Scroll the output by n lines");
    println!();
    println!("Examples:");
    println!("  printf 'enter echo hi\\nenter help\\n' | console-headless");
    println!("  console-headless --cols 40 --rows 10 --json script.txt");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> Runner {
        let config = ConsoleConfig {
            columns: 40,
            rows: 6,
            banner: false,
            ..ConsoleConfig::default()
        };
        Runner::new(config).unwrap()
    }

    fn visible(runner: &mut Runner) -> Vec<String> {
        runner.context.focused_mut().unwrap().snapshot().visible
    }

    #[test]
    fn test_enter_runs_callback() {
        let mut r = runner();
        r.run_line("enter echo hi").unwrap();
        let lines = visible(&mut r);
        assert_eq!(lines[lines.len() - 2..], ["echo hi", "hi"]);
    }

    #[test]
    fn test_history_command_lists_entries() {
        let mut r = runner();
        r.run_line("history first").unwrap();
        r.run_line("enter history").unwrap();
        let lines = visible(&mut r);
        assert_eq!(lines[lines.len() - 3..], ["history", "  1  first", "  2  history"]);
    }

    #[test]
    fn test_key_directives() {
        let mut r = runner();
        r.run_line("type abc").unwrap();
        r.run_line("key home").unwrap();
        r.run_line("key delete").unwrap();
        let snap = r.context.focused_mut().unwrap().snapshot();
        assert_eq!(snap.input.text, "bc");
        assert_eq!(snap.input.cursor, 0);
    }

    #[test]
    fn test_toggle_completes_slide() {
        let mut r = runner();
        r.run_line("key toggle").unwrap();
        assert!(!r.context.visibility().unwrap());
        assert_eq!(r.context.focused_mut().unwrap().snapshot().visibility, "hidden");
    }

    #[test]
    fn test_bad_lines_are_reported() {
        let mut r = runner();
        assert!(matches!(r.run_line("jump"), Err(ScriptError::UnknownDirective(_))));
        assert!(matches!(r.run_line("key f1"), Err(ScriptError::UnknownKey(_))));
        assert!(matches!(r.run_line("scroll up"), Err(ScriptError::BadScroll(_))));
        assert!(r.run_line("# comment").is_ok());
    }
}
