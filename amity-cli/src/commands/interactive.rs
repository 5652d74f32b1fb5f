//! Interactive mode.
//!
//! Reads one subcommand per line from stdin and runs it exactly as the
//! one-shot CLI would. Errors are reported and control returns to the
//! prompt. Besides the subcommands the prompt understands `help`,
//! `help <command>`, `clear`, `quit` and `exit`.

use crate::cli::{Command, ReplLine};
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory, Parser};
use std::io::{self, BufRead, Write};

/// Prompt shown before each line.
pub const PROMPT: &str = "(amity) ";

/// Start an interactive session.
#[derive(Args)]
pub struct InteractiveCommand {}

/// What the loop does after a line.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

impl InteractiveCommand {
    /// Execute the interactive command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        run(stdin.lock(), stdout.lock(), global)
    }
}

/// Drive the prompt until `quit`, `exit` or end of input.
///
/// `out` receives the banner and prompts; command output goes to stdout.
pub fn run<R: BufRead, W: Write>(
    mut input: R,
    mut out: W,
    global: &GlobalOptions,
) -> Result<(), CliError> {
    if !global.quiet {
        writeln!(out, "Welcome to Amity (type help for a list of commands)")?;
    }

    let mut line = String::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        if step(line.trim(), &mut out, global)? == Flow::Quit {
            break;
        }
    }

    if !global.quiet {
        writeln!(out, "Good bye!")?;
    }
    Ok(())
}

fn step<W: Write>(line: &str, out: &mut W, global: &GlobalOptions) -> Result<Flow, CliError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        [] => {}
        ["quit" | "exit"] => return Ok(Flow::Quit),
        ["clear"] => {
            write!(out, "\x1b[2J\x1b[H")?;
        }
        ["help"] => {
            write!(out, "{}", ReplLine::command().render_help())?;
        }
        ["help", topic] => show_parse_result(&[*topic, "--help"]),
        _ => match ReplLine::try_parse_from(&words) {
            Ok(ReplLine {
                command: Command::Interactive(_),
            }) => eprintln!("Error: already in interactive mode"),
            Ok(parsed) => {
                if let Err(e) = parsed.command.execute(global) {
                    eprintln!("Error: {e}");
                }
            }
            Err(e) => {
                let _ = e.print();
            }
        },
    }
    Ok(Flow::Continue)
}

/// Let clap print help or usage for `args`.
fn show_parse_result(args: &[&str]) {
    if let Err(e) = ReplLine::try_parse_from(args) {
        let _ = e.print();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Session;
    use std::io::Cursor;

    fn quiet_global(dir: &std::path::Path) -> GlobalOptions {
        GlobalOptions {
            quiet: true,
            data_dir: Some(dir.to_path_buf()),
            ..GlobalOptions::default()
        }
    }

    #[test]
    fn test_runs_commands_until_quit() {
        let dir = tempfile::tempdir().unwrap();
        let global = quiet_global(dir.path());
        let input = "create-room office Blue\nadd_person John Roe staff\nquit\ncreate-room office Red\n";

        let mut out = Vec::new();
        run(Cursor::new(input), &mut out, &global).unwrap();

        let prompts = String::from_utf8(out).unwrap();
        assert_eq!(prompts.matches(PROMPT).count(), 3);

        let session = Session::open(&global).unwrap();
        let amity = session.amity();
        assert!(amity.room("Blue").is_some());
        assert!(amity.room("Red").is_none());
        assert_eq!(amity.person(&"ST001".parse().unwrap()).unwrap().office(), Some("Blue"));
    }

    #[test]
    fn test_errors_return_to_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let global = quiet_global(dir.path());
        let input = "create-room office Blue\ncreate-room office Blue\nnonsense\ncreate-room living Green\n";

        let mut out = Vec::new();
        run(Cursor::new(input), &mut out, &global).unwrap();

        let session = Session::open(&global).unwrap();
        assert_eq!(session.amity().rooms(None).count(), 2);
    }

    #[test]
    fn test_help_and_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let global = quiet_global(dir.path());

        let mut out = Vec::new();
        run(Cursor::new("\nhelp\nexit\n"), &mut out, &global).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("create-room"));
        assert!(text.contains("print-unallocated"));
    }

    #[test]
    fn test_nested_interactive_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let global = quiet_global(dir.path());
        let mut out = Vec::new();
        let flow = step("interactive", &mut out, &global).unwrap();
        assert_eq!(flow, Flow::Continue);
    }
}
