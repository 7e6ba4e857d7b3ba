//! Minimal line-oriented operator prompts.
//!
//! Five prompts total across a run (owner, repo, bucket opt-in,
//! endpoint+key, setup opt-in) plus the degraded-mode confirmation. `--yes`
//! answers every prompt with its default without touching stdin.

use std::io::{self, Write};

/// Ask a question with a visible default; blank input takes the default.
pub fn ask_default(question: &str, default: &str) -> io::Result<String> {
    print!("{question} [{default}]: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let answer = line.trim();
    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer.to_string()
    })
}

/// Ask a question where a blank answer is meaningful (it skips a stage).
pub fn ask_optional(question: &str) -> io::Result<String> {
    print!("{question}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Yes/no confirmation; blank input takes the default.
pub fn confirm(question: &str, default: bool) -> io::Result<bool> {
    let hint = if default { "Y/n" } else { "y/N" };
    print!("{question} [{hint}]: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(parse_answer(&line, default))
}

/// Interpret a yes/no answer; blank means the default, anything other than
/// an explicit yes means no.
pub fn parse_answer(answer: &str, default: bool) -> bool {
    match answer.trim().to_ascii_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    }
}
