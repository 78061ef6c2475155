//! Line-based confirmation prompt

use super::context::UiContext;
use crate::error::{NuPruneError, NuPruneResult};
use std::io::{self, BufRead, Write};

/// Ask a yes/no question on stdin. Only `y`/`yes` (any case) proceed;
/// anything else, including end of input, declines.
pub async fn confirm(ctx: &UiContext, message: &str) -> NuPruneResult<bool> {
    if ctx.auto_yes() {
        println!("  {} (auto-approved)", message);
        return Ok(true);
    }

    let message = message.to_string();
    tokio::task::spawn_blocking(move || {
        let stdin = io::stdin();
        let stdout = io::stdout();
        read_confirmation(&mut stdin.lock(), &mut stdout.lock(), &message)
    })
    .await?
    .map_err(|e| NuPruneError::io("reading confirmation", e))
}

/// Write the prompt to `output` and read one answer line from `input`
pub fn read_confirmation<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<bool> {
    write!(output, "{} [y/N] ", message)?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(output)?;
        return Ok(false);
    }
    Ok(is_affirmative(&answer))
}

/// Case-insensitive check for an affirmative answer
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
