//! Line-based question/answer abstraction shared by the selector and helpers

use anyhow::Result;

/// Sequential prompt: one question outstanding at a time.
///
/// Answers are returned raw; trimming and parsing belong to the caller.
/// Implementations must be closed after the last question on every exit
/// path so the terminal is handed back in a sane state.
pub trait Prompt {
    /// Show an informational message
    fn say(&mut self, message: &str) -> Result<()>;

    /// Ask a question and block until a line is entered
    fn ask(&mut self, question: &str) -> Result<String>;

    /// Release the input stream. Calling it more than once is harmless.
    fn close(&mut self) -> Result<()>;
}

/// `y`/`yes` in any case, surrounding whitespace ignored
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Run `f` against `prompt`, then close the prompt whether or not `f`
/// succeeded. An error from `f` wins over an error from closing.
pub fn with_prompt<P, T, F>(prompt: &mut P, f: F) -> Result<T>
where
    P: Prompt + ?Sized,
    F: FnOnce(&mut P) -> Result<T>,
{
    let result = f(prompt);
    let closed = prompt.close();
    let value = result?;
    closed?;
    Ok(value)
}
