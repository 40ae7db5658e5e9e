//! Reel selection typed on the terminal.
use async_trait::async_trait;
use combat_core::{CombatState, Element};
use runtime::{RandomReels, RuntimeError, SelectionProvider};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

const PROMPT: &str = "Spin: up to three of fire/water/wind/earth (empty line spins at random) > ";

/// Prompts for each round's elements on stdin.
///
/// Tokens may be separated by spaces or commas and go through the same
/// normalization as reel symbols, so `"Fire_Icon air"` is Fire then Wind.
/// An empty line falls back to a random spin.
pub struct StdinSelection {
    lines: Mutex<Lines<BufReader<Stdin>>>,
    reels: RandomReels,
}

impl StdinSelection {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
            reels: RandomReels::new(),
        }
    }
}

impl Default for StdinSelection {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SelectionProvider for StdinSelection {
    async fn select(&self, state: &CombatState) -> runtime::Result<Vec<Element>> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(PROMPT.as_bytes())
            .await
            .map_err(io_error)?;
        stdout.flush().await.map_err(io_error)?;

        let line = self
            .lines
            .lock()
            .await
            .next_line()
            .await
            .map_err(io_error)?
            .ok_or_else(|| RuntimeError::provider("stdin closed"))?;

        match parse_selection(&line) {
            Some(elements) => Ok(elements),
            None => self.reels.select(state).await,
        }
    }
}

fn io_error(err: std::io::Error) -> RuntimeError {
    RuntimeError::provider(format!("terminal I/O failed: {err}"))
}

/// Splits a typed line into elements; `None` for a blank line.
pub fn parse_selection(line: &str) -> Option<Vec<Element>> {
    let elements: Vec<Element> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(Element::from_token)
        .collect();
    (!elements.is_empty()).then_some(elements)
}
