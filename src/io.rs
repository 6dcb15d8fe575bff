//! Line-based request/response channel for interactive players.

use anyhow::{Context, Result, bail};
use std::sync::Arc;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout,
};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// A channel that can ask a question and wait for a one-line answer.
#[async_trait::async_trait]
pub trait InputChannel: Send {
    /// Shows `question` and waits for the next line of input.
    ///
    /// Bytes that are not valid UTF-8 come back as replacement characters.
    /// Fails if the channel is closed before a line arrives.
    async fn prompt(&mut self, question: &str) -> Result<String>;

    /// Shows `message` without waiting for input.
    async fn notify(&mut self, message: &str) -> Result<()>;
}

/// Input channel over any async line reader and writer.
pub struct LineInput<R, W> {
    reader: R,
    out: W,
}

/// Input channel on the process's stdin and stdout.
pub type ConsoleInput = LineInput<BufReader<Stdin>, Stdout>;

impl<R, W> LineInput<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a channel reading lines from `reader` and writing to `out`.
    pub fn new(reader: R, out: W) -> Self {
        Self { reader, out }
    }

    /// Returns the output side.
    pub fn writer(&self) -> &W {
        &self.out
    }

    async fn write_line(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }
}

/// Opens the console as an input channel.
#[instrument]
pub fn console() -> ConsoleInput {
    debug!("Opening console input");
    LineInput::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
}

#[async_trait::async_trait]
impl<R, W> InputChannel for LineInput<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn prompt(&mut self, question: &str) -> Result<String> {
        self.write_line(question).await?;
        let mut buf = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut buf)
            .await
            .context("Failed to read input")?;
        if read == 0 {
            bail!("Input closed while waiting for a move");
        }
        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    async fn notify(&mut self, message: &str) -> Result<()> {
        self.write_line(message).await
    }
}

/// One channel shared by several players, e.g. two humans at one terminal.
#[async_trait::async_trait]
impl<I: InputChannel> InputChannel for Arc<Mutex<I>> {
    async fn prompt(&mut self, question: &str) -> Result<String> {
        self.lock().await.prompt(question).await
    }

    async fn notify(&mut self, message: &str) -> Result<()> {
        self.lock().await.notify(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_prompt_reads_lines_in_order() {
        let mut input = LineInput::new(&b"[2,3]\nnonsense\n"[..], Vec::new());

        assert_eq!(input.prompt("black, where do you want to move?").await.unwrap(), "[2,3]");
        input.notify("Invalid move!").await.unwrap();
        assert_eq!(input.prompt("again?").await.unwrap(), "nonsense");

        let written = String::from_utf8(input.writer().clone()).unwrap();
        assert_eq!(written, "black, where do you want to move?\nInvalid move!\nagain?\n");
    }

    #[tokio::test]
    async fn test_prompt_survives_invalid_utf8() {
        let mut input = LineInput::new(&b"\xff\xfe\r\n[2,3]"[..], Vec::new());

        let garbled = input.prompt("first").await.unwrap();
        assert_eq!(garbled, "\u{FFFD}\u{FFFD}");
        assert_eq!(input.prompt("second").await.unwrap(), "[2,3]");
        assert!(input.prompt("third").await.is_err());
    }

    #[tokio::test]
    async fn test_prompt_fails_when_closed() {
        let mut input = LineInput::new(&b""[..], Vec::new());
        assert!(input.prompt("anyone?").await.is_err());
    }

    #[tokio::test]
    async fn test_shared_channel() {
        let shared = Arc::new(Mutex::new(LineInput::new(&b"a\nb\n"[..], Vec::new())));
        let mut first = Arc::clone(&shared);
        let mut second = Arc::clone(&shared);
        assert_eq!(first.prompt("1").await.unwrap(), "a");
        assert_eq!(second.prompt("2").await.unwrap(), "b");
    }
}
