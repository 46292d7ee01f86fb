//! Length-capped line reader for player input.
use bytes::{Bytes, BytesMut};
use memchr::memchr;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Longest command line a player may send, newline excluded.
pub const MAX_LINE_LEN: usize = 1024;

#[derive(Debug, thiserror::Error)]
pub enum LineError {
    #[error("line longer than {0} bytes")]
    TooLong(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    buf: BytesMut,
    max_line_len: usize,
}

impl<R> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(MAX_LINE_LEN),
            max_line_len: MAX_LINE_LEN,
        }
    }

    pub fn max_line_len(mut self, max: usize) -> Self {
        self.max_line_len = max.max(1);
        self
    }
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    /// Reads one line without its `\n` or `\r\n`.
    ///
    /// Returns `Ok(None)` on EOF with nothing buffered. A trailing partial
    /// line before EOF is returned as a line. Cancel safe: bytes already read
    /// stay buffered for the next call.
    pub async fn read_line(&mut self) -> Result<Option<String>, LineError> {
        loop {
            if let Some(i) = memchr(b'\n', &self.buf) {
                if i > self.max_line_len {
                    return Err(LineError::TooLong(self.max_line_len));
                }
                let raw = self.buf.split_to(i + 1).freeze();
                return Ok(Some(decode(raw)));
            }

            if self.buf.len() > self.max_line_len {
                return Err(LineError::TooLong(self.max_line_len));
            }

            let n = self.inner.read_buf(&mut self.buf).await?;
            if n == 0 {
                if self.buf.is_empty() {
                    return Ok(None);
                }
                let rest = self.buf.split().freeze();
                return Ok(Some(decode(rest)));
            }
        }
    }
}

fn decode(mut line: Bytes) -> String {
    let mut end = line.len();
    if end > 0 && line[end - 1] == b'\n' {
        end -= 1;
    }
    if end > 0 && line[end - 1] == b'\r' {
        end -= 1;
    }
    line.truncate(end);
    String::from_utf8_lossy(&line).into_owned()
}
