// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-stream capture tasks.

use std::fmt;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;

/// Which standard stream a capture task drains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Stdout => write!(f, "stdout"),
            Stream::Stderr => write!(f, "stderr"),
        }
    }
}

/// Read `reader` line by line until end-of-stream, appending each line plus
/// `\n` to the returned buffer.
///
/// `\n`, `\r\n` and a lone `\r` each terminate a line. Invalid UTF-8 is
/// replaced rather than treated as an error.
pub(crate) async fn drain_lines<R>(reader: R) -> std::io::Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut captured = String::new();
    let mut line = Vec::new();
    // A `\r` ended the previous buffer; a leading `\n` belongs to it.
    let mut after_cr = false;

    loop {
        let buf = reader.fill_buf().await?;
        if buf.is_empty() {
            break;
        }
        let mut used = usize::from(after_cr && buf[0] == b'\n');
        after_cr = false;

        let rest = &buf[used..];
        match rest.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(end) => {
                line.extend_from_slice(&rest[..end]);
                used += end + 1;
                if rest[end] == b'\r' {
                    match rest.get(end + 1) {
                        Some(b'\n') => used += 1,
                        Some(_) => {}
                        None => after_cr = true,
                    }
                }
                push_line(&mut captured, &line);
                line.clear();
            }
            None => {
                line.extend_from_slice(rest);
                used = buf.len();
            }
        }
        reader.consume(used);
    }

    if !line.is_empty() {
        push_line(&mut captured, &line);
    }
    Ok(captured)
}

fn push_line(captured: &mut String, line: &[u8]) {
    captured.push_str(&String::from_utf8_lossy(line));
    captured.push('\n');
}

/// Drain `reader` on its own task.
pub(crate) fn spawn_capture<R>(stream: Stream, reader: R) -> JoinHandle<std::io::Result<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let captured = drain_lines(reader).await?;
        tracing::debug!(%stream, bytes = captured.len(), "capture drained");
        Ok(captured)
    })
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;
