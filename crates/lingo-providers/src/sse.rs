//! Server-sent events decoding for streamed chat completions.
//!
//! OpenAI-compatible APIs stream one `data: {json}` line per delta and end
//! with `data: [DONE]`. Network chunks do not respect line boundaries, so
//! bytes are buffered until a full line is available.

use std::collections::VecDeque;
use std::fmt::Display;

use futures::stream::{self, Stream, StreamExt};
use serde::Deserialize;

use lingo_core::error::ProviderError;
use lingo_core::traits::ChunkStream;

#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Deserialize, Default)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, PartialEq)]
enum SseLine {
    Text(String),
    Done,
    Skip,
}

fn parse_line(line: &str) -> Result<SseLine, ProviderError> {
    let line = line.trim_end_matches('\r');
    let Some(data) = line.strip_prefix("data:") else {
        // Blank separators, comments, `event:` and `id:` fields.
        return Ok(SseLine::Skip);
    };
    let data = data.trim_start();
    if data == "[DONE]" {
        return Ok(SseLine::Done);
    }

    let chunk: StreamChunk = serde_json::from_str(data)
        .map_err(|e| ProviderError::MalformedResponse(format!("bad stream event: {e}")))?;
    let text: String = chunk
        .choices
        .into_iter()
        .filter_map(|c| c.delta.content)
        .collect();
    if text.is_empty() {
        Ok(SseLine::Skip)
    } else {
        Ok(SseLine::Text(text))
    }
}

struct Decoder<S> {
    bytes: S,
    buffer: Vec<u8>,
    ready: VecDeque<Result<String, ProviderError>>,
    finished: bool,
}

impl<S> Decoder<S> {
    /// Parse every complete line in the buffer. Returns `false` once the
    /// stream is over (done marker or error).
    fn drain_lines(&mut self) -> bool {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if !self.push_line(&line[..line.len() - 1]) {
                return false;
            }
        }
        true
    }

    fn push_line(&mut self, raw: &[u8]) -> bool {
        let parsed = std::str::from_utf8(raw)
            .map_err(|e| ProviderError::MalformedResponse(format!("invalid UTF-8: {e}")))
            .and_then(parse_line);
        match parsed {
            Ok(SseLine::Text(text)) => {
                self.ready.push_back(Ok(text));
                true
            }
            Ok(SseLine::Skip) => true,
            Ok(SseLine::Done) => false,
            Err(e) => {
                self.ready.push_back(Err(e));
                false
            }
        }
    }
}

/// Turn a byte stream of SSE events into a stream of text deltas.
///
/// The returned stream ends at `[DONE]`, at the end of the body, or right
/// after yielding the first error.
pub fn decode<S, B, E>(bytes: S) -> ChunkStream
where
    S: Stream<Item = Result<B, E>> + Send + Unpin + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let decoder = Decoder {
        bytes,
        buffer: Vec::new(),
        ready: VecDeque::new(),
        finished: false,
    };

    stream::unfold(decoder, |mut dec| async move {
        loop {
            if let Some(item) = dec.ready.pop_front() {
                return Some((item, dec));
            }
            if dec.finished {
                return None;
            }
            match dec.bytes.next().await {
                Some(Ok(chunk)) => {
                    dec.buffer.extend_from_slice(chunk.as_ref());
                    if !dec.drain_lines() {
                        dec.finished = true;
                    }
                }
                Some(Err(e)) => {
                    dec.ready
                        .push_back(Err(ProviderError::NetworkError(e.to_string())));
                    dec.finished = true;
                }
                None => {
                    // A final event without a trailing newline.
                    if !dec.buffer.is_empty() {
                        let rest = std::mem::take(&mut dec.buffer);
                        dec.push_line(&rest);
                    }
                    dec.finished = true;
                }
            }
        }
    })
    .boxed()
}
