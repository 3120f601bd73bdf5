//! Stream handle for SSE responses.

use super::decode::{parse_line, Frame, LineBuffer};
use crate::client::types::{CallScope, RequestContext};
use crate::{BoxStream, Error, Result};
use bytes::Bytes;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Reading,
    Done,
    Closed,
}

/// Lazily decodes `data:` frames of an SSE body into `T`.
///
/// Lifecycle: reading until the `[DONE]` sentinel, end of input, or a read error
/// (all of which end the stream), or until [`close`](Self::close). The response
/// body is dropped exactly once, as soon as the stream ends or is closed.
///
/// A malformed frame is returned as an error from that `next` call; the stream
/// itself stays readable, and callers that treat it as fatal should `close`.
pub struct SseStream<T> {
    body: Option<BoxStream<'static, Bytes>>,
    lines: LineBuffer,
    state: State,
    scope: CallScope,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> SseStream<T> {
    /// Wrap a raw byte stream, e.g. one obtained from a custom transport.
    pub fn new(body: BoxStream<'static, Bytes>) -> Self {
        Self::with_scope(body, RequestContext::default().scope())
    }

    pub(crate) fn with_scope(body: BoxStream<'static, Bytes>, scope: CallScope) -> Self {
        Self {
            body: Some(body),
            lines: LineBuffer::new(),
            state: State::Reading,
            scope,
            _marker: PhantomData,
        }
    }

    /// Next decoded chunk, or `Ok(None)` once the stream has ended or was closed.
    pub async fn next(&mut self) -> Result<Option<T>> {
        loop {
            if self.state != State::Reading {
                return Ok(None);
            }

            let line = match self.lines.next_line() {
                Some(line) => line,
                None => {
                    if self.fill().await? {
                        continue;
                    }
                    // End of input without a sentinel still flushes a final unterminated line.
                    match self.lines.take_remainder() {
                        Some(line) => line,
                        None => {
                            self.finish();
                            return Ok(None);
                        }
                    }
                }
            };

            match parse_line(&line) {
                Frame::Skip => continue,
                Frame::Done => {
                    debug!("zai stream reached [DONE]");
                    self.finish();
                    return Ok(None);
                }
                Frame::Data(payload) => {
                    return serde_json::from_str(payload).map(Some).map_err(|e| {
                        Error::stream(format!("failed to unmarshal chunk: {}", e), e)
                    });
                }
            }
        }
    }

    /// Pull one more chunk of body bytes. `Ok(false)` means end of input.
    async fn fill(&mut self) -> Result<bool> {
        let Some(body) = self.body.as_mut() else {
            return Ok(false);
        };
        match self.scope.run(body.next()).await {
            Ok(Some(Ok(bytes))) => {
                self.lines.push(&bytes);
                Ok(true)
            }
            Ok(Some(Err(e))) => {
                self.finish();
                Err(Error::stream("failed to read stream", e))
            }
            Ok(None) => {
                self.release();
                Ok(false)
            }
            Err(e) => {
                self.finish();
                Err(e)
            }
        }
    }

    /// Adapt into a `futures::Stream`, ending at the sentinel or end of input.
    pub fn into_stream(self) -> BoxStream<'static, T>
    where
        T: Send + 'static,
    {
        Box::pin(futures::stream::unfold(self, |mut s| async move {
            match s.next().await {
                Ok(Some(chunk)) => Some((Ok(chunk), s)),
                Ok(None) => None,
                Err(e) => Some((Err(e), s)),
            }
        }))
    }
}

impl<T> SseStream<T> {
    /// Release the connection. Idempotent, and safe before any `next` call.
    pub fn close(&mut self) {
        self.state = State::Closed;
        self.release();
    }

    /// True once the sentinel, end of input or a read error was seen.
    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    pub fn is_closed(&self) -> bool {
        self.state == State::Closed
    }

    fn finish(&mut self) {
        if self.state == State::Reading {
            self.state = State::Done;
        }
        self.release();
    }

    fn release(&mut self) {
        if self.body.take().is_some() {
            debug!("zai stream body released");
        }
    }
}

impl<T> fmt::Debug for SseStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SseStream")
            .field("state", &self.state)
            .field("body_open", &self.body.is_some())
            .finish_non_exhaustive()
    }
}
