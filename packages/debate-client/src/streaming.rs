//! Stream adapter from the raw response body to decoded frames.
//!
//! Wraps a byte stream, runs every fragment through the [`FrameDecoder`] and
//! yields frames in arrival order. Buffered frames are always drained before
//! the next fragment is polled, and the decoder is flushed exactly once when
//! the body ends.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::stream::{BoxStream, Stream};

use crate::decoder::{FrameDecoder, SseFrame};
use crate::error::DebateError;

/// Boxed response body as delivered by a transport.
pub type ByteStream = BoxStream<'static, Result<Bytes, DebateError>>;

/// Stream adapter that converts raw body bytes into [`SseFrame`] values.
pub struct FrameStream {
    inner: ByteStream,
    decoder: FrameDecoder,
    ready: VecDeque<SseFrame>,
    finished: bool,
}

impl FrameStream {
    pub fn new(body: ByteStream) -> Self {
        Self {
            inner: body,
            decoder: FrameDecoder::new(),
            ready: VecDeque::new(),
            finished: false,
        }
    }
}

impl Stream for FrameStream {
    type Item = Result<SseFrame, DebateError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(frame) = this.ready.pop_front() {
                return Poll::Ready(Some(Ok(frame)));
            }

            if this.finished {
                return Poll::Ready(None);
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => {
                    this.ready.extend(this.decoder.decode(&bytes));
                }
                Poll::Ready(Some(Err(e))) => {
                    // Nothing after a broken body can be trusted
                    this.finished = true;
                    this.ready.clear();
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(None) => {
                    this.finished = true;
                    this.ready.extend(this.decoder.flush());
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
