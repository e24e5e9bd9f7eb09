//! Byte sinks for async rendering.
//!
//! A sink decides how rendered bytes leave the traversal: coalesced into
//! fixed-size chunks over a bounded channel, with an added yield cadence,
//! or plainly collected in memory. Backpressure is the channel's: when the
//! consumer stops taking chunks, `write` suspends the producer.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use thiserror::Error;
use tokio::sync::mpsc;

/// Failure surfaced by a sink during a streaming render pass.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The consuming side went away before the render pass completed.
    #[error("stream consumer disconnected before the render pass completed")]
    Disconnected,
}

pub type StreamResult<T> = Result<T, StreamError>;

/// Destination for rendered bytes under async traversal.
#[async_trait]
pub trait Sink: Send {
    /// Accepts rendered bytes, suspending if downstream applies
    /// backpressure.
    async fn write(&mut self, bytes: &[u8]) -> StreamResult<()>;

    /// Writes a single byte through [`write`](Self::write).
    async fn write_u8(&mut self, byte: u8) -> StreamResult<()> {
        self.write(&[byte]).await
    }

    /// Pushes out anything the sink is still coalescing, even short of a
    /// full chunk.
    async fn flush(&mut self) -> StreamResult<()> {
        Ok(())
    }

    /// Marks a structural boundary: one sequence element finished.
    /// Batching sinks ignore it; cadence-based sinks flush and yield here.
    async fn boundary(&mut self) -> StreamResult<()> {
        Ok(())
    }
}

// ============================================================================
// Channel sink
// ============================================================================

/// Coalesces writes into fixed-size chunks and sends them through a
/// bounded channel. A full channel suspends the producer until the
/// consumer catches up, so at most `queue_depth` chunks plus one partial
/// chunk are ever buffered.
pub struct ChannelSink {
    tx: mpsc::Sender<Bytes>,
    buffer: BytesMut,
    chunk_size: usize,
}

impl ChannelSink {
    /// `chunk_size` is clamped to at least one byte and `queue_depth` to
    /// at least one chunk in flight.
    pub fn new(chunk_size: usize, queue_depth: usize) -> (Self, mpsc::Receiver<Bytes>) {
        let (tx, rx) = mpsc::channel(queue_depth.max(1));
        let sink = Self {
            tx,
            buffer: BytesMut::new(),
            chunk_size: chunk_size.max(1),
        };
        (sink, rx)
    }

    /// Sends the coalesced remainder and closes the channel. Dropping a
    /// sink without finishing it loses whatever was still buffered.
    pub async fn finish(mut self) -> StreamResult<()> {
        tracing::debug!(remainder = self.buffer.len(), "closing render channel");
        self.flush().await
    }

    async fn send(&mut self, chunk: Bytes) -> StreamResult<()> {
        self.tx
            .send(chunk)
            .await
            .map_err(|_| StreamError::Disconnected)
    }
}

#[async_trait]
impl Sink for ChannelSink {
    async fn write(&mut self, bytes: &[u8]) -> StreamResult<()> {
        self.buffer.extend_from_slice(bytes);
        while self.buffer.len() >= self.chunk_size {
            let chunk = self.buffer.split_to(self.chunk_size).freeze();
            self.send(chunk).await?;
        }
        Ok(())
    }

    async fn flush(&mut self) -> StreamResult<()> {
        if !self.buffer.is_empty() {
            let chunk = self.buffer.split().freeze();
            self.send(chunk).await?;
        }
        Ok(())
    }
}

// ============================================================================
// Stream sink
// ============================================================================

/// A [`ChannelSink`] with a yield cadence: every `yield_every` element
/// boundaries it flushes partial output and yields the task, keeping slow
/// or sparse producers responsive even while chunks fill slowly.
pub struct StreamSink {
    inner: ChannelSink,
    yield_every: usize,
    since_yield: usize,
}

impl StreamSink {
    pub fn new(
        chunk_size: usize,
        queue_depth: usize,
        yield_every: usize,
    ) -> (Self, mpsc::Receiver<Bytes>) {
        let (inner, rx) = ChannelSink::new(chunk_size, queue_depth);
        let sink = Self {
            inner,
            yield_every: yield_every.max(1),
            since_yield: 0,
        };
        (sink, rx)
    }

    pub async fn finish(self) -> StreamResult<()> {
        self.inner.finish().await
    }
}

#[async_trait]
impl Sink for StreamSink {
    async fn write(&mut self, bytes: &[u8]) -> StreamResult<()> {
        self.inner.write(bytes).await
    }

    async fn flush(&mut self) -> StreamResult<()> {
        self.inner.flush().await
    }

    async fn boundary(&mut self) -> StreamResult<()> {
        self.since_yield += 1;
        if self.since_yield >= self.yield_every {
            self.since_yield = 0;
            self.inner.flush().await?;
            tokio::task::yield_now().await;
        }
        Ok(())
    }
}

// ============================================================================
// Buffer sink
// ============================================================================

/// Collects everything in memory. The target for buffered fallbacks and
/// the simplest test double.
#[derive(Debug, Default)]
pub struct BufferSink {
    buffer: BytesMut,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Bytes {
        self.buffer.freeze()
    }
}

#[async_trait]
impl Sink for BufferSink {
    async fn write(&mut self, bytes: &[u8]) -> StreamResult<()> {
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn drain(mut rx: mpsc::Receiver<Bytes>) -> Vec<Bytes> {
        let mut chunks = Vec::new();
        while let Some(chunk) = rx.recv().await {
            chunks.push(chunk);
        }
        chunks
    }

    #[tokio::test]
    async fn coalesces_writes_into_exact_chunks() {
        let (mut sink, rx) = ChannelSink::new(4, 64);
        sink.write(b"ab").await.unwrap();
        sink.write(b"cdef").await.unwrap();
        sink.write(b"ghij").await.unwrap();
        sink.finish().await.unwrap();

        let chunks = drain(rx).await;
        let sizes: Vec<_> = chunks.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, [4, 4, 2]);
        assert_eq!(chunks.concat(), b"abcdefghij");
    }

    #[tokio::test]
    async fn short_output_arrives_as_one_partial_chunk() {
        let (mut sink, rx) = ChannelSink::new(100, 64);
        sink.write(b"tiny").await.unwrap();
        sink.finish().await.unwrap();

        let chunks = drain(rx).await;
        assert_eq!(chunks.len(), 1);
        assert_eq!(&chunks[0][..], b"tiny");
    }

    #[tokio::test]
    async fn exact_multiple_produces_no_trailing_chunk() {
        let (mut sink, rx) = ChannelSink::new(4, 64);
        sink.write(b"abcdefgh").await.unwrap();
        sink.finish().await.unwrap();

        let sizes: Vec<_> = drain(rx).await.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, [4, 4]);
    }

    #[tokio::test]
    async fn disconnected_consumer_surfaces_an_error() {
        let (mut sink, rx) = ChannelSink::new(2, 1);
        drop(rx);

        // A sub-chunk write only buffers; the failure shows on the send.
        sink.write(b"a").await.unwrap();
        let err = sink.write(b"bcd").await.unwrap_err();
        assert!(matches!(err, StreamError::Disconnected));
    }

    #[tokio::test]
    async fn stream_sink_flushes_partials_on_cadence() {
        let (mut sink, mut rx) = StreamSink::new(1024, 64, 2);
        sink.write(b"a").await.unwrap();
        sink.boundary().await.unwrap();
        assert!(rx.try_recv().is_err());

        sink.write(b"b").await.unwrap();
        sink.boundary().await.unwrap();
        let flushed = rx.try_recv().unwrap();
        assert_eq!(&flushed[..], b"ab");

        sink.finish().await.unwrap();
        assert!(drain(rx).await.is_empty());
    }

    #[tokio::test]
    async fn buffer_sink_captures_everything() {
        let mut sink = BufferSink::new();
        sink.write(b"one").await.unwrap();
        sink.boundary().await.unwrap();
        sink.write_u8(b'-').await.unwrap();
        sink.write(b"two").await.unwrap();
        sink.flush().await.unwrap();
        assert_eq!(&sink.into_bytes()[..], b"one-two");
    }
}
