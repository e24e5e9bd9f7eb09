//! Backpressured streaming against consumer-defined producers.

use std::time::Duration;

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use telaio::{
    async_trait, byte_stream, render, rendered_chunks, AnyNode, Node, RenderConfig, RenderContext,
    Sink, StreamError, StreamOptions, StreamResult,
};

/// Writes `size` bytes of a repeating alphabet, split unevenly across two
/// sink writes on the async path.
struct Payload {
    size: usize,
}

impl Payload {
    fn bytes(&self) -> Vec<u8> {
        (0..self.size).map(|i| b'a' + (i % 26) as u8).collect()
    }
}

#[async_trait]
impl Node for Payload {
    type Child = ();

    fn child(&self) {}

    fn render_into(&self, _ctx: &mut RenderContext, out: &mut BytesMut) {
        out.extend_from_slice(&self.bytes());
    }

    async fn stream_into(&self, _ctx: &mut RenderContext, sink: &mut dyn Sink) -> StreamResult<()> {
        let bytes = self.bytes();
        let split = bytes.len() / 3;
        sink.write(&bytes[..split]).await?;
        sink.write(&bytes[split..]).await
    }
}

/// Short fixed payload for element-boundary tests.
struct Piece(&'static str);

#[async_trait]
impl Node for Piece {
    type Child = ();

    fn child(&self) {}

    fn render_into(&self, _ctx: &mut RenderContext, out: &mut BytesMut) {
        out.extend_from_slice(self.0.as_bytes());
    }

    async fn stream_into(&self, _ctx: &mut RenderContext, sink: &mut dyn Sink) -> StreamResult<()> {
        sink.write(self.0.as_bytes()).await
    }
}

fn options(chunk_size: usize, queue_depth: usize, yield_every: usize) -> StreamOptions {
    StreamOptions {
        chunk_size,
        queue_depth,
        yield_every,
    }
}

async fn collect(stream: impl Stream<Item = StreamResult<Bytes>>) -> Vec<Bytes> {
    let mut stream = std::pin::pin!(stream);
    let mut chunks = Vec::new();
    while let Some(chunk) = stream.next().await {
        chunks.push(chunk.unwrap());
    }
    chunks
}

#[tokio::test]
async fn chunk_count_is_the_ceiling_of_size_over_chunk_size() {
    for (size, chunk_size) in [(10, 4), (8, 4), (4, 4), (3, 9), (4096, 512)] {
        let chunks = collect(byte_stream(
            Payload { size },
            RenderConfig::default(),
            options(chunk_size, 2, usize::MAX),
        ))
        .await;

        assert_eq!(chunks.len(), size.div_ceil(chunk_size), "size {size}");
        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.len(), chunk_size);
        }
        let sync = render(&Payload { size });
        assert_eq!(chunks.concat(), sync.as_bytes());
    }
}

#[tokio::test]
async fn tight_queue_preserves_order_and_completes() {
    let chunks = collect(byte_stream(
        Payload { size: 100 },
        RenderConfig::default(),
        options(7, 1, usize::MAX),
    ))
    .await;
    let sync = render(&Payload { size: 100 });
    assert_eq!(chunks.concat(), sync.as_bytes());
}

#[tokio::test]
async fn sequence_elements_flush_on_the_yield_cadence() {
    // Chunks far larger than the payload: every emitted chunk is a partial
    // flush forced at an element boundary.
    let node = vec![Piece("aa"), Piece("bb"), Piece("cc")];
    let chunks = collect(byte_stream(
        node,
        RenderConfig::default(),
        options(1024, 4, 1),
    ))
    .await;

    let rendered: Vec<_> = chunks.iter().map(|c| &c[..]).collect();
    assert_eq!(rendered, [b"aa", b"bb", b"cc"]);
}

#[tokio::test]
async fn slow_consumer_applies_backpressure_without_loss() {
    let (producer, mut rx) = rendered_chunks(
        Payload { size: 64 },
        RenderConfig::default(),
        options(8, 1, usize::MAX),
    );
    let handle = tokio::spawn(producer);

    let mut bytes = Vec::new();
    while let Some(chunk) = rx.recv().await {
        tokio::time::sleep(Duration::from_millis(1)).await;
        bytes.extend_from_slice(&chunk);
    }
    handle.await.unwrap().unwrap();

    let sync = render(&Payload { size: 64 });
    assert_eq!(bytes, sync.as_bytes());
}

#[tokio::test]
async fn dropped_consumer_fails_the_producer() {
    let (producer, rx) = rendered_chunks(
        Payload { size: 32 },
        RenderConfig::default(),
        options(4, 1, usize::MAX),
    );
    drop(rx);
    assert!(matches!(producer.await, Err(StreamError::Disconnected)));
}

#[tokio::test]
async fn buffered_erasure_streams_the_same_bytes() {
    let sync = render(&Payload { size: 50 });
    let chunks = collect(byte_stream(
        AnyNode::buffered(Payload { size: 50 }),
        RenderConfig::default(),
        options(16, 2, usize::MAX),
    ))
    .await;
    assert_eq!(chunks.concat(), sync.as_bytes());
}
