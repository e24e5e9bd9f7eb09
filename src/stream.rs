//! Async render entry points.
//!
//! [`byte_stream`] is the self-contained form: producer and consumer share
//! one task, so the bounded channel between them can never deadlock no
//! matter when the caller polls. [`rendered_chunks`] exposes the raw
//! producer/receiver pair for transports that drive their own tasks.

use std::future::Future;

use async_stream::stream;
use bytes::Bytes;
use futures::Stream;
use tokio::sync::mpsc;

use crate::context::{RenderConfig, RenderContext};
use crate::node::Node;
use crate::sink::{ChannelSink, StreamResult, StreamSink};

/// Chunk size used when options do not override it.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;
/// Chunks in flight before the producer suspends.
pub const DEFAULT_QUEUE_DEPTH: usize = 1;
/// Element boundaries between forced yields.
pub const DEFAULT_YIELD_EVERY: usize = 64;

/// Tuning knobs for the async entry points.
#[derive(Debug, Clone, Copy)]
pub struct StreamOptions {
    /// Bytes coalesced before a chunk is emitted.
    pub chunk_size: usize,
    /// Emitted chunks in flight before the producer suspends.
    pub queue_depth: usize,
    /// Element boundaries between forced partial flushes and yields.
    pub yield_every: usize,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            queue_depth: DEFAULT_QUEUE_DEPTH,
            yield_every: DEFAULT_YIELD_EVERY,
        }
    }
}

/// One scheduling decision of the render loop: either the channel yielded
/// (a chunk or closure), or the producer future completed.
enum Turn {
    Chunk(Option<Bytes>),
    Finished(StreamResult<()>),
}

/// Renders `node` as a stream of byte chunks.
///
/// Every loop turn either forwards a finished chunk or advances the render
/// pass, so backpressure from the channel suspends the producer without
/// stalling the stream. Chunks arrive in render order; a render failure is
/// the stream's final item.
pub fn byte_stream<N>(
    node: N,
    config: RenderConfig,
    options: StreamOptions,
) -> impl Stream<Item = StreamResult<Bytes>>
where
    N: Node + 'static,
{
    let (mut sink, mut rx) =
        StreamSink::new(options.chunk_size, options.queue_depth, options.yield_every);
    stream! {
        let mut ctx = RenderContext::new(config);
        let producer = async move {
            node.stream_into(&mut ctx, &mut sink).await?;
            sink.finish().await
        };
        tokio::pin!(producer);
        let mut producing = true;

        loop {
            let turn = tokio::select! {
                chunk = rx.recv() => Turn::Chunk(chunk),
                result = &mut producer, if producing => Turn::Finished(result),
            };
            match turn {
                Turn::Chunk(Some(chunk)) => yield Ok(chunk),
                Turn::Chunk(None) => break,
                Turn::Finished(result) => {
                    producing = false;
                    if let Err(error) = result {
                        yield Err(error);
                        break;
                    }
                }
            }
        }
    }
}

/// The raw channel form: a producer future plus the chunk receiver.
///
/// The two halves must run concurrently (spawn the producer, read the
/// receiver); awaiting the producer to completion first deadlocks as soon
/// as the queue fills.
pub fn rendered_chunks<N>(
    node: N,
    config: RenderConfig,
    options: StreamOptions,
) -> (impl Future<Output = StreamResult<()>>, mpsc::Receiver<Bytes>)
where
    N: Node + 'static,
{
    let (mut sink, rx) = ChannelSink::new(options.chunk_size, options.queue_depth);
    let producer = async move {
        let mut ctx = RenderContext::new(config);
        node.stream_into(&mut ctx, &mut sink).await?;
        sink.finish().await
    };
    (producer, rx)
}
