//! Type-erased nodes for heterogeneous collections and storage.

use std::fmt;

use async_trait::async_trait;
use bytes::BytesMut;
use futures::future::BoxFuture;

use crate::context::RenderContext;
use crate::node::Node;
use crate::sink::{Sink, StreamResult};

/// Object-safe surface over any node.
trait ErasedNode: Send + Sync {
    fn render_erased(&self, ctx: &mut RenderContext, out: &mut BytesMut);

    fn stream_erased<'a>(
        &'a self,
        ctx: &'a mut RenderContext,
        sink: &'a mut dyn Sink,
    ) -> BoxFuture<'a, StreamResult<()>>;
}

impl<N: Node> ErasedNode for N {
    fn render_erased(&self, ctx: &mut RenderContext, out: &mut BytesMut) {
        self.render_into(ctx, out);
    }

    fn stream_erased<'a>(
        &'a self,
        ctx: &'a mut RenderContext,
        sink: &'a mut dyn Sink,
    ) -> BoxFuture<'a, StreamResult<()>> {
        self.stream_into(ctx, sink)
    }
}

enum Erased {
    Streaming(Box<dyn ErasedNode>),
    Buffered(Box<dyn ErasedNode>),
}

/// A node with its concrete type erased, e.g. for mixed-type collections.
///
/// The erasure records as an explicit kind how the node behaves under a
/// streaming pass: [`AnyNode::new`] keeps every suspension point, while
/// [`AnyNode::buffered`] renders synchronously to memory and reaches the
/// sink as a single write. Both kinds produce identical bytes on both
/// render paths.
pub struct AnyNode {
    kind: Erased,
}

impl AnyNode {
    /// Erases a node, preserving its async path.
    pub fn new(node: impl Node + 'static) -> Self {
        Self {
            kind: Erased::Streaming(Box::new(node)),
        }
    }

    /// Erases a node for buffered rendering only. Under a streaming pass
    /// the subtree's output arrives all at once, so suspension granularity
    /// is lost but byte output is unchanged.
    pub fn buffered(node: impl Node + 'static) -> Self {
        Self {
            kind: Erased::Buffered(Box::new(node)),
        }
    }

    /// Whether a streaming pass preserves this node's suspension points.
    pub fn is_streaming(&self) -> bool {
        matches!(self.kind, Erased::Streaming(_))
    }
}

impl fmt::Debug for AnyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            Erased::Streaming(_) => "Streaming",
            Erased::Buffered(_) => "Buffered",
        };
        f.debug_struct("AnyNode").field("kind", &kind).finish()
    }
}

#[async_trait]
impl Node for AnyNode {
    type Child = ();

    fn child(&self) {}

    fn render_into(&self, ctx: &mut RenderContext, out: &mut BytesMut) {
        match &self.kind {
            Erased::Streaming(node) | Erased::Buffered(node) => node.render_erased(ctx, out),
        }
    }

    async fn stream_into(&self, ctx: &mut RenderContext, sink: &mut dyn Sink) -> StreamResult<()> {
        match &self.kind {
            Erased::Streaming(node) => node.stream_erased(ctx, sink).await,
            Erased::Buffered(node) => {
                tracing::debug!("buffered node under a streaming pass; rendering to memory first");
                let mut out = BytesMut::new();
                node.render_erased(ctx, &mut out);
                sink.write(&out).await
            }
        }
    }
}
