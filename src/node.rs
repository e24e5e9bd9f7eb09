//! The node contract every renderable value implements.
//!
//! A node either defers to a single child value (the default methods
//! delegate) or renders directly by overriding both render paths. The unit
//! type `()` is the canonical empty node and terminates every delegation
//! chain.

use async_trait::async_trait;
use bytes::BytesMut;

use crate::context::RenderContext;
use crate::sink::{Sink, StreamResult};

/// A renderable value in a content tree.
///
/// Composite nodes describe themselves in terms of [`Node::child`] and
/// inherit both render methods, so a plain `impl` with a `child` body is a
/// complete component. Leaves and combinators set `type Child = ()` and
/// override [`Node::render_into`] *and* [`Node::stream_into`]: overriding
/// only the synchronous path leaves the async path delegating to `()`,
/// which streams nothing.
#[async_trait]
pub trait Node: Send + Sync {
    /// The node this node renders as.
    type Child: Node + 'static;

    /// Builds the child value for one render pass.
    fn child(&self) -> Self::Child;

    /// Renders this node synchronously into `out`.
    fn render_into(&self, ctx: &mut RenderContext, out: &mut BytesMut) {
        self.child().render_into(ctx, out);
    }

    /// Renders this node through an async sink, suspending wherever the
    /// sink applies backpressure.
    async fn stream_into(&self, ctx: &mut RenderContext, sink: &mut dyn Sink) -> StreamResult<()> {
        self.child().stream_into(ctx, sink).await
    }
}

#[async_trait]
impl Node for () {
    type Child = ();

    fn child(&self) {}

    fn render_into(&self, _ctx: &mut RenderContext, _out: &mut BytesMut) {}

    async fn stream_into(
        &self,
        _ctx: &mut RenderContext,
        _sink: &mut dyn Sink,
    ) -> StreamResult<()> {
        Ok(())
    }
}

#[async_trait]
impl<'a, N: Node> Node for &'a N {
    type Child = N::Child;

    fn child(&self) -> Self::Child {
        (**self).child()
    }

    fn render_into(&self, ctx: &mut RenderContext, out: &mut BytesMut) {
        (**self).render_into(ctx, out);
    }

    async fn stream_into(&self, ctx: &mut RenderContext, sink: &mut dyn Sink) -> StreamResult<()> {
        (**self).stream_into(ctx, sink).await
    }
}

#[async_trait]
impl<N: Node> Node for Box<N> {
    type Child = N::Child;

    fn child(&self) -> Self::Child {
        (**self).child()
    }

    fn render_into(&self, ctx: &mut RenderContext, out: &mut BytesMut) {
        (**self).render_into(ctx, out);
    }

    async fn stream_into(&self, ctx: &mut RenderContext, sink: &mut dyn Sink) -> StreamResult<()> {
        (**self).stream_into(ctx, sink).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RenderConfig;
    use crate::sink::BufferSink;
    use crate::testing::Chunk;

    struct Greeting;

    impl Node for Greeting {
        type Child = Chunk;

        fn child(&self) -> Chunk {
            Chunk("hello")
        }
    }

    #[test]
    fn unit_renders_nothing() {
        let mut ctx = RenderContext::new(RenderConfig::default());
        let mut out = BytesMut::new();
        ().render_into(&mut ctx, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn delegation_reaches_the_leaf() {
        let mut ctx = RenderContext::new(RenderConfig::default());
        let mut out = BytesMut::new();
        Greeting.render_into(&mut ctx, &mut out);
        assert_eq!(&out[..], b"hello");
    }

    #[test]
    fn references_and_boxes_forward() {
        let mut ctx = RenderContext::new(RenderConfig::default());
        let mut out = BytesMut::new();
        let node = Box::new(Greeting);
        (&node).render_into(&mut ctx, &mut out);
        assert_eq!(&out[..], b"hello");
    }

    #[tokio::test]
    async fn async_delegation_matches_sync() {
        let mut ctx = RenderContext::new(RenderConfig::default());
        let mut sink = BufferSink::new();
        Greeting.stream_into(&mut ctx, &mut sink).await.unwrap();
        assert_eq!(&sink.into_bytes()[..], b"hello");

        let mut ctx = RenderContext::new(RenderConfig::default());
        let mut sink = BufferSink::new();
        ().stream_into(&mut ctx, &mut sink).await.unwrap();
        assert!(sink.into_bytes().is_empty());
    }
}
