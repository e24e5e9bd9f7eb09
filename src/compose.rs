//! Structural combinators over the node contract.
//!
//! All of these render directly (`type Child = ()`): a by-value `child()`
//! would force `Clone` on the wrapped nodes. Each one threads the same
//! context through its children, so later siblings observe styles
//! accumulated by earlier ones.

use async_trait::async_trait;
use bytes::BytesMut;

use crate::context::RenderContext;
use crate::node::Node;
use crate::sink::{Sink, StreamResult};

// ============================================================================
// Fixed sequences
// ============================================================================

macro_rules! impl_node_for_tuples {
    ($( ( $($name:ident),+ ) ),+ $(,)?) => {
        $(
            #[async_trait]
            impl<$($name: Node),+> Node for ($($name,)+) {
                type Child = ();

                fn child(&self) {}

                fn render_into(&self, ctx: &mut RenderContext, out: &mut BytesMut) {
                    #[allow(non_snake_case)]
                    let ($($name,)+) = self;
                    $($name.render_into(ctx, out);)+
                }

                async fn stream_into(
                    &self,
                    ctx: &mut RenderContext,
                    sink: &mut dyn Sink,
                ) -> StreamResult<()> {
                    #[allow(non_snake_case)]
                    let ($($name,)+) = self;
                    $($name.stream_into(ctx, sink).await?;)+
                    Ok(())
                }
            }
        )+
    };
}

impl_node_for_tuples!(
    (A, B),
    (A, B, C),
    (A, B, C, D),
    (A, B, C, D, E),
    (A, B, C, D, E, F),
    (A, B, C, D, E, F, G),
    (A, B, C, D, E, F, G, H),
);

// ============================================================================
// Dynamic sequences
// ============================================================================

/// A homogeneous run of nodes. Under async rendering every element is a
/// suspension boundary: the sink is notified after each element, which is
/// where cadence-based sinks flush and yield.
#[async_trait]
impl<N: Node> Node for Vec<N> {
    type Child = ();

    fn child(&self) {}

    fn render_into(&self, ctx: &mut RenderContext, out: &mut BytesMut) {
        for item in self {
            item.render_into(ctx, out);
        }
    }

    async fn stream_into(&self, ctx: &mut RenderContext, sink: &mut dyn Sink) -> StreamResult<()> {
        for item in self {
            item.stream_into(ctx, sink).await?;
            sink.boundary().await?;
        }
        Ok(())
    }
}

/// Maps a collection through a transform at construction time. The
/// resulting nodes are materialized eagerly, so by render time this is a
/// plain sequence.
#[derive(Debug, Clone)]
pub struct ForEach<N> {
    items: Vec<N>,
}

impl<N> ForEach<N> {
    pub fn new<I, F>(source: I, transform: F) -> Self
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> N,
    {
        Self {
            items: source.into_iter().map(transform).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl<N: Node> Node for ForEach<N> {
    type Child = ();

    fn child(&self) {}

    fn render_into(&self, ctx: &mut RenderContext, out: &mut BytesMut) {
        self.items.render_into(ctx, out);
    }

    async fn stream_into(&self, ctx: &mut RenderContext, sink: &mut dyn Sink) -> StreamResult<()> {
        self.items.stream_into(ctx, sink).await
    }
}

// ============================================================================
// Branches
// ============================================================================

/// One of two alternative subtrees. Only the held branch ever renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Either<A, B> {
    A(A),
    B(B),
}

#[async_trait]
impl<A: Node, B: Node> Node for Either<A, B> {
    type Child = ();

    fn child(&self) {}

    fn render_into(&self, ctx: &mut RenderContext, out: &mut BytesMut) {
        match self {
            Either::A(node) => node.render_into(ctx, out),
            Either::B(node) => node.render_into(ctx, out),
        }
    }

    async fn stream_into(&self, ctx: &mut RenderContext, sink: &mut dyn Sink) -> StreamResult<()> {
        match self {
            Either::A(node) => node.stream_into(ctx, sink).await,
            Either::B(node) => node.stream_into(ctx, sink).await,
        }
    }
}

/// `None` renders nothing; an absent branch and an empty node are equally
/// legitimate empty content.
#[async_trait]
impl<N: Node> Node for Option<N> {
    type Child = ();

    fn child(&self) {}

    fn render_into(&self, ctx: &mut RenderContext, out: &mut BytesMut) {
        if let Some(node) = self {
            node.render_into(ctx, out);
        }
    }

    async fn stream_into(&self, ctx: &mut RenderContext, sink: &mut dyn Sink) -> StreamResult<()> {
        match self {
            Some(node) => node.stream_into(ctx, sink).await,
            None => Ok(()),
        }
    }
}

/// Groups a subtree into a single node without affecting its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<N>(pub N);

#[async_trait]
impl<N: Node> Node for Group<N> {
    type Child = ();

    fn child(&self) {}

    fn render_into(&self, ctx: &mut RenderContext, out: &mut BytesMut) {
        self.0.render_into(ctx, out);
    }

    async fn stream_into(&self, ctx: &mut RenderContext, sink: &mut dyn Sink) -> StreamResult<()> {
        self.0.stream_into(ctx, sink).await
    }
}
