//! Helpers shared by the inline unit tests.

use async_trait::async_trait;
use bytes::BytesMut;

use crate::context::{RenderConfig, RenderContext};
use crate::node::Node;
use crate::sink::{Sink, StreamResult};

/// Minimal leaf writing a fixed chunk of bytes on both render paths.
pub(crate) struct Chunk(pub &'static str);

#[async_trait]
impl Node for Chunk {
    type Child = ();

    fn child(&self) {}

    fn render_into(&self, _ctx: &mut RenderContext, out: &mut BytesMut) {
        out.extend_from_slice(self.0.as_bytes());
    }

    async fn stream_into(&self, _ctx: &mut RenderContext, sink: &mut dyn Sink) -> StreamResult<()> {
        sink.write(self.0.as_bytes()).await
    }
}

/// Leaf that registers a style and writes the minted class name, to
/// observe style collection and context propagation.
pub(crate) struct Swatch(pub &'static str, pub &'static str);

#[async_trait]
impl Node for Swatch {
    type Child = ();

    fn child(&self) {}

    fn render_into(&self, ctx: &mut RenderContext, out: &mut BytesMut) {
        let class = ctx.register_style(self.0, self.1, None, None);
        out.extend_from_slice(class.as_bytes());
    }

    async fn stream_into(&self, ctx: &mut RenderContext, sink: &mut dyn Sink) -> StreamResult<()> {
        let class = ctx.register_style(self.0, self.1, None, None);
        sink.write(class.as_bytes()).await
    }
}

pub(crate) fn render_to_string<N: Node>(node: &N) -> String {
    let mut ctx = RenderContext::new(RenderConfig::default());
    let mut out = BytesMut::new();
    node.render_into(&mut ctx, &mut out);
    String::from_utf8(out.to_vec()).expect("test output is UTF-8")
}
