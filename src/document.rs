//! Two-phase document assembly.

use async_trait::async_trait;
use bytes::BytesMut;

use crate::context::{RenderConfig, RenderContext};
use crate::node::Node;
use crate::sink::{Sink, StreamResult};

/// A full document shell around a head subtree and a body subtree.
///
/// Rendering runs in two phases. The body renders first, into an isolated
/// context sharing the configuration but none of the state, so every style
/// it registers is known before a single head byte is emitted. The
/// collected styles are folded outward, the skeleton and head are written
/// with a `<style>` element holding the table, and the body bytes are
/// spliced in unchanged. Styles the head itself registers join the table
/// before it serializes.
#[derive(Debug, Clone)]
pub struct Document<H, B> {
    head: H,
    body: B,
}

impl<H: Node, B: Node> Document<H, B> {
    pub fn new(head: H, body: B) -> Self {
        Self { head, body }
    }
}

#[async_trait]
impl<H: Node, B: Node> Node for Document<H, B> {
    type Child = ();

    fn child(&self) {}

    fn render_into(&self, ctx: &mut RenderContext, out: &mut BytesMut) {
        let mut body_ctx = ctx.isolated();
        body_ctx.indent();
        let mut body = BytesMut::with_capacity(ctx.config().reserve_capacity());
        self.body.render_into(&mut body_ctx, &mut body);
        ctx.absorb_styles(body_ctx.into_styles());

        write_line(out, ctx.config(), b"<!doctype html>");
        write_line(out, ctx.config(), b"<html>");
        write_line(out, ctx.config(), b"<head>");

        let scope = ctx.scope();
        ctx.indent();
        self.head.render_into(ctx, out);
        ctx.restore(scope);

        if !ctx.styles().is_empty() {
            write_line(out, ctx.config(), b"<style>");
            ctx.styles().write_css(ctx.config(), out);
            write_line(out, ctx.config(), b"</style>");
        }
        write_line(out, ctx.config(), b"</head>");

        write_line(out, ctx.config(), b"<body>");
        if !body.is_empty() {
            out.extend_from_slice(&body);
            out.extend_from_slice(ctx.config().newline().as_bytes());
        }
        write_line(out, ctx.config(), b"</body>");
        write_line(out, ctx.config(), b"</html>");
    }

    /// A document cannot stream incrementally: the head needs the complete
    /// body before its first byte. It renders fully, then hands the sink
    /// the whole thing to chunk.
    async fn stream_into(&self, ctx: &mut RenderContext, sink: &mut dyn Sink) -> StreamResult<()> {
        let mut out = BytesMut::with_capacity(ctx.config().reserve_capacity());
        self.render_into(ctx, &mut out);
        sink.write(&out).await
    }
}

fn write_line(out: &mut BytesMut, config: &RenderConfig, token: &[u8]) {
    out.extend_from_slice(token);
    out.extend_from_slice(config.newline().as_bytes());
}
