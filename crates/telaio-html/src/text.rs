//! Text leaves.

use async_trait::async_trait;
use bytes::BytesMut;
use telaio::{Node, RenderContext, Sink, StreamResult};

use crate::escape::escape_text;

/// Escaped character data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    value: String,
}

/// Creates a text leaf; HTML-significant bytes are escaped on render.
pub fn text(value: impl Into<String>) -> Text {
    Text {
        value: value.into(),
    }
}

#[async_trait]
impl Node for Text {
    type Child = ();

    fn child(&self) {}

    fn render_into(&self, _ctx: &mut RenderContext, out: &mut BytesMut) {
        escape_text(&self.value, out);
    }

    async fn stream_into(&self, _ctx: &mut RenderContext, sink: &mut dyn Sink) -> StreamResult<()> {
        let mut out = BytesMut::with_capacity(self.value.len());
        escape_text(&self.value, &mut out);
        sink.write(&out).await
    }
}

/// Verbatim bytes, bypassing escaping. The caller owns well-formedness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raw {
    value: String,
}

/// Creates a leaf whose value is emitted unescaped.
pub fn raw(value: impl Into<String>) -> Raw {
    Raw {
        value: value.into(),
    }
}

#[async_trait]
impl Node for Raw {
    type Child = ();

    fn child(&self) {}

    fn render_into(&self, _ctx: &mut RenderContext, out: &mut BytesMut) {
        out.extend_from_slice(self.value.as_bytes());
    }

    async fn stream_into(&self, _ctx: &mut RenderContext, sink: &mut dyn Sink) -> StreamResult<()> {
        sink.write(self.value.as_bytes()).await
    }
}
