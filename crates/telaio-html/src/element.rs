//! Elements: tag emission, attribute draining, void forms.

use async_trait::async_trait;
use bytes::BytesMut;
use telaio::{Node, RenderContext, Sink, StreamResult};

use crate::escape::escape_attribute;

/// A markup element wrapping typed content.
///
/// While emitting its open tag the element drains every attribute scoped
/// in the context; wrappers apply attributes by scoping them before the
/// element renders. Content renders one depth level in. Void elements
/// carry no content and no closing tag.
#[derive(Debug, Clone)]
pub struct Element<C> {
    tag: &'static str,
    void: bool,
    content: C,
}

/// Creates an element around `content`.
pub fn element<C: Node>(tag: &'static str, content: C) -> Element<C> {
    Element {
        tag,
        void: false,
        content,
    }
}

/// Creates a void element: no content, no closing tag.
pub fn void_element(tag: &'static str) -> Element<()> {
    Element {
        tag,
        void: true,
        content: (),
    }
}

impl<C> Element<C> {
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    fn write_open(&self, ctx: &mut RenderContext, out: &mut BytesMut) {
        out.extend_from_slice(b"<");
        out.extend_from_slice(self.tag.as_bytes());
        for attr in ctx.take_attributes().iter() {
            out.extend_from_slice(b" ");
            out.extend_from_slice(attr.name.as_bytes());
            // A valueless attribute renders bare, e.g. `hidden`.
            if !attr.value.is_empty() {
                out.extend_from_slice(b"=\"");
                escape_attribute(&attr.value, out);
                out.extend_from_slice(b"\"");
            }
        }
        out.extend_from_slice(b">");
    }

    fn write_close(&self, out: &mut BytesMut) {
        out.extend_from_slice(b"</");
        out.extend_from_slice(self.tag.as_bytes());
        out.extend_from_slice(b">");
    }
}

#[async_trait]
impl<C: Node> Node for Element<C> {
    type Child = ();

    fn child(&self) {}

    fn render_into(&self, ctx: &mut RenderContext, out: &mut BytesMut) {
        self.write_open(ctx, out);
        if self.void {
            return;
        }
        let scope = ctx.scope();
        ctx.indent();
        self.content.render_into(ctx, out);
        ctx.restore(scope);
        self.write_close(out);
    }

    async fn stream_into(&self, ctx: &mut RenderContext, sink: &mut dyn Sink) -> StreamResult<()> {
        let mut open = BytesMut::new();
        self.write_open(ctx, &mut open);
        sink.write(&open).await?;
        if self.void {
            return Ok(());
        }

        let scope = ctx.scope();
        ctx.indent();
        let content = self.content.stream_into(ctx, sink).await;
        ctx.restore(scope);
        content?;

        let mut close = BytesMut::new();
        self.write_close(&mut close);
        sink.write(&close).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::text;
    use telaio::{render, BufferSink, RenderConfig};

    #[test]
    fn renders_open_content_close() {
        let node = element("div", text("hi"));
        assert_eq!(render(&node).into_string().unwrap(), "<div>hi</div>");
    }

    #[test]
    fn drains_scoped_attributes_into_the_open_tag() {
        let mut ctx = RenderContext::new(RenderConfig::default());
        ctx.set_attribute("id", "greeting");
        ctx.set_attribute("hidden", "");

        let mut out = BytesMut::new();
        element("p", text("hi")).render_into(&mut ctx, &mut out);
        assert_eq!(&out[..], b"<p id=\"greeting\" hidden>hi</p>");
        assert!(ctx.attributes().is_empty());
    }

    #[test]
    fn attribute_values_are_escaped() {
        let mut ctx = RenderContext::new(RenderConfig::default());
        ctx.set_attribute("title", r#"a "b" & c"#);

        let mut out = BytesMut::new();
        element("span", ()).render_into(&mut ctx, &mut out);
        assert_eq!(
            String::from_utf8(out.to_vec()).unwrap(),
            r#"<span title="a &quot;b&quot; &amp; c"></span>"#
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let node = void_element("br");
        assert_eq!(render(&node).into_string().unwrap(), "<br>");
    }

    #[tokio::test]
    async fn streaming_matches_sync_output() {
        let node = element("div", (element("p", text("a")), void_element("hr")));
        let sync = render(&node).into_string().unwrap();

        let mut ctx = RenderContext::new(RenderConfig::default());
        let mut sink = BufferSink::new();
        node.stream_into(&mut ctx, &mut sink).await.unwrap();
        assert_eq!(&sink.into_bytes()[..], sync.as_bytes());
    }
}
