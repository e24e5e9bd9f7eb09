//! Attribute wrappers and the chaining extension trait.

use async_trait::async_trait;
use bytes::BytesMut;
use telaio::{Node, RenderContext, Sink, StreamResult};

use crate::css::Styled;

/// Scopes one attribute around a subtree.
///
/// The attribute is applied on entry and the previous scope restored on
/// exit, so it reaches exactly the elements opened inside the subtree and
/// never a sibling.
#[derive(Debug, Clone)]
pub struct Attr<N> {
    name: String,
    value: String,
    merge_separator: Option<&'static str>,
    inner: N,
}

impl<N: Node> Attr<N> {
    fn apply(&self, ctx: &mut RenderContext) {
        match self.merge_separator {
            Some(separator) => ctx.merge_attribute(self.name.clone(), &self.value, separator),
            None => ctx.set_attribute(self.name.clone(), self.value.clone()),
        }
    }
}

#[async_trait]
impl<N: Node> Node for Attr<N> {
    type Child = ();

    fn child(&self) {}

    fn render_into(&self, ctx: &mut RenderContext, out: &mut BytesMut) {
        let scope = ctx.scope();
        self.apply(ctx);
        self.inner.render_into(ctx, out);
        ctx.restore(scope);
    }

    async fn stream_into(&self, ctx: &mut RenderContext, sink: &mut dyn Sink) -> StreamResult<()> {
        let scope = ctx.scope();
        self.apply(ctx);
        let result = self.inner.stream_into(ctx, sink).await;
        ctx.restore(scope);
        result
    }
}

/// Chaining adapters available on every node.
///
/// Wrappers nest outside-in: `div(…).attr("id", "x")` applies the
/// attribute, then renders the element, which drains it into the open tag.
pub trait NodeExt: Node + Sized {
    /// Scopes `name="value"` over this subtree.
    fn attr(self, name: impl Into<String>, value: impl Into<String>) -> Attr<Self> {
        Attr {
            name: name.into(),
            value: value.into(),
            merge_separator: None,
            inner: self,
        }
    }

    /// Merges a space-separated class token; exact duplicates are skipped.
    fn class(self, value: impl Into<String>) -> Attr<Self> {
        Attr {
            name: "class".into(),
            value: value.into(),
            merge_separator: Some(" "),
            inner: self,
        }
    }

    fn id(self, value: impl Into<String>) -> Attr<Self> {
        self.attr("id", value)
    }

    fn href(self, value: impl Into<String>) -> Attr<Self> {
        self.attr("href", value)
    }

    /// Registers a deduplicated style and scopes its minted class over
    /// this subtree. See [`Styled`] for media and pseudo variants.
    fn css(self, property: impl Into<String>, value: impl Into<String>) -> Styled<Self> {
        Styled::new(property, value, self)
    }
}

impl<N: Node> NodeExt for N {}
