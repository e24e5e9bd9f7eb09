//! The deduplicated style wrapper.

use async_trait::async_trait;
use bytes::BytesMut;
use telaio::{Node, RenderContext, Sink, StreamResult};

/// Scopes one registered style's class over a subtree.
///
/// The declaration registers in the pass's style table when the subtree
/// renders; an identical declaration anywhere else in the pass reuses the
/// same minted class, so the serialized stylesheet carries one rule per
/// distinct declaration. Built by [`NodeExt::css`](crate::NodeExt::css).
#[derive(Debug, Clone)]
pub struct Styled<N> {
    property: String,
    value: String,
    media: Option<String>,
    pseudo: Option<String>,
    inner: N,
}

impl<N: Node> Styled<N> {
    pub(crate) fn new(property: impl Into<String>, value: impl Into<String>, inner: N) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            media: None,
            pseudo: None,
            inner,
        }
    }

    /// Scopes the rule under a media query, e.g. `"(max-width: 700px)"`.
    pub fn media(mut self, query: impl Into<String>) -> Self {
        self.media = Some(query.into());
        self
    }

    /// Appends a pseudo selector to the rule; include the colon(s):
    /// `":hover"`, `"::after"`.
    pub fn pseudo(mut self, pseudo: impl Into<String>) -> Self {
        self.pseudo = Some(pseudo.into());
        self
    }

    fn apply(&self, ctx: &mut RenderContext) {
        ctx.register_style(
            &self.property,
            &self.value,
            self.media.as_deref(),
            self.pseudo.as_deref(),
        );
    }
}

#[async_trait]
impl<N: Node> Node for Styled<N> {
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
