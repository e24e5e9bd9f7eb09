//! Synchronous render entry points.

use bytes::{Bytes, BytesMut};
use thiserror::Error;

use crate::context::{RenderConfig, RenderContext};
use crate::node::Node;

/// Error producing an owned string view of rendered output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Leaves may inject arbitrary bytes, so the string view is checked.
    #[error("rendered output is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Finished output of a synchronous render pass.
#[derive(Debug)]
pub struct Rendered {
    bytes: BytesMut,
}

impl Rendered {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes.freeze()
    }

    pub fn into_string(self) -> Result<String, RenderError> {
        Ok(String::from_utf8(Vec::from(self.bytes))?)
    }
}

impl AsRef<[u8]> for Rendered {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Renders a node with the default compact configuration.
pub fn render<N: Node>(node: &N) -> Rendered {
    render_with(node, RenderConfig::default())
}

/// Renders a node with an explicit configuration.
///
/// Styles registered by the tree accumulate in the pass context and are
/// dropped with it; only a [`Document`](crate::Document) splices them back
/// into the output.
pub fn render_with<N: Node>(node: &N, config: RenderConfig) -> Rendered {
    let mut ctx = RenderContext::new(config);
    let mut out = BytesMut::with_capacity(ctx.config().reserve_capacity());
    node.render_into(&mut ctx, &mut out);
    tracing::trace!(
        tree = std::any::type_name::<N>(),
        bytes = out.len(),
        styles = ctx.styles().len(),
        "render pass complete"
    );
    Rendered { bytes: out }
}
