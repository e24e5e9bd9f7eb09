//! telaio weaves typed content trees into canonical byte streams.
//!
//! Content is composed from values implementing [`Node`]: leaves write
//! bytes, composites name a child and inherit its rendering, combinators
//! sequence and branch. One mutable [`RenderContext`] travels the whole
//! tree, carrying configuration, scoped attributes, and a deduplicating
//! style table; [`Document`] renders its body first so styles registered
//! anywhere in it surface inside the head. Output is synchronous into a
//! buffer ([`render`]) or asynchronous through backpressure-aware sinks
//! ([`byte_stream`]).
//!
//! ```
//! use telaio::bytes::BytesMut;
//! use telaio::{async_trait, render, Node, RenderContext, Sink, StreamResult};
//!
//! struct Label(&'static str);
//!
//! #[async_trait]
//! impl Node for Label {
//!     type Child = ();
//!
//!     fn child(&self) {}
//!
//!     fn render_into(&self, _ctx: &mut RenderContext, out: &mut BytesMut) {
//!         out.extend_from_slice(self.0.as_bytes());
//!     }
//!
//!     async fn stream_into(
//!         &self,
//!         _ctx: &mut RenderContext,
//!         sink: &mut dyn Sink,
//!     ) -> StreamResult<()> {
//!         sink.write(self.0.as_bytes()).await
//!     }
//! }
//!
//! let page = (Label("hello "), telaio::optional(true, || Label("world")));
//! assert_eq!(render(&page).into_string().unwrap(), "hello world");
//! ```
//!
//! Higher-level markup vocabularies (elements, attributes, escaping) build
//! on this crate; `telaio-html` in this workspace is one.

mod builder;
mod compose;
mod context;
mod document;
mod erased;
mod node;
mod render;
mod sink;
mod stream;
mod style;

#[cfg(test)]
mod testing;

pub use async_trait::async_trait;
pub use bytes;

pub use builder::{either, empty, for_each, group, optional};
pub use compose::{Either, ForEach, Group};
pub use context::{Attribute, AttributeList, RenderConfig, RenderContext, ScopeSnapshot};
pub use document::Document;
pub use erased::AnyNode;
pub use node::Node;
pub use render::{render, render_with, RenderError, Rendered};
pub use sink::{BufferSink, ChannelSink, Sink, StreamError, StreamResult, StreamSink};
pub use stream::{
    byte_stream, rendered_chunks, StreamOptions, DEFAULT_CHUNK_SIZE, DEFAULT_QUEUE_DEPTH,
    DEFAULT_YIELD_EVERY,
};
pub use style::{ClassNamer, StyleKey, StyleSheet};
