//! HTML vocabulary for the [telaio](https://crates.io/crates/telaio)
//! rendering engine.
//!
//! Elements, text leaves, attribute wrappers, and deduplicated styles,
//! all implemented against telaio's node contract: no traversal or
//! concurrency logic lives here. Attributes scope through the render
//! context and are drained by the nearest element's open tag; styles
//! register in the pass's table and surface in the document head.
//!
//! ```
//! use telaio::{render, Document};
//! use telaio_html::{div, p, text, NodeExt};
//!
//! let body = div((
//!     p(text("Fast & simple")).css("font-size", "16px"),
//!     p(text("Also simple")).css("font-size", "16px"),
//! ));
//! let html = render(&Document::new((), body)).into_string().unwrap();
//!
//! assert!(html.contains("<style>.font-size-0{font-size:16px}</style>"));
//! assert_eq!(html.matches("font-size:16px").count(), 1);
//! assert!(html.contains("Fast &amp; simple"));
//! ```

mod attrs;
mod css;
mod element;
mod escape;
mod tags;
mod text;

pub use attrs::{Attr, NodeExt};
pub use css::Styled;
pub use element::{element, void_element, Element};
pub use escape::{escape_attribute, escape_text};
pub use tags::*;
pub use text::{raw, text, Raw, Text};
