//! Tag constructor table.

use telaio::Node;

use crate::element::{element, void_element, Element};

macro_rules! content_tags {
    ($($name:ident),+ $(,)?) => {
        $(
            #[doc = concat!("Creates a `<", stringify!($name), ">` element around `content`.")]
            pub fn $name<C: Node>(content: C) -> Element<C> {
                element(stringify!($name), content)
            }
        )+
    };
}

macro_rules! void_tags {
    ($($name:ident),+ $(,)?) => {
        $(
            #[doc = concat!("Creates a void `<", stringify!($name), ">` element.")]
            pub fn $name() -> Element<()> {
                void_element(stringify!($name))
            }
        )+
    };
}

content_tags!(
    a, article, aside, blockquote, body, button, code, div, em, footer, form, h1, h2, h3,
    h4, h5, h6, head, header, html, label, li, main, nav, ol, p, pre, section, small,
    span, strong, table, tbody, td, th, thead, title, tr, ul,
);

void_tags!(br, hr, img, input, link, meta);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::text;
    use telaio::render;

    #[test]
    fn constructors_use_their_own_name_as_tag() {
        assert_eq!(div(()).tag(), "div");
        assert_eq!(br().tag(), "br");
    }

    #[test]
    fn nested_tags_compose() {
        let node = ul((li(text("one")), li(text("two"))));
        assert_eq!(
            render(&node).into_string().unwrap(),
            "<ul><li>one</li><li>two</li></ul>"
        );
    }
}
