//! Constructors mapping composition rules onto combinators.
//!
//! The mapping is a fixed table of plain functions, not macros: a run of
//! siblings is a tuple, a lone condition is an [`Option`], a two-way
//! branch is an [`Either`], a loop is a [`ForEach`]. Branch constructors
//! take closures so untaken branches are never built.

use crate::compose::{Either, ForEach, Group};
use crate::node::Node;

/// Builds `node` only when `condition` holds; the absent branch renders
/// nothing.
pub fn optional<N, F>(condition: bool, node: F) -> Option<N>
where
    N: Node,
    F: FnOnce() -> N,
{
    condition.then(node)
}

/// Builds exactly one of two branches.
pub fn either<A, B, FA, FB>(condition: bool, when_true: FA, when_false: FB) -> Either<A, B>
where
    A: Node,
    B: Node,
    FA: FnOnce() -> A,
    FB: FnOnce() -> B,
{
    if condition {
        Either::A(when_true())
    } else {
        Either::B(when_false())
    }
}

/// Maps `source` through `transform` into a renderable sequence. An empty
/// source is a legitimate empty node, not an error.
pub fn for_each<I, F, N>(source: I, transform: F) -> ForEach<N>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> N,
    N: Node,
{
    ForEach::new(source, transform)
}

/// Wraps a subtree as a single node without affecting its output.
pub fn group<N: Node>(node: N) -> Group<N> {
    Group(node)
}

/// The canonical empty node: renders zero bytes on both paths. `()` works
/// anywhere this does; the name reads better in composition tables.
pub fn empty() {}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::testing::{render_to_string, Chunk};

    #[test]
    fn optional_skips_building_the_untaken_branch() {
        let built = Cell::new(false);
        let node = optional(false, || {
            built.set(true);
            Chunk("never")
        });
        assert!(node.is_none());
        assert!(!built.get());
        assert_eq!(render_to_string(&node), "");
    }

    #[test]
    fn optional_builds_when_the_condition_holds() {
        let node = optional(true, || Chunk("shown"));
        assert_eq!(render_to_string(&node), "shown");
    }

    #[test]
    fn either_evaluates_exactly_one_branch() {
        let true_built = Cell::new(false);
        let false_built = Cell::new(false);
        let node = either(
            true,
            || {
                true_built.set(true);
                Chunk("yes")
            },
            || {
                false_built.set(true);
                Chunk("no")
            },
        );
        assert!(true_built.get());
        assert!(!false_built.get());
        assert_eq!(render_to_string(&node), "yes");
    }

    #[test]
    fn for_each_handles_an_empty_source() {
        let node = for_each(Vec::<&'static str>::new(), Chunk);
        assert_eq!(render_to_string(&node), "");
    }

    #[test]
    fn group_renders_its_subtree_unchanged() {
        let node = group((Chunk("a"), Chunk("b")));
        assert_eq!(render_to_string(&node), "ab");
    }

    #[test]
    fn empty_renders_nothing() {
        assert_eq!(render_to_string(&empty()), "");
        assert_eq!(render_to_string(&(Chunk("a"), empty(), Chunk("b"))), "ab");
    }
}
