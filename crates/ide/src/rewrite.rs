//! Copy-on-write document rewriting.
//!
//! [`rewrite_document`] walks every operation and fragment depth first and
//! offers each node to a [`Rewriter`]. Children are rewritten before their
//! parent is offered, so a hook sees the already-rewritten children. A node
//! is only rebuilt when one of its descendants changed; everything else stays
//! shared with the input document.
//!
//! Hooks receive the node's span in the *input* document, which is how a
//! rewriter identifies its target.

use apollo_compiler::ast::{
    Definition, Document, Field, FragmentDefinition, InlineFragment, OperationDefinition, Selection,
};
use apollo_compiler::Node;
use relay_types::OffsetRange;

use crate::helpers::{node_span, same_span};

/// Replacement hooks. Returning `None` keeps the node.
pub trait Rewriter {
    fn operation(
        &mut self,
        _span: Option<OffsetRange>,
        _operation: &Node<OperationDefinition>,
    ) -> Option<Node<OperationDefinition>> {
        None
    }

    fn fragment(
        &mut self,
        _span: Option<OffsetRange>,
        _fragment: &Node<FragmentDefinition>,
    ) -> Option<Node<FragmentDefinition>> {
        None
    }

    fn field(&mut self, _span: Option<OffsetRange>, _field: &Node<Field>) -> Option<Node<Field>> {
        None
    }

    /// `owner` is the span of the operation, fragment, field or inline
    /// fragment the selection set belongs to.
    fn selection_set(
        &mut self,
        _owner: Option<OffsetRange>,
        _selections: &[Selection],
    ) -> Option<Vec<Selection>> {
        None
    }
}

/// Rewrite `document`, returning `None` if no hook replaced anything.
pub fn rewrite_document(document: &Document, rewriter: &mut impl Rewriter) -> Option<Document> {
    let mut rewritten: Option<Document> = None;

    for (index, definition) in document.definitions.iter().enumerate() {
        let replaced = match definition {
            Definition::OperationDefinition(operation) => {
                rewrite_operation(operation, rewriter).map(Definition::OperationDefinition)
            }
            Definition::FragmentDefinition(fragment) => {
                rewrite_fragment(fragment, rewriter).map(Definition::FragmentDefinition)
            }
            _ => None,
        };
        if let Some(replaced) = replaced {
            rewritten.get_or_insert_with(|| document.clone()).definitions[index] = replaced;
        }
    }

    rewritten
}

fn rewrite_operation(
    operation: &Node<OperationDefinition>,
    rewriter: &mut impl Rewriter,
) -> Option<Node<OperationDefinition>> {
    let span = node_span(operation);
    let mut updated = rewrite_selections(span, &operation.selection_set, rewriter).map(|selections| {
        let mut node = operation.clone();
        node.make_mut().selection_set = selections;
        node
    });

    let current = updated.as_ref().unwrap_or(operation);
    if let Some(replaced) = rewriter.operation(span, current) {
        updated = Some(replaced);
    }
    updated
}

fn rewrite_fragment(
    fragment: &Node<FragmentDefinition>,
    rewriter: &mut impl Rewriter,
) -> Option<Node<FragmentDefinition>> {
    let span = node_span(fragment);
    let mut updated = rewrite_selections(span, &fragment.selection_set, rewriter).map(|selections| {
        let mut node = fragment.clone();
        node.make_mut().selection_set = selections;
        node
    });

    let current = updated.as_ref().unwrap_or(fragment);
    if let Some(replaced) = rewriter.fragment(span, current) {
        updated = Some(replaced);
    }
    updated
}

fn rewrite_field(field: &Node<Field>, rewriter: &mut impl Rewriter) -> Option<Node<Field>> {
    let span = node_span(field);
    let mut updated = rewrite_selections(span, &field.selection_set, rewriter).map(|selections| {
        let mut node = field.clone();
        node.make_mut().selection_set = selections;
        node
    });

    let current = updated.as_ref().unwrap_or(field);
    if let Some(replaced) = rewriter.field(span, current) {
        updated = Some(replaced);
    }
    updated
}

fn rewrite_inline_fragment(
    inline: &Node<InlineFragment>,
    rewriter: &mut impl Rewriter,
) -> Option<Node<InlineFragment>> {
    let span = node_span(inline);
    rewrite_selections(span, &inline.selection_set, rewriter).map(|selections| {
        let mut node = inline.clone();
        node.make_mut().selection_set = selections;
        node
    })
}

fn rewrite_selections(
    owner: Option<OffsetRange>,
    selections: &[Selection],
    rewriter: &mut impl Rewriter,
) -> Option<Vec<Selection>> {
    let mut rewritten: Option<Vec<Selection>> = None;

    for (index, selection) in selections.iter().enumerate() {
        let replaced = match selection {
            Selection::Field(field) => rewrite_field(field, rewriter).map(Selection::Field),
            Selection::InlineFragment(inline) => {
                rewrite_inline_fragment(inline, rewriter).map(Selection::InlineFragment)
            }
            Selection::FragmentSpread(_) => None,
        };
        if let Some(replaced) = replaced {
            rewritten.get_or_insert_with(|| selections.to_vec())[index] = replaced;
        }
    }

    let current = rewritten.as_deref().unwrap_or(selections);
    if let Some(replaced) = rewriter.selection_set(owner, current) {
        rewritten = Some(replaced);
    }
    rewritten
}

/// Rewrites the operation whose span is `target`.
pub struct OnOperation<F> {
    pub target: Option<OffsetRange>,
    pub edit: F,
}

impl<F> Rewriter for OnOperation<F>
where
    F: FnMut(&Node<OperationDefinition>) -> Node<OperationDefinition>,
{
    fn operation(
        &mut self,
        span: Option<OffsetRange>,
        operation: &Node<OperationDefinition>,
    ) -> Option<Node<OperationDefinition>> {
        same_span(span, self.target).then(|| (self.edit)(operation))
    }
}

/// Rewrites the fragment whose span is `target`.
pub struct OnFragment<F> {
    pub target: Option<OffsetRange>,
    pub edit: F,
}

impl<F> Rewriter for OnFragment<F>
where
    F: FnMut(&Node<FragmentDefinition>) -> Node<FragmentDefinition>,
{
    fn fragment(
        &mut self,
        span: Option<OffsetRange>,
        fragment: &Node<FragmentDefinition>,
    ) -> Option<Node<FragmentDefinition>> {
        same_span(span, self.target).then(|| (self.edit)(fragment))
    }
}

/// Rewrites the field whose span is `target`.
pub struct OnField<F> {
    pub target: Option<OffsetRange>,
    pub edit: F,
}

impl<F> Rewriter for OnField<F>
where
    F: FnMut(&Node<Field>) -> Node<Field>,
{
    fn field(&mut self, span: Option<OffsetRange>, field: &Node<Field>) -> Option<Node<Field>> {
        same_span(span, self.target).then(|| (self.edit)(field))
    }
}
