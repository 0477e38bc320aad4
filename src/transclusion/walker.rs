//! Image element traversal

use kuchiki::{ElementData, NodeRef};

/// Call `visit` on every `<img>` element under `root`, in document order.
///
/// Depth-first pre-order with children in source order. Every subtree is
/// entered regardless of whether its root was an image. An explicit stack is
/// used instead of recursion so deeply nested documents cannot overflow the
/// call stack.
///
/// The contents of `<template>` elements are walked as if they were the
/// template's children.
///
/// The visitor may mutate the element's attributes; traversal only depends on
/// the tree structure.
pub fn walk_images<F>(root: &NodeRef, mut visit: F)
where
    F: FnMut(&ElementData),
{
    let mut stack = vec![root.clone()];

    while let Some(node) = stack.pop() {
        if let Some(element) = node.as_element()
            && is_image(element)
        {
            visit(element);
        }

        // Reversed so the first child is popped first
        stack.extend(child_nodes(&node).into_iter().rev());
    }
}

/// Children of `node` in source order, followed by its template contents
pub(crate) fn child_nodes(node: &NodeRef) -> Vec<NodeRef> {
    let mut children: Vec<NodeRef> = node.children().collect();
    if let Some(contents) = node
        .as_element()
        .and_then(|element| element.template_contents.as_ref())
    {
        children.extend(contents.children());
    }
    children
}

fn is_image(element: &ElementData) -> bool {
    &*element.name.local == "img"
}
