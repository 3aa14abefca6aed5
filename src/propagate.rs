use crate::element::Node;
use crate::value::{BoundValue, ValueSet};

const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_GROW_SIZE: usize = 1024 * 1024;

/// Rebuilds `tree` so that every option reachable through groups is selected
/// exactly when its value is strictly contained in the effective value set.
///
/// Single-valued controls only ever match the first bound value. Nodes that
/// are neither options nor groups are cloned unchanged.
pub fn propagate(value: &BoundValue, multiple: bool, tree: &[Node]) -> Vec<Node> {
    let values = value.effective(multiple);
    let next = apply_value_to_nodes(&values, tree);
    if log::log_enabled!(log::Level::Trace) {
        log::trace!(
            "propagated {} bound value(s) (multiple={multiple}) over {} node(s), {} selected",
            values.len(),
            tree.len(),
            count_selected(&next)
        );
    }
    next
}

/// Whether any option in `tree`, including those nested in groups, is
/// currently selected.
pub fn has_any_selection(tree: &[Node]) -> bool {
    tree.iter().any(|node| match node {
        Node::Option(option) => option.has_attribute("selected"),
        Node::Optgroup(group) => {
            stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
                has_any_selection(group.children())
            })
        }
        Node::Element(_) | Node::Text(_) => false,
    })
}

pub(crate) fn apply_value_to_nodes(values: &ValueSet, nodes: &[Node]) -> Vec<Node> {
    nodes
        .iter()
        .map(|node| match node {
            Node::Optgroup(group) => {
                let children = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
                    apply_value_to_nodes(values, group.children())
                });
                Node::Optgroup(group.set_children(children))
            }
            _ => {
                let mut next = node.clone();
                if let Some(selectable) = next.as_selectable_mut() {
                    let selected = values.contains_strict(selectable.value());
                    selectable.set_selected(selected);
                }
                next
            }
        })
        .collect()
}

fn count_selected(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            Node::Optgroup(group) => {
                stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
                    count_selected(group.children())
                })
            }
            _ => node
                .as_selectable()
                .map(|selectable| usize::from(selectable.is_selected()))
                .unwrap_or(0),
        })
        .sum()
}
