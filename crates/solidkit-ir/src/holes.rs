//! Hole resolution at part boundaries.
//!
//! A hole-marked subtree is not subtracted where it appears. It is lifted to
//! the nearest enclosing [`ModifierKind::Part`] (or the tree root when there is
//! none) and subtracted from that boundary's whole content. The transforms
//! between the boundary and the hole travel with it, so the cavity lands
//! where it was placed.
//!
//! Only transforms travel with a lifted hole. Hull and Minkowski wrappers
//! between the hole and its boundary stay behind with the solid content.

use crate::{BoolOp, ModifierKind, Node, Transform};

/// Copy of `root` with every part boundary collapsed.
///
/// The result contains no [`ModifierKind::Part`] or [`ModifierKind::Hole`]
/// modifiers. A boundary without holes is replaced by its content.
pub fn resolve(root: &Node) -> Node {
    resolve_boundary(std::slice::from_ref(root))
}

fn resolve_boundary(content: &[Node]) -> Node {
    let mut path = Vec::new();
    let mut holes = Vec::new();
    let mut solids = strip_all(content, &mut path, &mut holes);

    let solid = if solids.len() == 1 {
        solids.remove(0)
    } else {
        Node::Group { children: solids }
    };

    if holes.is_empty() {
        return solid;
    }

    log::trace!("subtracting {} hole(s) at part boundary", holes.len());
    let mut children = Vec::with_capacity(holes.len() + 1);
    children.push(solid);
    children.extend(holes);
    Node::Combine {
        op: BoolOp::Difference,
        children,
    }
}

fn strip_all(nodes: &[Node], path: &mut Vec<Transform>, holes: &mut Vec<Node>) -> Vec<Node> {
    nodes
        .iter()
        .filter_map(|node| strip(node, path, holes))
        .collect()
}

/// Copy `node` without its holes, pushing each lifted hole onto `holes`.
///
/// `path` holds the transforms from the current boundary down to `node`.
/// Returns `None` when `node` itself is lifted away.
fn strip(node: &Node, path: &mut Vec<Transform>, holes: &mut Vec<Node>) -> Option<Node> {
    match node {
        Node::Primitive { .. } => Some(node.clone()),
        Node::Transform { op, child } => {
            path.push(*op);
            let stripped = strip(child, path, holes);
            path.pop();
            stripped.map(|child| Node::transform(*op, child))
        }
        Node::Group { children } => Some(Node::Group {
            children: strip_all(children, path, holes),
        }),
        Node::Combine { op, children } => Some(Node::Combine {
            op: *op,
            children: strip_all(children, path, holes),
        }),
        Node::Modifier {
            kind: ModifierKind::Part,
            children,
        } => Some(resolve_boundary(children)),
        Node::Modifier {
            kind: ModifierKind::Hole,
            children,
        } => {
            let hole = path
                .iter()
                .rev()
                .fold(resolve_boundary(children), |inner, op| {
                    Node::transform(*op, inner)
                });
            holes.push(hole);
            None
        }
        Node::Modifier { kind, children } => Some(Node::Modifier {
            kind: *kind,
            children: strip_all(children, path, holes),
        }),
    }
}
