//! Tree representation for solidkit CSG descriptions.
//!
//! A description is an owned tree of [`Node`]s: primitive leaves, transform
//! wrappers, boolean combinations, plain groups and modifiers with special
//! evaluation semantics (hull, Minkowski sum, part boundaries and holes).
//!
//! The tree is purely declarative. Nothing here evaluates geometry; the
//! [`scad`] module turns a tree into text for an external CSG engine.

use serde::{Deserialize, Serialize};

pub mod holes;
pub mod scad;

/// 3D vector with f64 components (conventionally millimeters).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Unit X axis.
    pub const X: Vec3 = Vec3 {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };

    /// Unit Y axis.
    pub const Y: Vec3 = Vec3 {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    /// Unit Z axis.
    pub const Z: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    /// Create a new Vec3.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// True when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Leaf shape with its numeric parameters.
///
/// Cubes and extrusions sit on the origin corner; spheres are centered on the
/// origin; cylinders are centered on the Z axis with their base at z = 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Primitive {
    /// Axis-aligned box with one corner at the origin.
    Cube {
        /// Size along each axis.
        size: Vec3,
    },
    /// Sphere centered at the origin.
    Sphere {
        /// Radius of the sphere.
        radius: f64,
        /// Circular segments, `None` to use the render resolution.
        segments: Option<u32>,
    },
    /// Cylinder along the Z axis.
    Cylinder {
        /// Radius of the cylinder.
        radius: f64,
        /// Height of the cylinder.
        height: f64,
        /// Circular segments, `None` to use the render resolution.
        segments: Option<u32>,
    },
    /// Closed XY polygon extruded along +Z.
    Extrusion {
        /// Extrusion height.
        height: f64,
        /// Polygon outline as `[x, y]` pairs.
        points: Vec<[f64; 2]>,
    },
}

/// Affine operation applied to exactly one child.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Transform {
    /// Translation by an offset vector.
    Translate {
        /// Translation offset.
        offset: Vec3,
    },
    /// Rotation by `angle` degrees around `axis`.
    Rotate {
        /// Rotation angle in degrees.
        angle: f64,
        /// Rotation axis.
        axis: Vec3,
    },
    /// Mirror across the plane through the origin with normal `normal`.
    Mirror {
        /// Plane normal.
        normal: Vec3,
    },
}

/// Boolean operator over an ordered child sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoolOp {
    /// Union of all children.
    Union,
    /// First child minus every following child.
    Difference,
    /// Intersection of all children.
    Intersection,
}

/// Wrappers with special evaluation semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierKind {
    /// Convex envelope of the children.
    Hull,
    /// Minkowski sum of the children, first child is the profile.
    Minkowski,
    /// Boundary at which hole-marked descendants are subtracted.
    Part,
    /// Marks the content as negative space for the nearest enclosing part.
    Hole,
}

/// A node in a CSG description tree.
///
/// Every node owns its children; sharing a subtree between two parents
/// requires an explicit `clone()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    /// Leaf shape.
    Primitive {
        /// The shape.
        shape: Primitive,
    },
    /// Transform wrapper.
    Transform {
        /// The transform.
        op: Transform,
        /// Wrapped child.
        child: Box<Node>,
    },
    /// Boolean combination; child order is significant.
    Combine {
        /// The boolean operator.
        op: BoolOp,
        /// Operands in order.
        children: Vec<Node>,
    },
    /// Sibling sequence without an operator (implicit union).
    Group {
        /// Members in order.
        children: Vec<Node>,
    },
    /// Modifier wrapper.
    Modifier {
        /// Which modifier.
        kind: ModifierKind,
        /// Wrapped children in order.
        children: Vec<Node>,
    },
}

impl Default for Node {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Primitive> for Node {
    fn from(shape: Primitive) -> Self {
        Node::Primitive { shape }
    }
}

impl Node {
    /// The canonical empty group.
    pub fn empty() -> Self {
        Node::Group {
            children: Vec::new(),
        }
    }

    /// Wrap `child` in a transform.
    pub fn transform(op: Transform, child: Node) -> Self {
        Node::Transform {
            op,
            child: Box::new(child),
        }
    }

    /// Wrap `child` in a translation.
    pub fn translate(offset: Vec3, child: Node) -> Self {
        Self::transform(Transform::Translate { offset }, child)
    }

    /// Wrap `children` in a modifier.
    pub fn modifier(kind: ModifierKind, children: Vec<Node>) -> Self {
        Node::Modifier { kind, children }
    }

    /// Mark `child` as a hole.
    pub fn hole(child: Node) -> Self {
        Self::modifier(ModifierKind::Hole, vec![child])
    }

    /// Whether [`Node::add`] appends to this node instead of promoting it.
    pub fn accepts_children(&self) -> bool {
        match self {
            Node::Group { .. } | Node::Combine { .. } => true,
            Node::Modifier { kind, .. } => *kind != ModifierKind::Hole,
            Node::Primitive { .. } | Node::Transform { .. } => false,
        }
    }

    /// Append `child` in place.
    ///
    /// Groups, combinations and modifiers (other than holes) take the child
    /// as their last member. Any other node is first promoted into a group
    /// holding the old content, then the child is appended to that group.
    pub fn add(&mut self, child: Node) {
        match self {
            Node::Group { children } | Node::Combine { children, .. } => children.push(child),
            Node::Modifier { kind, children } if *kind != ModifierKind::Hole => {
                children.push(child)
            }
            _ => {
                let old = std::mem::take(self);
                *self = Node::Group {
                    children: vec![old, child],
                };
            }
        }
    }

    /// Children of this node in order.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Primitive { .. } => &[],
            Node::Transform { child, .. } => std::slice::from_ref(child.as_ref()),
            Node::Group { children }
            | Node::Combine { children, .. }
            | Node::Modifier { children, .. } => children,
        }
    }

    /// True for a group with no members.
    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Group { children } if children.is_empty())
    }

    /// True for a hole-marked node.
    pub fn is_hole(&self) -> bool {
        matches!(
            self,
            Node::Modifier {
                kind: ModifierKind::Hole,
                ..
            }
        )
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Node::node_count).sum::<usize>()
    }

    /// True when any descendant (or `self`) is hole-marked.
    pub fn contains_holes(&self) -> bool {
        self.is_hole() || self.children().iter().any(Node::contains_holes)
    }
}

/// Current document format version.
pub const DOCUMENT_VERSION: &str = "0.1";

/// A serialized description: a single rooted tree plus format version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Format version string.
    pub version: String,
    /// Root of the description.
    pub root: Node,
}

impl Document {
    /// Create a document around `root`.
    pub fn new(root: Node) -> Self {
        Self {
            version: DOCUMENT_VERSION.to_string(),
            root,
        }
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
