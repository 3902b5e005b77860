use crate::{config::RenderConfig, export, BuildError};
use nalgebra::Vector3;
use solidkit_ir::{BoolOp, Document, ModifierKind, Node, Transform, Vec3 as IrVec3};

/// A CSG tree under construction plus its alignment anchors.
///
/// Every operation consumes the builder and returns it, so calls chain:
///
/// ```rust
/// use solidkit::parts;
///
/// let block = parts::cube(10.0, 20.0, 5.0)?.right(3.0).align_center();
/// assert_eq!(block.center().norm(), 0.0);
/// # Ok::<(), solidkit::BuildError>(())
/// ```
///
/// Two anchors are tracked. The *origin* is the shape's designed zero and
/// the *center* its bounding-box center. Factories seed both; every
/// translation moves both by the same delta. Rotations and mirrors leave
/// them untouched.
///
/// Combining operations ([`add`](Self::add), [`union`](Self::union),
/// [`difference`](Self::difference), [`hole`](Self::hole) and the `+`, `-`,
/// `&` operators) take their operand by value. Its tree is moved into this
/// one; clone first to keep using it.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidBuilder {
    node: Node,
    origin: Vector3<f64>,
    center: Vector3<f64>,
}

impl Default for SolidBuilder {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Node> for SolidBuilder {
    fn from(node: Node) -> Self {
        Self::new(node)
    }
}

fn to_ir(v: &Vector3<f64>) -> IrVec3 {
    IrVec3::new(v.x, v.y, v.z)
}

impl SolidBuilder {
    // =========================================================================
    // Construction and anchors
    // =========================================================================

    /// Wrap an existing tree. Both anchors start at zero.
    pub fn new(node: impl Into<Node>) -> Self {
        Self {
            node: node.into(),
            origin: Vector3::zeros(),
            center: Vector3::zeros(),
        }
    }

    /// A builder around the canonical empty group.
    pub fn empty() -> Self {
        Self::new(Node::empty())
    }

    /// The tree built so far.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Finish building and hand the tree over.
    pub fn render(self) -> Node {
        self.node
    }

    /// Where the designed zero currently sits.
    pub fn origin(&self) -> Vector3<f64> {
        self.origin
    }

    /// Where the bounding-box center currently sits.
    pub fn center(&self) -> Vector3<f64> {
        self.center
    }

    /// Seed the origin anchor. Used by shape factories.
    pub fn set_origin(&mut self, x: f64, y: f64, z: f64) {
        self.origin = Vector3::new(x, y, z);
    }

    /// Seed the center anchor. Used by shape factories.
    pub fn set_center(&mut self, x: f64, y: f64, z: f64) {
        self.center = Vector3::new(x, y, z);
    }

    // =========================================================================
    // Transforms
    // =========================================================================

    /// Translate by `v`, moving both anchors along.
    pub fn translate(mut self, v: Vector3<f64>) -> Self {
        self.origin += v;
        self.center += v;
        self.node = Node::translate(to_ir(&v), self.node);
        self
    }

    /// Translate by `v`, rejecting non-finite components.
    pub fn try_translate(self, v: Vector3<f64>) -> Result<Self, BuildError> {
        if !v.iter().all(|c| c.is_finite()) {
            return Err(BuildError::InvalidParameter(format!(
                "translation must be finite, got [{}, {}, {}]",
                v.x, v.y, v.z
            )));
        }
        Ok(self.translate(v))
    }

    /// Move along +X.
    pub fn right(self, d: f64) -> Self {
        self.translate(Vector3::new(d, 0.0, 0.0))
    }

    /// Move along -X.
    pub fn left(self, d: f64) -> Self {
        self.translate(Vector3::new(-d, 0.0, 0.0))
    }

    /// Move along +Y.
    pub fn forward(self, d: f64) -> Self {
        self.translate(Vector3::new(0.0, d, 0.0))
    }

    /// Move along -Y.
    pub fn back(self, d: f64) -> Self {
        self.translate(Vector3::new(0.0, -d, 0.0))
    }

    /// Move along +Z.
    pub fn up(self, d: f64) -> Self {
        self.translate(Vector3::new(0.0, 0.0, d))
    }

    /// Move along -Z.
    pub fn down(self, d: f64) -> Self {
        self.translate(Vector3::new(0.0, 0.0, -d))
    }

    /// Rotate by `angle` degrees around `axis`. Anchors are not updated.
    pub fn rotate(mut self, angle: f64, axis: Vector3<f64>) -> Self {
        self.node = Node::transform(
            Transform::Rotate {
                angle,
                axis: to_ir(&axis),
            },
            self.node,
        );
        self
    }

    /// Mirror across the plane with normal `normal`. Anchors are not updated.
    pub fn mirror(mut self, normal: Vector3<f64>) -> Self {
        self.node = Node::transform(
            Transform::Mirror {
                normal: to_ir(&normal),
            },
            self.node,
        );
        self
    }

    /// With `clone`, union with a mirrored copy of itself; otherwise mirror
    /// in place.
    pub fn mirror_clone(self, normal: Vector3<f64>, clone: bool) -> Self {
        if clone {
            let copy = self.clone().mirror(normal);
            self.union(copy)
        } else {
            self.mirror(normal)
        }
    }

    /// Union with a copy mirrored across the YZ plane.
    pub fn reflect_x(self) -> Self {
        self.reflect_x_with(true)
    }

    /// Union with a copy mirrored across the XZ plane.
    pub fn reflect_y(self) -> Self {
        self.reflect_y_with(true)
    }

    /// Union with a copy mirrored across the XY plane.
    pub fn reflect_z(self) -> Self {
        self.reflect_z_with(true)
    }

    /// [`mirror_clone`](Self::mirror_clone) across the YZ plane.
    pub fn reflect_x_with(self, clone: bool) -> Self {
        self.mirror_clone(Vector3::x(), clone)
    }

    /// [`mirror_clone`](Self::mirror_clone) across the XZ plane.
    pub fn reflect_y_with(self, clone: bool) -> Self {
        self.mirror_clone(Vector3::y(), clone)
    }

    /// [`mirror_clone`](Self::mirror_clone) across the XY plane.
    pub fn reflect_z_with(self, clone: bool) -> Self {
        self.mirror_clone(Vector3::z(), clone)
    }

    // =========================================================================
    // Combination
    // =========================================================================

    /// Append `other`'s tree as a sibling of this one.
    ///
    /// Groups and hull, Minkowski or part wrappers take `other` as their
    /// next child. A boolean combination is first wrapped in a group, so the
    /// new sibling is never subtracted or intersected.
    pub fn add(mut self, other: SolidBuilder) -> Self {
        if let Node::Combine { .. } = self.node {
            let content = std::mem::take(&mut self.node);
            self.node = Node::Group {
                children: vec![content, other.node],
            };
        } else {
            self.node.add(other.node);
        }
        self
    }

    /// Extend an existing `op` combination, or start one with the current
    /// tree as first operand.
    fn combine(mut self, op: BoolOp, operand: Node) -> Self {
        match &mut self.node {
            Node::Combine { op: current, children } if *current == op => children.push(operand),
            _ => {
                let first = std::mem::take(&mut self.node);
                self.node = Node::Combine {
                    op,
                    children: vec![first, operand],
                };
            }
        }
        self
    }

    /// Boolean union with `other`.
    pub fn union(self, other: SolidBuilder) -> Self {
        self.combine(BoolOp::Union, other.node)
    }

    /// Boolean difference: this tree minus `other`.
    pub fn difference(self, other: SolidBuilder) -> Self {
        self.combine(BoolOp::Difference, other.node)
    }

    /// Boolean intersection with `other`.
    pub fn intersection(self, other: SolidBuilder) -> Self {
        self.combine(BoolOp::Intersection, other.node)
    }

    /// Subtract `other` as a hole.
    ///
    /// The hole punches through the whole content of the nearest enclosing
    /// [`part`](Self::part), or of the final tree when there is none.
    pub fn hole(self, other: SolidBuilder) -> Self {
        self.combine(BoolOp::Difference, Node::hole(other.node))
    }

    /// Close a part boundary: holes below it are subtracted here.
    pub fn part(mut self) -> Self {
        self.node = Node::modifier(ModifierKind::Part, vec![self.node]);
        self
    }

    fn wrap_empty(mut self, kind: ModifierKind) -> Result<Self, BuildError> {
        if !self.node.is_empty() {
            return Err(BuildError::UnsupportedCombination(format!(
                "{kind:?} must be applied to an empty builder before adding children"
            )));
        }
        self.node = Node::modifier(kind, Vec::new());
        Ok(self)
    }

    /// Turn an empty builder into a convex hull of the children added next.
    pub fn hull(self) -> Result<Self, BuildError> {
        self.wrap_empty(ModifierKind::Hull)
    }

    /// Turn an empty builder into a Minkowski sum of the children added
    /// next. The first child added is the profile.
    pub fn minkowski(self) -> Result<Self, BuildError> {
        self.wrap_empty(ModifierKind::Minkowski)
    }

    // =========================================================================
    // Alignment
    // =========================================================================

    /// Move the origin anchor to (0, 0, 0).
    pub fn align_origin(self) -> Self {
        let anchor = self.origin;
        self.translate(-anchor)
    }

    /// Move the center anchor to (0, 0, 0).
    pub fn align_center(self) -> Self {
        let anchor = self.center;
        self.translate(-anchor)
    }

    /// Center the footprint on the XY origin while the origin anchor's z
    /// goes to 0, so the shape rests on the z = 0 plane.
    pub fn align_center_above(self) -> Self {
        let anchor = Vector3::new(self.center.x, self.center.y, self.origin.z);
        self.translate(-anchor)
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Serialize to OpenSCAD source.
    pub fn to_scad(&self, config: &RenderConfig) -> String {
        export::to_scad(&self.node, config)
    }

    /// Write OpenSCAD source to `path`.
    pub fn write_scad(
        &self,
        path: impl AsRef<std::path::Path>,
        config: &RenderConfig,
    ) -> Result<(), BuildError> {
        export::write_scad(&self.node, path, config)
    }

    /// Extract the tree as a JSON-serializable document.
    pub fn to_document(&self) -> Document {
        Document::new(self.node.clone())
    }

    /// Write the JSON document to `path`.
    pub fn write_json(&self, path: impl AsRef<std::path::Path>) -> Result<(), BuildError> {
        export::write_json(&self.to_document(), path)
    }
}

// =============================================================================
// Operator overloads
// =============================================================================

/// Union: `a + b`
impl std::ops::Add for SolidBuilder {
    type Output = SolidBuilder;
    fn add(self, rhs: SolidBuilder) -> SolidBuilder {
        self.union(rhs)
    }
}

/// Difference: `a - b`
impl std::ops::Sub for SolidBuilder {
    type Output = SolidBuilder;
    fn sub(self, rhs: SolidBuilder) -> SolidBuilder {
        self.difference(rhs)
    }
}

/// Intersection: `a & b`
impl std::ops::BitAnd for SolidBuilder {
    type Output = SolidBuilder;
    fn bitand(self, rhs: SolidBuilder) -> SolidBuilder {
        self.intersection(rhs)
    }
}

/// In-place union: `a += b`
impl std::ops::AddAssign for SolidBuilder {
    fn add_assign(&mut self, rhs: SolidBuilder) {
        *self = std::mem::take(self).union(rhs);
    }
}

/// In-place difference: `a -= b`
impl std::ops::SubAssign for SolidBuilder {
    fn sub_assign(&mut self, rhs: SolidBuilder) {
        *self = std::mem::take(self).difference(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solidkit_ir::Primitive;

    fn cube(x: f64, y: f64, z: f64) -> SolidBuilder {
        let mut b = SolidBuilder::new(Primitive::Cube {
            size: IrVec3::new(x, y, z),
        });
        b.set_center(x / 2.0, y / 2.0, z / 2.0);
        b
    }

    #[test]
    fn test_directional_moves_accumulate() {
        let b = cube(2.0, 2.0, 2.0)
            .right(3.0)
            .left(1.0)
            .forward(4.0)
            .back(6.0)
            .up(5.0)
            .down(0.5)
            .translate(Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(b.origin(), Vector3::new(3.0, -1.0, 5.5));
        assert_eq!(b.center(), Vector3::new(4.0, 0.0, 6.5));
        // One translate node per call.
        assert_eq!(b.node().node_count(), 8);
    }

    #[test]
    fn test_translate_wraps_root() {
        let b = cube(1.0, 1.0, 1.0).left(2.0);
        match b.node() {
            Node::Transform {
                op: Transform::Translate { offset },
                child,
            } => {
                assert_eq!(*offset, IrVec3::new(-2.0, 0.0, 0.0));
                assert!(matches!(**child, Node::Primitive { .. }));
            }
            other => panic!("expected Translate, got {other:?}"),
        }
    }

    #[test]
    fn test_try_translate_rejects_non_finite() {
        let err = cube(1.0, 1.0, 1.0)
            .try_translate(Vector3::new(f64::NAN, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidParameter(_)));

        let ok = cube(1.0, 1.0, 1.0)
            .try_translate(Vector3::new(1.0, 2.0, 3.0))
            .unwrap();
        assert_eq!(ok.origin(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_rotate_and_mirror_keep_anchors() {
        let b = cube(2.0, 4.0, 6.0)
            .right(1.0)
            .rotate(90.0, Vector3::z())
            .mirror(Vector3::x());
        assert_eq!(b.origin(), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(b.center(), Vector3::new(2.0, 2.0, 3.0));
        match b.node() {
            Node::Transform {
                op: Transform::Mirror { normal },
                child,
            } => {
                assert_eq!(*normal, IrVec3::X);
                assert!(matches!(
                    **child,
                    Node::Transform {
                        op: Transform::Rotate { .. },
                        ..
                    }
                ));
            }
            other => panic!("expected Mirror, got {other:?}"),
        }
    }

    #[test]
    fn test_align_origin_and_center() {
        let b = cube(10.0, 20.0, 5.0).right(7.0).up(3.0);
        let aligned = b.clone().align_origin();
        assert_eq!(aligned.origin(), Vector3::zeros());
        assert_eq!(aligned.center(), Vector3::new(5.0, 10.0, 2.5));

        let centered = b.align_center();
        assert_eq!(centered.center(), Vector3::zeros());
        assert_eq!(centered.origin(), Vector3::new(-5.0, -10.0, -2.5));
    }

    #[test]
    fn test_align_center_above() {
        let b = cube(10.0, 10.0, 10.0)
            .translate(Vector3::new(1.0, 1.0, 1.0))
            .align_center_above();
        assert_eq!(b.center(), Vector3::new(0.0, 0.0, 5.0));
        assert_eq!(b.origin(), Vector3::new(-5.0, -5.0, 0.0));
        match b.node() {
            Node::Transform {
                op: Transform::Translate { offset },
                ..
            } => assert_eq!(*offset, IrVec3::new(-6.0, -6.0, -1.0)),
            other => panic!("expected Translate, got {other:?}"),
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let original = cube(1.0, 1.0, 1.0);
        let snapshot = original.node().clone();
        let moved = original.clone().right(5.0);
        assert_eq!(original.node(), &snapshot);
        assert_eq!(original.origin(), Vector3::zeros());
        assert_eq!(moved.origin(), Vector3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_add_and_union_shapes() {
        let grouped = SolidBuilder::empty()
            .add(cube(1.0, 1.0, 1.0))
            .add(cube(2.0, 2.0, 2.0));
        assert!(matches!(grouped.node(), Node::Group { children } if children.len() == 2));

        // Consecutive unions extend one combination.
        let unioned = cube(1.0, 1.0, 1.0) + cube(2.0, 2.0, 2.0) + cube(3.0, 3.0, 3.0);
        match unioned.node() {
            Node::Combine {
                op: BoolOp::Union,
                children,
            } => assert_eq!(children.len(), 3),
            other => panic!("expected Union, got {other:?}"),
        }
    }

    #[test]
    fn test_operators() {
        let diff = cube(10.0, 10.0, 10.0) - cube(2.0, 2.0, 2.0) - cube(3.0, 3.0, 3.0);
        assert!(matches!(
            diff.node(),
            Node::Combine { op: BoolOp::Difference, children } if children.len() == 3
        ));

        let isect = cube(10.0, 10.0, 10.0) & cube(5.0, 5.0, 5.0).right(2.0);
        assert!(matches!(
            isect.node(),
            Node::Combine { op: BoolOp::Intersection, children } if children.len() == 2
        ));

        let mut acc = cube(1.0, 1.0, 1.0);
        acc += cube(2.0, 2.0, 2.0);
        acc -= cube(0.5, 0.5, 0.5);
        match acc.node() {
            Node::Combine {
                op: BoolOp::Difference,
                children,
            } => assert!(matches!(children[0], Node::Combine { op: BoolOp::Union, .. })),
            other => panic!("expected Difference, got {other:?}"),
        }
        // Combining keeps the left-hand anchors.
        assert_eq!(acc.center(), Vector3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_hole_marks_operand() {
        let b = cube(10.0, 10.0, 10.0).hole(cube(2.0, 2.0, 10.0));
        match b.node() {
            Node::Combine {
                op: BoolOp::Difference,
                children,
            } => {
                assert!(!children[0].is_hole());
                assert!(children[1].is_hole());
            }
            other => panic!("expected Difference, got {other:?}"),
        }
        let part = b.part();
        assert!(matches!(
            part.node(),
            Node::Modifier {
                kind: ModifierKind::Part,
                ..
            }
        ));
    }

    #[test]
    fn test_add_after_combination_is_sibling() {
        let b = cube(10.0, 10.0, 10.0)
            .difference(cube(1.0, 1.0, 1.0))
            .add(cube(3.0, 3.0, 3.0).right(20.0));
        match b.node() {
            Node::Group { children } => {
                assert_eq!(children.len(), 2);
                assert!(matches!(
                    &children[0],
                    Node::Combine { op: BoolOp::Difference, children } if children.len() == 2
                ));
                assert!(matches!(children[1], Node::Transform { .. }));
            }
            other => panic!("expected Group, got {other:?}"),
        }

        let isect = (cube(4.0, 4.0, 4.0) & cube(2.0, 2.0, 2.0)).add(cube(1.0, 1.0, 1.0));
        assert!(matches!(isect.node(), Node::Group { children } if children.len() == 2));
    }

    #[test]
    fn test_hull_and_minkowski_require_empty() {
        let hull = SolidBuilder::empty()
            .hull()
            .unwrap()
            .add(cube(1.0, 1.0, 1.0))
            .add(cube(1.0, 1.0, 1.0).right(5.0));
        match hull.node() {
            Node::Modifier {
                kind: ModifierKind::Hull,
                children,
            } => assert_eq!(children.len(), 2),
            other => panic!("expected Hull, got {other:?}"),
        }

        let err = cube(1.0, 1.0, 1.0).minkowski().unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedCombination(_)));
        let err = SolidBuilder::empty().up(1.0).hull().unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedCombination(_)));
    }

    #[test]
    fn test_mirror_clone() {
        let b = cube(1.0, 1.0, 1.0).right(2.0).reflect_x();
        match b.node() {
            Node::Combine {
                op: BoolOp::Union,
                children,
            } => {
                assert_eq!(children.len(), 2);
                assert_eq!(
                    children[1],
                    Node::transform(Transform::Mirror { normal: IrVec3::X }, children[0].clone())
                );
            }
            other => panic!("expected Union, got {other:?}"),
        }

        let flipped = cube(1.0, 1.0, 1.0).reflect_z_with(false);
        assert!(matches!(
            flipped.node(),
            Node::Transform {
                op: Transform::Mirror { normal },
                ..
            } if *normal == IrVec3::Z
        ));
    }
}
