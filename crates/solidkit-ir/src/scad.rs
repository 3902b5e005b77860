//! OpenSCAD text serialization.
//!
//! The writer resolves holes first (see [`crate::holes`]) and then emits one
//! statement per node, children in braces, in exactly the order they appear
//! in the tree.
//!
//! ```text
//! // whitebox
//! $fn = 48;
//!
//! difference() {
//!     cube([10, 10, 10]);
//!     translate([5, 5, 0]) {
//!         cylinder(h = 10, r = 2);
//!     }
//! }
//! ```

use crate::{holes, BoolOp, ModifierKind, Node, Primitive, Transform, Vec3};
use std::fmt;

/// Serialize `root` to OpenSCAD source.
///
/// `segments` becomes the global `$fn` resolution used by circular
/// primitives that do not carry their own segment count. Each line of
/// `header` is written as a leading `//` comment.
pub fn to_scad(root: &Node, segments: u32, header: Option<&str>) -> String {
    let resolved = holes::resolve(root);
    ScadDocument {
        root: &resolved,
        segments,
        header,
    }
    .to_string()
}

struct ScadDocument<'a> {
    root: &'a Node,
    segments: u32,
    header: Option<&'a str>,
}

impl fmt::Display for ScadDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(header) = self.header {
            for line in header.lines() {
                writeln!(f, "// {line}")?;
            }
        }
        writeln!(f, "$fn = {};", self.segments)?;
        writeln!(f)?;
        write_node(f, self.root, 0)
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, depth: usize) -> fmt::Result {
    let indent = Indent(depth);
    match node {
        Node::Primitive { shape } => writeln!(f, "{indent}{};", PrimitiveCall(shape)),
        Node::Transform { op, child } => {
            writeln!(f, "{indent}{} {{", TransformCall(op))?;
            write_node(f, child, depth + 1)?;
            writeln!(f, "{indent}}}")
        }
        Node::Combine { op, children } => {
            let name = match op {
                BoolOp::Union => "union",
                BoolOp::Difference => "difference",
                BoolOp::Intersection => "intersection",
            };
            write_block(f, name, children, depth)
        }
        Node::Group { children } => write_block(f, "union", children, depth),
        Node::Modifier { kind, children } => {
            let name = match kind {
                ModifierKind::Hull => "hull",
                ModifierKind::Minkowski => "minkowski",
                // Resolved trees carry no part or hole markers.
                ModifierKind::Part | ModifierKind::Hole => "union",
            };
            write_block(f, name, children, depth)
        }
    }
}

fn write_block(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    children: &[Node],
    depth: usize,
) -> fmt::Result {
    let indent = Indent(depth);
    if children.is_empty() {
        return writeln!(f, "{indent}{name}();");
    }
    writeln!(f, "{indent}{name}() {{")?;
    for child in children {
        write_node(f, child, depth + 1)?;
    }
    writeln!(f, "{indent}}}")
}

struct Indent(usize);

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:width$}", "", width = self.0 * 4)
    }
}

struct Vector<'a>(&'a Vec3);

impl fmt::Display for Vector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Negated anchors produce -0.0; print it as 0.
        let [x, y, z] = [self.0.x, self.0.y, self.0.z].map(|c| if c == 0.0 { 0.0 } else { c });
        write!(f, "[{x}, {y}, {z}]")
    }
}

struct Segments(Option<u32>);

impl fmt::Display for Segments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => write!(f, ", $fn = {n}"),
            None => Ok(()),
        }
    }
}

struct PrimitiveCall<'a>(&'a Primitive);

impl fmt::Display for PrimitiveCall<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Primitive::Cube { size } => write!(f, "cube({})", Vector(size)),
            Primitive::Sphere { radius, segments } => {
                write!(f, "sphere(r = {radius}{})", Segments(*segments))
            }
            Primitive::Cylinder {
                radius,
                height,
                segments,
            } => write!(
                f,
                "cylinder(h = {height}, r = {radius}{})",
                Segments(*segments)
            ),
            Primitive::Extrusion { height, points } => {
                write!(f, "linear_extrude(height = {height}) polygon(points = [")?;
                for (i, [x, y]) in points.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "[{x}, {y}]")?;
                }
                write!(f, "])")
            }
        }
    }
}

struct TransformCall<'a>(&'a Transform);

impl fmt::Display for TransformCall<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Transform::Translate { offset } => write!(f, "translate({})", Vector(offset)),
            Transform::Rotate { angle, axis } => {
                write!(f, "rotate(a = {angle}, v = {})", Vector(axis))
            }
            Transform::Mirror { normal } => write!(f, "mirror({})", Vector(normal)),
        }
    }
}
