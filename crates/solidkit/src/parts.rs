//! Shape factories.
//!
//! Each factory returns a [`SolidBuilder`] whose origin and center anchors
//! are seeded for its primitive, so alignment works without any
//! shape-specific reasoning in the builder.
//!
//! | Factory | Origin seed | Center seed |
//! |---------|-------------|-------------|
//! | [`cube`] | (0, 0, 0) | (w/2, d/2, h/2) |
//! | [`sphere`] | (-r, -r, -r) | (0, 0, 0) |
//! | [`cylinder`] | (-d/2, -d/2, 0) | (0, 0, h/2) |

use crate::{BuildError, SolidBuilder};
use solidkit_ir::{Primitive, Vec3};

fn positive(what: &str, value: f64) -> Result<f64, BuildError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(BuildError::InvalidGeometry(format!(
            "{what} must be positive and finite, got {value}"
        )))
    }
}

fn check_segments(what: &str, segments: Option<u32>) -> Result<(), BuildError> {
    match segments {
        Some(n) if n < 3 => Err(BuildError::InvalidGeometry(format!(
            "{what} needs at least 3 segments, got {n}"
        ))),
        _ => Ok(()),
    }
}

fn raw_cube(width: f64, depth: f64, height: f64) -> SolidBuilder {
    SolidBuilder::new(Primitive::Cube {
        size: Vec3::new(width, depth, height),
    })
}

/// Axis-aligned box with one corner at the origin.
pub fn cube(width: f64, depth: f64, height: f64) -> Result<SolidBuilder, BuildError> {
    let mut b = raw_cube(
        positive("width", width)?,
        positive("depth", depth)?,
        positive("height", height)?,
    );
    b.set_center(width / 2.0, depth / 2.0, height / 2.0);
    Ok(b)
}

/// Sphere centered at the origin.
///
/// `segments` overrides the render resolution for this sphere only.
pub fn sphere(radius: f64, segments: Option<u32>) -> Result<SolidBuilder, BuildError> {
    let radius = positive("radius", radius)?;
    check_segments("sphere", segments)?;
    let mut b = SolidBuilder::new(Primitive::Sphere { radius, segments });
    b.set_origin(-radius, -radius, -radius);
    Ok(b)
}

/// Cylinder standing on the XY plane, centered on the Z axis.
pub fn cylinder(
    diameter: f64,
    height: f64,
    segments: Option<u32>,
) -> Result<SolidBuilder, BuildError> {
    let diameter = positive("diameter", diameter)?;
    let height = positive("height", height)?;
    check_segments("cylinder", segments)?;
    let mut b = SolidBuilder::new(Primitive::Cylinder {
        radius: diameter / 2.0,
        height,
        segments,
    });
    b.set_origin(-diameter / 2.0, -diameter / 2.0, 0.0);
    b.set_center(0.0, 0.0, height / 2.0);
    Ok(b)
}

/// Hexagonal prism; `diameter` is measured across corners.
pub fn hexnut(height: f64, diameter: f64) -> Result<SolidBuilder, BuildError> {
    cylinder(diameter, height, Some(6))
}

/// Closed polygon extruded along +Z.
pub fn extrusion(points: Vec<[f64; 2]>, height: f64) -> Result<SolidBuilder, BuildError> {
    let height = positive("height", height)?;
    if points.len() < 3 {
        return Err(BuildError::InvalidGeometry(format!(
            "polygon needs at least 3 points, got {}",
            points.len()
        )));
    }
    if points.iter().flatten().any(|c| !c.is_finite()) {
        return Err(BuildError::InvalidGeometry(
            "polygon points must be finite".to_string(),
        ));
    }

    let (min, max) = points.iter().fold(
        ([f64::MAX; 2], [f64::MIN; 2]),
        |(min, max), [x, y]| ([min[0].min(*x), min[1].min(*y)], [max[0].max(*x), max[1].max(*y)]),
    );
    let mut b = SolidBuilder::new(Primitive::Extrusion { height, points });
    b.set_center((min[0] + max[0]) / 2.0, (min[1] + max[1]) / 2.0, height / 2.0);
    Ok(b)
}

/// Round tube: an outer cylinder with an inner cylinder hole, closed as a part.
pub fn round_pipe(
    outer_diameter: f64,
    inner_diameter: f64,
    height: f64,
    segments: Option<u32>,
) -> Result<SolidBuilder, BuildError> {
    let inner = positive("inner diameter", inner_diameter)?;
    if inner >= outer_diameter {
        return Err(BuildError::InvalidGeometry(format!(
            "inner diameter {inner} must be smaller than outer diameter {outer_diameter}"
        )));
    }

    let pipe_hole = cylinder(inner, height, segments)?;
    let wall = cylinder(outer_diameter, height, segments)?.hole(pipe_hole);

    let mut g = SolidBuilder::empty().add(wall);
    g.set_origin(-outer_diameter / 2.0, -outer_diameter / 2.0, 0.0);
    g.set_center(0.0, 0.0, height / 2.0);
    Ok(g.part())
}

/// Rectangular tube with walls of `wall_thickness`, closed as a part.
pub fn square_pipe(
    width: f64,
    depth: f64,
    height: f64,
    wall_thickness: f64,
) -> Result<SolidBuilder, BuildError> {
    let wall_thickness = positive("wall thickness", wall_thickness)?;
    let outer = cube(width, depth, height)?;
    if wall_thickness * 2.0 >= width.min(depth) {
        return Err(BuildError::InvalidGeometry(format!(
            "wall thickness {wall_thickness} leaves no opening in {width} x {depth}"
        )));
    }

    let pipe_hole = raw_cube(
        width - wall_thickness * 2.0,
        depth - wall_thickness * 2.0,
        height,
    )
    .right(wall_thickness)
    .forward(wall_thickness);

    let mut g = SolidBuilder::empty().add(outer.hole(pipe_hole));
    g.set_center(width / 2.0, depth / 2.0, height / 2.0);
    Ok(g.part())
}

/// Box with rounded vertical edges.
///
/// One quarter is built as the Minkowski sum of a corner cylinder and a
/// quarter box, then reflected in x and y. The result is centered on the Z
/// axis with its base at z = 0.
pub fn boxoid(
    width: f64,
    depth: f64,
    height: f64,
    corner_radius: f64,
) -> Result<SolidBuilder, BuildError> {
    if corner_radius == 0.0 {
        return cube(width, depth, height);
    }
    if !corner_radius.is_finite() || corner_radius < 0.0 {
        return Err(BuildError::InvalidGeometry(format!(
            "corner radius must be non-negative and finite, got {corner_radius}"
        )));
    }
    let width = positive("width", width)?;
    let depth = positive("depth", depth)?;
    let height = positive("height", height)?;
    if corner_radius * 2.0 >= width.min(depth) {
        return Err(BuildError::InvalidGeometry(format!(
            "corner radius {corner_radius} exceeds half of width or depth"
        )));
    }

    let quarter_width = width / 2.0 - corner_radius;
    let quarter_depth = depth / 2.0 - corner_radius;
    let quarter_height = height / 2.0;

    // Minkowski children must be added after the modifier is in place.
    let mut g = SolidBuilder::empty()
        .minkowski()?
        .add(cylinder(corner_radius * 2.0, quarter_height, None)?)
        .add(cube(quarter_width, quarter_depth, quarter_height)?)
        .reflect_x()
        .reflect_y();

    g.set_origin(-width / 2.0, -depth / 2.0, 0.0);
    g.set_center(0.0, 0.0, height / 2.0);
    Ok(g)
}
