//! Named demo designs the CLI can build.

use solidkit::{layout, parts, BuildError, SolidBuilder};

/// Design names with a one-line description, in `list` order.
pub const DESIGNS: &[(&str, &str)] = &[
    ("box", "10 mm test cube"),
    ("rounded-box", "60 x 40 x 20 box with 5 mm rounded edges, resting on z = 0"),
    ("pipes", "round and square tubes side by side"),
    ("enclosure", "open-top enclosure with four board standoffs"),
    ("grid", "3 x 4 grid of hex nuts"),
];

/// Build the design called `name`, or `None` if there is no such design.
pub fn build(name: &str) -> Option<Result<SolidBuilder, BuildError>> {
    let result = match name {
        "box" => parts::cube(10.0, 10.0, 10.0),
        "rounded-box" => rounded_box(),
        "pipes" => pipes(),
        "enclosure" => enclosure(),
        "grid" => grid(),
        _ => return None,
    };
    Some(result)
}

fn rounded_box() -> Result<SolidBuilder, BuildError> {
    Ok(parts::boxoid(60.0, 40.0, 20.0, 5.0)?.align_center_above())
}

fn pipes() -> Result<SolidBuilder, BuildError> {
    let round = parts::round_pipe(12.0, 9.0, 30.0, None)?.align_center_above();
    let square = parts::square_pipe(12.0, 12.0, 30.0, 1.5)?
        .align_center_above()
        .right(20.0);
    Ok(SolidBuilder::empty().add(round).add(square))
}

fn enclosure() -> Result<SolidBuilder, BuildError> {
    let (width, depth, height, wall) = (110.0, 80.0, 10.0, 3.0);

    let cavity = parts::cube(width - wall * 2.0, depth - wall * 2.0, height)?
        .align_center_above()
        .up(wall);
    let shell = parts::cube(width, depth, height)?
        .align_center_above()
        .hole(cavity)
        .part();

    let mut design = SolidBuilder::empty().add(shell);
    for x in [-29.0, 29.0] {
        for y in [-24.5, 24.5] {
            let peg = parts::cylinder(2.5, 3.0, None)?.up(5.0);
            let standoff = parts::cylinder(6.0, 5.0, None)?
                .add(peg)
                .right(x)
                .forward(y)
                .up(wall);
            design = design.add(standoff);
        }
    }
    Ok(design)
}

fn grid() -> Result<SolidBuilder, BuildError> {
    let nut = parts::hexnut(2.4, 6.35)?;
    Ok(layout::arrange_grid(&nut, 3, 4, 30.0, 20.0)?.align_center())
}
