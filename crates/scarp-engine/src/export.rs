//! Text export of node fields.
//!
//! Writes scalar fields over the spatial domain as plain text tables —
//! one row per node with its position — so external tooling can plot
//! or diff them. Read-only with respect to simulation state; rendering
//! itself stays outside this workspace.

use std::io::{self, Write};

use scarp_core::NodeId;
use scarp_grid::{Grid, RidgeProfile};

fn check_len(grid: &dyn Grid, values: &[f64]) -> io::Result<()> {
    if values.len() != grid.node_count() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "field covers {} nodes, grid has {}",
                values.len(),
                grid.node_count()
            ),
        ));
    }
    Ok(())
}

/// Write a scalar field as a `node x y <name>` table.
///
/// ```text
/// # node x y topographic_elevation
/// 0 0 0 0
/// 1 2 0 12.5
/// ...
/// ```
pub fn write_field_table<W: Write>(
    w: &mut W,
    grid: &dyn Grid,
    name: &str,
    values: &[f64],
) -> io::Result<()> {
    check_len(grid, values)?;
    writeln!(w, "# node x y {name}")?;
    for (i, value) in values.iter().enumerate() {
        let [x, y] = grid.position(NodeId(i as u32));
        writeln!(w, "{i} {x} {y} {value}")?;
    }
    Ok(())
}

/// Write a transect elevation series as a two-column
/// `distance_m elevation_m` table.
pub fn write_profile<W: Write>(
    w: &mut W,
    grid: &RidgeProfile,
    values: &[f64],
) -> io::Result<()> {
    check_len(grid, values)?;
    writeln!(w, "# distance_m elevation_m")?;
    for (i, value) in values.iter().enumerate() {
        writeln!(w, "{} {value}", grid.offset(NodeId(i as u32)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_table_has_header_and_rows() {
        let grid = RidgeProfile::new(3, 2.0).unwrap();
        let mut out = Vec::new();
        write_field_table(&mut out, &grid, "topographic_elevation", &[0.0, 5.0, 0.0]).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "# node x y topographic_elevation");
        assert_eq!(lines[1], "0 0 0 0");
        assert_eq!(lines[2], "1 2 0 5");
    }

    #[test]
    fn profile_is_two_columns() {
        let grid = RidgeProfile::new(3, 1.5).unwrap();
        let mut out = Vec::new();
        write_profile(&mut out, &grid, &[0.0, 1.0, 0.0]).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# distance_m elevation_m");
        assert_eq!(lines[1], "0 0");
        assert_eq!(lines[2], "1.5 1");
        assert_eq!(lines[3], "3 0");
    }

    #[test]
    fn length_mismatch_is_invalid_input() {
        let grid = RidgeProfile::new(3, 1.0).unwrap();
        let mut out = Vec::new();
        let err = write_profile(&mut out, &grid, &[0.0]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
