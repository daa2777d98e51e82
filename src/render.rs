use std::collections::HashSet;

use gridstar_navigation::{Grid, GridCoord};

/// Draws the grid as text: `S` start, `G` goal, `*` path, `.` open, `#` wall.
///
/// Rows are labelled on the left and columns (mod 10) along the bottom.
pub fn render(grid: &Grid, start: GridCoord, goal: GridCoord, path: Option<&[GridCoord]>) -> String {
    let on_path: HashSet<GridCoord> = path.unwrap_or_default().iter().copied().collect();
    let label_width = (grid.rows() - 1).to_string().len();
    let mut out = String::new();

    for row in 0..grid.rows() {
        let symbols: Vec<String> = (0..grid.cols())
            .map(|col| {
                let p = GridCoord::new(row, col);
                let symbol = if p == start {
                    'S'
                } else if p == goal {
                    'G'
                } else if on_path.contains(&p) {
                    '*'
                } else if grid.is_walkable(p) {
                    '.'
                } else {
                    '#'
                };
                symbol.to_string()
            })
            .collect();
        out.push_str(&format!("{row:>label_width$} {}\n", symbols.join(" ")));
    }

    let axis: Vec<String> = (0..grid.cols()).map(|col| (col % 10).to_string()).collect();
    out.push_str(&format!("{:label_width$} {}\n", "", axis.join(" ")));
    out
}
