use std::collections::HashSet;

use gridstar_navigation::{AStarConfig, CostModel, Grid, GridCoord, astar_search_detailed};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    // 10x10 maze, '#' marks a wall
    let mut grid: Grid = "
        ..........
        .#......#.
        ...#......
        .##.###.#.
        ...#.#....
        .#.#...#..
        ...#.#.##.
        .#.....#..
        .#..#.....
        ...###....
    "
    .parse()?;

    let start = GridCoord::new(0, 0);
    let goal = GridCoord::new(9, 9);

    println!("Grid:");
    print_grid(&grid, start, goal, None);

    for cost_model in [CostModel::Accumulated, CostModel::Standard] {
        grid.reset_search_state();
        let result = astar_search_detailed(&mut grid, start, goal, AStarConfig { cost_model })?;
        println!("\n[{cost_model}] {result}");

        match &result.path {
            Some(path) => {
                let path_set: HashSet<GridCoord> = path.iter().copied().collect();
                print_grid(&grid, start, goal, Some(&path_set));
            }
            None => println!("No path found."),
        }
    }

    Ok(())
}

fn print_grid(grid: &Grid, start: GridCoord, goal: GridCoord, path: Option<&HashSet<GridCoord>>) {
    for row in 0..grid.rows() {
        print!("{row} ");
        for col in 0..grid.cols() {
            let p = GridCoord::new(row, col);
            let symbol = if p == start {
                'S'
            } else if p == goal {
                'G'
            } else if path.is_some_and(|set| set.contains(&p)) {
                '*'
            } else if grid.is_walkable(p) {
                '.'
            } else {
                '#'
            };
            print!("{symbol} ");
        }
        println!();
    }

    print!("  ");
    for col in 0..grid.cols() {
        print!("{} ", col % 10);
    }
    println!();
}
