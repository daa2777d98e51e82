use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use gridstar_navigation::astar::{octile_distance, path_cost, step_cost};
use gridstar_navigation::{AStarConfig, CostModel, Grid, GridCoord, astar_search_detailed};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Plain Dijkstra over the same 8-neighborhood, used as the optimality oracle.
fn dijkstra(grid: &Grid, start: GridCoord, goal: GridCoord) -> Option<u64> {
    let mut dist: HashMap<GridCoord, u64> = HashMap::new();
    let mut heap = BinaryHeap::new();
    dist.insert(start, 0);
    heap.push(Reverse((0u64, start)));

    while let Some(Reverse((d, p))) = heap.pop() {
        if p == goal {
            return Some(d);
        }
        if d > dist[&p] {
            continue;
        }
        for dr in -1isize..=1 {
            for dc in -1isize..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let (Some(row), Some(col)) =
                    (p.row.checked_add_signed(dr), p.col.checked_add_signed(dc))
                else {
                    continue;
                };
                let next = GridCoord::new(row, col);
                if !grid.is_walkable(next) {
                    continue;
                }
                let nd = d + step_cost(p, next);
                if nd < *dist.get(&next).unwrap_or(&u64::MAX) {
                    dist.insert(next, nd);
                    heap.push(Reverse((nd, next)));
                }
            }
        }
    }
    None
}

fn config(cost_model: CostModel) -> AStarConfig {
    AStarConfig { cost_model }
}

fn cost_model() -> impl Strategy<Value = CostModel> {
    prop_oneof![Just(CostModel::Accumulated), Just(CostModel::Standard)]
}

/// Random grid with the endpoints forced open, as the harness builds them.
fn random_grid(rows: usize, cols: usize, seed: u64, start: GridCoord, goal: GridCoord) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    Grid::with_random_walls(rows, cols, 0.3, &mut rng, &[start, goal]).unwrap()
}

proptest! {
    #[test]
    fn open_grid_paths_are_chebyshev_minimal(
        rows in 1usize..14,
        cols in 1usize..14,
        a in any::<(usize, usize)>(),
        b in any::<(usize, usize)>(),
        model in cost_model(),
    ) {
        let start = GridCoord::new(a.0 % rows, a.1 % cols);
        let goal = GridCoord::new(b.0 % rows, b.1 % cols);
        let mut grid = Grid::new(rows, cols).unwrap();

        let result = astar_search_detailed(&mut grid, start, goal, config(model)).unwrap();
        let chebyshev = start.row.abs_diff(goal.row).max(start.col.abs_diff(goal.col));

        prop_assert!(result.is_success());
        prop_assert_eq!(result.steps(), chebyshev);
        prop_assert_eq!(result.total_cost, Some(octile_distance(start, goal)));
    }

    #[test]
    fn paths_are_contiguous_and_avoid_walls(
        rows in 2usize..10,
        cols in 2usize..10,
        seed in any::<u64>(),
        a in any::<(usize, usize)>(),
        b in any::<(usize, usize)>(),
        model in cost_model(),
    ) {
        let start = GridCoord::new(a.0 % rows, a.1 % cols);
        let goal = GridCoord::new(b.0 % rows, b.1 % cols);
        let mut grid = random_grid(rows, cols, seed, start, goal);
        let reachable = dijkstra(&grid, start, goal).is_some();

        let result = astar_search_detailed(&mut grid, start, goal, config(model)).unwrap();
        prop_assert_eq!(result.is_success(), reachable);

        if let Some(path) = &result.path {
            prop_assert_eq!(path.first(), Some(&start));
            prop_assert_eq!(path.last(), Some(&goal));
            for p in path {
                prop_assert!(grid.is_walkable(*p));
            }
            for w in path.windows(2) {
                let dr = w[0].row.abs_diff(w[1].row);
                let dc = w[0].col.abs_diff(w[1].col);
                prop_assert!(dr <= 1 && dc <= 1 && (dr, dc) != (0, 0));
            }
            prop_assert_eq!(result.total_cost, Some(path_cost(path)));
        }
    }

    #[test]
    fn standard_model_is_optimal(
        rows in 2usize..10,
        cols in 2usize..10,
        seed in any::<u64>(),
        a in any::<(usize, usize)>(),
        b in any::<(usize, usize)>(),
    ) {
        let start = GridCoord::new(a.0 % rows, a.1 % cols);
        let goal = GridCoord::new(b.0 % rows, b.1 % cols);
        let mut grid = random_grid(rows, cols, seed, start, goal);
        let optimum = dijkstra(&grid, start, goal);

        let result =
            astar_search_detailed(&mut grid, start, goal, config(CostModel::Standard)).unwrap();
        prop_assert_eq!(result.total_cost, optimum);
    }

    #[test]
    fn search_is_deterministic_after_reset(
        rows in 2usize..10,
        cols in 2usize..10,
        seed in any::<u64>(),
        model in cost_model(),
    ) {
        let start = GridCoord::new(0, 0);
        let goal = GridCoord::new(rows - 1, cols - 1);
        let mut grid = random_grid(rows, cols, seed, start, goal);

        let first = astar_search_detailed(&mut grid, start, goal, config(model)).unwrap();
        grid.reset_search_state();
        let second = astar_search_detailed(&mut grid, start, goal, config(model)).unwrap();

        prop_assert_eq!(first, second);
    }
}
