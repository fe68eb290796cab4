use super::*;

fn grid_from_rows(rows: &[&str]) -> Grid {
    let height = rows.len();
    let width = rows[0].len();
    let cells = rows
        .iter()
        .flat_map(|row| row.bytes().map(|b| (b == b'#') as u8))
        .collect();
    Grid::from_cells(width, height, cells).unwrap()
}

/// Straightforward modulo-per-access count used as a reference.
fn count_neighbors_naive(grid: &Grid, x: usize, y: usize) -> u8 {
    let (w, h) = (grid.width() as isize, grid.height() as isize);
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let nx = (x as isize + dx).rem_euclid(w) as usize;
            let ny = (y as isize + dy).rem_euclid(h) as usize;
            count += grid.get(nx, ny).unwrap() as u8;
        }
    }
    count
}

#[test]
fn rule_table() {
    for n in 0..=8 {
        assert_eq!(next_state(ALIVE, n), (n == 2 || n == 3) as u8, "alive, {n}");
        assert_eq!(next_state(DEAD, n), (n == 3) as u8, "dead, {n}");
    }
}

#[test]
fn block_is_still_life() {
    let grid = grid_from_rows(&[
        "......", //
        ".##...",
        ".##...",
        "......",
        "......",
    ]);
    assert_eq!(step(&grid), grid);
}

#[test]
fn blinker_has_period_two() {
    let horizontal = grid_from_rows(&[
        ".....", //
        ".....",
        ".###.",
        ".....",
        ".....",
    ]);
    let vertical = grid_from_rows(&[
        ".....", //
        "..#..",
        "..#..",
        "..#..",
        ".....",
    ]);
    let once = step(&horizontal);
    assert_eq!(once, vertical);
    assert_eq!(step(&once), horizontal);
}

#[test]
fn neighbors_wrap_around_edges() {
    let mut grid = Grid::new(3, 4).unwrap();
    grid.set(2, 1, true).unwrap();
    // (0, 1) sees (2, 1) across the left edge, like a direct neighbour
    assert_eq!(count_neighbors(&grid, 0, 1).unwrap(), 1);
    assert_eq!(count_neighbors(&grid, 1, 1).unwrap(), 1);

    let mut grid = Grid::new(5, 5).unwrap();
    grid.set(4, 4, true).unwrap();
    assert_eq!(count_neighbors(&grid, 0, 0).unwrap(), 1);
    assert_eq!(count_neighbors(&grid, 2, 2).unwrap(), 0);
}

#[test]
fn count_neighbors_matches_naive_count() {
    let mut grid = Grid::new(13, 7).unwrap();
    grid.randomize(0.5, Some(7)).unwrap();
    for y in 0..7 {
        for x in 0..13 {
            let n = count_neighbors(&grid, x, y).unwrap();
            assert!(n <= 8);
            assert_eq!(n, count_neighbors_naive(&grid, x, y), "({x}, {y})");
        }
    }
    assert!(matches!(
        count_neighbors(&grid, 13, 0),
        Err(LifeError::OutOfRange { .. })
    ));
}

#[test]
fn fully_alive_torus_dies() {
    let grid = Grid::from_cells(4, 4, vec![ALIVE; 16]).unwrap();
    assert!(step(&grid).is_empty());
}

#[test]
fn glider_wraps_across_corner() {
    let glider = grid_from_rows(&[
        ".#......", //
        "..#.....",
        "###.....",
        "........",
        "........",
        "........",
        "........",
        "........",
    ]);
    // a glider moves by (1, 1) every 4 generations; 32 generations on an 8x8
    // torus bring it back to the start
    let mut grid = glider.clone();
    for _ in 0..32 {
        grid = step(&grid);
        assert_eq!(grid.population(), 5);
    }
    assert_eq!(grid, glider);
}

#[test]
fn step_does_not_touch_input() {
    let mut grid = Grid::new(16, 16).unwrap();
    grid.randomize(0.3, Some(42)).unwrap();
    let snapshot = grid.clone();
    let next = step(&grid);
    assert_eq!(grid, snapshot);
    assert_ne!(next, snapshot);
}

#[test]
fn step_into_matches_step() {
    let mut grid = Grid::new(20, 11).unwrap();
    grid.randomize(0.4, Some(3)).unwrap();
    let mut dst = Grid::new(20, 11).unwrap();
    step_into(&grid, &mut dst).unwrap();
    assert_eq!(dst, step(&grid));

    let mut wrong = Grid::new(11, 20).unwrap();
    assert!(matches!(
        step_into(&grid, &mut wrong),
        Err(LifeError::DimensionMismatch { .. })
    ));
}

#[test]
fn step_cells_validates_message() {
    let grid = grid_from_rows(&["...", "###", "..."]);
    let next = step_cells(grid.cells(), 3, 3).unwrap();
    assert_eq!(next, step(&grid).into_cells());

    assert_eq!(
        step_cells(&[0, 1, 0], 2, 2),
        Err(LifeError::DimensionMismatch {
            expected: 4,
            actual: 3
        })
    );
    assert!(matches!(
        step_cells(&[], 0, 3),
        Err(LifeError::InvalidDimension { .. })
    ));
    assert!(matches!(
        step_cells(&[0, 5, 0, 0], 2, 2),
        Err(LifeError::InvalidCellValue { index: 1, value: 5 })
    ));
}

#[test]
fn degenerate_sizes() {
    // a single cell is its own neighbour eight times
    let single = Grid::from_cells(1, 1, vec![ALIVE]).unwrap();
    assert_eq!(count_neighbors(&single, 0, 0).unwrap(), 8);
    assert!(step(&single).is_empty());

    let row = grid_from_rows(&["#.#.#"]);
    for x in 0..5 {
        assert_eq!(count_neighbors(&row, x, 0).unwrap(), count_neighbors_naive(&row, x, 0));
    }
    assert_eq!(step(&row).cells().len(), 5);
}
