use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// The role a cell currently plays, either as part of the map (barriers and
/// the two endpoints) or as a mark left behind by a search.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    Empty,
    Barrier,
    Start,
    End,
    Open,
    Closed,
    Path,
}

impl CellKind {
    /// The character used for this kind in text maps
    pub fn symbol(self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::Barrier => '#',
            CellKind::Start => 'S',
            CellKind::End => 'E',
            CellKind::Open => 'o',
            CellKind::Closed => 'x',
            CellKind::Path => '*',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' | ' ' => Some(CellKind::Empty),
            '#' | 'X' => Some(CellKind::Barrier),
            'S' => Some(CellKind::Start),
            'E' => Some(CellKind::End),
            'o' => Some(CellKind::Open),
            'x' => Some(CellKind::Closed),
            '*' => Some(CellKind::Path),
            _ => None,
        }
    }

    /// Marks left behind by a search, as opposed to the map itself
    pub fn is_search_mark(self) -> bool {
        matches!(self, CellKind::Open | CellKind::Closed | CellKind::Path)
    }
}

impl Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A rectangular grid of cells with fixed dimensions.
///
/// Neighbors are never cached: [`Grid::neighbors_of`] reads the current
/// barrier layout every time it is called, so adding or removing a barrier
/// can never leave a stale adjacency behind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredGrid")]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<CellKind>>,
}

/// A grid as it comes out of storage, before its shape has been checked
#[derive(Deserialize)]
struct StoredGrid {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<CellKind>>,
}

impl TryFrom<StoredGrid> for Grid {
    type Error = anyhow::Error;

    fn try_from(stored: StoredGrid) -> Result<Self, Self::Error> {
        let grid = Grid::from_cells(stored.cells)?;

        if grid.rows != stored.rows || grid.columns != stored.columns {
            return Err(anyhow::anyhow!(
                "Invalid grid size {}x{}, the cells are {}x{}",
                stored.rows,
                stored.columns,
                grid.rows,
                grid.columns
            ));
        }

        Ok(grid)
    }
}

impl Grid {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![vec![CellKind::Empty; columns]; rows],
        }
    }

    /// Build a grid from rows of cells. All rows must have the same length.
    pub fn from_cells(cells: Vec<Vec<CellKind>>) -> Result<Self, anyhow::Error> {
        let rows = cells.len();
        let columns = cells.first().map(Vec::len).unwrap_or(0);

        if rows == 0 || columns == 0 {
            return Err(anyhow::anyhow!("A grid needs at least one cell"));
        }
        if let Some(row) = cells.iter().position(|r| r.len() != columns) {
            return Err(anyhow::anyhow!(
                "Row {} has {} cells, expected {}",
                row,
                cells[row].len(),
                columns
            ));
        }

        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Check if the provided point lies inside the grid
    pub fn is_valid(&self, point: Point) -> bool {
        point.row < self.rows && point.col < self.columns
    }

    pub fn get(&self, point: Point) -> Option<CellKind> {
        self.cells.get(point.row)?.get(point.col).copied()
    }

    /// Kind of the cell at `point`. Panics if the point is outside the grid.
    pub fn kind(&self, point: Point) -> CellKind {
        self.cells[point.row][point.col]
    }

    pub fn set(&mut self, point: Point, kind: CellKind) {
        self.cells[point.row][point.col] = kind;
    }

    pub fn make_start(&mut self, point: Point) {
        self.set(point, CellKind::Start);
    }

    pub fn make_end(&mut self, point: Point) {
        self.set(point, CellKind::End);
    }

    pub fn make_barrier(&mut self, point: Point) {
        self.set(point, CellKind::Barrier);
    }

    pub fn make_open(&mut self, point: Point) {
        self.set(point, CellKind::Open);
    }

    pub fn make_closed(&mut self, point: Point) {
        self.set(point, CellKind::Closed);
    }

    pub fn make_path(&mut self, point: Point) {
        self.set(point, CellKind::Path);
    }

    pub fn reset_cell(&mut self, point: Point) {
        self.set(point, CellKind::Empty);
    }

    /// Set every cell back to empty. Whoever keeps track of the start and end
    /// points has to forget them as well.
    pub fn reset(&mut self) {
        for row in self.cells.iter_mut() {
            row.fill(CellKind::Empty);
        }
    }

    /// Remove the marks of a previous search but keep barriers, start and end
    pub fn clear_search(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            if cell.is_search_mark() {
                *cell = CellKind::Empty;
            }
        }
    }

    /// Returns the neighbouring points for the given point, in the order up,
    /// left, down, right. Only points inside the grid that are not barriers
    /// will be returned.
    pub fn neighbors_of(&self, point: Point) -> Vec<Point> {
        let mut points = Vec::with_capacity(4);

        if point.row > 0 {
            points.push(Point::new(point.row - 1, point.col));
        }
        if point.col > 0 {
            points.push(Point::new(point.row, point.col - 1));
        }
        if point.row + 1 < self.rows {
            points.push(Point::new(point.row + 1, point.col));
        }
        if point.col + 1 < self.columns {
            points.push(Point::new(point.row, point.col + 1));
        }

        points.retain(|p| self.kind(*p) != CellKind::Barrier);
        points
    }

    /// Iterate over every point of the grid in row-major order
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |col| Point::new(row, col)))
    }

    /// First cell (in row-major order) with the given kind
    pub fn find(&self, kind: CellKind) -> Option<Point> {
        self.points().find(|p| self.kind(*p) == kind)
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().flatten().filter(|c| **c == kind).count()
    }

    /// Scales the grid by the given factor, i.e. to make it twice as large, pass 2.
    /// Every cell is repeated `factor` times in both directions.
    pub fn scale_up(&mut self, factor: usize) {
        let mut new_cells = vec![vec![CellKind::Empty; self.columns * factor]; self.rows * factor];

        for row in 0..self.rows {
            for col in 0..self.columns {
                for r in 0..factor {
                    for c in 0..factor {
                        new_cells[row * factor + r][col * factor + c] = self.cells[row][col];
                    }
                }
            }
        }

        self.rows *= factor;
        self.columns *= factor;
        self.cells = new_cells;
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl FromStr for Grid {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines: Vec<&str> = s.lines().collect();
        // spaces are cells, only empty lines at the end are not rows
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        let mut cells = Vec::new();
        for (row, line) in lines.into_iter().enumerate() {
            let parsed = line
                .chars()
                .enumerate()
                .map(|(col, c)| {
                    CellKind::from_symbol(c).ok_or_else(|| {
                        anyhow::anyhow!("Invalid cell '{}' at line {}, column {}", c, row + 1, col + 1)
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            cells.push(parsed);
        }

        let grid = Grid::from_cells(cells)?;

        for kind in [CellKind::Start, CellKind::End] {
            if grid.count(kind) > 1 {
                return Err(anyhow::anyhow!(
                    "Found {} '{}' cells, at most one is allowed",
                    grid.count(kind),
                    kind
                ));
            }
        }

        Ok(grid)
    }
}

#[cfg(test)]
mod test {

    use super::*;

    fn create_basic_map() -> Grid {
        "\
S.#..
..#..
..#.E
....."
            .parse()
            .unwrap()
    }

    #[test]
    fn test_neighbors_interior_and_corner() {
        let grid = Grid::new(3, 3);

        assert_eq!(
            grid.neighbors_of(Point::new(1, 1)),
            vec![
                Point::new(0, 1),
                Point::new(1, 0),
                Point::new(2, 1),
                Point::new(1, 2)
            ]
        );
        assert_eq!(
            grid.neighbors_of(Point::new(0, 0)),
            vec![Point::new(1, 0), Point::new(0, 1)]
        );
        assert_eq!(
            grid.neighbors_of(Point::new(2, 2)),
            vec![Point::new(1, 2), Point::new(2, 1)]
        );
    }

    #[test]
    fn test_neighbors_follow_barriers() {
        let mut grid = Grid::new(3, 3);
        let center = Point::new(1, 1);

        grid.make_barrier(Point::new(0, 1));
        assert_eq!(grid.neighbors_of(center).len(), 3);
        assert!(!grid.neighbors_of(center).contains(&Point::new(0, 1)));

        // removing the barrier is visible immediately
        grid.reset_cell(Point::new(0, 1));
        assert_eq!(grid.neighbors_of(center).len(), 4);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut grid = create_basic_map();
        grid.make_path(Point::new(3, 3));

        grid.reset();
        let once = grid.clone();
        grid.reset();

        assert_eq!(grid, once);
        assert!(grid.points().all(|p| grid.kind(p) == CellKind::Empty));
        assert_eq!(grid.neighbors_of(Point::new(1, 2)).len(), 4);
        assert_eq!(grid.neighbors_of(Point::new(2, 3)).len(), 4);
    }

    #[test]
    fn test_clear_search_keeps_map() {
        let mut grid = create_basic_map();
        grid.make_open(Point::new(1, 0));
        grid.make_closed(Point::new(1, 1));
        grid.make_path(Point::new(3, 3));

        grid.clear_search();

        assert_eq!(grid, create_basic_map());
    }

    #[test]
    fn test_parse_and_display() {
        let grid = create_basic_map();

        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.columns(), 5);
        assert_eq!(grid.find(CellKind::Start), Some(Point::new(0, 0)));
        assert_eq!(grid.find(CellKind::End), Some(Point::new(2, 4)));
        assert_eq!(grid.count(CellKind::Barrier), 3);
        assert_eq!(grid.to_string(), "S.#..\n..#..\n..#.E\n.....\n");
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<Grid>().is_err());
        assert!("..\n...".parse::<Grid>().is_err());
        assert!("..?".parse::<Grid>().is_err());
        assert!("S.S".parse::<Grid>().is_err());
        assert!("E\nE".parse::<Grid>().is_err());
        assert!("S.\n\n.E".parse::<Grid>().is_err());
    }

    #[test]
    fn test_parse_spaces_are_cells() {
        let blank_row: Grid = "S..\n   \n..E".parse().unwrap();
        assert_eq!(blank_row.rows(), 3);
        assert_eq!(blank_row.to_string(), "S..\n...\n..E\n");

        let trailing: Grid = "S. \n..E".parse().unwrap();
        assert_eq!(trailing.columns(), 3);
        assert_eq!(trailing.to_string(), "S..\n..E\n");

        let windows: Grid = "S.\r\n.E\r\n\r\n".parse().unwrap();
        assert_eq!(windows.to_string(), "S.\n.E\n");
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid = Grid::new(2, 3);

        assert_eq!(grid.get(Point::new(1, 2)), Some(CellKind::Empty));
        assert_eq!(grid.get(Point::new(2, 0)), None);
        assert_eq!(grid.get(Point::new(0, 3)), None);
        assert!(!grid.is_valid(Point::new(0, 3)));
    }

    #[test]
    fn test_scale_up() {
        let mut grid: Grid = "#.\n.S".parse().unwrap();
        grid.scale_up(2);

        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.columns(), 4);
        assert_eq!(grid.to_string(), "##..\n##..\n..SS\n..SS\n");
    }

    #[test]
    fn test_serde_round_trip_keeps_barriers() {
        let grid = create_basic_map();
        let json = serde_json::to_string(&grid).unwrap();
        let loaded: Grid = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.count(CellKind::Barrier), 3);
        assert_eq!(loaded, grid);
    }

    #[test]
    fn test_deserialize_checks_shape() {
        let load = |json: &str| serde_json::from_str::<Grid>(json);

        assert!(load(r#"{"rows":2,"columns":2,"cells":[]}"#).is_err());
        assert!(load(r#"{"rows":1,"columns":2,"cells":[["Empty"]]}"#).is_err());
        assert!(load(r#"{"rows":2,"columns":1,"cells":[["Empty"],["Empty","Barrier"]]}"#).is_err());

        let grid = load(r#"{"rows":1,"columns":2,"cells":[["Start","Barrier"]]}"#).unwrap();
        assert_eq!(grid.to_string(), "S#\n");
        assert!(grid.neighbors_of(Point::new(0, 0)).is_empty());
    }
}
