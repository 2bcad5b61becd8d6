/// Side length used when the driver is not told otherwise.
pub const DEFAULT_GRID_SIZE: usize = 40;

/// Smallest grid that can hold a Start in column 0 and a Goal in column N - 1 as distinct cells.
pub const MIN_GRID_SIZE: usize = 2;

/// Side length of an N * N grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct GridSize(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Ord, PartialOrd)]
pub struct RowIndex(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Ord, PartialOrd)]
pub struct ColumnIndex(pub usize);
