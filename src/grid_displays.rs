use std::fmt;

use crate::cells::{GridCoordinate, Tile};
use crate::grid::Grid;
use crate::grid_traits::GridDisplay;
use crate::units::RowIndex;
use crate::utils::FnvHashSet;


/// Marks the cells of a route with a dot.
#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<GridCoordinate>,
}
impl PathDisplay {
    pub fn new<'a, I>(path: I) -> Self
        where I: IntoIterator<Item = &'a GridCoordinate>
    {
        PathDisplay { on_path_coordinates: path.into_iter().cloned().collect() }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> Option<String> {
        if self.on_path_coordinates.contains(&coord) {
            Some(String::from(" . "))
        } else {
            None
        }
    }
}


const WALL: &str = "███";
const OPEN: &str = "   ";

// The border is one cell thick and open only where the route enters and leaves the grid.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        let border_row = WALL.repeat(self.dimension().0 + 2);
        let side = |row: Option<RowIndex>, y: usize| if row == Some(RowIndex(y)) { OPEN } else { WALL };

        writeln!(f, "{}", border_row)?;
        for (y, row) in self.iter_row().enumerate() {

            let mut line = String::from(side(self.start_row(), y));
            for coord in row {
                let body = match self.tile(coord) {
                    Some(Tile::Start) => String::from(" S "),
                    Some(Tile::Goal) => String::from(" E "),
                    Some(Tile::Path) => {
                        self.grid_display()
                            .as_ref()
                            .and_then(|displayer| displayer.render_cell_body(coord))
                            .unwrap_or_else(|| String::from(OPEN))
                    }
                    Some(Tile::Wall) | None => String::from(WALL),
                };
                line.push_str(&body);
            }
            line.push_str(side(self.goal_row(), y));
            writeln!(f, "{}", line)?;
        }
        writeln!(f, "{}", border_row)
    }
}
