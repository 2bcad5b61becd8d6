use crate::cells::GridCoordinate;

pub trait GridDisplay {
    /// Render the contents of a non-wall grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    /// Returning None falls back to the plain tile rendering.
    fn render_cell_body(&self, _: GridCoordinate) -> Option<String> {
        None
    }
}
