//! Layout system
//!
//! Pure packing arithmetic shared by the packer widgets. Linear packing
//! stacks children along one axis; grid packing fixes either the number of
//! columns or of rows and derives the other.

use crate::UiError;

/// Size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Bounds (position + size)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn inset(&self, edge: Edge) -> Self {
        Self {
            x: self.x + edge.left,
            y: self.y + edge.top,
            width: self.width - edge.left - edge.right,
            height: self.height - edge.top - edge.bottom,
        }
    }
}

/// Edge insets (padding)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edge {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edge {
    pub fn all(value: f32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    pub fn xy(x: f32, y: f32) -> Self {
        Self { top: y, right: x, bottom: y, left: x }
    }

    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Layout direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

impl Direction {
    fn main(self, size: Size) -> f32 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    fn cross(self, size: Size) -> f32 {
        match self {
            Self::Vertical => size.width,
            Self::Horizontal => size.height,
        }
    }

    /// (main, cross) padding before and after the content
    fn padding(self, padding: Edge) -> ((f32, f32), (f32, f32)) {
        match self {
            Self::Vertical => ((padding.top, padding.bottom), (padding.left, padding.right)),
            Self::Horizontal => ((padding.left, padding.right), (padding.top, padding.bottom)),
        }
    }

    fn size(self, main: f32, cross: f32) -> Size {
        match self {
            Self::Vertical => Size::new(cross, main),
            Self::Horizontal => Size::new(main, cross),
        }
    }
}

/// Alignment within the space a container offers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
    Fill,
}

impl Align {
    /// `left | center | right | fill`, `start`/`end` also accepted
    pub fn parse_horizontal(value: &str) -> Result<Self, UiError> {
        match value {
            "left" | "start" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "right" | "end" => Ok(Self::End),
            "fill" => Ok(Self::Fill),
            _ => Err(UiError::InvalidAlign { axis: "horizontal", value: value.to_string() }),
        }
    }

    /// `top | center | bottom | fill`, `start`/`end` also accepted
    pub fn parse_vertical(value: &str) -> Result<Self, UiError> {
        match value {
            "top" | "start" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "bottom" | "end" => Ok(Self::End),
            "fill" => Ok(Self::Fill),
            _ => Err(UiError::InvalidAlign { axis: "vertical", value: value.to_string() }),
        }
    }

    /// Offset of an `extent` sized item within `available`
    pub fn offset(self, available: f32, extent: f32) -> f32 {
        match self {
            Self::Start | Self::Fill => 0.0,
            Self::Center => (available - extent) / 2.0,
            Self::End => available - extent,
        }
    }
}

/// Where the linear packer puts one child
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    /// Cross axis extent to stretch to, for `Align::Fill` children
    pub stretch: Option<f32>,
}

/// Natural size of a linear packing: children stacked along `direction`
/// with `spacing` between neighbours, widest child across, plus padding.
pub fn linear_extent(direction: Direction, children: &[Size], spacing: f32, padding: Edge) -> Size {
    let ((main_before, main_after), (cross_before, cross_after)) = direction.padding(padding);

    let gaps = children.len().saturating_sub(1) as f32 * spacing;
    let main: f32 = children.iter().map(|s| direction.main(*s)).sum::<f32>() + gaps;
    let cross = children.iter().map(|s| direction.cross(*s)).fold(0.0, f32::max);

    direction.size(main + main_before + main_after, cross + cross_before + cross_after)
}

/// Positions for `children` (size and cross axis alignment) packed from
/// `origin`, the cross axis offering `inner_cross` after padding.
pub fn linear_placements(
    direction: Direction,
    origin: (f32, f32),
    inner_cross: f32,
    children: &[(Size, Align)],
    spacing: f32,
    padding: Edge,
) -> Vec<Placement> {
    let ((main_before, _), (cross_before, _)) = direction.padding(padding);
    let (main_origin, cross_origin) = match direction {
        Direction::Vertical => (origin.1, origin.0),
        Direction::Horizontal => (origin.0, origin.1),
    };

    let mut cursor = main_origin + main_before;
    children
        .iter()
        .map(|(size, align)| {
            let main = cursor;
            let cross = cross_origin + cross_before + align.offset(inner_cross, direction.cross(*size));
            cursor += direction.main(*size) + spacing;

            let stretch = (*align == Align::Fill).then_some(inner_cross);
            match direction {
                Direction::Vertical => Placement { x: cross, y: main, stretch },
                Direction::Horizontal => Placement { x: main, y: cross, stretch },
            }
        })
        .collect()
}

/// The fixed dimension of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridDimension {
    Columns(usize),
    Rows(usize),
}

impl GridDimension {
    /// Exactly one of `columns` and `rows`, non-zero
    pub fn from_options(columns: Option<usize>, rows: Option<usize>) -> Result<Self, UiError> {
        let dimension = match (columns, rows) {
            (Some(_), Some(_)) => return Err(UiError::ConflictingGridDimensions),
            (None, None) => return Err(UiError::MissingGridDimension),
            (Some(columns), None) => Self::Columns(columns),
            (None, Some(rows)) => Self::Rows(rows),
        };

        match dimension {
            Self::Columns(0) | Self::Rows(0) => Err(UiError::ZeroGridDimension),
            _ => Ok(dimension),
        }
    }

    /// (row, column) of child `index`
    pub fn cell(self, index: usize) -> (usize, usize) {
        match self {
            Self::Columns(columns) => (index / columns, index % columns),
            Self::Rows(rows) => (index % rows, index / rows),
        }
    }

    /// Occupied (rows, columns) for `count` children
    pub fn shape(self, count: usize) -> (usize, usize) {
        match self {
            Self::Columns(columns) => (count.div_ceil(columns), columns.min(count)),
            Self::Rows(rows) => (rows.min(count), count.div_ceil(rows)),
        }
    }
}

/// Grid arrangement computed by the last layout pass
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub dimension: GridDimension,
    /// (row, column) of every child, in child order
    pub cells: Vec<(usize, usize)>,
    pub column_widths: Vec<f32>,
    pub row_heights: Vec<f32>,
    pub spacing_h: f32,
    pub spacing_v: f32,
    pub padding: Edge,
}

impl GridLayout {
    pub fn compute(
        dimension: GridDimension,
        children: &[Size],
        spacing_h: f32,
        spacing_v: f32,
        padding: Edge,
    ) -> Self {
        let (rows, columns) = dimension.shape(children.len());
        let mut column_widths = vec![0.0f32; columns];
        let mut row_heights = vec![0.0f32; rows];
        let mut cells = Vec::with_capacity(children.len());

        for (index, size) in children.iter().enumerate() {
            let (row, column) = dimension.cell(index);
            column_widths[column] = column_widths[column].max(size.width);
            row_heights[row] = row_heights[row].max(size.height);
            cells.push((row, column));
        }

        Self {
            dimension,
            cells,
            column_widths,
            row_heights,
            spacing_h,
            spacing_v,
            padding,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.row_heights.len()
    }

    pub fn num_columns(&self) -> usize {
        self.column_widths.len()
    }

    /// Offset of `column` from the grid's left edge
    pub fn column_x(&self, column: usize) -> f32 {
        self.padding.left
            + self.column_widths[..column].iter().sum::<f32>()
            + column as f32 * self.spacing_h
    }

    /// Offset of `row` from the grid's top edge
    pub fn row_y(&self, row: usize) -> f32 {
        self.padding.top + self.row_heights[..row].iter().sum::<f32>() + row as f32 * self.spacing_v
    }

    pub fn size(&self) -> Size {
        let spaced = |extents: &[f32], spacing: f32| {
            extents.iter().sum::<f32>() + extents.len().saturating_sub(1) as f32 * spacing
        };

        Size::new(
            spaced(&self.column_widths, self.spacing_h) + self.padding.horizontal(),
            spaced(&self.row_heights, self.spacing_v) + self.padding.vertical(),
        )
    }

    pub fn is_occupied(&self, row: usize, column: usize) -> bool {
        self.cells.contains(&(row, column))
    }

    /// Bounds of every occupied cell for a grid placed at `origin`
    pub fn occupied_cells(&self, origin: (f32, f32)) -> Vec<Bounds> {
        let mut cells = Vec::with_capacity(self.cells.len());
        for (column, width) in self.column_widths.iter().enumerate() {
            for (row, height) in self.row_heights.iter().enumerate() {
                if self.is_occupied(row, column) {
                    cells.push(Bounds::new(
                        origin.0 + self.column_x(column),
                        origin.1 + self.row_y(row),
                        *width,
                        *height,
                    ));
                }
            }
        }
        cells
    }
}
