//! Grid packer

use theme::Color;

use crate::component::{DrawCx, LayoutCx, Widget};
use crate::element::Element;
use crate::layout::{GridDimension, GridLayout, Size};
use crate::style::ElementOptions;
use crate::{ElementId, Tree, UiError};

const TYPE_NAME: &str = "GridPacker";

/// Arranges children in a grid with either a fixed number of columns
/// (filled row by row) or a fixed number of rows (filled round-robin).
#[derive(Debug, Clone)]
pub struct GridPacker {
    dimension: GridDimension,
    spacing_h: Option<f32>,
    spacing_v: Option<f32>,
    cell_background_color: Color,
    cell_border_color: Color,
    /// Arrangement from the last layout pass
    layout: Option<GridLayout>,
}

impl GridPacker {
    /// Exactly one of `columns` and `rows` must be given, and be non-zero
    pub fn new(columns: Option<usize>, rows: Option<usize>) -> Result<Self, UiError> {
        Ok(Self {
            dimension: GridDimension::from_options(columns, rows)?,
            spacing_h: None,
            spacing_v: None,
            cell_background_color: Color::TRANSPARENT,
            cell_border_color: Color::TRANSPARENT,
            layout: None,
        })
    }

    pub fn columns(columns: usize) -> Result<Self, UiError> {
        Self::new(Some(columns), None)
    }

    pub fn rows(rows: usize) -> Result<Self, UiError> {
        Self::new(None, Some(rows))
    }

    pub fn spacing(self, spacing: f32) -> Self {
        self.spacing_h(spacing).spacing_v(spacing)
    }

    pub fn spacing_h(mut self, spacing: f32) -> Self {
        self.spacing_h = Some(spacing);
        self
    }

    pub fn spacing_v(mut self, spacing: f32) -> Self {
        self.spacing_v = Some(spacing);
        self
    }

    pub fn create(mut self, tree: &mut Tree, options: &ElementOptions) -> Result<ElementId, UiError> {
        let schema = tree.schema();
        if self.spacing_h.is_none() {
            self.spacing_h = Some(schema.default_f32(TYPE_NAME, &["spacing_h"])?);
        }
        if self.spacing_v.is_none() {
            self.spacing_v = Some(schema.default_f32(TYPE_NAME, &["spacing_v"])?);
        }
        self.cell_background_color = schema.default_color(TYPE_NAME, &["cell_background_color"])?;
        self.cell_border_color = schema.default_color(TYPE_NAME, &["cell_border_color"])?;

        tree.create(options, self)
    }

    pub fn dimension(&self) -> GridDimension {
        self.dimension
    }

    pub fn grid_layout(&self) -> Option<&GridLayout> {
        self.layout.as_ref()
    }
}

impl Widget for GridPacker {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn layout(&mut self, cx: &mut LayoutCx<'_>) -> Result<(), UiError> {
        let children = cx.children();
        let sizes = children
            .iter()
            .map(|child| cx.tree().element(*child).map(|e| e.size()))
            .collect::<Result<Vec<Size>, UiError>>()?;

        let element = cx.element_mut()?;
        let layout = GridLayout::compute(
            self.dimension,
            &sizes,
            self.spacing_h.unwrap_or_default(),
            self.spacing_v.unwrap_or_default(),
            element.padding,
        );
        let size = layout.size();
        element.set_width(size.width);
        element.set_height(size.height);
        let origin = (element.x(), element.y());

        for (child, (row, column)) in children.iter().zip(&layout.cells) {
            let x = origin.0 + layout.column_x(*column);
            let y = origin.1 + layout.row_y(*row);
            cx.tree_mut().set_position(*child, x, y)?;
        }

        self.layout = Some(layout);
        Ok(())
    }

    fn draw_background(&self, element: &Element, cx: &mut DrawCx<'_>) {
        let Some(layout) = &self.layout else {
            return;
        };
        if self.cell_background_color.is_transparent() {
            return;
        }
        for cell in layout.occupied_cells((element.x(), element.y())) {
            cx.canvas.fill_rect(cell, element.z, self.cell_background_color);
        }
    }

    fn draw_border(&self, element: &Element, cx: &mut DrawCx<'_>) {
        let Some(layout) = &self.layout else {
            return;
        };
        if self.cell_border_color.is_transparent() {
            return;
        }
        for cell in layout.occupied_cells((element.x(), element.y())) {
            cx.canvas.stroke_rect(cell, element.z, self.cell_border_color);
        }
    }
}
