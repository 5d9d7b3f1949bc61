//! Linear packers

use crate::component::{LayoutCx, Widget};
use crate::layout::{linear_extent, linear_placements, Align, Direction, Size};
use crate::style::ElementOptions;
use crate::{ElementId, Tree, UiError};

/// Stacks its children vertically or horizontally
#[derive(Debug, Clone)]
pub struct Packer {
    direction: Direction,
    spacing: Option<f32>,
}

impl Packer {
    pub fn vertical() -> Self {
        Self { direction: Direction::Vertical, spacing: None }
    }

    pub fn horizontal() -> Self {
        Self { direction: Direction::Horizontal, spacing: None }
    }

    /// Gap between neighbours; defaults to the schema's `spacing_v` or
    /// `spacing_h`
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn create(mut self, tree: &mut Tree, options: &ElementOptions) -> Result<ElementId, UiError> {
        if self.spacing.is_none() {
            let key = spacing_key(self.direction);
            self.spacing = Some(tree.schema().default_f32(self.type_name(), &[key])?);
        }
        tree.create(options, self)
    }
}

impl Widget for Packer {
    fn type_name(&self) -> &'static str {
        match self.direction {
            Direction::Vertical => "VerticalPacker",
            Direction::Horizontal => "HorizontalPacker",
        }
    }

    fn layout(&mut self, cx: &mut LayoutCx<'_>) -> Result<(), UiError> {
        pack_linear(cx, self.direction, self.spacing.unwrap_or_default(), false)
    }
}

pub(crate) fn spacing_key(direction: Direction) -> &'static str {
    match direction {
        Direction::Vertical => "spacing_v",
        Direction::Horizontal => "spacing_h",
    }
}

/// Size the element at `cx` to fit its children and place them in order.
/// With `fill_cross` every child is stretched across, whatever its own
/// alignment.
pub(crate) fn pack_linear(
    cx: &mut LayoutCx<'_>,
    direction: Direction,
    spacing: f32,
    fill_cross: bool,
) -> Result<(), UiError> {
    let children = cx.children();
    let mut items: Vec<(Size, Align)> = Vec::with_capacity(children.len());
    for child in &children {
        // measure stretched children at their own size
        if cx.tree().element(*child)?.is_stretched() {
            cx.tree_mut().element_mut(*child)?.unstretch();
            cx.tree_mut().layout_node(*child)?;
        }

        let element = cx.tree().element(*child)?;
        let align = match (fill_cross, direction) {
            (true, _) => Align::Fill,
            (false, Direction::Vertical) => element.align_h,
            (false, Direction::Horizontal) => element.align_v,
        };
        items.push((element.size(), align));
    }
    let sizes: Vec<Size> = items.iter().map(|(size, _)| *size).collect();

    let element = cx.element_mut()?;
    let padding = element.padding;
    let natural = linear_extent(direction, &sizes, spacing, padding);
    element.set_width(natural.width);
    element.set_height(natural.height);
    element.apply_stretch();

    let origin = (element.x(), element.y());
    let inner_cross = match direction {
        Direction::Vertical => element.width() - padding.horizontal(),
        Direction::Horizontal => element.height() - padding.vertical(),
    };

    let placements = linear_placements(direction, origin, inner_cross, &items, spacing, padding);
    for (child, placement) in children.iter().zip(placements) {
        cx.tree_mut().set_position(*child, placement.x, placement.y)?;
        if let Some(extent) = placement.stretch {
            cx.tree_mut().element_mut(*child)?.stretch_across(direction, extent);
            cx.tree_mut().layout_node(*child)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::tests::tree;
    use crate::widgets::Label;

    fn label(tree: &mut Tree, parent: ElementId, text: &str, options: ElementOptions) -> ElementId {
        Label::new(text).create(tree, &options.parent(parent).padding(0.0)).unwrap()
    }

    #[test]
    fn test_vertical_packing() {
        let mut tree = tree();
        let packer = Packer::vertical()
            .spacing(3.0)
            .create(&mut tree, &ElementOptions::new().padding(5.0))
            .unwrap();
        let a = label(&mut tree, packer, "aa", ElementOptions::new());
        let b = label(&mut tree, packer, "bbbb", ElementOptions::new());

        let el = tree.element(packer).unwrap();
        // labels are 30x15 and 60x15
        assert_eq!((el.width(), el.height()), (70.0, 15.0 + 3.0 + 15.0 + 10.0));

        let a = tree.element(a).unwrap();
        let b = tree.element(b).unwrap();
        assert_eq!((a.x(), a.y()), (5.0, 5.0));
        assert_eq!((b.x(), b.y()), (5.0, 23.0));
    }

    #[test]
    fn test_horizontal_alignment() {
        let mut tree = tree();
        let packer = Packer::horizontal()
            .spacing(0.0)
            .create(&mut tree, &ElementOptions::new().padding(0.0).height(40.0))
            .unwrap();
        let top = label(&mut tree, packer, "a", ElementOptions::new());
        let center = label(&mut tree, packer, "a", ElementOptions::new().align_v("center"));
        let bottom = label(&mut tree, packer, "a", ElementOptions::new().align_v("bottom"));
        let fill = label(&mut tree, packer, "a", ElementOptions::new().align_v("fill"));

        let y = |id| tree.element(id).unwrap().y();
        assert_eq!((y(top), y(center), y(bottom), y(fill)), (0.0, 12.5, 25.0, 0.0));
        assert_eq!(tree.element(fill).unwrap().height(), 40.0);
        assert_eq!(tree.element(packer).unwrap().width(), 60.0);
        assert_eq!(tree.element(bottom).unwrap().x(), 30.0);
    }

    #[test]
    fn test_empty_packer_is_padding() {
        let mut tree = tree();
        let packer = Packer::vertical().create(&mut tree, &ElementOptions::new().padding(6.0)).unwrap();
        let el = tree.element(packer).unwrap();
        assert_eq!((el.width(), el.height()), (12.0, 12.0));
    }

    #[test]
    fn test_fixed_width_stays() {
        let mut tree = tree();
        let packer = Packer::vertical()
            .create(&mut tree, &ElementOptions::new().padding(0.0).width(10.0))
            .unwrap();
        label(&mut tree, packer, "long text", ElementOptions::new());
        assert_eq!(tree.element(packer).unwrap().width(), 10.0);
    }

    #[test]
    fn test_schema_spacing() {
        let mut tree = tree();
        let packer = Packer::vertical().create(&mut tree, &ElementOptions::new().padding(0.0)).unwrap();
        label(&mut tree, packer, "a", ElementOptions::new());
        label(&mut tree, packer, "a", ElementOptions::new());
        // spacing constant is 4
        assert_eq!(tree.element(packer).unwrap().height(), 34.0);
    }

    #[test]
    fn test_fill_child_lays_out_at_stretched_width() {
        let mut tree = tree();
        let outer = Packer::vertical()
            .create(&mut tree, &ElementOptions::new().padding(0.0).width(200.0))
            .unwrap();
        let inner = Packer::vertical()
            .create(&mut tree, &ElementOptions::new().parent(outer).padding(0.0).align_h("fill"))
            .unwrap();
        let centred = label(&mut tree, inner, "aa", ElementOptions::new().align_h("center"));

        assert_eq!(tree.element(inner).unwrap().width(), 200.0);
        // 30 wide, centred in 200
        assert_eq!(tree.element(centred).unwrap().x(), 85.0);

        tree.set_text(centred, "aaaa").unwrap();
        assert_eq!(tree.element(inner).unwrap().width(), 200.0);
        assert_eq!(tree.element(centred).unwrap().x(), 70.0);
    }

    #[test]
    fn test_fill_child_shrinks_back() {
        let mut tree = tree();
        let packer = Packer::vertical().create(&mut tree, &ElementOptions::new().padding(0.0)).unwrap();
        let narrow = label(&mut tree, packer, "a", ElementOptions::new().align_h("fill"));
        let wide = label(&mut tree, packer, "aaaaaaaa", ElementOptions::new());
        assert_eq!(tree.element(narrow).unwrap().width(), 120.0);

        tree.destroy(wide).unwrap();
        assert_eq!(tree.element(packer).unwrap().width(), 15.0);
        assert_eq!(tree.element(narrow).unwrap().width(), 15.0);
    }
}
