//! Color picker

use theme::{Channel, Color};

use crate::component::{LayoutCx, Widget};
use crate::event::{names, EventArgs, Vocabulary, BASE};
use crate::layout::Direction;
use crate::style::ElementOptions;
use crate::widgets::label::Label;
use crate::widgets::packer::pack_linear;
use crate::widgets::slider::{Slider, Stepping};
use crate::{ElementId, Tree, UiError};

const TYPE_NAME: &str = "ColorPicker";

static PICKER_EVENTS: Vocabulary = Vocabulary::new(TYPE_NAME, &[names::CHANGED], Some(&BASE));

/// Red, green and blue sliders over an indicator swatch.
///
/// Children are the three channel sliders in [`Channel::ALL`] order, then
/// the indicator label.
#[derive(Debug, Clone)]
pub struct ColorPicker {
    color: Color,
    spacing: f32,
}

impl ColorPicker {
    pub fn new(color: Color) -> Self {
        Self { color, spacing: 0.0 }
    }

    pub fn create(mut self, tree: &mut Tree, options: &ElementOptions) -> Result<ElementId, UiError> {
        let schema = tree.schema();
        self.spacing = schema.default_f32(TYPE_NAME, &["spacing_v"])?;
        let indicator_height = schema.default_f32(TYPE_NAME, &["indicator_height"])?;

        let color = self.color;
        let id = tree.create(options, self)?;
        let width = tree.element(id)?.width();

        for channel in Channel::ALL {
            let slider = Slider::new(0.0, 255.0)
                .stepping(Stepping::Integer)
                .value(f64::from(color.channel(channel)))
                .create(tree, &ElementOptions::new().parent(id).width(width).tip(channel.name()))?;

            tree.subscribe(slider, names::CHANGED, move |tree, event| match event.args.value() {
                Some(value) => Self::channel_changed(tree, id, channel, value),
                None => Ok(()),
            })?;
        }

        let indicator_options = ElementOptions::new()
            .parent(id)
            .size(width, indicator_height)
            .background_color(color);
        Label::new("").create(tree, &indicator_options)?;

        Ok(id)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Move every channel slider to `color`; each slider publishes its own
    /// `changed`, which republishes on the picker
    pub fn set_color(tree: &mut Tree, id: ElementId, color: Color) -> Result<(), UiError> {
        tree.widget_mut::<ColorPicker>(id)?.color = color;

        let sliders: Vec<ElementId> = tree.children(id).iter().take(Channel::ALL.len()).copied().collect();
        for (slider, channel) in sliders.into_iter().zip(Channel::ALL) {
            Slider::set(tree, slider, f64::from(color.channel(channel)))?;
        }
        Ok(())
    }

    pub fn indicator(tree: &Tree, id: ElementId) -> Option<ElementId> {
        tree.children(id).get(Channel::ALL.len()).copied()
    }

    fn channel_changed(tree: &mut Tree, id: ElementId, channel: Channel, value: f64) -> Result<(), UiError> {
        let picker = tree.widget_mut::<ColorPicker>(id)?;
        picker.color = picker.color.with_channel(channel, value.clamp(0.0, 255.0) as u8);
        let color = picker.color;

        if let Some(indicator) = Self::indicator(tree, id) {
            tree.element_mut(indicator)?.background_color = color;
        }
        tree.publish(id, names::CHANGED, EventArgs::Color(color))
    }
}

impl Widget for ColorPicker {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn vocabulary(&self) -> &'static Vocabulary {
        &PICKER_EVENTS
    }

    fn main_event(&self) -> Option<&'static str> {
        Some(names::CHANGED)
    }

    fn layout(&mut self, cx: &mut LayoutCx<'_>) -> Result<(), UiError> {
        pack_linear(cx, Direction::Vertical, self.spacing, false)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::tree::tests::tree;

    #[test]
    fn test_structure() {
        let mut tree = tree();
        let id = ColorPicker::new(Color::rgb(10, 20, 30)).create(&mut tree, &ElementOptions::new()).unwrap();

        let children = tree.children(id).to_vec();
        assert_eq!(children.len(), 4);
        for (slider, (channel, expected)) in children.iter().zip(Channel::ALL.iter().zip([10.0, 20.0, 30.0])) {
            assert_eq!(tree.widget::<Slider>(*slider).unwrap().get_value(), expected);
            assert_eq!(tree.element(*slider).unwrap().width(), 200.0);
            assert_eq!(tree.tip(*slider), format!("{}: {}", channel.name(), expected));
        }

        let indicator = ColorPicker::indicator(&tree, id).unwrap();
        let el = tree.element(indicator).unwrap();
        assert_eq!((el.width(), el.height()), (200.0, 25.0));
        assert_eq!(el.background_color, Color::rgb(10, 20, 30));

        // three sliders of 25 and the indicator, no spacing or padding
        assert_eq!(tree.element(id).unwrap().height(), 100.0);
    }

    #[test]
    fn test_slider_change_updates_color() {
        let mut tree = tree();
        let id = ColorPicker::new(Color::BLACK).create(&mut tree, &ElementOptions::new()).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        tree.on_main_event(id, move |_, e| {
            log.borrow_mut().extend(e.args.color());
            Ok(())
        })
        .unwrap();

        let green = tree.children(id)[1];
        Slider::set(&mut tree, green, 127.6).unwrap();

        let expected = Color::rgb(0, 128, 0);
        assert_eq!(tree.widget::<ColorPicker>(id).unwrap().color(), expected);
        assert_eq!(*seen.borrow(), vec![expected]);
        let indicator = ColorPicker::indicator(&tree, id).unwrap();
        assert_eq!(tree.element(indicator).unwrap().background_color, expected);
    }

    #[test]
    fn test_set_color() {
        let mut tree = tree();
        let id = ColorPicker::new(Color::BLACK).create(&mut tree, &ElementOptions::new()).unwrap();

        ColorPicker::set_color(&mut tree, id, Color::rgb(1, 2, 3)).unwrap();
        assert_eq!(tree.widget::<ColorPicker>(id).unwrap().color(), Color::rgb(1, 2, 3));
        let blue = tree.children(id)[2];
        assert_eq!(tree.widget::<Slider>(blue).unwrap().get_value(), 3.0);
    }
}
