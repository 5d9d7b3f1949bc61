//! Combo box

use crate::component::{DrawCx, EventCx, LayoutCx, Widget};
use crate::element::Element;
use crate::event::{names, Event, EventArgs, Vocabulary, BASE};
use crate::style::ElementOptions;
use crate::surface::SurfaceRequest;
use crate::widgets::label::{Button, Label};
use crate::widgets::menu::{MenuItem, MenuPane};
use crate::{ElementId, Tree, UiError};

static COMBO_EVENTS: Vocabulary = Vocabulary::new("ComboBox", &[names::CHANGED], Some(&BASE));

/// Button showing the current choice; clicking it opens a menu of choices
/// just below.
#[derive(Debug, Clone)]
pub struct ComboBox {
    button: Button,
    menu: ElementId,
    value: Option<String>,
}

impl ComboBox {
    /// Create a combo box with an empty menu, initially holding `value`
    pub fn create(tree: &mut Tree, options: &ElementOptions, value: Option<&str>) -> Result<ElementId, UiError> {
        let menu = MenuPane::new().create(tree, &ElementOptions::new())?;

        let mut button = Button::with_kind("ComboBox", "");
        button.resolve(tree.schema(), options)?;
        let combo = Self {
            button,
            menu,
            value: value.map(str::to_string),
        };
        let id = tree.create(options, combo)?;

        tree.subscribe(menu, names::SELECTED, move |tree, event| match event.args.text() {
            Some(value) => Self::set_value(tree, id, value),
            None => Ok(()),
        })?;
        Ok(id)
    }

    /// Add a choice; if it holds the current value the text follows it
    pub fn add_item(
        tree: &mut Tree,
        id: ElementId,
        text: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<ElementId, UiError> {
        let text = text.into();
        let value = value.into();
        let combo = tree.widget::<ComboBox>(id)?;
        let (menu, current) = (combo.menu, combo.value.as_deref() == Some(value.as_str()));

        let item = MenuPane::add_item(tree, menu, text.clone(), value)?;
        if current {
            tree.set_text(id, text)?;
        }
        Ok(item)
    }

    /// Select `value`; publishes `changed` only when it differs from the
    /// current value. Unknown values keep the current text.
    pub fn set_value(tree: &mut Tree, id: ElementId, value: &str) -> Result<(), UiError> {
        let combo = tree.widget::<ComboBox>(id)?;
        if combo.value.as_deref() == Some(value) {
            return Ok(());
        }

        let menu = combo.menu;
        let text = MenuPane::find(tree, menu, value)
            .and_then(|item| tree.widget::<MenuItem>(item).ok())
            .map(|item| item.text().to_string());

        tree.widget_mut::<ComboBox>(id)?.value = Some(value.to_string());
        if let Some(text) = text {
            tree.set_text(id, text)?;
        }
        tree.publish(id, names::CHANGED, EventArgs::Text(value.to_string()))
    }

    /// Select the item at `index`; out of range indices are ignored
    pub fn set_index(tree: &mut Tree, id: ElementId, index: usize) -> Result<(), UiError> {
        let menu = tree.widget::<ComboBox>(id)?.menu;
        let value = MenuPane::items(tree, menu)
            .get(index)
            .and_then(|item| tree.widget::<MenuItem>(*item).ok())
            .filter(|item| !item.is_separator())
            .map(|item| item.value().to_string());

        match value {
            Some(value) => Self::set_value(tree, id, &value),
            None => Ok(()),
        }
    }

    /// Index of the current value in the menu
    pub fn index(tree: &Tree, id: ElementId) -> Result<Option<usize>, UiError> {
        let combo = tree.widget::<ComboBox>(id)?;
        Ok(combo.value.as_deref().and_then(|value| MenuPane::index(tree, combo.menu, value)))
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn menu(&self) -> ElementId {
        self.menu
    }
}

impl Widget for ComboBox {
    fn type_name(&self) -> &'static str {
        self.button.type_name()
    }

    fn vocabulary(&self) -> &'static Vocabulary {
        &COMBO_EVENTS
    }

    fn main_event(&self) -> Option<&'static str> {
        Some(names::CHANGED)
    }

    /// At least four characters wide and one line high
    fn layout(&mut self, cx: &mut LayoutCx<'_>) -> Result<(), UiError> {
        self.button.layout(cx)?;

        let element = cx.element_mut()?;
        let (font_size, padding) = (element.font.size, element.padding);
        element.set_height(element.height().max(font_size + padding.vertical()));
        element.set_width(element.width().max(font_size * 4.0 + padding.horizontal()));
        Ok(())
    }

    fn handle_event(&mut self, cx: &mut EventCx<'_>, event: &Event) -> Result<(), UiError> {
        self.button.handle_event(cx, event)?;

        if event.name == names::CLICKED_LEFT_MOUSE_BUTTON {
            let element = cx.element()?;
            let (x, y) = (element.x(), element.y() + element.height() + 1.0);
            cx.tree_mut().set_position(self.menu, x, y)?;
            cx.request(SurfaceRequest::ShowMenu(self.menu));
        }
        Ok(())
    }

    fn enabled_changed(&mut self, element: &mut Element) {
        self.button.enabled_changed(element);
    }

    fn label(&self) -> Option<&Label> {
        Some(&self.button.label)
    }

    fn label_mut(&mut self) -> Option<&mut Label> {
        Some(&mut self.button.label)
    }

    fn owned_nodes(&self) -> Vec<ElementId> {
        vec![self.menu]
    }

    fn draw_foreground(&self, element: &Element, cx: &mut DrawCx<'_>) {
        self.button.draw_foreground(element, cx);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::tree::tests::tree;

    fn combo(tree: &mut Tree, value: Option<&str>) -> ElementId {
        let id = ComboBox::create(tree, &ElementOptions::new().position(10.0, 20.0), value).unwrap();
        ComboBox::add_item(tree, id, "Red", "red").unwrap();
        ComboBox::add_item(tree, id, "Green", "green").unwrap();
        ComboBox::add_item(tree, id, "Blue", "blue").unwrap();
        id
    }

    fn changes(tree: &mut Tree, id: ElementId) -> Rc<RefCell<Vec<String>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        tree.on_main_event(id, move |_, e| {
            log.borrow_mut().push(e.args.text().unwrap_or_default().to_string());
            Ok(())
        })
        .unwrap();
        seen
    }

    #[test]
    fn test_minimum_size() {
        let mut tree = tree();
        let id = ComboBox::create(&mut tree, &ElementOptions::new(), None).unwrap();
        let el = tree.element(id).unwrap();
        // font 15, padding 4
        assert_eq!((el.width(), el.height()), (68.0, 23.0));
    }

    #[test]
    fn test_initial_value_sets_text() {
        let mut tree = tree();
        let id = combo(&mut tree, Some("green"));
        assert_eq!(tree.text(id).unwrap(), "Green");
        assert_eq!(ComboBox::index(&tree, id).unwrap(), Some(1));
    }

    #[test]
    fn test_set_value_publishes_only_changes() {
        let mut tree = tree();
        let id = combo(&mut tree, Some("red"));
        let seen = changes(&mut tree, id);

        ComboBox::set_value(&mut tree, id, "red").unwrap();
        ComboBox::set_value(&mut tree, id, "blue").unwrap();
        ComboBox::set_index(&mut tree, id, 1).unwrap();
        ComboBox::set_index(&mut tree, id, 7).unwrap();

        assert_eq!(*seen.borrow(), vec!["blue".to_string(), "green".to_string()]);
        assert_eq!(tree.text(id).unwrap(), "Green");
        assert_eq!(tree.widget::<ComboBox>(id).unwrap().value(), Some("green"));
    }

    #[test]
    fn test_click_shows_menu_below() {
        let mut tree = tree();
        let id = combo(&mut tree, None);
        let menu = tree.widget::<ComboBox>(id).unwrap().menu();

        tree.publish(id, names::CLICKED_LEFT_MOUSE_BUTTON, EventArgs::Pointer { x: 11.0, y: 21.0 })
            .unwrap();
        assert_eq!(tree.take_requests(), vec![SurfaceRequest::ShowMenu(menu)]);

        let el = tree.element(menu).unwrap();
        assert_eq!((el.x(), el.y()), (10.0, 20.0 + 23.0 + 1.0));
    }

    #[test]
    fn test_selecting_an_item() {
        let mut tree = tree();
        let id = combo(&mut tree, None);
        let seen = changes(&mut tree, id);
        let menu = tree.widget::<ComboBox>(id).unwrap().menu();
        let blue = MenuPane::items(&tree, menu)[2];

        tree.publish(blue, names::LEFT_MOUSE_BUTTON, EventArgs::Pointer { x: 0.0, y: 0.0 }).unwrap();
        assert_eq!(*seen.borrow(), vec!["blue".to_string()]);
        assert_eq!(tree.text(id).unwrap(), "Blue");
        assert_eq!(tree.take_requests(), vec![SurfaceRequest::HideMenu]);
    }

    #[test]
    fn test_destroy_takes_menu() {
        let mut tree = tree();
        let id = combo(&mut tree, None);
        let menu = tree.widget::<ComboBox>(id).unwrap().menu();
        tree.destroy(id).unwrap();
        assert!(!tree.contains(menu));
        assert!(tree.is_empty());
    }
}
