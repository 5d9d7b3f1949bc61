//! Built-in widgets

mod color_picker;
mod combo_box;
mod grid;
mod label;
mod menu;
mod packer;
mod slider;

pub use color_picker::ColorPicker;
pub use combo_box::ComboBox;
pub use grid::GridPacker;
pub use label::{Button, Label};
pub use menu::{MenuItem, MenuPane};
pub use packer::Packer;
pub use slider::{Slider, SliderHandle, Stepping};
