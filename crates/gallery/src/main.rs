//! Trellis gallery - headless widget tour
//!
//! Builds one of every built-in widget on a surface, drives it with a
//! scripted pointer and logs what the widgets report and what gets drawn.
//!
//! Usage: `gallery [style-override.json|.toml]`

use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use theme::Color;
use ui::prelude::*;
use ui::{Bounds, FixedAdvance, Font, Icon};

/// Simulated frame length
const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gallery=info".parse()?)
                .add_directive("ui=info".parse()?),
        )
        .init();

    let mut tree = Tree::new(Rc::new(ui::default_schema()?), Rc::new(FixedAdvance::default()));
    if let Some(path) = std::env::args().nth(1) {
        tree.merge_style_file(Path::new(&path))
            .with_context(|| format!("loading style override {path}"))?;
        tracing::info!("Merged style override {}", path);
    }

    let mut surface = Surface::new(tree, SurfaceConfig::default())?;
    let widgets = build(&mut surface)?;
    let mut clock = Clock::new();

    // hover long enough for the tool-tip
    let (x, y) = centre(&surface, widgets.button)?;
    clock.idle(&mut surface, x, y, 40)?;
    if let Some(tip) = surface.tool_tip() {
        tracing::info!("Tool-tip: {}", surface.tree().text(tip)?);
    }
    clock.click(&mut surface, x, y)?;

    // drag the handle most of the way along the slider
    let handle = surface.tree().children(widgets.slider)[0];
    let (x, y) = centre(&surface, handle)?;
    let right = surface.tree().element(widgets.slider)?.bounds().right();
    clock.frame(&mut surface, x, y)?;
    surface.redirect(Input::Press(MouseButton::Left))?;
    clock.glide(&mut surface, (x, y), (right - 20.0, y), 10)?;
    surface.redirect(Input::Release(MouseButton::Left))?;

    // open the combo box and pick the last choice
    let (x, y) = centre(&surface, widgets.combo)?;
    clock.click(&mut surface, x, y)?;
    if let Some(menu) = surface.menu() {
        let last = MenuPane::items(surface.tree(), menu).last().copied();
        if let Some(item) = last {
            let (x, y) = centre(&surface, item)?;
            clock.click(&mut surface, x, y)?;
        }
    }

    // press halfway along the picker's green slider
    let green = surface.tree().children(widgets.picker)[1];
    let (x, y) = centre(&surface, green)?;
    clock.click(&mut surface, x, y)?;

    let mut canvas = LogCanvas::default();
    surface.draw(&mut canvas);
    tracing::info!(
        "Drew {} rectangles, {} outlines, {} texts and {} images over {} elements",
        canvas.fills,
        canvas.strokes,
        canvas.texts,
        canvas.images,
        surface.tree().len()
    );
    Ok(())
}

struct Widgets {
    button: ElementId,
    slider: ElementId,
    combo: ElementId,
    picker: ElementId,
}

fn build(surface: &mut Surface) -> Result<Widgets> {
    let root = surface.root();
    let tree = surface.tree_mut();

    Label::new("Trellis gallery")
        .icon(Icon::new("trellis", 16.0, 16.0))
        .create(tree, &ElementOptions::new().parent(root))?;

    let grid = GridPacker::columns(2)?
        .spacing(8.0)
        .create(tree, &ElementOptions::new().parent(root).padding(8.0))?;
    let row = |text: &str| ElementOptions::new().parent(grid).tip(text);

    Label::new("Button").create(tree, &row("Plain label"))?;
    let button = Button::new("Press me").create(tree, &row("Publishes clicked_left_mouse_button"))?;
    tree.on_main_event(button, |_, event| {
        tracing::info!("Button clicked at {:?}", event.args.pointer());
        Ok(())
    })?;

    Label::new("Slider").create(tree, &ElementOptions::new().parent(grid))?;
    let slider = Slider::new(0.0, 100.0)
        .stepping(Stepping::Integer)
        .value(10.0)
        .create(tree, &ElementOptions::new().parent(grid).width(160.0))?;
    tree.on_main_event(slider, |_, event| {
        tracing::info!("Slider at {:?}", event.args.value());
        Ok(())
    })?;

    Label::new("ComboBox").create(tree, &ElementOptions::new().parent(grid))?;
    let combo = ComboBox::create(tree, &ElementOptions::new().parent(grid), Some("circle"))?;
    ComboBox::add_item(tree, combo, "Circle", "circle")?;
    ComboBox::add_item(tree, combo, "Square", "square")?;
    let menu = tree.widget::<ComboBox>(combo)?.menu();
    MenuPane::add_separator(tree, menu)?;
    ComboBox::add_item(tree, combo, "Triangle", "triangle")?;
    tree.on_main_event(combo, |_, event| {
        tracing::info!("Shape is now {:?}", event.args.text());
        Ok(())
    })?;

    Label::new("ColorPicker").create(tree, &ElementOptions::new().parent(grid))?;
    let picker = ColorPicker::new(Color::rgb(40, 120, 200)).create(tree, &ElementOptions::new().parent(grid))?;
    tree.on_main_event(picker, |_, event| {
        if let Some(color) = event.args.color() {
            tracing::info!("Picked {}", color.0.to_hex());
        }
        Ok(())
    })?;

    Ok(Widgets { button, slider, combo, picker })
}

fn centre(surface: &Surface, id: ElementId) -> Result<(f32, f32)> {
    let bounds = surface.tree().element(id)?.bounds();
    Ok((bounds.x + bounds.width / 2.0, bounds.y + bounds.height / 2.0))
}

/// Simulated frame clock
struct Clock {
    now: Instant,
}

impl Clock {
    fn new() -> Self {
        Self { now: Instant::now() }
    }

    fn frame(&mut self, surface: &mut Surface, x: f32, y: f32) -> Result<()> {
        self.now += FRAME;
        surface.move_pointer(x, y);
        surface.update(self.now)?;
        Ok(())
    }

    fn idle(&mut self, surface: &mut Surface, x: f32, y: f32, frames: u32) -> Result<()> {
        for _ in 0..frames {
            self.frame(surface, x, y)?;
        }
        Ok(())
    }

    fn glide(&mut self, surface: &mut Surface, from: (f32, f32), to: (f32, f32), frames: u32) -> Result<()> {
        for step in 1..=frames {
            let t = step as f32 / frames as f32;
            let x = from.0 + (to.0 - from.0) * t;
            let y = from.1 + (to.1 - from.1) * t;
            self.frame(surface, x, y)?;
        }
        Ok(())
    }

    fn click(&mut self, surface: &mut Surface, x: f32, y: f32) -> Result<()> {
        self.frame(surface, x, y)?;
        surface.redirect(Input::Press(MouseButton::Left))?;
        surface.redirect(Input::Release(MouseButton::Left))?;
        self.frame(surface, x, y)
    }
}

/// Canvas that only logs and counts
#[derive(Debug, Default)]
struct LogCanvas {
    fills: usize,
    strokes: usize,
    texts: usize,
    images: usize,
}

impl Canvas for LogCanvas {
    fn fill_rect(&mut self, bounds: Bounds, z: f32, color: Color) {
        self.fills += 1;
        tracing::trace!("fill {:?} z={} {}", bounds, z, color.0.to_hex());
    }

    fn stroke_rect(&mut self, bounds: Bounds, z: f32, color: Color) {
        self.strokes += 1;
        tracing::trace!("stroke {:?} z={} {}", bounds, z, color.0.to_hex());
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, z: f32, font: &Font, color: Color) {
        self.texts += 1;
        tracing::debug!("text {:?} at ({}, {}) z={} {}px {}", text, x, y, z, font.size, color.0.to_hex());
    }

    fn draw_image(&mut self, icon: &Icon, x: f32, y: f32, z: f32) {
        self.images += 1;
        tracing::debug!("image {} at ({}, {}) z={}", icon.name, x, y, z);
    }
}
