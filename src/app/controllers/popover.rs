/// The two settings panels hanging off the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Format,
    Font,
}

impl Panel {
    pub fn all() -> &'static [Panel] {
        &[Self::Format, Self::Font]
    }
}

/// Pointer position in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Host capability: does `point` fall inside the region owned by `panel`
/// (its trigger and its content)?
pub trait RegionHitTest {
    fn is_inside(&self, panel: Panel, point: Point) -> bool;
}

/// Where a click landed, already classified by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The toolbar button that opens or closes `panel`.
    Trigger(Panel),
    /// Anywhere inside an open panel's content.
    Inside(Panel),
    Outside,
}

/// Open/closed state of the Format and Font panels.
///
/// The panels are independent: toggling one never touches the other, so
/// both can be open at once. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Popovers {
    format_open: bool,
    font_open: bool,
}

impl Popovers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, panel: Panel) -> bool {
        match panel {
            Panel::Format => self.format_open,
            Panel::Font => self.font_open,
        }
    }

    pub fn format_open(&self) -> bool {
        self.format_open
    }

    pub fn font_open(&self) -> bool {
        self.font_open
    }

    fn slot(&mut self, panel: Panel) -> &mut bool {
        match panel {
            Panel::Format => &mut self.format_open,
            Panel::Font => &mut self.font_open,
        }
    }

    pub fn toggle(&mut self, panel: Panel) {
        let open = self.slot(panel);
        *open = !*open;
        log::debug!("{:?} panel {}", panel, if *open { "opened" } else { "closed" });
    }

    pub fn force_close(&mut self, panel: Panel) {
        *self.slot(panel) = false;
    }

    /// Close every open panel whose region does not contain `point`.
    pub fn dismiss_outside(&mut self, hit: &impl RegionHitTest, point: Point) {
        for &panel in Panel::all() {
            if self.is_open(panel) && !hit.is_inside(panel, point) {
                self.force_close(panel);
            }
        }
    }

    /// Apply a click the host has already classified.
    pub fn click(&mut self, target: ClickTarget) {
        match target {
            ClickTarget::Trigger(panel) => self.toggle(panel),
            // Propagation stops at the panel boundary.
            ClickTarget::Inside(_) => {}
            ClickTarget::Outside => {
                for &panel in Panel::all() {
                    self.force_close(panel);
                }
            }
        }
    }
}
