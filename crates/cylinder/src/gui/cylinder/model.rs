use crate::config::Config;
use crate::gui::cylinder::{DRAG_SLOP, FONT_SIZE, ITEM_HEIGHT_EM, WHEEL_STEP};
use drum::{Attribute, Clock, Command, Picker, PickerEvent, RotateOptions, SystemClock};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Everything the drawing area needs: the picker plus pointer and layout state.
pub struct State<C: Clock = SystemClock> {
    pub picker: Picker<C>,
    pub config: Config,
    pub center: Point,
    pub width: f64,
    /// Physical ring slot under the pointer.
    pub hover: Option<usize>,
    drag_offset: f64,
    dragged: bool,
}

impl State<SystemClock> {
    pub fn from_config(config: Config) -> Self {
        let picker = Picker::new(config.items.clone(), &config.picker);
        Self::new(picker, config)
    }
}

impl<C: Clock> State<C> {
    pub fn new(picker: Picker<C>, config: Config) -> Self {
        Self {
            picker,
            config,
            center: Point::default(),
            width: 0.0,
            hover: None,
            drag_offset: 0.0,
            dragged: false,
        }
    }

    pub fn item_height(&self) -> f64 {
        FONT_SIZE * ITEM_HEIGHT_EM
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.center = Point::new(width / 2.0, height / 2.0);
    }

    /// Physical slot drawn at `point`, if it shows an item.
    pub fn slot_at(&self, point: Point) -> Option<usize> {
        let item_height = self.item_height();
        self.picker
            .frame()
            .slots
            .iter()
            .filter(|s| s.item.is_some() && s.style.is_visible())
            .find(|s| {
                let y = self.center.y + s.position * item_height;
                (point.y - y).abs() <= item_height / 2.0
            })
            .map(|s| s.physical)
    }

    /// Returns true when the hovered slot changed.
    pub fn update_cursor(&mut self, point: Point) -> bool {
        let hover = if self.picker.disabled() {
            None
        } else {
            self.slot_at(point)
        };
        let changed = hover != self.hover;
        self.hover = hover;
        changed
    }

    pub fn clear_hover(&mut self) -> bool {
        self.hover.take().is_some()
    }

    pub fn drag_begin(&mut self) {
        self.drag_offset = 0.0;
        self.dragged = false;
    }

    /// `offset_y` is the distance from the drag start, as GTK reports it.
    pub fn drag_update(&mut self, offset_y: f64) {
        let dy = offset_y - self.drag_offset;
        self.drag_offset = offset_y;
        if offset_y.abs() > DRAG_SLOP {
            self.dragged = true;
        }
        if dy != 0.0 {
            self.picker.pan_move(dy);
        }
    }

    pub fn drag_end(&mut self) {
        if self.dragged {
            self.picker.pan_end();
        }
    }

    pub fn scroll(&mut self, dy: f64) {
        self.picker.wheel(dy * WHEEL_STEP);
    }

    pub fn click(&mut self, point: Point) {
        if self.dragged {
            return;
        }
        if let Some(physical) = self.slot_at(point) {
            self.picker.click_slot(physical);
        }
    }

    pub fn apply_command(&mut self, command: Command) {
        let delta = match command {
            Command::Next => 1,
            Command::Prev => -1,
            Command::Rotate(delta) => delta,
            Command::Stop => {
                let _ = self.picker.stop_inertia();
                return;
            }
            Command::Set(name, value) => {
                self.picker.apply_attribute(Attribute::parse(name, Some(&value)));
                return;
            }
            Command::Unset(name) => {
                self.picker.apply_attribute(Attribute::parse(name, None));
                return;
            }
        };

        if let Err(e) = self.picker.rotate_by(delta, RotateOptions::default()) {
            log::info!("rotate {} ignored: {}", delta, e);
        }
    }

    /// Applies a reloaded config. Only settings that differ from the last
    /// loaded config are pushed, so the current selection survives edits to
    /// unrelated keys.
    pub fn apply_config(&mut self, config: Config) {
        let (old, new) = (&self.config.picker, &config.picker);
        self.picker.configure(new);

        if config.items != self.config.items {
            self.picker.set_items(config.items.clone());
        }
        if new.infinite != old.infinite {
            self.picker.set_infinite(new.infinite);
        }
        if new.curvature != old.curvature {
            self.picker.set_curvature(new.curvature);
        }
        if new.disabled != old.disabled {
            self.picker.set_disabled(new.disabled);
        }
        if new.value != old.value {
            self.picker.set_value(new.value);
        }
        self.config = config;
    }

    pub fn poll(&mut self) -> Vec<PickerEvent> {
        self.picker.poll()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drum::{AttributeName, Label, ManualClock, PickerConfig};
    use std::time::Duration;

    fn state(infinite: bool) -> (State<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let config = Config {
            items: ["a", "b", "c", "d", "e"].into_iter().map(Label::from).collect(),
            picker: PickerConfig {
                value: 2,
                infinite,
                ..PickerConfig::default()
            },
        };
        let picker = Picker::with_clock(config.items.clone(), &config.picker, clock.clone());
        let mut state = State::new(picker, config);
        state.resize(200.0, 400.0);
        (state, clock)
    }

    fn settle(state: &mut State<ManualClock>, clock: &ManualClock) -> Vec<PickerEvent> {
        clock.advance(Duration::from_secs(5));
        state.poll()
    }

    #[test]
    fn test_slot_at_center_is_selected() {
        let (state, _) = state(false);
        let physical = state.slot_at(Point::new(100.0, 200.0)).unwrap();
        let slot = state.picker.ring().get(physical).unwrap();
        assert_eq!(slot.item, Some(2));
        assert_eq!(slot.depth, 0);

        let below = state.slot_at(Point::new(100.0, 200.0 + state.item_height())).unwrap();
        assert_eq!(state.picker.ring().get(below).unwrap().depth, 1);
    }

    #[test]
    fn test_click_rotates_to_slot() {
        let (mut state, clock) = state(false);
        let y = 200.0 - 2.0 * state.item_height();
        state.click(Point::new(100.0, y));
        assert!(state.picker.is_animating());

        settle(&mut state, &clock);
        assert_eq!(state.picker.value(), 0);
    }

    #[test]
    fn test_drag_does_not_click() {
        let (mut state, clock) = state(false);
        state.drag_begin();
        state.drag_update(12.0);
        settle(&mut state, &clock);
        assert_eq!(state.picker.value(), 1);

        let below = Point::new(100.0, 200.0 + state.item_height());
        state.click(below);
        assert!(!state.picker.is_animating());

        state.drag_begin();
        state.click(below);
        assert!(state.picker.is_animating());
        settle(&mut state, &clock);
        assert_eq!(state.picker.value(), 2);
    }

    #[test]
    fn test_hover_tracks_pointer() {
        let (mut state, _) = state(true);
        assert!(state.update_cursor(Point::new(100.0, 200.0)));
        assert!(!state.update_cursor(Point::new(100.0, 201.0)));
        assert!(state.clear_hover());
        assert!(!state.clear_hover());

        state.apply_command(Command::Set(AttributeName::Disabled, String::new()));
        assert!(!state.update_cursor(Point::new(100.0, 200.0)));
        assert_eq!(state.hover, None);
    }

    #[test]
    fn test_commands() {
        let (mut state, clock) = state(true);
        state.apply_command(Command::Prev);
        let events = settle(&mut state, &clock);
        assert_eq!(state.picker.value(), 1);
        assert!(events.contains(&PickerEvent::RotationSettled { value: 1 }));

        state.apply_command(Command::Rotate(-3));
        settle(&mut state, &clock);
        assert_eq!(state.picker.value(), 3);

        state.apply_command(Command::Set(AttributeName::Value, "0".to_string()));
        assert_eq!(state.picker.value(), 0);

        state.apply_command(Command::Unset(AttributeName::Infinite));
        assert!(!state.picker.infinite());
    }

    #[test]
    fn test_reload_keeps_selection() {
        let (mut state, clock) = state(false);
        state.apply_command(Command::Next);
        settle(&mut state, &clock);
        assert_eq!(state.picker.value(), 3);

        let mut config = state.config.clone();
        config.picker.curvature = 45.0;
        state.apply_config(config.clone());
        assert_eq!(state.picker.value(), 3);
        assert_eq!(state.picker.curvature(), 45.0);

        config.picker.value = 1;
        state.apply_config(config.clone());
        assert_eq!(state.picker.value(), 1);

        config.items.truncate(1);
        state.apply_config(config);
        assert_eq!(state.picker.len(), 1);
        assert_eq!(state.picker.value(), 0);
    }
}
