use crate::config;
use crate::events::AppEvent;
use crate::gui::cylinder::{self, Point, State};
use crate::gui::theme::{self, ThemeColors};
use drum::{Command, PickerEvent};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub state: Rc<RefCell<State>>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Tick,
    Resize(i32, i32),
    CursorMove(Point),
    CursorLeave,
    DragBegin,
    DragUpdate(f64),
    DragEnd,
    Scroll(f64),
    Click(Point),
    Command(Command),
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Command(command) => AppMsg::Command(command),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (State, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Cylinder"),
            set_default_width: 240,
            set_default_height: 320,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "cylinder-drawing-area",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                },

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::CursorMove(Point::new(x, y)));
                    },
                    connect_leave[sender] => move |_| {
                        sender.input(AppMsg::CursorLeave);
                    },
                },

                add_controller = gtk::GestureClick {
                    connect_released[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Click(Point::new(x, y)));
                    }
                },

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, _, _| {
                        sender.input(AppMsg::DragBegin);
                    },
                    connect_drag_update[sender] => move |_, _, offset_y| {
                        sender.input(AppMsg::DragUpdate(offset_y));
                    },
                    connect_drag_end[sender] => move |_, _, _| {
                        sender.input(AppMsg::DragEnd);
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, rx) = init;

        theme::load_css();

        let model = AppModel {
            state: Rc::new(RefCell::new(state)),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = cylinder::draw(cr, &state_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        // needs the scroll flags, which the view macro cannot pass
        let scroll = gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::VERTICAL);
        let scroll_sender = sender.clone();
        scroll.connect_scroll(move |_, _, dy| {
            scroll_sender.input(AppMsg::Scroll(dy));
            glib::Propagation::Stop
        });
        widgets.drawing_area.add_controller(scroll);

        let tick_sender = sender.clone();
        widgets.drawing_area.add_tick_callback(move |_, _| {
            tick_sender.input(AppMsg::Tick);
            glib::ControlFlow::Continue
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let mut state = self.state.borrow_mut();
        let redraw = match msg {
            AppMsg::Tick => {
                let events = state.poll();
                for event in &events {
                    report(event);
                }
                !events.is_empty() || state.picker.is_animating()
            }
            AppMsg::Resize(width, height) => {
                state.resize(width as f64, height as f64);
                true
            }
            AppMsg::CursorMove(point) => state.update_cursor(point),
            AppMsg::CursorLeave => state.clear_hover(),
            AppMsg::DragBegin => {
                state.drag_begin();
                false
            }
            AppMsg::DragUpdate(offset_y) => {
                state.drag_update(offset_y);
                false
            }
            AppMsg::DragEnd => {
                state.drag_end();
                false
            }
            AppMsg::Scroll(dy) => {
                state.scroll(dy);
                false
            }
            AppMsg::Click(point) => {
                state.click(point);
                false
            }
            AppMsg::Command(command) => {
                log::debug!("Received command: {}", command);
                state.apply_command(command);
                true
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    state.apply_config(new_config);
                    log::info!("Configuration reloaded");
                    true
                }
                Err(e) => {
                    log::error!("Failed to reload config: {}", e);
                    false
                }
            },
            AppMsg::Quit => {
                relm4::main_application().quit();
                false
            }
        };

        if redraw {
            self.drawing_area.queue_draw();
        }
    }
}

fn report(event: &PickerEvent) {
    match event {
        PickerEvent::SelectionChanged { index, item } => {
            let label = item.as_ref().map(|l| l.as_str()).unwrap_or_default();
            log::info!("Selected {}: {}", index, label);
            println!("{}", label);
        }
        PickerEvent::RotationSettled { value } => log::debug!("Settled at {}", value),
        PickerEvent::InertiaSettled => log::debug!("Inertia settled"),
        PickerEvent::InertiaStopped => log::debug!("Inertia stopped"),
    }
}
