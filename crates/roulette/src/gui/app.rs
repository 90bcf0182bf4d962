use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::assets::{self, AssetBundle, Textures};
use crate::gui::clock::FrameClock;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel::{self as wheel_view, Layout, Visuals};
use crate::stage::Stage;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wheelkit::{SegmentNumber, Variant};

pub struct AppModel {
    pub stage: Rc<RefCell<Stage>>,
    pub textures: Rc<RefCell<Option<Textures>>>,
    pub drawing_area: gtk::DrawingArea,
    /// Set while a tick callback is installed on the drawing area.
    ticking: Rc<Cell<bool>>,
}

#[derive(Debug)]
pub enum AppMsg {
    Start(SegmentNumber, Option<Duration>),
    Stop,
    Mount(Variant),
    LiveLabels(bool),
    AssetsLoaded(u64, AssetBundle),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Start(segment, duration) => AppMsg::Start(segment, duration),
            AppEvent::Stop => AppMsg::Stop,
            AppEvent::Mount(variant) => AppMsg::Mount(variant),
            AppEvent::LiveLabels(enabled) => AppMsg::LiveLabels(enabled),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Roulette"),
            set_default_size: (600, 600),
            add_css_class: "roulette-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Stop);
                    } else if key == gtk::gdk::Key::n {
                        sender.input(AppMsg::Mount(Variant::Normal));
                    } else if key == gtk::gdk::Key::e {
                        sender.input(AppMsg::Mount(Variant::Extended));
                    } else {
                        return glib::Propagation::Proceed;
                    }
                    glib::Propagation::Stop
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "roulette-drawing-area",
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();

        let model = AppModel {
            stage: Rc::new(RefCell::new(Stage::new(config))),
            textures: Rc::new(RefCell::new(None)),
            drawing_area: gtk::DrawingArea::default(),
            ticking: Rc::new(Cell::new(false)),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let (stage_draw, textures_draw) = (model.stage.clone(), model.textures.clone());
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let layout = Layout::fit(width as f64, height as f64);
                let textures = textures_draw.borrow();
                let stage = stage_draw.borrow();
                let visuals = Visuals {
                    textures: textures.as_ref(),
                    colors: &colors,
                    label: &stage.config.label,
                };
                if let Err(e) = wheel_view::draw(cr, &stage.wheel, &layout, &visuals) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        model.load_assets(&sender);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Start(segment, duration) => {
                let started = self.stage.borrow_mut().wheel.start(segment, duration);
                match started {
                    Ok(()) => self.ensure_ticking(),
                    Err(e) => log::warn!("Cannot start the wheel: {}", e),
                }
                self.drawing_area.queue_draw();
            }
            AppMsg::Stop => {
                if let Err(e) = self.stage.borrow_mut().wheel.stop() {
                    log::warn!("Cannot stop the wheel: {}", e);
                }
                self.drawing_area.queue_draw();
            }
            AppMsg::LiveLabels(enabled) => {
                if let Err(e) = self
                    .stage
                    .borrow_mut()
                    .wheel
                    .enable_dynamic_text_during_rotation(enabled)
                {
                    log::warn!("Cannot toggle live labels: {}", e);
                }
            }
            AppMsg::Mount(variant) => {
                let mounted = self.stage.borrow_mut().mount(variant);
                if mounted {
                    *self.textures.borrow_mut() = None;
                    self.load_assets(&sender);
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::AssetsLoaded(generation, bundle) => {
                if !self.stage.borrow_mut().finish_load(generation) {
                    return;
                }
                for failure in &bundle.failures {
                    log::warn!("{}; drawing it instead", failure);
                }
                *self.textures.borrow_mut() = Some(Textures::decode(&bundle));
                self.drawing_area.queue_draw();
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    let reload_assets = self.stage.borrow_mut().apply_config(new_config);
                    if reload_assets {
                        *self.textures.borrow_mut() = None;
                        self.load_assets(&sender);
                    }
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    /// Installs a tick callback for the duration of a rotation. It removes
    /// itself on the first frame the wheel has nothing left to animate.
    fn ensure_ticking(&self) {
        if self.ticking.replace(true) {
            return;
        }
        let (stage, ticking) = (self.stage.clone(), self.ticking.clone());
        let clock = RefCell::new(FrameClock::default());
        self.drawing_area
            .add_tick_callback(move |drawing_area, frame_clock| {
                let dt = clock.borrow_mut().step(frame_clock.frame_time());
                if stage.borrow_mut().wheel.advance(dt) {
                    drawing_area.queue_draw();
                    glib::ControlFlow::Continue
                } else {
                    ticking.set(false);
                    glib::ControlFlow::Break
                }
            });
    }

    fn load_assets(&self, sender: &ComponentSender<Self>) {
        let mut stage = self.stage.borrow_mut();
        let generation = stage.begin_load();
        let asset_config = stage.config.assets.clone();
        let sender = sender.clone();

        relm4::spawn(async move {
            let bundle = assets::load(&asset_config).await;
            sender.input(AppMsg::AssetsLoaded(generation, bundle));
        });
    }
}
