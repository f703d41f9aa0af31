use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::stage::{self, Stage};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use crate::sys::assets::{AssetError, AssetRequest};
use glam::Vec2;
use gtk::prelude::*;
use gtk4 as gtk;
use orbit::ResourceRef;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

pub struct AppModel {
    pub stage: Rc<RefCell<Stage>>,
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub requests: async_channel::Sender<AssetRequest>,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Frame(i64),
    PointerMove(Vec2),
    PointerLeave,
    Scroll(f64),
    AssetLoaded {
        resource: ResourceRef,
        result: Result<Vec<u8>, AssetError>,
    },
    ConfigReload,
    Close,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::AssetLoaded { resource, result } => AppMsg::AssetLoaded { resource, result },
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    /// Sends every resource the scene asked for since the last call to the
    /// loader. A closed loader fails them on the spot.
    fn dispatch_requests(&self) {
        let mut stage = self.stage.borrow_mut();
        for resource in stage.take_requests() {
            let request = AssetRequest::new(&self.config.assets_dir, resource.clone());
            if let Err(e) = self.requests.try_send(request) {
                log::error!("Asset loader unavailable for '{}': {}", resource, e);
                stage.asset_failed(&resource);
            }
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        Config,
        Option<PathBuf>,
        async_channel::Sender<AssetRequest>,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Carousel"),
            add_css_class: "carousel-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Close);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "carousel-canvas",

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::PointerMove(Vec2::new(x as f32, y as f32)));
                    },
                    connect_leave[sender] => move |_| {
                        sender.input(AppMsg::PointerLeave);
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, config_path, requests, rx) = init;

        theme::load_css();
        window::init_window(&root, &config.window);

        let stage = Rc::new(RefCell::new(Stage::new(&config)));

        let model = AppModel {
            stage,
            config,
            config_path,
            requests,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let stage_draw = model.stage.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = stage::draw(cr, &stage_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let scroll = gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::VERTICAL);
        let sender_scroll = sender.clone();
        scroll.connect_scroll(move |_, _, dy| {
            sender_scroll.input(AppMsg::Scroll(dy));
            glib::Propagation::Stop
        });
        widgets.drawing_area.add_controller(scroll);

        let sender_tick = sender.clone();
        widgets.drawing_area.add_tick_callback(move |_, clock| {
            sender_tick.input(AppMsg::Frame(clock.frame_time()));
            glib::ControlFlow::Continue
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        model.dispatch_requests();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Frame(now) => {
                {
                    let mut stage = self.stage.borrow_mut();
                    stage.resize(window::viewport(&self.drawing_area));
                    stage.advance(now);
                }
                self.dispatch_requests();
                self.drawing_area.queue_draw();
            }
            AppMsg::PointerMove(point) => self.stage.borrow_mut().pointer_moved(point),
            AppMsg::PointerLeave => self.stage.borrow_mut().pointer_left(),
            AppMsg::Scroll(dy) => self.stage.borrow_mut().scrolled(dy as f32),
            AppMsg::AssetLoaded { resource, result } => {
                self.stage.borrow_mut().asset_loaded(&resource, result);
            }
            AppMsg::ConfigReload => match config::load_config(self.config_path.as_deref()) {
                Ok(new_config) => {
                    self.stage.borrow_mut().reconfigure(&new_config);
                    self.config = new_config;
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Close => self.root.close(),
        }
    }
}
