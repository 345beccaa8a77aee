use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::panel;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel::{self, WheelGeometry, WheelState};
use crate::sys::sound::AddSound;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use wheelkit::anim::Tween;
use wheelkit::sequence::{
    IgnoredReason, Scheduler, SpinRequest, SpinSequence, SpinStep, SpinTransition,
};
use wheelkit::store::{self, OptionStore};
use wheelkit::SpinResolver;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct AppModel {
    pub state: Rc<RefCell<WheelState>>,
    pub sequence: SpinSequence,
    pub resolver: SpinResolver,
    pub store: Box<dyn OptionStore>,
    pub config: Config,
    pub sound: AddSound,
    pub entry_text: String,
    pub winner: Option<String>,
    /// Option passing under the pointer while the wheel turns.
    pub under_pointer: Option<String>,
    pub tween: Option<(Tween, Instant)>,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    pub entry: gtk::Entry,
    pub option_list: gtk::ListBox,
}

#[derive(Debug)]
pub enum AppMsg {
    EntryChanged(String),
    Add,
    AddText(String),
    Remove(usize),
    Spin,
    Step(SpinStep),
    Frame,
    Present,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Spin => AppMsg::Spin,
            AppEvent::Add(text) => AppMsg::AddText(text),
            AppEvent::Remove(index) => AppMsg::Remove(index),
            AppEvent::Present => AppMsg::Present,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

/// Delivers sequence steps back to the component from glib timeouts.
struct GlibScheduler {
    sender: ComponentSender<AppModel>,
}

impl Scheduler for GlibScheduler {
    fn schedule(&mut self, delay: Duration, step: SpinStep) {
        let sender = self.sender.clone();
        glib::timeout_add_local_once(delay, move || sender.input(AppMsg::Step(step)));
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        Config,
        Box<dyn OptionStore>,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            #[watch]
            set_title: Some(&model.config.wheel.title),
            set_default_size: (1040, 640),
            add_css_class: "spinwheel-window",

            gtk::Box {
                set_orientation: gtk::Orientation::Horizontal,
                set_spacing: 24,
                set_margin_all: 24,

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 16,
                    set_hexpand: true,

                    #[name = "drawing_area"]
                    gtk::DrawingArea {
                        set_hexpand: true,
                        set_vexpand: true,
                        set_content_width: 480,
                        set_content_height: 480,
                        add_css_class: "spinwheel-drawing-area",
                    },

                    gtk::Button {
                        set_halign: gtk::Align::Center,
                        add_css_class: "spinwheel-spin",
                        add_css_class: "suggested-action",
                        #[watch]
                        set_label: if model.sequence.is_busy() { "Spinning..." } else { "SPIN!" },
                        #[watch]
                        set_sensitive: !model.sequence.is_busy()
                            && model.state.borrow().items.can_spin(),
                        connect_clicked => AppMsg::Spin,
                    },

                    gtk::Label {
                        add_css_class: "spinwheel-ticker",
                        #[watch]
                        set_visible: model.sequence.is_busy() && model.under_pointer.is_some(),
                        #[watch]
                        set_label: model.under_pointer.as_deref().unwrap_or_default(),
                    },

                    gtk::Label {
                        add_css_class: "spinwheel-winner",
                        #[watch]
                        set_visible: model.winner.is_some() && !model.sequence.is_busy(),
                        #[watch]
                        set_label: &model
                            .winner
                            .as_deref()
                            .map(|w| format!("The winner is... {}", w))
                            .unwrap_or_default(),
                    },
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 12,
                    set_width_request: 360,

                    gtk::Label {
                        set_label: "Choice Options",
                        set_xalign: 0.0,
                        add_css_class: "title-2",
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,
                        set_spacing: 8,

                        #[name = "entry"]
                        gtk::Entry {
                            set_hexpand: true,
                            set_placeholder_text: Some("Add an option..."),
                            #[watch]
                            set_sensitive: !model.sequence.is_busy(),
                            connect_changed[sender] => move |entry| {
                                sender.input(AppMsg::EntryChanged(entry.text().to_string()));
                            },
                            connect_activate => AppMsg::Add,
                        },

                        gtk::Button {
                            set_label: "Add",
                            #[watch]
                            set_sensitive: !model.sequence.is_busy()
                                && !model.entry_text.trim().is_empty(),
                            connect_clicked => AppMsg::Add,
                        },
                    },

                    gtk::ScrolledWindow {
                        set_vexpand: true,
                        set_hscrollbar_policy: gtk::PolicyType::Never,

                        #[name = "option_list"]
                        gtk::ListBox {
                            set_selection_mode: gtk::SelectionMode::None,
                            add_css_class: "boxed-list",
                        }
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
        let (config, store, rx) = init;

        theme::load_css();

        let items = store::load_or_default(store.as_ref());
        log::info!("Loaded {} options", items.len());
        let pointer = config
            .pointer
            .image
            .as_deref()
            .and_then(WheelState::load_pointer);
        let state = Rc::new(RefCell::new(WheelState::new(
            items,
            config.slice_colors(),
            pointer,
        )));

        let model = AppModel {
            state: state.clone(),
            sequence: SpinSequence::new(config.timings()),
            resolver: SpinResolver::from_entropy(),
            store,
            sound: AddSound::new(config.sound.add.as_deref()),
            config,
            entry_text: String::new(),
            winner: None,
            under_pointer: None,
            tween: None,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            entry: gtk::Entry::default(),
            option_list: gtk::ListBox::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.entry = widgets.entry.clone();
        model.option_list = widgets.option_list.clone();
        model.option_list.set_placeholder(Some(&panel::placeholder()));
        model.refresh_list(&sender);

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let geometry = WheelGeometry::fit(width as f64, height as f64);
                if let Err(e) = wheel::draw(cr, &state_draw.borrow(), &geometry, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::EntryChanged(text) => {
                self.entry_text = text;
            }
            AppMsg::Add => {
                let text = std::mem::take(&mut self.entry_text);
                if self.add_option(&text, &sender) {
                    self.entry.set_text("");
                } else {
                    self.entry_text = text;
                }
            }
            AppMsg::AddText(text) => {
                self.add_option(&text, &sender);
            }
            AppMsg::Remove(index) => {
                if self.sequence.is_busy() {
                    log::debug!("Ignoring remove while spinning");
                    return;
                }
                let removed = self.state.borrow_mut().remove(index);
                match removed {
                    Ok(item) => {
                        log::info!("Removed '{}'", item);
                        store::persist(self.store.as_ref(), &self.state.borrow().items);
                        self.refresh_list(&sender);
                        self.drawing_area.queue_draw();
                    }
                    Err(e) => log::warn!("Cannot remove option: {}", e),
                }
            }
            AppMsg::Spin => {
                let total = self.state.borrow().items.len();
                let mut scheduler = GlibScheduler {
                    sender: sender.clone(),
                };
                match self
                    .sequence
                    .request_spin(total, &mut self.resolver, &mut scheduler)
                {
                    SpinRequest::Started => {
                        self.winner = None;
                        self.under_pointer = None;
                        self.tween = None;
                        self.state.borrow_mut().rotation = self.sequence.rotation();
                        self.refresh_list(&sender);
                        self.drawing_area.queue_draw();
                    }
                    SpinRequest::Ignored(IgnoredReason::Busy) => {
                        log::debug!("Spin already in progress");
                    }
                    SpinRequest::Ignored(IgnoredReason::TooFewOptions) => {
                        log::debug!("Need at least two options to spin");
                    }
                }
            }
            AppMsg::Step(step) => {
                let mut scheduler = GlibScheduler {
                    sender: sender.clone(),
                };
                match self.sequence.advance(step, &mut scheduler) {
                    Some(SpinTransition::Rotate { to, duration }) => {
                        let from = self.state.borrow().rotation;
                        let tween = Tween::new(from, to, duration, self.config.timing.easing);
                        self.tween = Some((tween, Instant::now()));
                        self.start_frames(duration, &sender);
                    }
                    Some(SpinTransition::Reveal { winner_index }) => {
                        self.tween = None;
                        self.under_pointer = None;
                        let mut state = self.state.borrow_mut();
                        state.rotation = self.sequence.rotation();
                        self.winner = state.items.get(winner_index).map(str::to_string);
                        drop(state);
                        log::info!("Winner: {:?}", self.winner);
                        self.refresh_list(&sender);
                        self.drawing_area.queue_draw();
                    }
                    None => {}
                }
            }
            AppMsg::Frame => {
                if let Some((tween, started)) = self.tween {
                    let elapsed = started.elapsed();
                    let mut state = self.state.borrow_mut();
                    state.rotation = tween.sample(elapsed);
                    self.under_pointer = state.option_under_pointer().map(str::to_string);
                    drop(state);
                    if tween.is_finished(elapsed) {
                        self.tween = None;
                    }
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::Present => {
                self.root.present();
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.apply_config(new_config);
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    /// Returns whether `text` was added.
    fn add_option(&mut self, text: &str, sender: &ComponentSender<Self>) -> bool {
        if self.sequence.is_busy() {
            log::debug!("Ignoring add while spinning");
            return false;
        }
        let added = self.state.borrow_mut().add(text);
        match added {
            Ok(item) => {
                log::info!("Added '{}'", item);
                store::persist(self.store.as_ref(), &self.state.borrow().items);
                self.sound.play();
                self.refresh_list(sender);
                self.drawing_area.queue_draw();
                true
            }
            Err(e) => {
                log::debug!("Rejected option: {}", e);
                false
            }
        }
    }

    fn refresh_list(&self, sender: &ComponentSender<Self>) {
        let sender = sender.clone();
        panel::rebuild(
            &self.option_list,
            &self.state.borrow().items,
            !self.sequence.is_busy(),
            move |index| sender.input(AppMsg::Remove(index)),
        );
    }

    fn start_frames(&self, duration: Duration, sender: &ComponentSender<Self>) {
        let sender = sender.clone();
        let deadline = Instant::now() + duration + FRAME_INTERVAL;
        glib::timeout_add_local(FRAME_INTERVAL, move || {
            sender.input(AppMsg::Frame);
            if Instant::now() >= deadline {
                glib::ControlFlow::Break
            } else {
                glib::ControlFlow::Continue
            }
        });
    }

    fn apply_config(&mut self, new_config: Config) {
        self.sequence.set_timings(new_config.timings());
        self.sound = AddSound::new(new_config.sound.add.as_deref());
        {
            let mut state = self.state.borrow_mut();
            state.colors = new_config.slice_colors();
            state.pointer = new_config
                .pointer
                .image
                .as_deref()
                .and_then(WheelState::load_pointer);
        }
        if new_config.storage.path != self.config.storage.path {
            log::warn!("Storage path changes apply after a restart");
        }
        self.config = new_config;
    }
}
