use crate::events::AppEvent;
use crate::face::{self, Face, REFERENCE_HEIGHT, REFERENCE_WIDTH, Reaction};
use crate::gui::theme;
use crate::sys::store::FileStore;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub face: Rc<RefCell<Face<FileStore>>>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Event(AppEvent),
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        AppMsg::Event(event)
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Face<FileStore>, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("macroclock"),
            set_default_size: (2 * REFERENCE_WIDTH as i32, 2 * REFERENCE_HEIGHT as i32),
            add_css_class: "macroclock-window",

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "macroclock-face",

                add_controller = gtk::GestureClick {
                    connect_released[sender] => move |_, _, _, _| {
                        sender.input(AppMsg::Event(AppEvent::Tap));
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
        let (face, rx) = init;

        theme::load_css();

        let model = AppModel {
            face: Rc::new(RefCell::new(face)),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let face_draw = model.face.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, width, height| {
                if let Err(e) = face::draw(cr, &face_draw.borrow(), width as f64, height as f64) {
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
        let AppMsg::Event(event) = msg;
        let reaction = self.face.borrow_mut().handle(event);
        self.react(reaction, &sender);
    }
}

impl AppModel {
    fn react(&self, reaction: Reaction, sender: &ComponentSender<Self>) {
        if let Some(vibe) = reaction.vibe {
            // no motor on a desktop; one bell per pulse
            log::info!("Vibrate {:?}", vibe);
            let display = self.drawing_area.display();
            for _ in vibe.pattern().iter().step_by(2) {
                display.beep();
            }
        }

        if let Some((after, ticket)) = reaction.hide_after {
            let sender = sender.clone();
            glib::timeout_add_local_once(after, move || {
                sender.input(AppMsg::Event(AppEvent::RevealExpired(ticket)));
            });
        }

        if reaction.should_redraw {
            self.drawing_area.queue_draw();
        }
    }
}
