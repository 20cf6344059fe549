//! GTK4 + layer-shell overlay that runs on the **main thread**.
//!
//! # Widget tree
//!
//! ```text
//! window                 (layer-shell, bottom layer, all edges, transparent)
//! └ DrawingArea          (paints the surface; pointer/motion controllers)
//!     └ Popover          (context menu, created on demand)
//! ```
//!
//! In lock mode the window has an empty input region, so every click falls
//! through to the desktop, and it never takes keyboard focus.  Edit mode
//! restores a full input region and on-demand keyboard focus.
//!
//! Dialogs answer by sending a [`Command`] into the same channel the socket
//! listener feeds, so every mutation of the surface happens in the
//! command-draining tick.

use crate::command::Command;
use crate::config::OverlayConfig;
use crate::geometry::{flip_y, Point, SerializableColor};
use crate::input::{Button, ClickTracker, InputEvent, Key};
use crate::overlay::{cursor_name, InputRegion};
use crate::overlay::painter::CairoPainter;
use crate::render::{paint, render};
use crate::surface::{Effect, Surface};
use gtk4::prelude::*;
use gtk4::{cairo, gdk, glib};
use gtk4_layer_shell::{Edge, KeyboardMode, Layer, LayerShell};
use log::{debug, error, info, warn};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::Duration;

const OVERLAY_CSS: &str = r#"
window.deskzones,
window.deskzones.background {
    background-color: transparent;
    background: none;
}
"#;

/// Errors that stop the overlay from starting.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("failed to initialise GTK4: {0}")]
    Init(#[from] glib::BoolError),
}

/// State shared by the event controllers, the draw function and the tick.
struct Host {
    surface: Surface,
    clicks: ClickTracker,
    /// Widget coordinates where the current primary drag began.
    drag_origin: (f64, f64),
}

type SharedHost = Rc<RefCell<Host>>;

//  Public API

/// Run the overlay on the **current** (main) thread until a
/// [`Command::Quit`] arrives or the window is closed.
///
/// `cmd_tx` is handed to dialogs; `cmd_rx` is drained every ~16 ms.
pub fn run_main_loop(
    surface: Surface,
    cmd_tx: mpsc::Sender<Command>,
    cmd_rx: mpsc::Receiver<Command>,
    config: OverlayConfig,
) -> Result<(), OverlayError> {
    gtk4::init()?;
    info!("GTK4 initialised on main thread");
    load_css();

    let window = gtk4::Window::new();
    window.init_layer_shell();
    window.set_layer(Layer::Bottom);
    window.set_namespace(&config.namespace);
    for edge in [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom] {
        window.set_anchor(edge, true);
    }
    window.set_exclusive_zone(-1);
    window.set_decorated(false);
    window.add_css_class("deskzones");

    let area = gtk4::DrawingArea::new();
    area.set_hexpand(true);
    area.set_vexpand(true);
    area.set_focusable(true);
    window.set_child(Some(&area));

    let host: SharedHost = Rc::new(RefCell::new(Host {
        surface,
        clicks: ClickTracker::new(config.double_click_ms, config.double_click_distance),
        drag_origin: (0.0, 0.0),
    }));

    {
        let host = host.clone();
        area.set_draw_func(move |_, cr, width, height| {
            let Ok(host) = host.try_borrow() else {
                return;
            };
            let commands = render(&host.surface);
            let mut painter = CairoPainter::new(cr, width, height);
            if let Err(e) = paint(&commands, &mut painter) {
                error!("paint failed: {}", e);
            }
        });
    }

    {
        let host = host.clone();
        let window = window.clone();
        area.connect_resize(move |_, width, height| {
            let edit = host
                .try_borrow()
                .map(|h| h.surface.is_edit_mode())
                .unwrap_or(false);
            debug!("overlay resized to {}x{}", width, height);
            if let Some(region) = InputRegion::for_mode(edit, width, height) {
                set_input_region(&window, region);
            }
        });
    }

    install_primary_drag(&area, &host, &cmd_tx);
    install_context_click(&area, &host, &cmd_tx);
    install_motion(&area, &host);
    install_keys(&window, &area, &host, &cmd_tx);

    let main_loop = glib::MainLoop::new(None, false);
    {
        let main_loop = main_loop.clone();
        window.connect_close_request(move |_| {
            info!("overlay window closed");
            main_loop.quit();
            glib::Propagation::Proceed
        });
    }

    window.present();
    let mut edit_mode = host.borrow().surface.is_edit_mode();
    apply_mode(&window, &area, edit_mode);
    info!(
        "overlay mapped ({} mode, namespace {:?})",
        if edit_mode { "edit" } else { "lock" },
        config.namespace
    );

    //  Command loop (~60 fps)
    {
        let main_loop = main_loop.clone();
        let window = window.clone();
        let area = area.clone();
        glib::timeout_add_local(Duration::from_millis(16), move || {
            let mut dirty = false;
            let mut quit = false;
            loop {
                match cmd_rx.try_recv() {
                    Ok(Command::Quit) => {
                        info!("quit requested");
                        quit = true;
                        break;
                    }
                    Ok(cmd) => {
                        debug!("command: {:?}", cmd);
                        let effect = host.borrow_mut().surface.apply(cmd);
                        if let Some(effect) = effect {
                            show_effect(effect, &area, &cmd_tx);
                        }
                        dirty = true;
                    }
                    Err(mpsc::TryRecvError::Empty) => break,
                    Err(mpsc::TryRecvError::Disconnected) => {
                        quit = true;
                        break;
                    }
                }
            }

            let now_edit = host.borrow().surface.is_edit_mode();
            if now_edit != edit_mode {
                edit_mode = now_edit;
                apply_mode(&window, &area, edit_mode);
            }
            if dirty {
                area.queue_draw();
            }

            if quit {
                main_loop.quit();
                return glib::ControlFlow::Break;
            }
            glib::ControlFlow::Continue
        });
    }

    info!("entering GLib main loop");
    main_loop.run();
    info!("GLib main loop exited");
    Ok(())
}

//  Mode switching

/// Make the window click-through (lock) or interactive (edit).
fn apply_mode(window: &gtk4::Window, area: &gtk4::DrawingArea, edit: bool) {
    window.set_keyboard_mode(if edit {
        KeyboardMode::OnDemand
    } else {
        KeyboardMode::None
    });

    // Before the first allocation the size is 0x0; the resize handler
    // installs the region once it is known.
    match InputRegion::for_mode(edit, area.width(), area.height()) {
        Some(region) => set_input_region(window, region),
        None => debug!("overlay not allocated yet, input region deferred"),
    }

    area.set_cursor_from_name(Some(if edit { "crosshair" } else { "default" }));
    if edit {
        area.grab_focus();
    }
    area.queue_draw();
}

fn set_input_region(window: &gtk4::Window, region: InputRegion) {
    let surface: Option<gdk::Surface> = window.surface().into();
    let Some(surface) = surface else {
        warn!("overlay has no surface yet, input region unchanged");
        return;
    };
    let region = match region {
        InputRegion::Empty => cairo::Region::create(),
        InputRegion::Full { width, height } => {
            cairo::Region::create_rectangle(&cairo::RectangleInt::new(0, 0, width, height))
        }
    };
    surface.set_input_region(&region);
}

//  Input controllers

fn to_desktop(area: &gtk4::DrawingArea, x: f64, y: f64) -> Point {
    flip_y(Point::new(x, y), area.height() as f64)
}

/// Feed one event to the surface and act on its answer.
fn dispatch(
    host: &SharedHost,
    area: &gtk4::DrawingArea,
    cmd_tx: &mpsc::Sender<Command>,
    event: InputEvent,
) {
    let effect = host.borrow_mut().surface.handle_input(event);
    area.queue_draw();
    if let Some(effect) = effect {
        show_effect(effect, area, cmd_tx);
    }
}

fn install_primary_drag(area: &gtk4::DrawingArea, host: &SharedHost, cmd_tx: &mpsc::Sender<Command>) {
    let drag = gtk4::GestureDrag::new();
    drag.set_button(gdk::BUTTON_PRIMARY);

    {
        let host = host.clone();
        let area = area.clone();
        let cmd_tx = cmd_tx.clone();
        drag.connect_drag_begin(move |gesture, x, y| {
            if !host.borrow().surface.is_edit_mode() {
                return;
            }
            area.grab_focus();
            let point = to_desktop(&area, x, y);
            let click_count = {
                let mut h = host.borrow_mut();
                h.drag_origin = (x, y);
                h.clicks.press(gesture.current_event_time(), point)
            };
            dispatch(
                &host,
                &area,
                &cmd_tx,
                InputEvent::PointerDown {
                    point,
                    button: Button::Primary,
                    click_count,
                },
            );
        });
    }
    {
        let host = host.clone();
        let area = area.clone();
        let cmd_tx = cmd_tx.clone();
        drag.connect_drag_update(move |_, dx, dy| {
            let (x, y) = host.borrow().drag_origin;
            let point = to_desktop(&area, x + dx, y + dy);
            dispatch(&host, &area, &cmd_tx, InputEvent::PointerDrag { point });
        });
    }
    {
        let host = host.clone();
        let area = area.clone();
        let cmd_tx = cmd_tx.clone();
        drag.connect_drag_end(move |_, _, _| {
            dispatch(&host, &area, &cmd_tx, InputEvent::PointerUp);
        });
    }

    area.add_controller(drag);
}

fn install_context_click(area: &gtk4::DrawingArea, host: &SharedHost, cmd_tx: &mpsc::Sender<Command>) {
    let click = gtk4::GestureClick::new();
    click.set_button(gdk::BUTTON_SECONDARY);

    let host = host.clone();
    let area_ref = area.clone();
    let cmd_tx = cmd_tx.clone();
    click.connect_pressed(move |_, n_press, x, y| {
        let point = to_desktop(&area_ref, x, y);
        dispatch(
            &host,
            &area_ref,
            &cmd_tx,
            InputEvent::PointerDown {
                point,
                button: Button::Secondary,
                click_count: n_press.max(1) as u32,
            },
        );
    });

    area.add_controller(click);
}

fn install_motion(area: &gtk4::DrawingArea, host: &SharedHost) {
    let motion = gtk4::EventControllerMotion::new();

    let host = host.clone();
    let area_ref = area.clone();
    motion.connect_motion(move |_, x, y| {
        let Ok(h) = host.try_borrow() else {
            return;
        };
        let kind = h.surface.cursor_at(to_desktop(&area_ref, x, y));
        area_ref.set_cursor_from_name(Some(cursor_name(kind)));
    });

    area.add_controller(motion);
}

fn install_keys(
    window: &gtk4::Window,
    area: &gtk4::DrawingArea,
    host: &SharedHost,
    cmd_tx: &mpsc::Sender<Command>,
) {
    let keys = gtk4::EventControllerKey::new();

    let host = host.clone();
    let area = area.clone();
    let cmd_tx = cmd_tx.clone();
    keys.connect_key_pressed(move |_, keyval, _, _| {
        let key = match keyval {
            gdk::Key::Delete | gdk::Key::KP_Delete => Key::Delete,
            gdk::Key::BackSpace => Key::Backspace,
            _ => return glib::Propagation::Proceed,
        };
        dispatch(&host, &area, &cmd_tx, InputEvent::Key(key));
        glib::Propagation::Stop
    });

    window.add_controller(keys);
}

//  Effects

fn show_effect(effect: Effect, area: &gtk4::DrawingArea, cmd_tx: &mpsc::Sender<Command>) {
    debug!("effect: {:?}", effect);
    match effect {
        Effect::OpenEditDialog { id, label, color } => {
            show_edit_dialog(label, color, cmd_tx.clone(), move |label, color| {
                Command::EditRectangle { id, label, color }
            })
        }
        Effect::OpenContextMenu { id, at } => show_context_menu(area, at, cmd_tx.clone(), id),
        Effect::ConfirmClearAll => show_clear_all_dialog(cmd_tx.clone()),
    }
}

fn dialog_window(title: &str) -> (gtk4::Window, gtk4::Box) {
    let window = gtk4::Window::builder()
        .title(title)
        .resizable(false)
        .build();
    let content = gtk4::Box::new(gtk4::Orientation::Vertical, 12);
    content.set_margin_top(16);
    content.set_margin_bottom(16);
    content.set_margin_start(16);
    content.set_margin_end(16);
    window.set_child(Some(&content));
    (window, content)
}

/// Cancel/confirm row; `on_confirm` runs before the window closes.
fn button_row(window: &gtk4::Window, confirm_label: &str, on_confirm: impl Fn() + 'static) -> gtk4::Box {
    let row = gtk4::Box::new(gtk4::Orientation::Horizontal, 8);
    row.set_halign(gtk4::Align::End);

    let cancel = gtk4::Button::with_label("Cancel");
    let confirm = gtk4::Button::with_label(confirm_label);
    confirm.add_css_class("suggested-action");

    {
        let window = window.clone();
        cancel.connect_clicked(move |_| window.close());
    }
    {
        let window = window.clone();
        confirm.connect_clicked(move |_| {
            on_confirm();
            window.close();
        });
    }

    row.append(&cancel);
    row.append(&confirm);
    window.set_default_widget(Some(&confirm));
    row
}

fn to_gdk(color: SerializableColor) -> gdk::RGBA {
    let channel = |v: u8| f32::from(v) / 255.0;
    gdk::RGBA::new(
        channel(color.r),
        channel(color.g),
        channel(color.b),
        channel(color.a),
    )
}

fn from_gdk(color: &gdk::RGBA) -> SerializableColor {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    SerializableColor::new(
        channel(color.red()),
        channel(color.green()),
        channel(color.blue()),
        channel(color.alpha()),
    )
}

#[allow(deprecated)]
fn show_edit_dialog(
    label: String,
    color: SerializableColor,
    cmd_tx: mpsc::Sender<Command>,
    make_command: impl Fn(String, SerializableColor) -> Command + 'static,
) {
    let (window, content) = dialog_window("Edit Rectangle");

    let entry = gtk4::Entry::new();
    entry.set_placeholder_text(Some("Label (optional)"));
    entry.set_text(&label);
    entry.set_activates_default(true);
    content.append(&entry);

    let chooser = gtk4::ColorChooserWidget::new();
    chooser.set_use_alpha(false);
    chooser.set_rgba(&to_gdk(color));
    content.append(&chooser);

    let row = {
        let entry = entry.clone();
        let chooser = chooser.clone();
        button_row(&window, "OK", move || {
            let cmd = make_command(entry.text().to_string(), from_gdk(&chooser.rgba()));
            if cmd_tx.send(cmd).is_err() {
                warn!("command channel closed, edit dropped");
            }
        })
    };
    content.append(&row);
    window.present();
}

fn show_context_menu(
    area: &gtk4::DrawingArea,
    at: Point,
    cmd_tx: mpsc::Sender<Command>,
    id: crate::rectangle::RectangleId,
) {
    let at = flip_y(at, area.height() as f64);
    let popover = gtk4::Popover::new();
    popover.set_parent(area);
    popover.set_has_arrow(false);
    popover.set_autohide(true);
    popover.set_pointing_to(Some(&gdk::Rectangle::new(at.x as i32, at.y as i32, 1, 1)));

    let delete = gtk4::Button::with_label("Delete Rectangle");
    delete.add_css_class("flat");
    {
        let popover = popover.clone();
        delete.connect_clicked(move |_| {
            if cmd_tx.send(Command::DeleteRectangle(id)).is_err() {
                warn!("command channel closed, delete dropped");
            }
            popover.popdown();
        });
    }
    popover.set_child(Some(&delete));

    popover.connect_closed(|popover| {
        let popover = popover.clone();
        glib::idle_add_local_once(move || popover.unparent());
    });
    popover.popup();
}

fn show_clear_all_dialog(cmd_tx: mpsc::Sender<Command>) {
    let (window, content) = dialog_window("Clear All Rectangles?");

    let heading = gtk4::Label::new(Some("Clear All Rectangles?"));
    heading.add_css_class("title-4");
    heading.set_halign(gtk4::Align::Start);
    content.append(&heading);

    let body = gtk4::Label::new(Some("This action cannot be undone."));
    body.set_halign(gtk4::Align::Start);
    content.append(&body);

    let row = button_row(&window, "Clear All", move || {
        if cmd_tx.send(Command::ClearAllConfirmed).is_err() {
            warn!("command channel closed, clear dropped");
        }
    });
    content.append(&row);
    window.present();
}

//  CSS

fn load_css() {
    let provider = gtk4::CssProvider::new();
    #[allow(deprecated)]
    provider.load_from_data(OVERLAY_CSS);

    match gdk::Display::default() {
        Some(display) => gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        ),
        None => warn!("no GDK display, overlay background may not be transparent"),
    }
}
