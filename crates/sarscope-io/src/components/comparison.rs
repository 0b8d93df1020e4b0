//! Before/after image comparison with a draggable divider.

use std::rc::Rc;

use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use sarscope_core::comparison::{KEYBOARD_STEP, divider_style};
use sarscope_core::{Axis, Bounds, ComparisonState, RevealStrategy};
use wasm_bindgen::JsCast;

use crate::listener::{Handler, WindowListener};

/// Props for the [`ImageComparison`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ImageComparisonProps {
    /// Locator of the image shown behind the divider.
    before: String,
    /// Locator of the image revealed up to the divider.
    after: String,
    #[props(default)]
    axis: Axis,
    #[props(default)]
    strategy: RevealStrategy,
    #[props(default = "Original SAR".to_string())]
    before_label: String,
    #[props(default = "RGB Result".to_string())]
    after_label: String,
}

/// Bounding box of the mounted frame along `axis`, plus its full size.
fn measure(frame: &web_sys::Element, axis: Axis) -> (Bounds, f64, f64) {
    let rect = frame.get_bounding_client_rect();
    let bounds = match axis {
        Axis::Horizontal => Bounds::new(rect.left(), rect.width()),
        Axis::Vertical => Bounds::new(rect.top(), rect.height()),
    };
    (bounds, rect.width(), rect.height())
}

const fn along(axis: Axis, x: f64, y: f64) -> f64 {
    match axis {
        Axis::Horizontal => x,
        Axis::Vertical => y,
    }
}

/// Whether a press should move the divider and start a drag.
///
/// Only the primary button of the primary pointer drags; right clicks,
/// middle clicks and extra touch points are left to the browser.
fn starts_drag(button: Option<MouseButton>, is_primary: bool) -> bool {
    is_primary && button == Some(MouseButton::Primary)
}

/// The event as a pointer event from the primary pointer.
fn primary_pointer(event: &web_sys::Event) -> Option<&web_sys::PointerEvent> {
    event
        .dyn_ref::<web_sys::PointerEvent>()
        .filter(|pointer| pointer.is_primary())
}

/// Inline style for the picture inside the after layer.
///
/// The shrinking layer of [`RevealStrategy::Width`] must not shrink the
/// picture, so it is pinned to the frame's full size.
fn after_image_style(strategy: RevealStrategy, axis: Axis, width: f64, height: f64) -> String {
    match (strategy, axis) {
        (RevealStrategy::Clip, _) => String::new(),
        (RevealStrategy::Width, Axis::Horizontal) => {
            format!("width: {width}px; max-width: none;")
        }
        (RevealStrategy::Width, Axis::Vertical) => {
            format!("height: {height}px; max-height: none;")
        }
    }
}

/// Two stacked images with a divider that reveals the after image.
///
/// Pressing the primary button anywhere moves the divider to the pointer and starts a
/// drag. Moves and releases are tracked on the window so a drag that
/// leaves the frame keeps following the pointer and always ends. The
/// divider is focusable and also moves with the arrow keys, Home and
/// End.
///
/// The divider starts at the midpoint on every mount; key the
/// component to reset it.
#[component]
pub fn ImageComparison(props: ImageComparisonProps) -> Element {
    let axis = props.axis;
    let mut state = use_signal(ComparisonState::new);
    let mut frame = use_signal(|| Option::<web_sys::Element>::None);
    let mut frame_size = use_signal(|| (0.0_f64, 0.0_f64));

    // Removed again when the component unmounts and the hook value drops.
    use_hook(move || {
        let on_move = move |event: web_sys::Event| {
            if !state.peek().is_dragging() {
                return;
            }
            let Some(pointer) = primary_pointer(&event) else {
                return;
            };
            let Some(el) = frame.peek().clone() else {
                return;
            };
            let (bounds, ..) = measure(&el, axis);
            let position = along(
                axis,
                f64::from(pointer.client_x()),
                f64::from(pointer.client_y()),
            );
            let mut next = *state.peek();
            if next.drag_to(position, bounds) {
                state.set(next);
            }
        };
        let on_release = move |event: web_sys::Event| {
            if primary_pointer(&event).is_some() && state.peek().is_dragging() {
                state.write().release();
            }
        };
        let handlers: Vec<(&'static str, Handler)> = vec![
            ("pointermove", Box::new(on_move)),
            ("pointerup", Box::new(on_release)),
            ("pointercancel", Box::new(on_release)),
        ];
        Rc::new(WindowListener::register_all(handlers))
    });

    let offset = state.read().offset_percent();
    let dragging = state.read().is_dragging();
    let after_style = props.strategy.after_layer_style(offset, axis);
    let handle_style = divider_style(offset, axis);
    let (width, height) = frame_size();

    let after_image = after_image_style(props.strategy, axis, width, height);
    let axis_class = match axis {
        Axis::Horizontal => "comparison-horizontal",
        Axis::Vertical => "comparison-vertical",
    };
    let orientation = match axis {
        Axis::Horizontal => "horizontal",
        Axis::Vertical => "vertical",
    };
    let drag_class = if dragging { "comparison-dragging" } else { "" };
    let value_text = format!("{offset:.0}% {}", props.after_label);

    rsx! {
        div {
            class: "comparison {axis_class} {drag_class}",
            style: "touch-action: none;",
            onmounted: move |evt: MountedEvent| {
                if let Some(el) = evt.data().downcast::<web_sys::Element>() {
                    let (_, w, h) = measure(el, axis);
                    frame_size.set((w, h));
                    frame.set(Some(el.clone()));
                }
            },
            onpointerdown: move |evt: PointerEvent| {
                if !starts_drag(evt.trigger_button(), evt.is_primary()) {
                    return;
                }
                let Some(el) = frame.peek().clone() else {
                    return;
                };
                evt.prevent_default();
                let (bounds, w, h) = measure(&el, axis);
                frame_size.set((w, h));
                let point = evt.client_coordinates();
                state.write().press(along(axis, point.x, point.y), bounds);
            },

            img {
                class: "comparison-image",
                src: "{props.before}",
                alt: "{props.before_label}",
                draggable: "false",
            }
            div { class: "comparison-after", style: "{after_style}",
                img {
                    class: "comparison-image",
                    style: "{after_image}",
                    src: "{props.after}",
                    alt: "{props.after_label}",
                    draggable: "false",
                }
            }

            span { class: "comparison-label comparison-label-before", "{props.before_label}" }
            span { class: "comparison-label comparison-label-after", "{props.after_label}" }

            div {
                class: "comparison-divider",
                style: "{handle_style}",
                tabindex: "0",
                role: "slider",
                aria_label: "Comparison divider",
                aria_orientation: "{orientation}",
                aria_valuemin: "0",
                aria_valuemax: "100",
                aria_valuenow: "{offset:.0}",
                aria_valuetext: "{value_text}",
                onkeydown: move |evt: KeyboardEvent| {
                    let mut next = *state.peek();
                    match evt.key() {
                        Key::ArrowLeft | Key::ArrowUp => next.nudge(-KEYBOARD_STEP),
                        Key::ArrowRight | Key::ArrowDown => next.nudge(KEYBOARD_STEP),
                        Key::Home => next.set_offset(0.0),
                        Key::End => next.set_offset(100.0),
                        _ => return,
                    }
                    evt.prevent_default();
                    state.set(next);
                },
                div { class: "comparison-handle" }
            }
        }
    }
}
