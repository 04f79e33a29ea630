//! Leptos component wrapping the network widget.
//!
//! The component renders a container `div`, mounts a [`NetworkWidget`] into it
//! once the element exists, and re-renders the widget whenever the payload
//! signal changes. Inside a Shiny page the widget runs in host mode.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use log::{error, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Element, Window};

use super::canvas::DomContainer;
use super::host::ShinyBus;
use super::types::WidgetPayload;
use super::widget::NetworkWidget;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Renders an interactive node-link diagram.
///
/// Pass the graph and its options via the reactive `payload` signal. The
/// widget sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and follow window resizes.
/// Explicit `width`/`height` override automatic sizing.
#[component]
pub fn NetworkCanvas(
	#[prop(into)] payload: Signal<WidgetPayload>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let widget: Rc<RefCell<Option<NetworkWidget<DomContainer>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cleanup = SendWrapper::new(resize_cb.clone());

	Effect::new(move |_| {
		let Some(div) = container_ref.get() else {
			return;
		};
		let current = payload.get();

		let mut slot = widget.borrow_mut();
		if slot.is_none() {
			let element: Element = div.into();
			let mut mounted = match NetworkWidget::initialize(DomContainer::new(element)) {
				Ok(w) => w,
				Err(e) => {
					error!("net-widget: cannot mount widget: {}", e);
					return;
				}
			};
			if let Some(bus) = ShinyBus::detect() {
				mounted = mounted.with_host(Rc::new(bus));
			}

			let window = web_sys::window();
			let size = if fullscreen {
				window.as_ref().and_then(window_size)
			} else {
				width.zip(height)
			};
			if let Some((w, h)) = size {
				mounted.resize(w, h);
			}
			*slot = Some(mounted);

			if fullscreen && let Some(window) = window {
				let widget_resize = widget.clone();
				*resize_cb.borrow_mut() = Some(Closure::new(move || {
					let Some((w, h)) = web_sys::window().as_ref().and_then(window_size) else {
						return;
					};
					if let Some(ref handle) = *widget_resize.borrow() {
						handle.resize(w, h);
					}
				}));
				if let Some(ref cb) = *resize_cb.borrow()
					&& let Err(e) =
						window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
				{
					warn!("net-widget: cannot listen for window resize: {:?}", e);
				}
			}
		}

		if let Some(ref mut handle) = *slot
			&& let Err(e) = handle.render(&current)
		{
			error!("net-widget: render failed: {}", e);
		}
	});

	on_cleanup(move || {
		let Some(cb) = resize_cleanup.borrow_mut().take() else {
			return;
		};
		if let Some(window) = web_sys::window()
			&& let Err(e) =
				window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
		{
			warn!("net-widget: cannot remove resize listener: {:?}", e);
		}
	});

	let style = if fullscreen {
		"position: relative; width: 100vw; height: 100vh;"
	} else {
		"position: relative; width: 100%; height: 100%;"
	};

	view! {
		<div node_ref=container_ref class="net-widget" style=style />
	}
}
