// The pieces of the hosting page the animation loop depends on: a display-refresh
// frame scheduler and a viewport resize notifier. The browser window provides both.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

pub trait FrameScheduler {
    type Handle: Copy;

    fn schedule(&self, callback: &Closure<dyn FnMut()>) -> Result<Self::Handle, JsValue>;
    fn cancel(&self, handle: Self::Handle) -> Result<(), JsValue>;
}

pub trait ResizeNotifier {
    fn on_resize(&self, callback: &Closure<dyn FnMut()>) -> Result<(), JsValue>;
    fn remove_resize_listener(&self, callback: &Closure<dyn FnMut()>) -> Result<(), JsValue>;

    // Current viewport size in CSS pixels
    fn viewport_size(&self) -> Option<(u32, u32)>;
}

impl FrameScheduler for Window {
    type Handle = i32;

    fn schedule(&self, callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
        self.request_animation_frame(callback.as_ref().unchecked_ref())
    }

    fn cancel(&self, handle: i32) -> Result<(), JsValue> {
        self.cancel_animation_frame(handle)
    }
}

impl ResizeNotifier for Window {
    fn on_resize(&self, callback: &Closure<dyn FnMut()>) -> Result<(), JsValue> {
        self.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
    }

    fn remove_resize_listener(&self, callback: &Closure<dyn FnMut()>) -> Result<(), JsValue> {
        self.remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
    }

    fn viewport_size(&self) -> Option<(u32, u32)> {
        let width = self.inner_width().ok()?.as_f64()?;
        let height = self.inner_height().ok()?.as_f64()?;
        Some((width.max(0.0) as u32, height.max(0.0) as u32))
    }
}
