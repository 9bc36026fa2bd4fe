mod utils;

pub mod animation;
pub mod clipboard;
pub mod color;
pub mod config;
pub mod field;
pub mod host;
pub mod particle;
pub mod seo;
pub mod surface;

use crate::animation::AnimationLoop;
use crate::clipboard::ContactCopy;
use crate::config::FieldConfig;
use crate::field::ParticleField;
use crate::host::ResizeNotifier;
use crate::seo::{DocumentSink, SeoOptions};
use crate::surface::{CanvasSurface, Surface};
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use web_sys::Window;

pub use crate::utils::Timer;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

/// Background animation mounted on a canvas element.
#[wasm_bindgen]
pub struct Placeholder {
    animation: Option<AnimationLoop<CanvasSurface, Window>>,
}

#[wasm_bindgen]
impl Placeholder {
    // A missing canvas or 2d context leaves the placeholder idle rather than failing
    pub fn mount(canvas_id: &str) -> Placeholder {
        let window = match web_sys::window() {
            Some(window) => window,
            None => return Placeholder { animation: None },
        };
        let surface = match CanvasSurface::from_element_id(canvas_id) {
            Some(surface) => surface,
            None => {
                log!("no 2d canvas with id '{}', background animation disabled", canvas_id);
                return Placeholder { animation: None };
            }
        };

        let config = FieldConfig::default();
        let (width, height) = window
            .viewport_size()
            .unwrap_or((surface.width(), surface.height()));
        let field = ParticleField::create(width, height, config.particle_count, config.max_distance);
        match AnimationLoop::start(field, surface, window) {
            Ok(animation) => Placeholder {
                animation: Some(animation),
            },
            Err(err) => {
                log!("failed to start background animation: {:?}", err);
                Placeholder { animation: None }
            }
        }
    }

    pub fn unmount(&mut self) {
        if let Some(mut animation) = self.animation.take() {
            animation.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.animation
            .as_ref()
            .map_or(false, |animation| animation.is_running())
    }

    pub fn particle_count(&self) -> usize {
        self.animation
            .as_ref()
            .map_or(0, |animation| animation.particle_count())
    }
}

#[wasm_bindgen]
pub fn apply_default_metadata() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    SeoOptions::default().apply(&mut DocumentSink::new(document))
}

#[wasm_bindgen]
pub fn copy_to_clipboard(text: &str) -> Result<Promise, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    clipboard::write_text(&window, text)
}

/// Keeps a contact link's click-to-copy handler attached while alive.
#[wasm_bindgen]
pub struct ContactLink {
    _binding: ContactCopy,
}

#[wasm_bindgen]
impl ContactLink {
    pub fn bind(link_id: &str, notice_id: &str, text: String) -> Result<ContactLink, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let link = document
            .get_element_by_id(link_id)
            .ok_or_else(|| JsValue::from_str("contact link not found"))?;
        let notice = document
            .get_element_by_id(notice_id)
            .ok_or_else(|| JsValue::from_str("copy notice not found"))?;
        Ok(ContactLink {
            _binding: ContactCopy::bind(window, link, notice, text)?,
        })
    }
}
