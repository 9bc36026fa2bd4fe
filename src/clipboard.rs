// Copy-to-clipboard for the contact address, with a short-lived "copied" notice

use crate::log;
use js_sys::{Function, Promise, Reflect};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, Window};

pub const NOTICE_VISIBLE_CLASS: &str = "copied-visible";
pub const NOTICE_DURATION_MS: i32 = 2000;

// navigator.clipboard.writeText(text). Looked up dynamically so pages served
// without clipboard access get an error instead of a trap.
pub fn write_text(window: &Window, text: &str) -> Result<Promise, JsValue> {
    let clipboard = Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(JsValue::from_str("clipboard API unavailable"));
    }
    let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))?
        .dyn_into::<Function>()?;
    write_text.call1(&clipboard, &JsValue::from_str(text))?.dyn_into::<Promise>()
}

// State shared between the click handler and the copies it has in flight
struct Notice {
    window: Window,
    element: Element,
    hide_timer: Cell<Option<i32>>,
    // Cleared on unbind; copies settling afterwards leave the notice alone
    bound: Cell<bool>,
}

impl Notice {
    fn show(&self, on_hide: &Closure<dyn FnMut()>) {
        if !self.bound.get() {
            return;
        }
        if let Err(err) = self.element.class_list().add_1(NOTICE_VISIBLE_CLASS) {
            log!("failed to show copy notice: {:?}", err);
            return;
        }
        self.clear_timer();
        match self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            on_hide.as_ref().unchecked_ref(),
            NOTICE_DURATION_MS,
        ) {
            Ok(handle) => self.hide_timer.set(Some(handle)),
            Err(err) => {
                log!("failed to schedule copy notice timeout: {:?}", err);
            }
        }
    }

    fn hide(&self) {
        self.hide_timer.set(None);
        if let Err(err) = self.element.class_list().remove_1(NOTICE_VISIBLE_CLASS) {
            log!("failed to hide copy notice: {:?}", err);
        }
    }

    fn clear_timer(&self) {
        if let Some(handle) = self.hide_timer.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}

/// Click-to-copy binding between a contact link and its notice element.
pub struct ContactCopy {
    link: Element,
    notice: Rc<Notice>,
    on_click: Closure<dyn FnMut()>,
    // Pending copies hold their own reference, so the timer callback outlives unbinding
    _on_hide: Rc<Closure<dyn FnMut()>>,
}

impl ContactCopy {
    pub fn bind(window: Window, link: Element, notice: Element, text: String) -> Result<Self, JsValue> {
        let notice = Rc::new(Notice {
            window,
            element: notice,
            hide_timer: Cell::new(None),
            bound: Cell::new(true),
        });

        let on_hide = {
            let notice = notice.clone();
            Rc::new(Closure::wrap(Box::new(move || notice.hide()) as Box<dyn FnMut()>))
        };

        let on_click = {
            let notice = notice.clone();
            let on_hide = on_hide.clone();
            Closure::wrap(Box::new(move || {
                let promise = match write_text(&notice.window, &text) {
                    Ok(promise) => promise,
                    Err(err) => {
                        log!("failed to copy to clipboard: {:?}", err);
                        return;
                    }
                };
                let notice = notice.clone();
                let on_hide = on_hide.clone();
                spawn_local(async move {
                    match JsFuture::from(promise).await {
                        Ok(_) => notice.show(&on_hide),
                        Err(err) => {
                            log!("clipboard write rejected: {:?}", err);
                        }
                    }
                });
            }) as Box<dyn FnMut()>)
        };
        link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;

        Ok(ContactCopy {
            link,
            notice,
            on_click,
            _on_hide: on_hide,
        })
    }

    pub fn is_notice_pending(&self) -> bool {
        self.notice.hide_timer.get().is_some()
    }
}

impl Drop for ContactCopy {
    fn drop(&mut self) {
        self.notice.bound.set(false);
        if let Err(err) = self
            .link
            .remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref())
        {
            log!("failed to remove click listener: {:?}", err);
        }
        self.notice.clear_timer();
    }
}
