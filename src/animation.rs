// Frame loop that owns the particle field and its surface, driven by the host's
// refresh-synchronised scheduler and kept sized to the viewport.

use crate::field::ParticleField;
use crate::host::{FrameScheduler, ResizeNotifier};
use crate::log;
use crate::particle::Particle;
use crate::surface::Surface;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

struct LoopState<S, H: FrameScheduler> {
    field: ParticleField,
    surface: S,
    pending: Option<H::Handle>,
    running: bool,
}

impl<S: Surface, H: FrameScheduler> LoopState<S, H> {
    fn render_frame(&mut self) {
        {
            #[cfg(feature = "frame-timing")]
            let _timer = crate::utils::Timer::new("ParticleField::step");
            self.field.step();
        }
        #[cfg(feature = "frame-timing")]
        let _timer = crate::utils::Timer::new("ParticleField::draw");
        self.field.draw(&mut self.surface);
    }

    fn fit_to(&mut self, width: u32, height: u32) {
        self.surface.set_size(width, height);
        self.field.resize(width, height);
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct AnimationLoop<S: Surface + 'static, H: FrameScheduler + ResizeNotifier + Clone + 'static> {
    host: H,
    state: Rc<RefCell<LoopState<S, H>>>,
    frame: FrameCallback,
    resize: Option<Closure<dyn FnMut()>>,
}

impl<S, H> AnimationLoop<S, H>
where
    S: Surface + 'static,
    H: FrameScheduler + ResizeNotifier + Clone + 'static,
{
    /// Sizes the surface to the viewport, draws the first frame right away and
    /// keeps requesting frames until stopped.
    pub fn start(field: ParticleField, surface: S, host: H) -> Result<Self, JsValue> {
        let state = Rc::new(RefCell::new(LoopState {
            field,
            surface,
            pending: None,
            running: true,
        }));

        if let Some((width, height)) = host.viewport_size() {
            state.borrow_mut().fit_to(width, height);
        }

        let resize = {
            let state = state.clone();
            let host = host.clone();
            Closure::wrap(Box::new(move || {
                if let Some((width, height)) = host.viewport_size() {
                    state.borrow_mut().fit_to(width, height);
                }
            }) as Box<dyn FnMut()>)
        };
        host.on_resize(&resize)?;

        let frame: FrameCallback = Rc::new(RefCell::new(None));
        {
            let state = state.clone();
            let host = host.clone();
            let next = frame.clone();
            *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                let mut state = state.borrow_mut();
                state.pending = None;
                if !state.running {
                    return;
                }
                state.render_frame();
                if let Some(callback) = next.borrow().as_ref() {
                    match host.schedule(callback) {
                        Ok(handle) => state.pending = Some(handle),
                        Err(err) => {
                            log!("failed to request animation frame: {:?}", err);
                            state.running = false;
                        }
                    }
                }
            }) as Box<dyn FnMut()>));
        }

        let animation = AnimationLoop {
            host,
            state,
            frame,
            resize: Some(resize),
        };
        animation.state.borrow_mut().render_frame();
        // On failure the early return drops the loop, which detaches the listener
        let first = animation
            .frame
            .borrow()
            .as_ref()
            .map(|callback| animation.host.schedule(callback));
        let first = first.transpose()?;
        animation.state.borrow_mut().pending = first;
        Ok(animation)
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().running
    }

    pub fn particle_count(&self) -> usize {
        self.state.borrow().field.len()
    }

    pub fn bounds(&self) -> (f64, f64) {
        self.state.borrow().field.bounds()
    }

    // Copy of the current particle state
    pub fn particles(&self) -> Vec<Particle> {
        self.state.borrow().field.particles().to_vec()
    }

    /// Stops scheduling frames, cancels the pending one and detaches the resize
    /// listener. Safe to call more than once.
    pub fn stop(&mut self) {
        let pending = {
            let mut state = self.state.borrow_mut();
            state.running = false;
            state.pending.take()
        };
        if let Some(handle) = pending {
            if let Err(err) = self.host.cancel(handle) {
                log!("failed to cancel animation frame: {:?}", err);
            }
        }
        if let Some(resize) = self.resize.take() {
            if let Err(err) = self.host.remove_resize_listener(&resize) {
                log!("failed to remove resize listener: {:?}", err);
            }
        }
        // Breaks the callback's reference back to itself
        self.frame.borrow_mut().take();
    }
}

impl<S, H> Drop for AnimationLoop<S, H>
where
    S: Surface + 'static,
    H: FrameScheduler + ResizeNotifier + Clone + 'static,
{
    fn drop(&mut self) {
        self.stop();
    }
}
