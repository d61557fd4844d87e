//! Platform abstraction layer
//!
//! Browser timer plumbing for the game loop. Native builds run headless
//! and need nothing from here.

#[cfg(target_arch = "wasm32")]
pub use web::IntervalHandle;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsValue;
    use wasm_bindgen::prelude::*;

    use crate::game_loop::LoopHandle;

    /// A running `setInterval` timer
    pub struct IntervalHandle {
        id: Option<i32>,
    }

    impl IntervalHandle {
        /// Call `callback` every `1000 / rate_hz` ms (browsers clamp short
        /// intervals, so the actual rate is best effort)
        pub fn start<F>(rate_hz: u32, callback: F) -> Result<Self, JsValue>
        where
            F: FnMut() + 'static,
        {
            let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
            let period_ms = ((1000.0 / rate_hz.max(1) as f64).round() as i32).max(1);

            let closure = Closure::<dyn FnMut()>::new(callback);
            let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms,
            )?;
            // The interval may cancel itself from inside the callback, so the
            // closure must outlive the handle
            closure.forget();

            log::info!("Tick interval {} started ({} ms)", id, period_ms);
            Ok(Self { id: Some(id) })
        }
    }

    impl LoopHandle for IntervalHandle {
        fn cancel(&mut self) {
            if let Some(id) = self.id.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(id);
                    log::info!("Tick interval {} cleared", id);
                }
            }
        }
    }
}
