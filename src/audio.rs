//! Sound effects
//!
//! Fire-and-forget: the game asks for a sound and never waits on it or
//! checks the result. In the browser effects are synthesized with the Web
//! Audio API, so there are no sound files to load.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ship fired a laser
    Laser,
    /// Laser destroyed a meteor
    Explosion,
}

/// Anything that can play a sound effect
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Sink for headless runs: remembers what would have played
#[derive(Debug, Default)]
pub struct SilentAudio {
    pub played: Vec<SoundEffect>,
}

impl SilentAudio {
    pub fn count(&self, effect: SoundEffect) -> usize {
        self.played.iter().filter(|e| **e == effect).count()
    }
}

impl AudioSink for SilentAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.played.push(effect);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};
    use crate::config::AudioSettings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        settings: AudioSettings,
    }

    impl AudioManager {
        pub fn new(settings: AudioSettings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, settings }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Laser - quick descending zap
        fn play_laser(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 1800.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(1800.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(300.0, t + 0.12)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Explosion - low rumble with a crack on top
        fn play_explosion(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 100.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.4, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.35)
                    .ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(30.0, t + 0.35)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.4).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 1500.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.15, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.1).ok();
            }
        }
    }

    impl AudioSink for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.settings.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Laser => self.play_laser(ctx, vol),
                SoundEffect::Explosion => self.play_explosion(ctx, vol),
            }
        }
    }
}
