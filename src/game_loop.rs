//! Fixed-rate game loop driver
//!
//! One periodic timer calls [`GameLoop::tick`]; each call renders the
//! current state and then advances it by one fixed step. The loop owns the
//! timer's handle and cancels it itself when the game ends.

use crate::audio::{AudioSink, SoundEffect};
use crate::renderer::{Surface, render_frame};
use crate::sim::{GameEvent, GameState, Intent, KeyEvent, autopilot, tick};

/// Cancels whatever is calling [`GameLoop::tick`] periodically
pub trait LoopHandle {
    fn cancel(&mut self);
}

pub struct GameLoop {
    state: GameState,
    ticks: u64,
    running: bool,
    autopilot: bool,
    handle: Option<Box<dyn LoopHandle>>,
}

impl GameLoop {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            ticks: 0,
            running: true,
            autopilot: false,
            handle: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Ticks executed so far; frozen once stopped
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Take ownership of the timer driving this loop, cancelling any
    /// timer attached before it
    pub fn attach(&mut self, mut handle: Box<dyn LoopHandle>) {
        if let Some(mut previous) = self.handle.take() {
            previous.cancel();
        }
        if self.running {
            self.handle = Some(handle);
        } else {
            handle.cancel();
        }
    }

    /// Forward a key event to the ship
    pub fn handle_input(&mut self, event: KeyEvent) {
        self.state.ship.handle_input(event);
    }

    /// Toggle demo mode; returns the new setting
    pub fn toggle_autopilot(&mut self) -> bool {
        self.set_autopilot(!self.autopilot);
        log::info!("Autopilot: {}", self.autopilot);
        self.autopilot
    }

    /// Switching off hands back an idle ship, not the last steered keys
    pub fn set_autopilot(&mut self, on: bool) {
        if self.autopilot && !on {
            self.state.ship.intent = Intent::default();
        }
        self.autopilot = on;
    }

    /// Render, then update. Returns whether the loop is still running.
    pub fn tick<S, A>(&mut self, surface: &mut S, audio: &mut A) -> bool
    where
        S: Surface + ?Sized,
        A: AudioSink + ?Sized,
    {
        if !self.running {
            return false;
        }
        self.ticks += 1;

        render_frame(&self.state, surface);

        if self.autopilot {
            for event in autopilot::steer(&self.state) {
                self.state.ship.handle_input(event);
            }
        }

        let dt_ms = self.state.config.tick_ms();
        for event in tick(&mut self.state, dt_ms) {
            match event {
                GameEvent::ShotFired { .. } => audio.play(SoundEffect::Laser),
                GameEvent::MeteorDestroyed { .. } => audio.play(SoundEffect::Explosion),
                GameEvent::MeteorSpawned { .. } => {}
                GameEvent::GameOver { .. } => self.stop(),
            }
        }

        self.running
    }

    /// Stop for good: cancel the timer and refuse further ticks
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        if let Some(mut handle) = self.handle.take() {
            handle.cancel();
        }
        log::info!(
            "Game loop stopped after {} ticks (score {})",
            self.ticks,
            self.state.score
        );
    }

    /// Drive the loop without a timer until it stops or `max_ticks` run
    pub fn run_headless<S, A>(&mut self, surface: &mut S, audio: &mut A, max_ticks: u64) -> u64
    where
        S: Surface + ?Sized,
        A: AudioSink + ?Sized,
    {
        let start = self.ticks;
        while self.ticks - start < max_ticks && self.tick(surface, audio) {}
        self.ticks - start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::audio::SilentAudio;
    use crate::config::GameConfig;
    use crate::renderer::{RecordingSurface, Sprite};
    use crate::sim::{InputAction, Meteor};

    struct CountingHandle(Rc<Cell<u32>>);

    impl LoopHandle for CountingHandle {
        fn cancel(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn new_loop() -> GameLoop {
        GameLoop::new(GameState::new(GameConfig::default(), 2024))
    }

    #[test]
    fn test_game_over_stops_loop_and_cancels_once() {
        let mut game = new_loop();
        let cancels = Rc::new(Cell::new(0));
        game.attach(Box::new(CountingHandle(cancels.clone())));

        let spec = game.state.config.meteor;
        let y = game.state.config.field_height - spec.height - 1.0;
        game.state.meteors.push(Meteor::new(99, 0.0, y, &spec));

        let (mut surface, mut audio) = (RecordingSurface::new(), SilentAudio::default());
        assert!(!game.tick(&mut surface, &mut audio));
        assert!(!game.is_running());
        assert!(game.state().is_over());
        assert_eq!(cancels.get(), 1);
        assert_eq!(game.ticks(), 1);

        // No further ticks, nothing else drawn
        for _ in 0..5 {
            assert!(!game.tick(&mut surface, &mut audio));
        }
        game.stop();
        assert_eq!(game.ticks(), 1);
        assert_eq!(surface.frames, 1);
        assert_eq!(cancels.get(), 1);
    }

    #[test]
    fn test_attach_after_stop_cancels_immediately() {
        let mut game = new_loop();
        game.stop();
        let cancels = Rc::new(Cell::new(0));
        game.attach(Box::new(CountingHandle(cancels.clone())));
        assert_eq!(cancels.get(), 1);
    }

    #[test]
    fn test_renders_before_update() {
        let mut game = new_loop();
        let spec = game.state.config.meteor;
        game.state.meteors.push(Meteor::new(1, 50.0, 100.0, &spec));

        let (mut surface, mut audio) = (RecordingSurface::new(), SilentAudio::default());
        game.tick(&mut surface, &mut audio);

        // Drawn at its pre-update position, then moved
        let drawn: Vec<_> = surface.blits(Sprite::Meteor).collect();
        assert_eq!(drawn[0].y, 100.0);
        assert_eq!(game.state().meteors[0].body.pos.y, 101.0);
    }

    #[test]
    fn test_fire_plays_laser_sound() {
        let mut game = new_loop();
        game.handle_input(KeyEvent::down(InputAction::Fire));

        let (mut surface, mut audio) = (RecordingSurface::new(), SilentAudio::default());
        // 0.5 s of held fire at a 300 ms reload, before any meteor shows up
        game.run_headless(&mut surface, &mut audio, 200);
        assert_eq!(audio.count(SoundEffect::Laser), 2);
        // The first laser has already left through the top
        assert_eq!(game.state().ship.projectiles.len(), 1);
    }

    #[test]
    fn test_run_headless_respects_cap() {
        let mut game = new_loop();
        let (mut surface, mut audio) = (RecordingSurface::new(), SilentAudio::default());
        assert_eq!(game.run_headless(&mut surface, &mut audio, 100), 100);
        assert_eq!(game.ticks(), 100);
        assert!(game.is_running());
    }

    #[test]
    fn test_headless_game_eventually_ends() {
        let mut game = new_loop();
        let (mut surface, mut audio) = (RecordingSurface::new(), SilentAudio::default());
        // Nobody at the controls: the first meteor lands
        let ran = game.run_headless(&mut surface, &mut audio, 10_000);
        assert!(ran < 10_000);
        assert!(!game.is_running());
        assert_eq!(game.state().score, 0);
    }

    #[test]
    fn test_autopilot_scores() {
        let mut game = new_loop();
        game.set_autopilot(true);
        let (mut surface, mut audio) = (RecordingSurface::new(), SilentAudio::default());
        game.run_headless(&mut surface, &mut audio, 4_000);
        assert!(game.state().score > 0);
        assert_eq!(audio.count(SoundEffect::Explosion) as u64, game.state().score);
    }

    #[test]
    fn test_autopilot_off_releases_keys() {
        let mut game = new_loop();
        let spec = game.state.config.meteor;
        game.state.meteors.push(Meteor::new(1, 0.0, 0.0, &spec));

        assert!(game.toggle_autopilot());
        let (mut surface, mut audio) = (RecordingSurface::new(), SilentAudio::default());
        game.tick(&mut surface, &mut audio);
        assert!(game.state().ship.intent.moving_left);
        assert!(game.state().ship.intent.wants_fire);

        assert!(!game.toggle_autopilot());
        assert_eq!(game.state().ship.intent, Intent::default());

        // Nobody at the controls: the ship stays put and holds fire
        let x = game.state().ship.body.pos.x;
        let shots = audio.count(SoundEffect::Laser);
        game.run_headless(&mut surface, &mut audio, 200);
        assert_eq!(game.state().ship.body.pos.x, x);
        assert_eq!(audio.count(SoundEffect::Laser), shots);
    }

    #[test]
    fn test_reattach_cancels_previous_handle() {
        let mut game = new_loop();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        game.attach(Box::new(CountingHandle(first.clone())));
        game.attach(Box::new(CountingHandle(second.clone())));
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);

        game.stop();
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 1);
    }
}
