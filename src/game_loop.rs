//! Session lifecycle
//!
//! `GameLoop` owns the game state and runs one tick per host frame. It keeps
//! at most one frame request outstanding, so there is never more than one
//! live loop. A won or lost session is reported to subscribers and then
//! replaced by a fresh one.

use std::fmt;

use crate::config::GameConfig;
use crate::error::SetupError;
use crate::platform::{FrameHandle, Host};
use crate::renderer::draw_scene;
use crate::sim::{GamePhase, GameState, TickOutcome, tick};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Won,
    Lost,
}

impl SessionOutcome {
    pub fn from_phase(phase: GamePhase) -> Option<Self> {
        match phase {
            GamePhase::Won => Some(SessionOutcome::Won),
            GamePhase::Lost => Some(SessionOutcome::Lost),
            GamePhase::Running => None,
        }
    }
}

/// Delivered to subscribers when a session ends, before the reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub outcome: SessionOutcome,
    pub score: u32,
    /// Ticks the session lasted
    pub ticks: u64,
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            SessionOutcome::Won => write!(f, "YOU WIN, CONGRATULATIONS! Score: {}", self.score),
            SessionOutcome::Lost => write!(f, "GAME OVER. Score: {}", self.score),
        }
    }
}

type Subscriber = Box<dyn FnMut(&SessionReport)>;

pub struct GameLoop<H: Host> {
    host: H,
    config: GameConfig,
    /// None until the first successful `initialize`
    state: Option<GameState>,
    pending_frame: Option<FrameHandle>,
    input_attached: bool,
    subscribers: Vec<Subscriber>,
}

impl<H: Host> GameLoop<H> {
    pub fn new(host: H, config: GameConfig) -> Self {
        Self {
            host,
            config,
            state: None,
            pending_frame: None,
            input_attached: false,
            subscribers: Vec::new(),
        }
    }

    /// Register a session-end listener
    pub fn on_session_end(&mut self, subscriber: impl FnMut(&SessionReport) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Start (or restart) a session
    ///
    /// Sizes the surface, attaches input once, rebuilds the game state and
    /// replaces any outstanding frame request with a new one. A missing
    /// surface aborts with the host's error placeholder and schedules nothing.
    pub fn initialize(&mut self) -> Result<(), SetupError> {
        let field = self.config.field_size();
        if let Err(err) = self.host.resize_surface(field.x, field.y) {
            log::error!("Initialization aborted: {err}");
            self.host.show_setup_error(&err);
            return Err(err);
        }

        if !self.input_attached {
            self.host.attach_input();
            self.input_attached = true;
        }

        match &mut self.state {
            Some(state) => state.reset(),
            None => self.state = Some(GameState::new(self.config.clone())),
        }

        self.cancel_pending();
        self.pending_frame = Some(self.host.request_frame());

        log::info!(
            "Game initialized: {} bricks, field {}x{}",
            self.config.brick_count(),
            field.x,
            field.y
        );
        Ok(())
    }

    /// Host callback for one display refresh
    ///
    /// Runs one tick. A running session is drawn and the next frame is
    /// requested; an ended one skips drawing, notifies subscribers and
    /// re-initializes.
    pub fn frame(&mut self) {
        // The request that brought us here has fired
        self.pending_frame = None;

        let Some(state) = self.state.as_mut() else {
            return;
        };

        let input = self.host.input();
        match tick(state, &input) {
            TickOutcome::Continue => {
                if let Some(canvas) = self.host.surface() {
                    draw_scene(state, canvas);
                }
                self.host.present();
                self.pending_frame = Some(self.host.request_frame());
            }
            TickOutcome::Ended { phase, score } => self.end_session(phase, score),
        }
    }

    fn end_session(&mut self, phase: GamePhase, score: u32) {
        self.cancel_pending();

        let Some(outcome) = SessionOutcome::from_phase(phase) else {
            return;
        };
        let report = SessionReport {
            outcome,
            score,
            ticks: self.state.as_ref().map_or(0, |s| s.time_ticks),
        };
        log::info!("Session ended after {} ticks: {}", report.ticks, report);

        for subscriber in &mut self.subscribers {
            subscriber(&report);
        }

        if self.initialize().is_err() {
            log::warn!("Restart failed, loop stopped");
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.host.cancel_frame(handle);
        }
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut GameState> {
        self.state.as_mut()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// True while a frame request is outstanding
    pub fn is_running(&self) -> bool {
        self.pending_frame.is_some()
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;
    use crate::renderer::{Canvas, DrawCommand, DrawList};
    use crate::sim::BrickStatus;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Scripted host: frames fire only when the test says so
    struct TestHost {
        input: InputState,
        has_surface: bool,
        canvas: DrawList,
        next_frame: i32,
        outstanding: Vec<FrameHandle>,
        attach_calls: u32,
        presented: u32,
        surface_size: Option<(f32, f32)>,
        errors: Vec<String>,
    }

    impl TestHost {
        fn new(has_surface: bool) -> Self {
            Self {
                input: InputState::default(),
                has_surface,
                canvas: DrawList::default(),
                next_frame: 0,
                outstanding: Vec::new(),
                attach_calls: 0,
                presented: 0,
                surface_size: None,
                errors: Vec::new(),
            }
        }
    }

    impl Host for TestHost {
        fn input(&self) -> InputState {
            self.input
        }

        fn attach_input(&mut self) {
            self.attach_calls += 1;
        }

        fn request_frame(&mut self) -> FrameHandle {
            self.next_frame += 1;
            let handle = FrameHandle(self.next_frame);
            self.outstanding.push(handle);
            handle
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.outstanding.retain(|h| *h != handle);
        }

        fn resize_surface(&mut self, width: f32, height: f32) -> Result<(), SetupError> {
            if !self.has_surface {
                return Err(SetupError::SurfaceMissing("gameCanvas".into()));
            }
            self.surface_size = Some((width, height));
            Ok(())
        }

        fn surface(&mut self) -> Option<&mut dyn Canvas> {
            self.has_surface.then_some(&mut self.canvas as &mut dyn Canvas)
        }

        fn present(&mut self) {
            self.presented += 1;
        }

        fn show_setup_error(&mut self, error: &SetupError) {
            self.errors.push(error.placeholder_text().to_string());
        }
    }

    /// Fire the outstanding frame request, if any
    fn fire(game: &mut GameLoop<TestHost>) -> bool {
        let Some(handle) = game.host_mut().outstanding.pop() else {
            return false;
        };
        assert_eq!(game.pending_frame(), Some(handle));
        game.frame();
        true
    }

    fn collect_reports(game: &mut GameLoop<TestHost>) -> Rc<RefCell<Vec<SessionReport>>> {
        let reports = Rc::new(RefCell::new(Vec::new()));
        let sink = reports.clone();
        game.on_session_end(move |report| sink.borrow_mut().push(*report));
        reports
    }

    fn config_640() -> GameConfig {
        GameConfig {
            field_width: Some(640.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_initialize_twice_is_idempotent() {
        let mut game = GameLoop::new(TestHost::new(true), config_640());
        assert!(game.state().is_none());
        assert!(!game.is_running());

        game.initialize().unwrap();
        fire(&mut game);
        fire(&mut game);
        game.initialize().unwrap();
        game.initialize().unwrap();

        let state = game.state().unwrap();
        let fresh = GameState::new(config_640());
        assert_eq!(state.score, 0);
        assert_eq!(state.bricks.active_count(), 40);
        assert_eq!(state.ball.pos, fresh.ball.pos);
        assert_eq!(state.ball.vel, fresh.ball.vel);
        assert_eq!(state.paddle.pos, fresh.paddle.pos);

        let host = game.host();
        assert_eq!(host.outstanding.len(), 1);
        assert_eq!(host.attach_calls, 1);
        assert_eq!(host.surface_size, Some((640.0, 480.0)));
    }

    #[test]
    fn test_frame_draws_post_tick_state() {
        let mut game = GameLoop::new(TestHost::new(true), config_640());
        game.initialize().unwrap();
        assert!(fire(&mut game));

        let host = game.host();
        assert_eq!(host.presented, 1);
        assert_eq!(host.outstanding.len(), 1);
        assert!(host.canvas.commands().iter().any(|c| matches!(
            c,
            DrawCommand::Circle { x, y, .. } if *x == 322.0 && *y == 448.0
        )));
    }

    #[test]
    fn test_input_comes_from_host() {
        let mut game = GameLoop::new(TestHost::new(true), config_640());
        game.initialize().unwrap();
        let start = game.state().unwrap().paddle.pos.x;

        game.host_mut().input.move_left = true;
        fire(&mut game);
        fire(&mut game);

        assert_eq!(game.state().unwrap().paddle.pos.x, start - 14.0);
    }

    #[test]
    fn test_loss_reports_then_resets() {
        let mut game = GameLoop::new(TestHost::new(true), config_640());
        let reports = collect_reports(&mut game);
        game.initialize().unwrap();
        fire(&mut game);
        let frames_drawn = game.host().canvas.frames();

        {
            let state = game.state_mut().unwrap();
            state.score = 6;
            state.paddle.pos.x = 0.0;
            state.ball.pos = Vec2::new(500.0, 469.0);
            state.ball.vel = Vec2::new(2.0, 2.0);
        }
        fire(&mut game);

        assert_eq!(
            reports.borrow().as_slice(),
            &[SessionReport {
                outcome: SessionOutcome::Lost,
                score: 6,
                ticks: 2,
            }]
        );
        assert_eq!(reports.borrow()[0].to_string(), "GAME OVER. Score: 6");

        // Terminal tick is not drawn; a fresh session is scheduled exactly once
        assert_eq!(game.host().canvas.frames(), frames_drawn);
        assert_eq!(game.host().outstanding.len(), 1);
        let state = game.state().unwrap();
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_win_reports_once() {
        let config = GameConfig {
            brick_rows: 1,
            brick_columns: 1,
            ..Default::default()
        };
        let mut game = GameLoop::new(TestHost::new(true), config);
        let reports = collect_reports(&mut game);
        game.initialize().unwrap();

        {
            let state = game.state_mut().unwrap();
            let rect = state.brick_rect(0, 0);
            state.ball.pos = rect.pos + rect.size / 2.0 + Vec2::new(0.0, 2.0);
            state.ball.vel = Vec2::new(0.0, -2.0);
        }
        fire(&mut game);
        fire(&mut game);

        let reports = reports.borrow();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].outcome, SessionOutcome::Won);
        assert_eq!(reports[0].score, 1);
        assert_eq!(
            reports[0].to_string(),
            "YOU WIN, CONGRATULATIONS! Score: 1"
        );

        let state = game.state().unwrap();
        assert_eq!(state.bricks.get(0, 0).unwrap().status, BrickStatus::Active);
        assert_eq!(state.remaining_bricks, 1);
    }

    #[test]
    fn test_missing_surface_aborts() {
        let mut game = GameLoop::new(TestHost::new(false), GameConfig::default());

        let result = game.initialize();

        assert_eq!(
            result,
            Err(SetupError::SurfaceMissing("gameCanvas".into()))
        );
        assert!(game.state().is_none());
        assert!(!game.is_running());
        let host = game.host();
        assert!(host.outstanding.is_empty());
        assert_eq!(host.attach_calls, 0);
        assert_eq!(host.errors, vec!["Error: Game canvas not found.".to_string()]);

        // A stray frame callback does nothing
        game.frame();
        assert!(game.state().is_none());
    }
}
