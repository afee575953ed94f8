use crate::command::Command;
use crate::consts;
use crate::game::{GameEngine, GameState, TickOutcome};
use crate::gesture::SwipeTracker;
use crate::store::HighScoreStore;
use crate::theme::Theme;
use crate::view::GameView;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Instant;

/// The interactive shell around a [`GameEngine`]: reads terminal input,
/// fires ticks on schedule, and draws the screen.
#[derive(Clone, Debug)]
pub(crate) struct App<S, R = rand::rngs::ThreadRng> {
    engine: GameEngine<S, R>,
    theme: Theme,
    swipe: SwipeTracker,
    /// When the next tick is due.  Only set while the game is running.
    next_tick: Option<Instant>,
    /// When the "New High Score!" notice should disappear
    notice_until: Option<Instant>,
    quitting: bool,
}

impl<S: HighScoreStore, R: Rng> App<S, R> {
    pub(crate) fn new(engine: GameEngine<S, R>, theme: Theme) -> App<S, R> {
        App {
            engine,
            theme,
            swipe: SwipeTracker::new(),
            next_tick: None,
            notice_until: None,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting {
            let now = Instant::now();
            terminal.draw(|frame| frame.render_widget(self.view(now), frame.area()))?;
            self.process_input()?;
        }
        tracing::debug!("Quitting");
        Ok(())
    }

    /// Wait for either an input event or the next deadline (tick or notice
    /// expiry), whichever comes first, and act on it
    fn process_input(&mut self) -> io::Result<()> {
        let ready = match self.next_deadline() {
            Some(deadline) => poll(deadline.saturating_duration_since(Instant::now()))?,
            None => true,
        };
        if ready {
            let event = read()?;
            self.handle_event(event, Instant::now());
        }
        self.advance(Instant::now());
        Ok(())
    }

    fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::FocusLost => self.engine.pause(),
            Event::Mouse(ev) => {
                if let Some(direction) = self.swipe.handle_mouse(ev) {
                    self.engine.set_direction(direction);
                }
            }
            _ => {
                if let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event) {
                    self.handle_command(cmd);
                }
            }
        }
        self.sync_tick_timer(now);
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Quit => self.quitting = true,
            Command::Turn(direction) => self.engine.set_direction(direction),
            Command::Space => match self.engine.state() {
                GameState::Over => self.reset(),
                GameState::Running | GameState::Paused => self.engine.toggle_pause(),
                GameState::Idle => self.engine.start(),
            },
            Command::Start => self.engine.start(),
            Command::Pause => self.engine.toggle_pause(),
            Command::Reset => self.reset(),
            Command::Theme => {
                self.theme = self.theme.toggled();
                tracing::debug!(theme = ?self.theme, "Switched theme");
            }
        }
    }

    fn reset(&mut self) {
        self.engine.reset();
        self.notice_until = None;
    }

    /// Fire any tick that is due and expire the notice if its time is up
    fn advance(&mut self, now: Instant) {
        if self.next_tick.is_some_and(|t| t <= now) {
            let outcome = self.engine.tick();
            if outcome == (TickOutcome::Ate { new_high_score: true }) {
                self.notice_until = Some(now + consts::HIGH_SCORE_NOTICE_PERIOD);
            }
            self.next_tick = Some(now + consts::TICK_PERIOD);
            self.sync_tick_timer(now);
        }
        if self.notice_until.is_some_and(|t| t <= now) {
            self.notice_until = None;
        }
    }

    /// Schedule a tick one period out if the game has just started running,
    /// and drop the schedule if it has stopped
    fn sync_tick_timer(&mut self, now: Instant) {
        if self.engine.state() == GameState::Running {
            self.next_tick.get_or_insert(now + consts::TICK_PERIOD);
        } else {
            self.next_tick = None;
        }
    }
}

impl<S, R> App<S, R> {
    fn view(&self, now: Instant) -> GameView<'_> {
        GameView::new(self.engine.snapshot(), self.theme, self.notice_active(now))
    }

    fn notice_active(&self, now: Instant) -> bool {
        self.notice_until.is_some_and(|t| now < t)
    }

    fn next_deadline(&self) -> Option<Instant> {
        match (self.next_tick, self.notice_until) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
