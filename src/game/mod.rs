mod direction;
mod snake;
pub(crate) use self::direction::Direction;
use self::snake::Snake;
use crate::consts;
use crate::store::HighScoreStore;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::{Position, Rect, Size};
use std::collections::VecDeque;
use thiserror::Error;

/// The snake simulation: owns the board, snake, food & scores, and advances
/// one cell per call to [`GameEngine::tick()`].
///
/// The high score is read from `store` when the engine is created and written
/// back to it whenever it is beaten.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameEngine<S, R = rand::rngs::ThreadRng> {
    rng: R,
    store: S,
    snake: Snake,
    /// Direction change requested since the last tick
    pending: Option<Direction>,
    /// `None` only once the snake has filled the board
    food: Option<Position>,
    score: u32,
    high_score: u32,
    state: GameState,
}

impl<S: HighScoreStore> GameEngine<S, rand::rngs::ThreadRng> {
    pub(crate) fn new(store: S) -> Self {
        GameEngine::new_with_rng(store, rand::rng())
    }
}

impl<S: HighScoreStore, R: Rng> GameEngine<S, R> {
    pub(crate) fn new_with_rng(store: S, mut rng: R) -> GameEngine<S, R> {
        let high_score = store.load_high_score();
        let snake = Snake::initial();
        let food = random_free_cell(&mut rng, &snake).ok();
        GameEngine {
            rng,
            store,
            snake,
            pending: None,
            food,
            score: 0,
            high_score,
            state: GameState::Idle,
        }
    }

    /// Begin a fresh game.  Does nothing if a game is already in progress
    /// (running or paused).
    pub(crate) fn start(&mut self) {
        if matches!(self.state, GameState::Running | GameState::Paused) {
            return;
        }
        self.reseed();
        self.state = GameState::Running;
        tracing::debug!("Game started");
    }

    /// Stop any game in progress and return to the starting layout, waiting
    /// for [`GameEngine::start()`].
    pub(crate) fn reset(&mut self) {
        self.reseed();
        self.state = GameState::Idle;
        tracing::debug!("Game reset");
    }

    fn reseed(&mut self) {
        self.snake = Snake::initial();
        self.pending = None;
        self.food = random_free_cell(&mut self.rng, &self.snake).ok();
        self.score = 0;
    }

    /// Advance the snake one cell.  Does nothing unless the game is running.
    pub(crate) fn tick(&mut self) -> TickOutcome {
        if self.state != GameState::Running {
            return TickOutcome::Skipped;
        }
        if let Some(direction) = self.pending.take() {
            self.snake.direction = direction;
        }
        let Some(head) = self.snake.next_head() else {
            return self.collide(Collision::Wall);
        };
        if self.snake.contains(head) {
            return self.collide(Collision::Body);
        }
        if self.food != Some(head) {
            self.snake.slither(head, false);
            return TickOutcome::Moved;
        }
        self.snake.slither(head, true);
        self.score += 1;
        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.record_high_score();
        }
        match random_free_cell(&mut self.rng, &self.snake) {
            Ok(pos) => {
                self.food = Some(pos);
                TickOutcome::Ate { new_high_score }
            }
            Err(GameFull) => {
                self.food = None;
                self.state = GameState::Over;
                tracing::info!(score = self.score, "Snake filled the board");
                TickOutcome::BoardFull
            }
        }
    }

    fn collide(&mut self, collision: Collision) -> TickOutcome {
        self.state = GameState::Over;
        tracing::info!(score = self.score, ?collision, "Game over");
        TickOutcome::Collided(collision)
    }

    fn record_high_score(&mut self) {
        self.high_score = self.score;
        tracing::info!(high_score = self.high_score, "New high score");
        if let Err(e) = self.store.save_high_score(self.high_score) {
            let e: &(dyn std::error::Error + 'static) = &e;
            tracing::warn!(error = e, "Could not persist high score");
        }
    }
}

impl<S, R> GameEngine<S, R> {
    /// Request that the snake turn in `direction` on the next tick.  Requests
    /// to reverse into the snake's own body are ignored.  If several requests
    /// arrive before a tick, the last valid one wins.
    pub(crate) fn set_direction(&mut self, direction: Direction) {
        if !direction.is_opposite(self.snake.direction) {
            self.pending = Some(direction);
        }
    }

    pub(crate) fn pause(&mut self) {
        if self.state == GameState::Running {
            self.state = GameState::Paused;
            tracing::debug!("Game paused");
        }
    }

    pub(crate) fn resume(&mut self) {
        if self.state == GameState::Paused {
            self.state = GameState::Running;
            tracing::debug!("Game resumed");
        }
    }

    pub(crate) fn toggle_pause(&mut self) {
        match self.state {
            GameState::Running => self.pause(),
            GameState::Paused => self.resume(),
            GameState::Idle | GameState::Over => (),
        }
    }

    pub(crate) fn state(&self) -> GameState {
        self.state
    }

    pub(crate) fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            snake: self.snake.cells(),
            direction: self.snake.direction,
            food: self.food,
            score: self.score,
            high_score: self.high_score,
            state: self.state,
        }
    }
}

/// Choose a cell not occupied by `snake`, uniformly at random
fn random_free_cell<R: Rng>(rng: &mut R, snake: &Snake) -> Result<Position, GameFull> {
    Rect::from((
        Position::ORIGIN,
        Size::new(consts::BOARD_SIZE, consts::BOARD_SIZE),
    ))
    .positions()
    .filter(|&p| !snake.contains(p))
    .choose(rng)
    .ok_or(GameFull)
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum GameState {
    /// Waiting for a game to be started
    Idle,
    Running,
    Paused,
    /// The snake has crashed (or filled the board)
    Over,
}

/// What happened during a call to [`GameEngine::tick()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickOutcome {
    /// The game was not running, so nothing happened
    Skipped,
    /// The snake moved one cell
    Moved,
    /// The snake moved onto the food and grew
    Ate {
        /// The score just went past the previous high score
        new_high_score: bool,
    },
    /// The snake crashed; the game is now over
    Collided(Collision),
    /// The snake ate the last piece of food there was room for; the game is
    /// now over
    BoardFull,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    Wall,
    Body,
}

/// Read-only view of the game for rendering
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot<'a> {
    /// Cells of the snake, head first
    pub(crate) snake: &'a VecDeque<Position>,
    pub(crate) direction: Direction,
    pub(crate) food: Option<Position>,
    pub(crate) score: u32,
    pub(crate) high_score: u32,
    pub(crate) state: GameState,
}

impl Snapshot<'_> {
    pub(crate) fn head(&self) -> Option<Position> {
        self.snake.front().copied()
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("no free cells left on the board")]
pub(crate) struct GameFull;
