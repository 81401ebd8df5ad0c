//! Move decision providers.
//!
//! A `DecisionChain` asks its providers in order and plays the first move
//! one of them recommends. The usual chain is an optional external advisor,
//! then the local search, then a random legal move.

use std::fmt;
use std::time::Duration;

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::{Difficulty, Engine, GameState, Move};

/// Error raised by a decision provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    /// The provider's backend could not be reached or answered with an error
    Failed { provider: String, reason: String },
    /// The recommendation did not parse as an ICCS move
    BadNotation { provider: String, notation: String },
    /// The recommendation is not legal in the current position
    IllegalMove { provider: String, mv: Move },
}

impl fmt::Display for AdvisorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvisorError::Failed { provider, reason } => {
                write!(f, "{provider} failed: {reason}")
            }
            AdvisorError::BadNotation { provider, notation } => {
                write!(f, "{provider} answered with unreadable move '{notation}'")
            }
            AdvisorError::IllegalMove { provider, mv } => {
                write!(f, "{provider} recommended illegal move '{mv}'")
            }
        }
    }
}

impl std::error::Error for AdvisorError {}

/// Something that can recommend a move for the side to move.
pub trait DecisionProvider {
    /// Provider name (for logging)
    fn name(&self) -> &str;

    /// Whether the provider should be asked at all
    fn is_available(&self) -> bool {
        true
    }

    /// Recommend a move, or `Ok(None)` to defer to the next provider.
    fn decide(
        &mut self,
        engine: &mut Engine,
        state: &GameState,
    ) -> Result<Option<Move>, AdvisorError>;
}

/// The engine's own alpha-beta search.
#[derive(Debug, Clone, Copy)]
pub struct LocalSearch {
    pub difficulty: Difficulty,
    pub budget: Duration,
}

impl LocalSearch {
    #[must_use]
    pub fn new(difficulty: Difficulty, budget: Duration) -> Self {
        LocalSearch { difficulty, budget }
    }
}

impl DecisionProvider for LocalSearch {
    fn name(&self) -> &str {
        "local search"
    }

    fn decide(
        &mut self,
        engine: &mut Engine,
        state: &GameState,
    ) -> Result<Option<Move>, AdvisorError> {
        Ok(engine.search(state, self.difficulty, self.budget).best_move)
    }
}

/// A random legal move, preferring captures.
#[derive(Debug)]
pub struct RandomFallback {
    rng: StdRng,
}

impl Default for RandomFallback {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomFallback {
    #[must_use]
    pub fn new() -> Self {
        RandomFallback {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible choices for tests and replays
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        RandomFallback {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DecisionProvider for RandomFallback {
    fn name(&self) -> &str {
        "random"
    }

    fn decide(
        &mut self,
        engine: &mut Engine,
        state: &GameState,
    ) -> Result<Option<Move>, AdvisorError> {
        Ok(engine.random_legal_move(state.board(), state.side_to_move(), &mut self.rng))
    }
}

type Query = Box<dyn FnMut(&str) -> Result<Option<String>, String> + Send>;

/// Adapter for an outside move source such as an opening book service.
///
/// The query receives the position as FEN and answers with an ICCS move,
/// `None` for "no opinion", or an error message. Answers are checked for
/// legality before they are passed on.
pub struct ExternalAdvisor {
    name: String,
    enabled: bool,
    query: Query,
}

impl fmt::Debug for ExternalAdvisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalAdvisor")
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl ExternalAdvisor {
    pub fn new<F>(name: impl Into<String>, query: F) -> Self
    where
        F: FnMut(&str) -> Result<Option<String>, String> + Send + 'static,
    {
        ExternalAdvisor {
            name: name.into(),
            enabled: true,
            query: Box::new(query),
        }
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl DecisionProvider for ExternalAdvisor {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        self.enabled
    }

    fn decide(
        &mut self,
        engine: &mut Engine,
        state: &GameState,
    ) -> Result<Option<Move>, AdvisorError> {
        let answer = (self.query)(&state.board().to_fen()).map_err(|reason| {
            AdvisorError::Failed {
                provider: self.name.clone(),
                reason,
            }
        })?;
        let Some(notation) = answer else {
            return Ok(None);
        };
        let mv: Move = notation.parse().map_err(|_| AdvisorError::BadNotation {
            provider: self.name.clone(),
            notation: notation.clone(),
        })?;

        let mut board = state.board().clone();
        let own_piece = board
            .piece_at(mv.from)
            .is_some_and(|p| p.side == state.side_to_move());
        if !own_piece || !engine.is_move_legal(&mut board, mv) {
            return Err(AdvisorError::IllegalMove {
                provider: self.name.clone(),
                mv,
            });
        }
        Ok(Some(mv))
    }
}

/// Ordered list of providers; the first recommendation wins.
#[derive(Default)]
pub struct DecisionChain {
    providers: Vec<Box<dyn DecisionProvider + Send>>,
}

impl fmt::Debug for DecisionChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.providers.iter().map(|p| p.name()))
            .finish()
    }
}

impl DecisionChain {
    #[must_use]
    pub fn new() -> Self {
        DecisionChain {
            providers: Vec::new(),
        }
    }

    /// Local search at `difficulty` followed by a random fallback.
    #[must_use]
    pub fn standard(difficulty: Difficulty, budget: Duration) -> Self {
        DecisionChain::new()
            .with(LocalSearch::new(difficulty, budget))
            .with(RandomFallback::new())
    }

    /// Append a provider to the end of the chain.
    #[must_use]
    pub fn with<P: DecisionProvider + Send + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Put a provider at the front of the chain.
    pub fn prepend<P: DecisionProvider + Send + 'static>(&mut self, provider: P) {
        self.providers.insert(0, Box::new(provider));
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Ask each available provider in turn.
    ///
    /// Provider errors are logged and skipped. Returns `None` only when the
    /// game is over or no provider had a move.
    pub fn decide(&mut self, engine: &mut Engine, state: &GameState) -> Option<Move> {
        if state.is_over() {
            return None;
        }
        for provider in &mut self.providers {
            if !provider.is_available() {
                continue;
            }
            match provider.decide(engine, state) {
                Ok(Some(mv)) => {
                    debug!("{} chose {mv}", provider.name());
                    return Some(mv);
                }
                Ok(None) => debug!("{} had no move", provider.name()),
                Err(err) => warn!("{err}"),
            }
        }
        None
    }
}
