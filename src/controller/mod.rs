//! Input/result state machine for the praise box.
//!
//! ```text
//! Idle ──begin()──▶ Validating ──valid──▶ Loading ──complete()──▶ Success | Error
//!   ▲                   │ invalid                                     │
//!   └───────────────────┴──────────────── reset() / set_name() ◀──────┘
//! ```
//!
//! The controller never awaits on its own: `begin` hands out a
//! [`PendingPoem`] ticket, the caller runs the adapter, and `complete` applies
//! the outcome. Each ticket carries a generation id; `reset` bumps the id so a
//! reply that arrives after a reset is dropped instead of overwriting the
//! cleared screen.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::adapter::PoemAdapter;
use crate::error::{ErrorKind, PraiseError};
use crate::poem::{is_valid_name, Name, PoemRequest, PoemResult};
use crate::praise::PraiseCatalog;

/// Where the controller currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a name, or cleared after a reset
    Idle,
    /// Checking the name; only observable from inside `begin`
    Validating,
    /// A generation is in flight
    Loading,
    /// A poem card is shown
    Success,
    /// An error message is shown
    Error,
}

/// Everything shown on a finished card, frozen at trigger time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PraiseCard {
    /// Name as it was when the button was pressed
    pub name: String,
    /// Phrase the poem was themed on
    pub praise: String,
    pub poem: PoemResult,
}

/// Ticket for one in-flight generation.
#[derive(Debug, Clone)]
pub struct PendingPoem {
    /// Generation id to hand back to `complete`
    pub id: u64,
    pub request: PoemRequest,
}

/// Drives one praise box: the name field, the phrase pick, the in-flight
/// generation and the card or error it ends in.
pub struct Controller<R: Rng = StdRng> {
    catalog: PraiseCatalog,
    rng: R,
    name: String,
    phase: Phase,
    /// Phrase chosen for the current or last generation
    selected_praise: Option<String>,
    /// Name snapshot taken when the current generation started
    name_for_poem: Option<String>,
    card: Option<PraiseCard>,
    error: Option<&'static str>,
    generation: u64,
}

impl Controller<StdRng> {
    /// Creates a controller with an entropy-seeded random source.
    pub fn new(catalog: PraiseCatalog) -> Self {
        Self::with_rng(catalog, StdRng::from_entropy())
    }

    /// Creates a controller whose phrase picks are reproducible.
    pub fn seeded(catalog: PraiseCatalog, seed: u64) -> Self {
        Self::with_rng(catalog, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Controller<R> {
    /// Creates a controller drawing phrases from `rng`.
    pub fn with_rng(catalog: PraiseCatalog, rng: R) -> Self {
        Self {
            catalog,
            rng,
            name: String::new(),
            phase: Phase::Idle,
            selected_praise: None,
            name_for_poem: None,
            card: None,
            error: None,
            generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Raw contents of the name field.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn selected_praise(&self) -> Option<&str> {
        self.selected_praise.as_deref()
    }

    pub fn card(&self) -> Option<&PraiseCard> {
        self.card.as_ref()
    }

    /// Message currently displayed in place of a poem, if any.
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Whether the name box is showing, i.e. no generation is loading and
    /// no card is waiting to be reset.
    pub fn accepts_input(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Error)
    }

    /// Whether the generate button is enabled.
    pub fn can_trigger(&self) -> bool {
        self.accepts_input() && is_valid_name(&self.name)
    }

    /// Header line above the input box.
    pub fn headline(&self) -> &'static str {
        if self.card.is_some() {
            "오늘의 칭찬 주인공이 탄생했어요!"
        } else {
            "칭찬하고 싶은 사람의 이름을 적고 버튼을 눌러보세요!"
        }
    }

    /// Updates the name field. A displayed error is cleared on the next edit.
    pub fn set_name(&mut self, input: impl Into<String>) {
        self.name = input.into();
        if self.error.is_some() {
            self.error = None;
            if self.phase == Phase::Error {
                self.phase = Phase::Idle;
            }
        }
    }

    /// Checks the name field without starting a generation.
    ///
    /// Returns `false` outside `Idle` and `Error`, or when the name is
    /// invalid; the latter also shows the invalid-input message.
    pub fn validate_name(&mut self) -> bool {
        self.accepts_input() && self.validate().is_some()
    }

    fn validate(&mut self) -> Option<Name> {
        let previous = self.phase;
        self.phase = Phase::Validating;
        let parsed = Name::parse(&self.name);
        self.phase = previous;
        match parsed {
            Ok(name) => Some(name),
            Err(_) => {
                self.error = Some(ErrorKind::InvalidInput.user_message());
                None
            }
        }
    }

    /// Starts a generation if the button is enabled.
    ///
    /// Returns `None` while loading or while a card is shown (only `reset`
    /// leaves `Success`), and when the name is invalid; in the latter case
    /// the controller stays where it was with the invalid-input message set.
    /// Otherwise a phrase is picked, the name is snapshotted and the
    /// controller enters `Loading`.
    pub fn begin(&mut self) -> Option<PendingPoem> {
        if !self.accepts_input() {
            log::debug!("Ignoring trigger in phase {:?}", self.phase);
            return None;
        }

        let name = self.validate()?;
        let praise = self.catalog.pick(&mut self.rng).to_string();
        let request = PoemRequest {
            name,
            praise: praise.clone(),
        };

        self.generation += 1;
        self.phase = Phase::Loading;
        self.error = None;
        self.card = None;
        self.name_for_poem = Some(request.name.to_string());
        self.selected_praise = Some(praise);

        Some(PendingPoem {
            id: self.generation,
            request,
        })
    }

    /// Applies the outcome of a generation.
    ///
    /// Returns `false` and changes nothing when `id` is not the generation
    /// currently loading, e.g. because `reset` ran in the meantime.
    pub fn complete(&mut self, id: u64, outcome: Result<PoemResult, PraiseError>) -> bool {
        if self.phase != Phase::Loading || id != self.generation {
            log::debug!(
                "Dropping stale poem result (generation {}, current {})",
                id,
                self.generation
            );
            return false;
        }

        match outcome {
            Ok(poem) => {
                self.card = Some(PraiseCard {
                    name: self.name_for_poem.clone().unwrap_or_default(),
                    praise: self.selected_praise.clone().unwrap_or_default(),
                    poem,
                });
                self.phase = Phase::Success;
            }
            Err(e) => {
                self.error = Some(e.user_message());
                self.phase = Phase::Error;
            }
        }
        true
    }

    /// Runs `begin`, the adapter and `complete` in one go.
    ///
    /// Returns the resulting phase; the adapter is not called when `begin`
    /// declines to start.
    pub async fn generate(&mut self, adapter: &PoemAdapter) -> Phase {
        if let Some(pending) = self.begin() {
            let outcome = adapter.generate(&pending.request).await;
            self.complete(pending.id, outcome);
        }
        self.phase
    }

    /// Clears name, phrase, poem and error and returns to `Idle`.
    pub fn reset(&mut self) {
        self.name.clear();
        self.selected_praise = None;
        self.name_for_poem = None;
        self.card = None;
        self.error = None;
        self.phase = Phase::Idle;
        // Invalidates any ticket still in flight.
        self.generation += 1;
    }
}
