//! Progress of loading one list: how many items were promised and how many
//! have arrived.

use crate::error::{LoadPhase, Violation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No load was ever started for the session.
    #[default]
    Unstarted,
    /// `0 <= loaded < expected`.
    Loading { expected: usize, loaded: usize },
    /// Every promised item arrived, plus any appended since.
    Complete { count: usize },
    /// The service announced an empty list.
    EmptyComplete,
}

impl LoadState {
    pub fn phase(self) -> LoadPhase {
        match self {
            Self::Unstarted => LoadPhase::Unstarted,
            Self::Loading { .. } => LoadPhase::Loading,
            Self::Complete { .. } => LoadPhase::Complete,
            Self::EmptyComplete => LoadPhase::EmptyComplete,
        }
    }

    pub fn begin(self, expected: usize) -> Result<Self, Violation> {
        if self != Self::Unstarted {
            return Err(Violation::AlreadyStarted {
                phase: self.phase(),
            });
        }
        Ok(if expected == 0 {
            Self::EmptyComplete
        } else {
            Self::Loading {
                expected,
                loaded: 0,
            }
        })
    }

    pub fn receive(self, index: usize) -> Result<Self, Violation> {
        match self {
            Self::Loading { expected, loaded } if index < expected => {
                let loaded = loaded + 1;
                Ok(if loaded == expected {
                    Self::Complete { count: expected }
                } else {
                    Self::Loading { expected, loaded }
                })
            }
            Self::Loading { expected, .. } => Err(Violation::IndexOutOfRange { index, expected }),
            other => Err(Violation::NotLoading {
                phase: other.phase(),
            }),
        }
    }

    /// Grows a fully loaded list by one, returning the new state and the
    /// index the appended item occupies.
    pub fn append(self) -> Result<(Self, usize), Violation> {
        match self {
            Self::Complete { count } => Ok((Self::Complete { count: count + 1 }, count)),
            Self::EmptyComplete => Ok((Self::Complete { count: 1 }, 0)),
            other => Err(Violation::NotComplete {
                phase: other.phase(),
            }),
        }
    }

    /// Item updates are only meaningful once a load has started.
    pub fn check_update(self) -> Result<(), Violation> {
        match self {
            Self::Unstarted => Err(Violation::NothingLoaded),
            _ => Ok(()),
        }
    }

    pub fn loaded_count(self) -> Option<usize> {
        match self {
            Self::Unstarted => None,
            Self::Loading { loaded, .. } => Some(loaded),
            Self::Complete { count } => Some(count),
            Self::EmptyComplete => Some(0),
        }
    }

    pub fn expected_count(self) -> Option<usize> {
        match self {
            Self::Unstarted => None,
            Self::Loading { expected, .. } => Some(expected),
            Self::Complete { count } => Some(count),
            Self::EmptyComplete => Some(0),
        }
    }

    pub fn is_complete(self) -> bool {
        matches!(self, Self::Complete { .. } | Self::EmptyComplete)
    }
}

/// Counter view of a [`LoadState`] with `-1` standing for "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    pub loaded_count: i64,
    pub expected_count: i64,
}

impl From<LoadState> for LoadProgress {
    fn from(state: LoadState) -> Self {
        let as_counter = |value: Option<usize>| value.map_or(-1, |v| v as i64);
        Self {
            loaded_count: as_counter(state.loaded_count()),
            expected_count: as_counter(state.expected_count()),
        }
    }
}

#[cfg(test)]
#[path = "tests/load_state_tests.rs"]
mod tests;
