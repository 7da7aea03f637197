use freccette_types::{EntryView, GameError, InputMode};
use std::fmt;

/// Longest value accepted in total mode
pub const TOTAL_MAX_DIGITS: usize = 4;
/// Longest value accepted for a single dart
pub const DART_MAX_DIGITS: usize = 3;
pub const DART_SLOTS: usize = 3;

/// A single keypad digit, 0 through 9
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: u8) -> Result<Self, GameError> {
        if value <= 9 {
            Ok(Self(value))
        } else {
            Err(GameError::InvalidDigit { digit: value })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input typed for the open turn that has not been committed yet.
///
/// The variant is fixed when the turn opens, so a turn keeps the entry
/// shape it started with even if the session mode changes meanwhile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreEntryBuffer {
    Total {
        digits: String,
    },
    Granular {
        slots: [String; DART_SLOTS],
        active_slot: usize,
    },
}

impl ScoreEntryBuffer {
    pub fn new(mode: InputMode) -> Self {
        match mode {
            InputMode::Total => ScoreEntryBuffer::Total {
                digits: "0".to_string(),
            },
            InputMode::Granular => ScoreEntryBuffer::Granular {
                slots: Default::default(),
                active_slot: 0,
            },
        }
    }

    pub fn mode(&self) -> InputMode {
        match self {
            ScoreEntryBuffer::Total { .. } => InputMode::Total,
            ScoreEntryBuffer::Granular { .. } => InputMode::Granular,
        }
    }

    pub fn reset(&mut self, mode: InputMode) {
        *self = Self::new(mode);
    }

    /// Add a digit to the entry. In granular mode an explicit slot is
    /// made active first; total mode ignores the slot. Digits past the
    /// length limit are dropped.
    pub fn append_digit(&mut self, slot: Option<usize>, digit: Digit) -> Result<(), GameError> {
        if let Some(index) = slot {
            self.set_active_slot(index)?;
        }

        match self {
            ScoreEntryBuffer::Total { digits } => {
                if digits.is_empty() || digits == "0" {
                    // A leading zero is replaced rather than prefixed
                    *digits = digit.to_string();
                } else if digits.len() < TOTAL_MAX_DIGITS {
                    digits.push(digit.as_char());
                }
            }
            ScoreEntryBuffer::Granular { slots, active_slot } => {
                let current = slot_mut(slots, *active_slot)?;
                if current.len() < DART_MAX_DIGITS {
                    current.push(digit.as_char());
                }
            }
        }

        Ok(())
    }

    pub fn delete_last_digit(&mut self, slot: Option<usize>) -> Result<(), GameError> {
        if let Some(index) = slot {
            self.set_active_slot(index)?;
        }

        match self {
            ScoreEntryBuffer::Total { digits } => {
                if digits.len() > 1 {
                    digits.pop();
                } else {
                    *digits = "0".to_string();
                }
            }
            ScoreEntryBuffer::Granular { slots, active_slot } => {
                slot_mut(slots, *active_slot)?.pop();
            }
        }

        Ok(())
    }

    /// Choose which dart receives digits. No effect in total mode.
    pub fn set_active_slot(&mut self, index: usize) -> Result<(), GameError> {
        if let ScoreEntryBuffer::Granular { active_slot, .. } = self {
            if index >= DART_SLOTS {
                return Err(GameError::InvalidSlot { index });
            }
            *active_slot = index;
        }
        Ok(())
    }

    pub fn compute_value(&self) -> u32 {
        match self {
            ScoreEntryBuffer::Total { digits } => parse_or_zero(digits),
            ScoreEntryBuffer::Granular { slots, .. } => {
                slots.iter().map(|slot| parse_or_zero(slot)).sum()
            }
        }
    }

    pub fn view(&self) -> EntryView {
        match self {
            ScoreEntryBuffer::Total { digits } => EntryView::Total {
                display: if digits.is_empty() {
                    "0".to_string()
                } else {
                    digits.clone()
                },
            },
            ScoreEntryBuffer::Granular { slots, active_slot } => EntryView::Granular {
                slots: slots.to_vec(),
                active_slot: *active_slot,
            },
        }
    }
}

fn slot_mut(slots: &mut [String; DART_SLOTS], index: usize) -> Result<&mut String, GameError> {
    slots.get_mut(index).ok_or(GameError::InvalidSlot { index })
}

fn parse_or_zero(text: &str) -> u32 {
    text.parse().unwrap_or(0)
}
