//! Position Registry
//!
//! Immutable table of playable slots. The index of a position in the table is
//! the slot identifier used by every other layer.

use super::Pin;
use crate::events::SlotIndex;
use crate::{RepeatError, Result};
use std::collections::HashMap;

/// One playable slot: a button, its light and its sound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Human-readable identifier
    pub id: String,
    /// Sound played when the slot is activated
    pub sound_id: String,
    /// Button input pin
    pub input_pin: Pin,
    /// Light output pin
    pub output_pin: Pin,
    /// Rounds to win a game started from this button
    pub unlock_sequence_length: usize,
}

/// Ordered, validated collection of positions
#[derive(Debug, Clone)]
pub struct PositionTable {
    positions: Vec<Position>,
    by_input: HashMap<Pin, SlotIndex>,
}

impl PositionTable {
    /// Build a table, rejecting empty tables, zero unlock lengths and pins
    /// wired to more than one position
    pub fn new(positions: Vec<Position>) -> Result<Self> {
        if positions.is_empty() {
            return Err(RepeatError::Config("at least one position is required".into()));
        }

        let mut by_input = HashMap::with_capacity(positions.len());
        let mut outputs = HashMap::with_capacity(positions.len());
        for (slot, position) in positions.iter().enumerate() {
            if position.unlock_sequence_length == 0 {
                return Err(RepeatError::Config(format!(
                    "position '{}' has an unlock sequence length of 0",
                    position.id
                )));
            }
            if by_input.insert(position.input_pin, slot).is_some() {
                return Err(RepeatError::Config(format!(
                    "input pin {} is assigned to more than one position",
                    position.input_pin
                )));
            }
            if outputs.insert(position.output_pin, slot).is_some() {
                return Err(RepeatError::Config(format!(
                    "output pin {} is assigned to more than one position",
                    position.output_pin
                )));
            }
        }

        Ok(PositionTable {
            positions,
            by_input,
        })
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false for a validated table
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position at `slot`.
    ///
    /// # Panics
    /// Panics if `slot` is out of range; slot indices only ever come from this
    /// table.
    pub fn get(&self, slot: SlotIndex) -> &Position {
        &self.positions[slot]
    }

    /// Map an input pin back to its slot
    pub fn slot_for_input(&self, pin: Pin) -> Result<SlotIndex> {
        self.by_input
            .get(&pin)
            .copied()
            .ok_or(RepeatError::UnknownPin(pin))
    }

    /// Iterate positions in slot order
    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.positions.iter()
    }

    /// Input pins in slot order
    pub fn input_pins(&self) -> Vec<Pin> {
        self.positions.iter().map(|p| p.input_pin).collect()
    }

    /// Output pins in slot order
    pub fn output_pins(&self) -> Vec<Pin> {
        self.positions.iter().map(|p| p.output_pin).collect()
    }
}
