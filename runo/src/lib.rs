//! Rules engine for UNO.
//!
//! A [`state::GameState`] is set up, completed with
//! [`state::GameState::initialize`], and then advanced one decision at a
//! time: [`legal::legal_actions`] lists what the active player may do and
//! [`apply::apply_action`] carries out the chosen move. [`uno::Uno`] bundles a
//! state with its rules and randomness and can drive a whole game with
//! [`agent::PlayerAgent`]s.

pub mod action;
pub mod agent;
pub mod apply;
pub mod card;
mod constants;
pub mod deck;
pub mod error;
pub mod legal;
pub mod player;
pub mod rng;
pub mod rules;
pub mod state;
pub mod uno;
pub mod view;

pub use constants::TOTAL_CARDS_IN_DECK;
