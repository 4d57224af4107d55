use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::card::{Card, CardColor, Symbol};
use crate::constants::{DRAW2_PENALTY, MIN_PLAYERS};
use crate::deck::Deck;
use crate::error::{Result, UnoError};
use crate::player::PlayerState;
use crate::rng::GameRng;
use crate::rules::Rules;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Setup,
    Running,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Seat reached after `steps` moves from `index` around a table of
    /// `player_count` seats.
    pub fn step(self, index: usize, steps: usize, player_count: usize) -> usize {
        let steps = steps % player_count;
        match self {
            Direction::Clockwise => (index + steps) % player_count,
            Direction::CounterClockwise => (index + player_count - steps) % player_count,
        }
    }
}

/// The full, unmasked record of a game.
///
/// Piles are stacks whose top is the last element. Fields that `initialize`
/// derives stay `None` until then, so a snapshot taken in `Setup` can be
/// partially filled in by a caller and completed later.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub draw_pile: Vec<Card>,
    pub discard_pile: Vec<Card>,
    pub players: Vec<PlayerState>,
    /// Seats to deal when `players` is left empty.
    pub player_count: Option<usize>,
    pub phase: GamePhase,
    pub active_player: Option<usize>,
    pub direction: Option<Direction>,
    /// `None` while running only when a plain wild was turned up as the
    /// starting card, in which case any color matches.
    pub active_color: Option<CardColor>,
    pub pending_draw: Option<usize>,
    pub has_drawn: bool,
    /// Set once a turn has been passed over the top card, after which its
    /// effect no longer constrains the answer and plain color matching applies.
    #[serde(default)]
    pub top_spent: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill every unset field and move the game to `Running`.
    ///
    /// Shuffles a fresh deck if no draw pile was given, deals if no players
    /// were given and turns up a starting card if the discard pile is empty.
    /// Values already present are kept. On error the state is left as it
    /// was.
    pub fn initialize(&mut self, rules: &Rules, rng: &mut GameRng) -> Result<()> {
        match self.phase {
            GamePhase::Running => return Ok(()),
            GamePhase::Finished => return Err(UnoError::GameOver),
            GamePhase::Setup => {}
        }

        let mut next = self.clone();

        let player_count = if next.players.is_empty() {
            next.player_count.unwrap_or(rules.player_count)
        } else {
            next.players.len()
        };
        if player_count < MIN_PLAYERS {
            return Err(UnoError::NotEnoughPlayers);
        }
        if player_count > rules.max_players {
            return Err(UnoError::TooManyPlayers);
        }

        if next.draw_pile.is_empty() {
            next.draw_pile = Deck::shuffled(rng).into_cards();
        }

        if next.players.is_empty() {
            next.deal(player_count, rules.hand_size)?;
        }

        if next.discard_pile.is_empty() {
            next.seed_discard(rng)?;
        }

        let top = *next
            .discard_pile
            .last()
            .ok_or(UnoError::CorruptState("empty discard pile"))?;

        let direction = *next.direction.get_or_insert(match top.symbol() {
            Some(Symbol::Reverse) => Direction::CounterClockwise,
            _ => Direction::Clockwise,
        });

        if next.active_player.is_none() {
            let start = match top.symbol() {
                Some(Symbol::Skip) => direction.step(0, 1, player_count),
                _ => 0,
            };
            next.active_player = Some(start);
        }

        if next.pending_draw.is_none() {
            next.pending_draw = Some(match top.symbol() {
                Some(Symbol::Draw2) => DRAW2_PENALTY,
                _ => 0,
            });
        }

        if next.active_color.is_none() {
            next.active_color = top.color();
        }

        next.player_count = Some(player_count);
        next.phase = GamePhase::Running;
        next.validate()?;

        debug!(
            players = player_count,
            top = %top,
            active = ?next.active_player,
            direction = ?next.direction,
            "game initialized"
        );

        *self = next;
        Ok(())
    }

    fn deal(&mut self, player_count: usize, hand_size: usize) -> Result<()> {
        let needed = player_count * hand_size;
        if self.draw_pile.len() < needed {
            return Err(UnoError::DeckExhausted {
                needed,
                available: self.draw_pile.len(),
            });
        }

        self.players = (0..player_count)
            .map(|i| PlayerState::new(format!("Player {}", i + 1), Vec::with_capacity(hand_size)))
            .collect();

        for _ in 0..hand_size {
            for player in &mut self.players {
                if let Some(card) = self.draw_pile.pop() {
                    player.add_card(card);
                }
            }
        }

        Ok(())
    }

    /// Turn up the starting card. A wild draw four never starts the pile; it
    /// goes back somewhere random in the draw pile instead.
    fn seed_discard(&mut self, rng: &mut GameRng) -> Result<()> {
        if self.draw_pile.iter().all(Card::is_wild_draw4) {
            return Err(UnoError::DeckExhausted {
                needed: 1,
                available: 0,
            });
        }

        loop {
            let card = self.draw_pile.pop().ok_or(UnoError::DeckExhausted {
                needed: 1,
                available: 0,
            })?;

            if card.is_wild_draw4() {
                let index = rng.gen_index_inclusive(self.draw_pile.len());
                self.draw_pile.insert(index, card);
                continue;
            }

            self.discard_pile.push(card);
            return Ok(());
        }
    }

    /// Structural checks for a running game, also applied to snapshots.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.players.len() < MIN_PLAYERS {
            return Err(UnoError::CorruptState("fewer than two players"));
        }
        if self.discard_pile.is_empty() {
            return Err(UnoError::CorruptState("empty discard pile"));
        }
        match self.active_player {
            Some(index) if index < self.players.len() => {}
            _ => return Err(UnoError::CorruptState("active player out of range")),
        }
        if self.direction.is_none() || self.pending_draw.is_none() {
            return Err(UnoError::CorruptState("turn fields unset"));
        }
        Ok(())
    }

    /// Fails unless the game is running.
    pub(crate) fn ensure_running(&self) -> Result<()> {
        match self.phase {
            GamePhase::Setup => Err(UnoError::UninitializedState),
            GamePhase::Finished => Err(UnoError::GameOver),
            GamePhase::Running => self.validate(),
        }
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    pub fn current_player(&self) -> Option<&PlayerState> {
        self.active_player.and_then(|index| self.players.get(index))
    }

    /// Cards the active player must draw, or 0 if nothing is pending.
    pub fn pending(&self) -> usize {
        self.pending_draw.unwrap_or(0)
    }

    /// Index of the player who emptied their hand.
    pub fn winner(&self) -> Option<usize> {
        if self.phase != GamePhase::Finished {
            return None;
        }
        self.players.iter().position(|player| player.hand.is_empty())
    }

    /// Move the turn `steps` seats along the current direction.
    pub(crate) fn move_turn_n_players_ahead(&mut self, steps: usize) {
        if let (Some(index), Some(direction)) = (self.active_player, self.direction) {
            self.active_player = Some(direction.step(index, steps, self.players.len()));
        }
    }
}
