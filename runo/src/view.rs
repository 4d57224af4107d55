use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::card::{Card, CardColor};
use crate::error::{Result, UnoError};
use crate::state::{Direction, GamePhase, GameState};

/// A hand as seen by one particular player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandView {
    Revealed(Vec<Card>),
    Hidden { count: usize },
}

impl HandView {
    pub fn cards_count(&self) -> usize {
        match self {
            HandView::Revealed(cards) => cards.len(),
            HandView::Hidden { count } => *count,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: String,
    pub hand: HandView,
    pub score: u32,
    pub last_action: Option<Action>,
}

/// What a single player is allowed to know about a game: their own hand,
/// how many cards everybody else holds, and all public table state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub viewer: usize,
    pub players: Vec<PlayerSummary>,
    pub draw_pile_count: usize,
    pub discard_pile: Vec<Card>,
    pub phase: GamePhase,
    pub active_player: Option<usize>,
    pub direction: Option<Direction>,
    pub active_color: Option<CardColor>,
    pub pending_draw: Option<usize>,
    pub has_drawn: bool,
    pub top_spent: bool,
}

impl PlayerView {
    pub fn for_player(state: &GameState, viewer: usize) -> Result<Self> {
        if state.phase == GamePhase::Setup {
            return Err(UnoError::UninitializedState);
        }
        if viewer >= state.players.len() {
            return Err(UnoError::InvalidAction(format!(
                "no player at seat {}",
                viewer
            )));
        }

        let players = state
            .players
            .iter()
            .enumerate()
            .map(|(index, player)| PlayerSummary {
                name: player.name.clone(),
                hand: if index == viewer {
                    HandView::Revealed(player.hand.clone())
                } else {
                    HandView::Hidden {
                        count: player.cards_count(),
                    }
                },
                score: player.score,
                last_action: player.last_action,
            })
            .collect();

        Ok(Self {
            viewer,
            players,
            draw_pile_count: state.draw_pile.len(),
            discard_pile: state.discard_pile.clone(),
            phase: state.phase,
            active_player: state.active_player,
            direction: state.direction,
            active_color: state.active_color,
            pending_draw: state.pending_draw,
            has_drawn: state.has_drawn,
            top_spent: state.top_spent,
        })
    }

    /// The viewer's own cards.
    pub fn hand(&self) -> &[Card] {
        match &self.players[self.viewer].hand {
            HandView::Revealed(cards) => cards.as_slice(),
            HandView::Hidden { .. } => &[],
        }
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.discard_pile.last()
    }
}

pub fn player_view(state: &GameState, viewer: usize) -> Result<PlayerView> {
    PlayerView::for_player(state, viewer)
}
