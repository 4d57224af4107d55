//! Legal-move generation.
//!
//! What the active player may do depends on the card on top of the discard
//! pile. Number cards on top allow the usual color/number matching plus
//! wilds and draw twos. A freshly played action card only admits a narrow set
//! of answers, and a wild draw four admits none. Once a turn has been passed
//! over it, the top card is spent and plain color matching applies again.

use strum::IntoEnumIterator;
use tracing::trace;

use crate::action::{Action, ActionSet};
use crate::card::{Card, CardColor, Symbol, WildKind};
use crate::constants::{DRAW2_PENALTY, WILD_DRAW4_PENALTY};
use crate::error::{Result, UnoError};
use crate::player::PlayerState;
use crate::state::{GamePhase, GameState};

/// Every action the active player may take.
///
/// Fails with [`UnoError::UninitializedState`] before `initialize`, and
/// returns an empty set once the game is finished.
pub fn legal_actions(state: &GameState) -> Result<ActionSet> {
    match state.phase {
        GamePhase::Setup => return Err(UnoError::UninitializedState),
        GamePhase::Finished => return Ok(ActionSet::default()),
        GamePhase::Running => state.validate()?,
    }

    let top = *state
        .top_card()
        .ok_or(UnoError::CorruptState("empty discard pile"))?;
    let player = state
        .current_player()
        .ok_or(UnoError::CorruptState("active player out of range"))?;

    let mut actions = ActionSet::default();

    if !state.has_drawn {
        let pending = state.pending();
        actions.insert(Action::draw(if pending > 0 { pending } else { 1 }));
    } else {
        actions.insert(Action::Pass);
    }

    let plays = match top {
        _ if state.top_spent => plays_on_color(state, player, top.number()),
        Card::Number(_, number) => plays_on_color(state, player, Some(number)),
        Card::Symbol(top_color, Symbol::Skip) => plays_on_skip(player, top_color),
        Card::Symbol(top_color, Symbol::Reverse) => plays_on_reverse(state, player, top_color),
        Card::Symbol(_, Symbol::Draw2) => plays_on_draw2(state, player),
        Card::Wild(WildKind::Wild) => plays_on_wild(state, player),
        Card::Wild(WildKind::WildDraw4) => Vec::new(),
    };

    // Every answer to a wild comes paired with the option to draw instead.
    if !state.top_spent && matches!(top, Card::Wild(WildKind::Wild)) && !plays.is_empty() {
        actions.insert(Action::draw(1));
    }

    let declare_uno = player.cards_count() == 2;
    for play in plays {
        if declare_uno {
            actions.insert(play.with_uno());
        }
        actions.insert(play);
    }

    trace!(count = actions.len(), top = %top, "legal actions");
    Ok(actions)
}

fn matches_active_color(state: &GameState, color: CardColor) -> bool {
    state.active_color.map_or(true, |active| active == color)
}

/// Color matching against the active color, plus number matching when the
/// top card carries a number.
fn plays_on_color(state: &GameState, player: &PlayerState, top_number: Option<u8>) -> Vec<Action> {
    let pending = state.pending();

    // A wild draw four is only allowed when nothing else in hand matches.
    let has_alternative = player.hand.iter().any(|card| match card {
        Card::Number(color, number) => {
            matches_active_color(state, *color) || Some(*number) == top_number
        }
        Card::Symbol(color, _) => matches_active_color(state, *color),
        Card::Wild(_) => false,
    });

    let mut plays = Vec::new();
    for card in &player.hand {
        match *card {
            Card::Number(color, number) => {
                if matches_active_color(state, color) || Some(number) == top_number {
                    plays.push(Action::play(*card, color));
                }
            }
            Card::Symbol(color, Symbol::Draw2) => {
                plays.push(Action::play_imposing(*card, color, pending + DRAW2_PENALTY));
            }
            Card::Symbol(color, _) => {
                if matches_active_color(state, color) {
                    plays.push(Action::play(*card, color));
                }
            }
            Card::Wild(WildKind::Wild) => {
                for color in CardColor::iter() {
                    plays.push(Action::play(*card, color));
                }
            }
            Card::Wild(WildKind::WildDraw4) => {
                if !has_alternative {
                    for color in CardColor::iter() {
                        plays.push(Action::play_imposing(*card, color, WILD_DRAW4_PENALTY));
                    }
                }
            }
        }
    }
    plays
}

fn plays_on_skip(player: &PlayerState, top_color: CardColor) -> Vec<Action> {
    player
        .hand
        .iter()
        .filter_map(|card| match *card {
            Card::Symbol(color, Symbol::Skip) => Some(Action::play(*card, color)),
            Card::Symbol(color, Symbol::Reverse) if color == top_color => {
                Some(Action::play(*card, color))
            }
            _ => None,
        })
        .collect()
}

fn plays_on_reverse(state: &GameState, player: &PlayerState, top_color: CardColor) -> Vec<Action> {
    let pending = state.pending();
    player
        .hand
        .iter()
        .filter_map(|card| match *card {
            Card::Symbol(color, Symbol::Reverse) => Some(Action::play(*card, color)),
            Card::Symbol(color, Symbol::Draw2) if color == top_color => Some(
                Action::play_imposing(*card, color, pending + DRAW2_PENALTY),
            ),
            _ => None,
        })
        .collect()
}

fn plays_on_draw2(state: &GameState, player: &PlayerState) -> Vec<Action> {
    let pending = state.pending();
    player
        .hand
        .iter()
        .filter_map(|card| match *card {
            Card::Symbol(color, Symbol::Draw2) => Some(Action::play_imposing(
                *card,
                color,
                pending + DRAW2_PENALTY,
            )),
            _ => None,
        })
        .collect()
}

fn plays_on_wild(state: &GameState, player: &PlayerState) -> Vec<Action> {
    player
        .hand
        .iter()
        .filter_map(|card| match *card {
            Card::Number(color, _) if matches_active_color(state, color) => {
                Some(Action::play(*card, color))
            }
            _ => None,
        })
        .collect()
}
