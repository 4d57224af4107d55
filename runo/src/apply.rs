use tracing::{debug, info, warn};

use crate::action::Action;
use crate::card::Symbol;
use crate::error::{Result, UnoError};
use crate::legal::legal_actions;
use crate::rng::GameRng;
use crate::rules::Rules;
use crate::state::{GamePhase, GameState};

/// Apply `action` for the active player.
///
/// The action is checked in full before anything changes; a rejected action
/// leaves `state` untouched. Drawing from an empty pile quietly reshuffles
/// the discard pile (minus its top card) back into the draw pile.
pub fn apply_action(
    state: &mut GameState,
    action: &Action,
    rules: &Rules,
    rng: &mut GameRng,
) -> Result<()> {
    state.ensure_running()?;
    validate(state, action, rules)?;

    let active = state
        .active_player
        .ok_or(UnoError::CorruptState("active player out of range"))?;
    debug!(player = active, action = %action, "applying action");

    match *action {
        Action::Draw { count } => {
            draw_cards(state, count, rng)?;
            state.has_drawn = true;
            state.pending_draw = Some(0);
            state.players[active].last_action = Some(*action);
        }
        Action::Pass => {
            state.players[active].last_action = Some(*action);
            state.move_turn_n_players_ahead(1);
            state.has_drawn = false;
            state.top_spent = true;
        }
        Action::Play {
            card,
            color,
            draw_imposed,
            uno,
        } => {
            if rules.missed_uno_penalty > 0 && !uno && state.players[active].cards_count() == 2 {
                debug!(player = active, penalty = rules.missed_uno_penalty, "missed UNO");
                draw_cards(state, rules.missed_uno_penalty, rng)?;
            }

            let player = &mut state.players[active];
            let index = player
                .card_index(&card)
                .ok_or_else(|| UnoError::InvalidAction(format!("{} is not in hand", card)))?;
            player.remove_card(index);
            player.last_action = Some(*action);
            let won = player.hand.is_empty();

            state.discard_pile.push(card);
            state.active_color = Some(color);
            state.pending_draw = Some(draw_imposed);
            state.top_spent = false;

            let steps = match card.symbol() {
                Some(Symbol::Skip) => 2,
                Some(Symbol::Reverse) => {
                    state.direction = state.direction.map(|direction| direction.reversed());
                    1
                }
                _ => 1,
            };

            if won {
                state.phase = GamePhase::Finished;
                info!(winner = active, "game finished");
                return Ok(());
            }

            state.move_turn_n_players_ahead(steps);
            state.has_drawn = false;
        }
    }

    Ok(())
}

fn validate(state: &GameState, action: &Action, rules: &Rules) -> Result<()> {
    let player = state
        .current_player()
        .ok_or(UnoError::CorruptState("active player out of range"))?;

    let mut needed = 0;
    match *action {
        Action::Draw { count } => {
            if count == 0 {
                return Err(UnoError::InvalidAction("cannot draw zero cards".to_string()));
            }
            needed = count;
        }
        Action::Pass => {
            if !state.has_drawn {
                return Err(UnoError::InvalidAction(
                    "cannot pass before drawing".to_string(),
                ));
            }
        }
        Action::Play {
            card, color, uno, ..
        } => {
            if !player.has_card(&card) {
                return Err(UnoError::InvalidAction(format!("{} is not in hand", card)));
            }
            if let Some(own) = card.color() {
                if own != color {
                    return Err(UnoError::InvalidAction(format!(
                        "{} cannot be played as {}",
                        card, color
                    )));
                }
            }
            if rules.missed_uno_penalty > 0 && !uno && player.cards_count() == 2 {
                needed = rules.missed_uno_penalty;
            }
        }
    }

    if rules.enforce_legal_moves && !legal_actions(state)?.contains(action) {
        return Err(UnoError::InvalidAction(format!("{} is not legal here", action)));
    }

    let available = drawable(state);
    if needed > available {
        return Err(UnoError::DeckExhausted { needed, available });
    }

    Ok(())
}

/// Cards that can still be drawn, counting those a reshuffle would recover.
fn drawable(state: &GameState) -> usize {
    state.draw_pile.len() + state.discard_pile.len().saturating_sub(1)
}

fn draw_cards(state: &mut GameState, count: usize, rng: &mut GameRng) -> Result<()> {
    let active = state
        .active_player
        .ok_or(UnoError::CorruptState("active player out of range"))?;

    for _ in 0..count {
        if state.draw_pile.is_empty() {
            recycle_discard_pile(state, rng)?;
        }
        let card = state.draw_pile.pop().ok_or(UnoError::DeckExhausted {
            needed: count,
            available: 0,
        })?;
        state.players[active].add_card(card);
    }

    Ok(())
}

fn recycle_discard_pile(state: &mut GameState, rng: &mut GameRng) -> Result<()> {
    if state.discard_pile.len() <= 1 {
        return Err(UnoError::DeckExhausted {
            needed: 1,
            available: 0,
        });
    }

    let top = state
        .discard_pile
        .pop()
        .ok_or(UnoError::CorruptState("empty discard pile"))?;
    let mut recycled = std::mem::take(&mut state.discard_pile);
    rng.shuffle(&mut recycled);

    warn!(cards = recycled.len(), "draw pile empty, reshuffling discard pile");

    recycled.append(&mut state.draw_pile);
    state.draw_pile = recycled;
    state.discard_pile.push(top);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, CardColor, WildKind};
    use crate::player::PlayerState;
    use crate::state::Direction;

    fn state_with(top: Card, hands: Vec<Vec<Card>>) -> GameState {
        GameState {
            draw_pile: vec![Card::Number(CardColor::Yellow, 0); 10],
            discard_pile: vec![top],
            players: hands
                .into_iter()
                .enumerate()
                .map(|(i, hand)| PlayerState::new(format!("Player {}", i + 1), hand))
                .collect(),
            player_count: None,
            phase: GamePhase::Running,
            active_player: Some(0),
            direction: Some(Direction::Clockwise),
            active_color: top.color(),
            pending_draw: Some(0),
            has_drawn: false,
            top_spent: false,
        }
    }

    fn filler(count: usize) -> Vec<Card> {
        vec![Card::Number(CardColor::Blue, 8); count]
    }

    #[test]
    fn play_moves_card_to_discard() {
        let red_5 = Card::Number(CardColor::Red, 5);
        let mut hand = filler(3);
        hand.push(red_5);
        let mut state = state_with(Card::Number(CardColor::Red, 1), vec![hand, filler(3), filler(3)]);

        apply_action(
            &mut state,
            &Action::play(red_5, CardColor::Red),
            &Rules::default(),
            &mut GameRng::new(0),
        )
        .unwrap();

        assert_eq!(state.top_card(), Some(&red_5));
        assert_eq!(state.players[0].cards_count(), 3);
        assert_eq!(state.active_player, Some(1));
        assert_eq!(state.players[0].last_action, Some(Action::play(red_5, CardColor::Red)));
    }

    #[test]
    fn skip_moves_two_seats() {
        let skip = Card::Symbol(CardColor::Red, Symbol::Skip);
        let mut hand = filler(2);
        hand.push(skip);
        let mut state = state_with(Card::Number(CardColor::Red, 1), vec![filler(3), filler(3), filler(3), hand]);
        state.active_player = Some(3);

        apply_action(
            &mut state,
            &Action::play(skip, CardColor::Red),
            &Rules::default(),
            &mut GameRng::new(0),
        )
        .unwrap();

        assert_eq!(state.active_player, Some(1));
    }

    #[test]
    fn reverse_flips_then_steps() {
        let reverse = Card::Symbol(CardColor::Red, Symbol::Reverse);
        let mut hand = filler(2);
        hand.push(reverse);
        let mut state = state_with(Card::Number(CardColor::Red, 1), vec![hand, filler(3), filler(3), filler(3)]);

        apply_action(
            &mut state,
            &Action::play(reverse, CardColor::Red),
            &Rules::default(),
            &mut GameRng::new(0),
        )
        .unwrap();

        assert_eq!(state.direction, Some(Direction::CounterClockwise));
        assert_eq!(state.active_player, Some(3));
    }

    #[test]
    fn wild_sets_chosen_color_and_pending() {
        let wd4 = Card::Wild(WildKind::WildDraw4);
        let mut hand = filler(2);
        hand.push(wd4);
        let mut state = state_with(Card::Number(CardColor::Red, 1), vec![hand, filler(3)]);

        apply_action(
            &mut state,
            &Action::play_imposing(wd4, CardColor::Green, 4),
            &Rules::default(),
            &mut GameRng::new(0),
        )
        .unwrap();

        assert_eq!(state.active_color, Some(CardColor::Green));
        assert_eq!(state.pending_draw, Some(4));
        assert_eq!(state.active_player, Some(1));
    }

    #[test]
    fn draw_keeps_the_turn() {
        let mut state = state_with(Card::Number(CardColor::Red, 1), vec![filler(3), filler(3)]);

        apply_action(&mut state, &Action::draw(1), &Rules::default(), &mut GameRng::new(0)).unwrap();

        assert_eq!(state.players[0].cards_count(), 4);
        assert_eq!(state.active_player, Some(0));
        assert!(state.has_drawn);
        assert_eq!(state.pending_draw, Some(0));
    }

    #[test]
    fn pass_after_draw_ends_turn() {
        let mut state = state_with(Card::Number(CardColor::Red, 1), vec![filler(3), filler(3)]);
        let rules = Rules::default();
        let mut rng = GameRng::new(0);

        let error = apply_action(&mut state, &Action::Pass, &rules, &mut rng).unwrap_err();
        assert!(matches!(error, UnoError::InvalidAction(_)));

        apply_action(&mut state, &Action::draw(1), &rules, &mut rng).unwrap();
        apply_action(&mut state, &Action::Pass, &rules, &mut rng).unwrap();

        assert_eq!(state.active_player, Some(1));
        assert!(!state.has_drawn);
        assert!(state.top_spent);
    }

    #[test]
    fn play_refreshes_spent_top() {
        let red_5 = Card::Number(CardColor::Red, 5);
        let mut state = state_with(Card::Symbol(CardColor::Red, Symbol::Draw2), vec![vec![red_5, red_5, red_5], filler(3)]);
        state.top_spent = true;

        apply_action(&mut state, &Action::play(red_5, CardColor::Red), &Rules::default(), &mut GameRng::new(0)).unwrap();

        assert_eq!(state.top_card(), Some(&red_5));
        assert!(!state.top_spent);
    }

    #[test]
    fn card_not_in_hand_is_rejected_without_change() {
        let mut state = state_with(Card::Number(CardColor::Red, 1), vec![filler(3), filler(3)]);
        let before = state.clone();

        let rules = Rules {
            enforce_legal_moves: false,
            ..Rules::default()
        };
        let error = apply_action(
            &mut state,
            &Action::play(Card::Number(CardColor::Red, 9), CardColor::Red),
            &rules,
            &mut GameRng::new(0),
        )
        .unwrap_err();

        assert!(matches!(error, UnoError::InvalidAction(_)));
        assert_eq!(state, before);
    }

    #[test]
    fn wrong_color_is_rejected() {
        let red_1 = Card::Number(CardColor::Red, 1);
        let mut state = state_with(Card::Number(CardColor::Red, 2), vec![vec![red_1, red_1, red_1], filler(3)]);
        let rules = Rules {
            enforce_legal_moves: false,
            ..Rules::default()
        };

        let error = apply_action(
            &mut state,
            &Action::play(red_1, CardColor::Blue),
            &rules,
            &mut GameRng::new(0),
        )
        .unwrap_err();
        assert!(matches!(error, UnoError::InvalidAction(_)));
    }

    #[test]
    fn illegal_move_is_rejected_when_enforced() {
        let blue_8 = Card::Number(CardColor::Blue, 8);
        let mut state = state_with(Card::Number(CardColor::Red, 1), vec![filler(3), filler(3)]);

        let error = apply_action(
            &mut state,
            &Action::play(blue_8, CardColor::Blue),
            &Rules::default(),
            &mut GameRng::new(0),
        )
        .unwrap_err();
        assert!(matches!(error, UnoError::InvalidAction(_)));
        assert_eq!(state.players[0].cards_count(), 3);
    }

    #[test]
    fn emptying_hand_finishes_game() {
        let red_5 = Card::Number(CardColor::Red, 5);
        let mut state = state_with(Card::Number(CardColor::Red, 1), vec![vec![red_5], filler(3)]);
        let rules = Rules::default();
        let mut rng = GameRng::new(0);

        apply_action(&mut state, &Action::play(red_5, CardColor::Red), &rules, &mut rng).unwrap();

        assert_eq!(state.phase, GamePhase::Finished);
        assert_eq!(state.active_player, Some(0));
        assert_eq!(state.winner(), Some(0));

        let error = apply_action(&mut state, &Action::draw(1), &rules, &mut rng).unwrap_err();
        assert_eq!(error, UnoError::GameOver);
    }

    #[test]
    fn setup_state_is_rejected() {
        let mut state = GameState::new();
        let error = apply_action(&mut state, &Action::draw(1), &Rules::default(), &mut GameRng::new(0))
            .unwrap_err();
        assert_eq!(error, UnoError::UninitializedState);
    }

    #[test]
    fn empty_draw_pile_recycles_discard() {
        let mut state = state_with(Card::Number(CardColor::Red, 1), vec![filler(3), filler(3)]);
        state.draw_pile = vec![Card::Number(CardColor::Green, 4)];
        state.discard_pile = vec![
            Card::Number(CardColor::Green, 7),
            Card::Wild(WildKind::Wild),
            Card::Number(CardColor::Red, 1),
        ];
        state.pending_draw = Some(2);
        state.discard_pile.push(Card::Symbol(CardColor::Red, Symbol::Draw2));

        apply_action(&mut state, &Action::draw(2), &Rules::default(), &mut GameRng::new(0)).unwrap();

        assert_eq!(state.players[0].cards_count(), 5);
        assert_eq!(state.discard_pile, vec![Card::Symbol(CardColor::Red, Symbol::Draw2)]);
        assert_eq!(state.draw_pile.len(), 2);
    }

    #[test]
    fn exhausted_deck_fails_without_change() {
        let mut state = state_with(Card::Number(CardColor::Red, 1), vec![filler(3), filler(3)]);
        state.draw_pile.clear();
        let before = state.clone();

        let error = apply_action(&mut state, &Action::draw(1), &Rules::default(), &mut GameRng::new(0))
            .unwrap_err();

        assert_eq!(error, UnoError::DeckExhausted { needed: 1, available: 0 });
        assert_eq!(state, before);
    }

    #[test]
    fn missed_uno_draws_penalty() {
        let red_5 = Card::Number(CardColor::Red, 5);
        let mut state = state_with(Card::Number(CardColor::Red, 1), vec![vec![red_5, red_5], filler(3)]);
        let rules = Rules::default().with_missed_uno_penalty(4);
        let mut rng = GameRng::new(0);

        apply_action(&mut state, &Action::play(red_5, CardColor::Red), &rules, &mut rng).unwrap();
        assert_eq!(state.players[0].cards_count(), 5);

        let mut state = state_with(Card::Number(CardColor::Red, 1), vec![vec![red_5, red_5], filler(3)]);
        apply_action(
            &mut state,
            &Action::play(red_5, CardColor::Red).with_uno(),
            &rules,
            &mut rng,
        )
        .unwrap();
        assert_eq!(state.players[0].cards_count(), 1);
    }
}
