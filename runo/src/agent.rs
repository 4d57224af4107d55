use crate::action::{Action, ActionSet};
use crate::rng::GameRng;
use crate::view::PlayerView;

/// Something that picks a move for a player.
///
/// Agents only ever see a [`PlayerView`]; the returned action must be one of
/// `actions`.
pub trait PlayerAgent {
    fn select_action(&mut self, view: &PlayerView, actions: &ActionSet) -> Action;
}

/// Picks uniformly among the legal actions.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl PlayerAgent for RandomAgent {
    fn select_action(&mut self, view: &PlayerView, actions: &ActionSet) -> Action {
        let candidates: Vec<Action> = actions.iter().copied().collect();
        let Some(action) = self.rng.choose(&candidates).copied() else {
            return Action::Pass;
        };

        // Going down to one card: always say it.
        if view.hand().len() == 2 && action.is_play() {
            let declared = action.with_uno();
            if actions.contains(&declared) {
                return declared;
            }
        }

        action
    }
}
