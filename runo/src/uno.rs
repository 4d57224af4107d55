use tracing::debug;

use crate::action::{Action, ActionSet};
use crate::agent::PlayerAgent;
use crate::apply::apply_action;
use crate::error::{Result, UnoError};
use crate::legal::legal_actions;
use crate::rng::GameRng;
use crate::rules::Rules;
use crate::state::{GamePhase, GameState};
use crate::view::{player_view, PlayerView};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won { player: usize },
    /// The step budget ran out before anybody emptied their hand.
    Stalled,
}

/// One game session: the state, the house rules and the randomness that
/// drives shuffles. A session has a single writer; wrap it in a mutex or an
/// actor if several callers need it.
#[derive(Debug, Clone)]
pub struct Uno {
    state: GameState,
    rules: Rules,
    rng: GameRng,
}

impl Uno {
    /// A freshly shuffled and dealt game.
    pub fn new(rules: Rules, seed: u64) -> Result<Self> {
        Self::from_state(GameState::new(), rules, seed)
    }

    pub fn with_player_names(player_names: Vec<String>, rules: Rules, seed: u64) -> Result<Self> {
        let mut state = GameState::new();
        state.player_count = Some(player_names.len());

        let mut uno = Self::from_state(state, rules, seed)?;
        for (player, name) in uno.state.players.iter_mut().zip(player_names) {
            player.name = name;
        }
        Ok(uno)
    }

    /// Adopt a snapshot, finishing its setup if it has not started yet.
    pub fn from_state(mut state: GameState, rules: Rules, seed: u64) -> Result<Self> {
        let mut rng = GameRng::new(seed);
        match state.phase {
            GamePhase::Setup => state.initialize(&rules, &mut rng)?,
            GamePhase::Running => state.validate()?,
            GamePhase::Finished => {}
        }

        Ok(Self { state, rules, rng })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Seed the session's randomness was started from.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.phase == GamePhase::Finished
    }

    pub fn legal_actions(&self) -> Result<ActionSet> {
        legal_actions(&self.state)
    }

    pub fn apply(&mut self, action: &Action) -> Result<()> {
        apply_action(&mut self.state, action, &self.rules, &mut self.rng)
    }

    pub fn player_view(&self, viewer: usize) -> Result<PlayerView> {
        player_view(&self.state, viewer)
    }

    /// Let `agent` take one decision for the active player.
    pub fn play_turn(&mut self, agent: &mut dyn PlayerAgent) -> Result<Action> {
        self.state.ensure_running()?;
        let active = self
            .state
            .active_player
            .ok_or(UnoError::CorruptState("active player out of range"))?;

        let actions = self.legal_actions()?;
        let view = self.player_view(active)?;
        let action = agent.select_action(&view, &actions);

        if !actions.contains(&action) {
            return Err(UnoError::InvalidAction(format!(
                "agent for seat {} chose {}, which is not legal",
                active, action
            )));
        }

        self.apply(&action)?;
        Ok(action)
    }

    /// Drive the game with one agent per seat until somebody wins or
    /// `max_steps` decisions have been made.
    pub fn play_to_completion(
        &mut self,
        agents: &mut [Box<dyn PlayerAgent>],
        max_steps: usize,
    ) -> Result<Outcome> {
        if agents.len() != self.state.players.len() {
            return Err(UnoError::InvalidAction(format!(
                "{} agents for {} players",
                agents.len(),
                self.state.players.len()
            )));
        }

        for _ in 0..max_steps {
            if let Some(player) = self.state.winner() {
                return Ok(Outcome::Won { player });
            }
            let active = self
                .state
                .active_player
                .ok_or(UnoError::CorruptState("active player out of range"))?;
            self.play_turn(agents[active].as_mut())?;
        }

        match self.state.winner() {
            Some(player) => Ok(Outcome::Won { player }),
            None => {
                debug!(max_steps, "step budget exhausted");
                Ok(Outcome::Stalled)
            }
        }
    }
}
