use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::card::Card;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub hand: Vec<Card>,
    pub score: u32,
    pub last_action: Option<Action>,
}

impl PlayerState {
    pub fn new(name: impl Into<String>, cards: Vec<Card>) -> Self {
        Self {
            name: name.into(),
            hand: cards,
            score: 0,
            last_action: None,
        }
    }

    pub fn cards_count(&self) -> usize {
        self.hand.len()
    }

    pub fn card_index(&self, card: &Card) -> Option<usize> {
        self.hand.iter().position(|x| x == card)
    }

    pub fn has_card(&self, card: &Card) -> bool {
        self.card_index(card).is_some()
    }

    pub fn add_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    pub fn remove_card(&mut self, index: usize) -> Card {
        self.hand.swap_remove(index)
    }
}
