use std::sync::OnceLock;

use strum::IntoEnumIterator;

use crate::{
    card::{Card, CardColor, Symbol, WildKind},
    constants::*,
    rng::GameRng,
};

static TEMPLATE: OnceLock<Vec<Card>> = OnceLock::new();

/// The canonical 108-card deck, built on first use and never mutated.
pub fn template() -> &'static [Card] {
    TEMPLATE.get_or_init(build_template)
}

fn build_template() -> Vec<Card> {
    let mut cards = Vec::with_capacity(TOTAL_CARDS_IN_DECK.into());

    for color in CardColor::iter() {
        // Number Cards
        for number in NUMBER_CARDS_PER_COLOR {
            cards.push(Card::Number(color, *number));
        }

        // Skip Cards
        for _ in 0..SKIP_CARDS_PER_COLOR {
            cards.push(Card::Symbol(color, Symbol::Skip));
        }

        // Reverse Cards
        for _ in 0..REVERSE_CARDS_PER_COLOR {
            cards.push(Card::Symbol(color, Symbol::Reverse));
        }

        // Draw Two Cards
        for _ in 0..DRAW2_CARDS_PER_COLOR {
            cards.push(Card::Symbol(color, Symbol::Draw2));
        }
    }

    for _ in 0..WILD_CARDS_IN_DECK {
        cards.push(Card::Wild(WildKind::Wild));
    }

    for _ in 0..WILD_DRAW4_CARDS_IN_DECK {
        cards.push(Card::Wild(WildKind::WildDraw4));
    }

    cards
}

/// A pile of cards drawn from the top (the end of the vector).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck(pub(crate) Vec<Card>);

impl Deck {
    /// A fresh, unshuffled copy of the template.
    pub fn new() -> Self {
        Self(template().to_vec())
    }

    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut deck = Self::new();
        deck.shuffle(rng);
        deck
    }

    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.0);
    }

    pub fn draw_card(&mut self) -> Option<Card> {
        self.0.pop()
    }

    pub fn cards_count(&self) -> usize {
        self.0.len()
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.0
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
