use core::fmt;
use std::fmt::Display;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::card::{Card, CardColor};

/// A move available to the active player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Draw `count` cards. The turn stays with the same player.
    Draw { count: usize },
    /// Play `card` from hand.
    ///
    /// `color` becomes the active color: the chosen color for wild cards,
    /// the card's own color otherwise. `draw_imposed` is what the next player
    /// has to draw before playing, and `uno` declares UNO on the way down to
    /// a single card.
    Play {
        card: Card,
        color: CardColor,
        draw_imposed: usize,
        uno: bool,
    },
    /// End the turn after having drawn.
    Pass,
}

/// The legal moves of a position. Iteration order depends only on the
/// insertion sequence, so seeded agents stay reproducible.
pub type ActionSet = FxHashSet<Action>;

impl Action {
    pub fn draw(count: usize) -> Self {
        Action::Draw { count }
    }

    /// A plain play of a colored card, imposing no draw.
    pub fn play(card: Card, color: CardColor) -> Self {
        Action::Play {
            card,
            color,
            draw_imposed: 0,
            uno: false,
        }
    }

    pub fn play_imposing(card: Card, color: CardColor, draw_imposed: usize) -> Self {
        Action::Play {
            card,
            color,
            draw_imposed,
            uno: false,
        }
    }

    /// The same play with the UNO declaration set.
    pub fn with_uno(self) -> Self {
        match self {
            Action::Play {
                card,
                color,
                draw_imposed,
                ..
            } => Action::Play {
                card,
                color,
                draw_imposed,
                uno: true,
            },
            other => other,
        }
    }

    pub fn card(&self) -> Option<&Card> {
        match self {
            Action::Play { card, .. } => Some(card),
            _ => None,
        }
    }

    pub fn is_play(&self) -> bool {
        matches!(self, Action::Play { .. })
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Draw { count } => write!(f, "Draw {}", count),
            Action::Play {
                card,
                color,
                draw_imposed,
                uno,
            } => {
                write!(f, "Play {}", card)?;
                if card.is_wild() {
                    write!(f, " as {}", color)?;
                }
                if *draw_imposed > 0 {
                    write!(f, " (+{})", draw_imposed)?;
                }
                if *uno {
                    write!(f, " UNO!")?;
                }
                Ok(())
            }
            Action::Pass => write!(f, "Pass"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Symbol, WildKind};

    #[test]
    fn with_uno_only_touches_plays() {
        let play = Action::play(Card::Number(CardColor::Red, 3), CardColor::Red);
        assert!(matches!(play.with_uno(), Action::Play { uno: true, .. }));
        assert_eq!(Action::draw(1).with_uno(), Action::draw(1));
        assert_eq!(Action::Pass.with_uno(), Action::Pass);
    }

    #[test]
    fn display_describes_the_move() {
        let wild = Action::play_imposing(Card::Wild(WildKind::WildDraw4), CardColor::Blue, 4);
        assert_eq!(wild.to_string(), "Play Wild Draw Four as Blue (+4)");

        let skip = Action::play(Card::Symbol(CardColor::Green, Symbol::Skip), CardColor::Green).with_uno();
        assert_eq!(skip.to_string(), "Play Green Skip UNO!");

        assert_eq!(Action::draw(2).to_string(), "Draw 2");
    }

    #[test]
    fn set_ignores_duplicates() {
        let mut actions = ActionSet::default();
        actions.insert(Action::draw(1));
        actions.insert(Action::draw(1));
        assert_eq!(actions.len(), 1);
    }
}
