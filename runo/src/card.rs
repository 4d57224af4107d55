use core::fmt;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};

#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    EnumString,
    EnumCountMacro,
    EnumIter,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum CardColor {
    Red,
    Green,
    Yellow,
    Blue,
}

#[derive(Clone, Copy, Debug, EnumIter, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Skip,
    Reverse,
    Draw2,
}

#[derive(Clone, Copy, Debug, EnumIter, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WildKind {
    Wild,
    WildDraw4,
}

/// A single UNO card.
///
/// Wild cards have no color of their own; the color is committed by the
/// [`Action::Play`](crate::action::Action::Play) that puts them on the pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    Number(CardColor, u8),
    Symbol(CardColor, Symbol),
    Wild(WildKind),
}

impl Card {
    pub fn color(&self) -> Option<CardColor> {
        match self {
            Card::Number(color, _) | Card::Symbol(color, _) => Some(*color),
            Card::Wild(_) => None,
        }
    }

    pub fn number(&self) -> Option<u8> {
        match self {
            Card::Number(_, number) => Some(*number),
            _ => None,
        }
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Card::Symbol(_, symbol) => Some(*symbol),
            _ => None,
        }
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, Card::Wild(_))
    }

    pub fn is_wild_draw4(&self) -> bool {
        matches!(self, Card::Wild(WildKind::WildDraw4))
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Skip => write!(f, "Skip"),
            Symbol::Reverse => write!(f, "Reverse"),
            Symbol::Draw2 => write!(f, "Draw Two"),
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Number(color, number) => write!(f, "{} {}", color, number),
            Card::Symbol(color, symbol) => write!(f, "{} {}", color, symbol),
            Card::Wild(WildKind::Wild) => write!(f, "Wild"),
            Card::Wild(WildKind::WildDraw4) => write!(f, "Wild Draw Four"),
        }
    }
}
