//! The closed set of reel symbols.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    Cherry,
    Lemon,
    Bell,
    Watermelon,
    Star,
    Seven,
}

impl Symbol {
    /// Every symbol, in canonical table order.
    pub const ALL: [Symbol; 6] = [
        Symbol::Cherry,
        Symbol::Lemon,
        Symbol::Bell,
        Symbol::Watermelon,
        Symbol::Star,
        Symbol::Seven,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Cherry     => "Cherry",
            Self::Lemon      => "Lemon",
            Self::Bell       => "Bell",
            Self::Watermelon => "Watermelon",
            Self::Star       => "Star",
            Self::Seven      => "Seven",
        }
    }

    /// Glyph drawn by text-based presentation surfaces.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Cherry     => "🍒",
            Self::Lemon      => "🍋",
            Self::Bell       => "🔔",
            Self::Watermelon => "🍉",
            Self::Star       => "⭐",
            Self::Seven      => "7️⃣",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
