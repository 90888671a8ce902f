//! Display color tokens.
//!
//! The presenter only ever hands out one of these named tokens. Rendering code
//! decides what to do with them (RGB for the TUI, hex for JSON exports).

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorToken {
    Green,
    Emerald,
    Blue,
    Orange,
    Carrot,
    Red,
    DarkRed,
    Crimson,
    Maroon,
    Oxblood,
    /// Fallback for values the presenter does not recognise.
    Neutral,
}

impl ColorToken {
    pub fn hex(self) -> &'static str {
        match self {
            ColorToken::Green => "#27ae60",
            ColorToken::Emerald => "#2ecc71",
            ColorToken::Blue => "#3498db",
            ColorToken::Orange => "#f39c12",
            ColorToken::Carrot => "#e67e22",
            ColorToken::Red => "#e74c3c",
            ColorToken::DarkRed => "#c0392b",
            ColorToken::Crimson => "#a93226",
            ColorToken::Maroon => "#922b21",
            ColorToken::Oxblood => "#7b241c",
            ColorToken::Neutral => "#95a5a6",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        let hex = &self.hex()[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }
}

impl Serialize for ColorToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hex())
    }
}
