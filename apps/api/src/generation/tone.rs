//! Tone selection: the stylistic parameter passed through unchanged to the backend.
//!
//! The backend contract expects the capitalised label ("Professional", ...),
//! so the serde representation and `Display` both use it verbatim.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Cover letter tone offered in the form. `Professional` is preselected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Professional,
    Confident,
    Friendly,
    Persuasive,
}

impl Tone {
    /// All tones in the order the form lists them.
    pub const ALL: [Tone; 4] = [
        Tone::Professional,
        Tone::Confident,
        Tone::Friendly,
        Tone::Persuasive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Confident => "Confident",
            Tone::Friendly => "Friendly",
            Tone::Persuasive => "Persuasive",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tone '{0}' (expected one of Professional, Confident, Friendly, Persuasive)")]
pub struct UnknownTone(pub String);

impl FromStr for Tone {
    type Err = UnknownTone;

    /// Accepts the label in any case; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Tone::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownTone(s.to_string()))
    }
}
