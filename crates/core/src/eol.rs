//! Line-ending detection and conversion
//!
//! Pure functions that work out which end-of-line convention a text uses and
//! rewrite every line break in a text to a single convention. The set of
//! conventions is fixed; each one carries a stable numeric id so a selection
//! can round-trip through an HTML form.

use serde::Serialize;
use std::str::FromStr;

/// Error type for line-ending operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid line ending identifier: {0:?}")]
    InvalidIdentifier(String),
}

/// A line terminator convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\r\n` (Windows)
    Crlf,
    /// `\n` (Unix)
    Lf,
    /// `\r` (classic Mac OS)
    Cr,
}

/// Every supported convention, in display order.
pub const REGISTRY: [LineEnding; 3] = [LineEnding::Crlf, LineEnding::Lf, LineEnding::Cr];

impl LineEnding {
    /// Stable numeric id used in forms. These values must never be renumbered.
    pub const fn id(self) -> u8 {
        match self {
            LineEnding::Crlf => 0,
            LineEnding::Lf => 1,
            LineEnding::Cr => 2,
        }
    }

    /// The terminator sequence itself.
    pub const fn as_str(self) -> &'static str {
        match self {
            LineEnding::Crlf => "\r\n",
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
        }
    }

    /// Human-readable label
    pub const fn description(self) -> &'static str {
        match self {
            LineEnding::Crlf => "Windows (CRLF)",
            LineEnding::Lf => "Unix (LF)",
            LineEnding::Cr => "Classic Mac (CR)",
        }
    }

    /// Resolve a numeric id against the registry.
    pub fn from_id(id: i64) -> Result<Self, Error> {
        REGISTRY
            .into_iter()
            .find(|ending| i64::from(ending.id()) == id)
            .ok_or_else(|| Error::InvalidIdentifier(id.to_string()))
    }

    /// Rewrite every line break in `text` to this convention.
    ///
    /// `\r\n`, `\n` and `\r` each count as one break; `\r\n` is matched first so
    /// it is never split into two breaks. Everything between breaks is copied
    /// through untouched.
    pub fn apply(self, text: &str) -> String {
        let terminator = self.as_str();
        let mut output = String::with_capacity(text.len());
        let mut copied = 0;

        for (start, found) in breaks(text) {
            output.push_str(&text[copied..start]);
            output.push_str(terminator);
            copied = start + found.as_str().len();
        }

        output.push_str(&text[copied..]);
        output
    }
}

impl std::fmt::Display for LineEnding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Parses a decimal id as submitted by a form field.
impl FromStr for LineEnding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map_err(|_| Error::InvalidIdentifier(s.to_string()))
            .and_then(LineEnding::from_id)
    }
}

/// Registry entry as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    pub id: u8,
    pub description: &'static str,
}

/// List every convention with its id and label, in display order.
pub fn describe_all() -> Vec<Description> {
    REGISTRY
        .into_iter()
        .map(|ending| Description {
            id: ending.id(),
            description: ending.description(),
        })
        .collect()
}

/// Number of breaks of each kind found in a text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub crlf: usize,
    pub lf: usize,
    pub cr: usize,
}

impl Counts {
    pub fn get(&self, ending: LineEnding) -> usize {
        match ending {
            LineEnding::Crlf => self.crlf,
            LineEnding::Lf => self.lf,
            LineEnding::Cr => self.cr,
        }
    }

    pub fn total(&self) -> usize {
        self.crlf + self.lf + self.cr
    }
}

/// Count the line breaks in `text` by kind.
pub fn count(text: &str) -> Counts {
    breaks(text).fold(Counts::default(), |mut counts, (_, ending)| {
        match ending {
            LineEnding::Crlf => counts.crlf += 1,
            LineEnding::Lf => counts.lf += 1,
            LineEnding::Cr => counts.cr += 1,
        }
        counts
    })
}

/// Detect the dominant convention in `text`.
///
/// Returns `None` when the text has no line breaks or when two conventions
/// share the highest count.
pub fn detect(text: &str) -> Option<LineEnding> {
    let counts = count(text);
    let mut best: Option<(LineEnding, usize)> = None;
    let mut tied = false;

    for ending in REGISTRY {
        let n = counts.get(ending);
        if n == 0 {
            continue;
        }
        match best {
            Some((_, top)) if n < top => {}
            Some((_, top)) if n == top => tied = true,
            _ => {
                best = Some((ending, n));
                tied = false;
            }
        }
    }

    if tied {
        None
    } else {
        best.map(|(ending, _)| ending)
    }
}

/// Like [`detect`], falling back to `default` when the answer is ambiguous.
pub fn detect_with_default(text: &str, default: LineEnding) -> LineEnding {
    detect(text).unwrap_or(default)
}

/// Rewrite every line break in `text` to the convention with id `target_id`.
///
/// Fails only when `target_id` is not registered; the input is left as is and
/// the caller decides what to do with it.
pub fn convert(text: &str, target_id: i64) -> Result<String, Error> {
    Ok(LineEnding::from_id(target_id)?.apply(text))
}

fn breaks(text: &str) -> Breaks<'_> {
    Breaks {
        bytes: text.as_bytes(),
        pos: 0,
    }
}

/// Iterator over `(byte offset, kind)` of each line break, longest match first.
struct Breaks<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Iterator for Breaks<'_> {
    type Item = (usize, LineEnding);

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.bytes[self.pos..]
            .iter()
            .position(|b| matches!(b, b'\r' | b'\n'))?;
        let start = self.pos + offset;

        let ending = match (self.bytes[start], self.bytes.get(start + 1)) {
            (b'\r', Some(b'\n')) => LineEnding::Crlf,
            (b'\r', _) => LineEnding::Cr,
            _ => LineEnding::Lf,
        };

        self.pos = start + ending.as_str().len();
        Some((start, ending))
    }
}
