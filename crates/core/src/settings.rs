//! Game parameters and the settings form that collects them.

use std::fmt;

/// Validated game parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameParams {
    different_tiles: u32,
    group_size: u32,
}

/// Why a pair of parameters was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamError {
    /// Non-integer or non-positive input.
    InvalidParameter { field: ParamField, input: String },
    /// `different_tiles * group_size` reached the configured cap.
    ParameterTooLarge { total: u64, max_tiles: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
    DifferentTiles,
    GroupSize,
}

impl ParamField {
    pub fn label(&self) -> &'static str {
        match self {
            ParamField::DifferentTiles => "Number of different tiles",
            ParamField::GroupSize => "Identical tiles to cancel",
        }
    }
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::InvalidParameter { field, input } => write!(
                f,
                "{}: expected a positive integer, got {:?}",
                field.label(),
                input
            ),
            ParamError::ParameterTooLarge { total, max_tiles } => write!(
                f,
                "{} tiles is too many (limit is below {})",
                total, max_tiles
            ),
        }
    }
}

impl std::error::Error for ParamError {}

impl GameParams {
    /// Validate a parameter pair against `max_tiles`.
    pub fn new(different_tiles: u32, group_size: u32, max_tiles: u32) -> Result<Self, ParamError> {
        if different_tiles == 0 {
            return Err(ParamError::InvalidParameter {
                field: ParamField::DifferentTiles,
                input: different_tiles.to_string(),
            });
        }
        if group_size == 0 {
            return Err(ParamError::InvalidParameter {
                field: ParamField::GroupSize,
                input: group_size.to_string(),
            });
        }

        let total = u64::from(different_tiles) * u64::from(group_size);
        if total >= u64::from(max_tiles) {
            return Err(ParamError::ParameterTooLarge { total, max_tiles });
        }

        Ok(Self {
            different_tiles,
            group_size,
        })
    }

    /// Parse and validate the two text fields.
    pub fn parse(different_tiles: &str, group_size: &str, max_tiles: u32) -> Result<Self, ParamError> {
        let d = parse_positive(different_tiles, ParamField::DifferentTiles, max_tiles)?;
        let g = parse_positive(group_size, ParamField::GroupSize, max_tiles)?;
        Self::new(d, g, max_tiles)
    }

    pub fn different_tiles(&self) -> u32 {
        self.different_tiles
    }

    pub fn group_size(&self) -> u32 {
        self.group_size
    }

    pub fn total_tiles(&self) -> usize {
        (self.different_tiles as usize) * (self.group_size as usize)
    }

    /// Number of groups to clear for a win.
    pub fn total_groups(&self) -> u32 {
        self.different_tiles
    }
}

/// Surrounding whitespace is ignored; the rest must be plain ASCII digits (no sign).
fn parse_positive(text: &str, field: ParamField, max_tiles: u32) -> Result<u32, ParamError> {
    let trimmed = text.trim();
    let invalid = || ParamError::InvalidParameter {
        field,
        input: trimmed.to_string(),
    };

    // An all-digit value that does not fit in u32 is still "too large", not malformed.
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return match trimmed.parse::<u32>() {
            Ok(0) => Err(invalid()),
            Ok(v) => Ok(v),
            Err(_) => Err(ParamError::ParameterTooLarge {
                total: u64::MAX,
                max_tiles,
            }),
        };
    }

    Err(invalid())
}

/// Two-field text form for entering [`GameParams`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SettingsForm {
    different_tiles: String,
    group_size: String,
    focus: ParamField,
    max_tiles: u32,
    error: Option<ParamError>,
}

/// Field inputs are capped so a stuck key cannot grow them without bound.
const MAX_FIELD_LEN: usize = 12;

impl SettingsForm {
    pub fn new(max_tiles: u32) -> Self {
        Self {
            different_tiles: String::new(),
            group_size: String::new(),
            focus: ParamField::DifferentTiles,
            max_tiles,
            error: None,
        }
    }

    /// Pre-fill both fields (e.g. with the previous round's values).
    pub fn with_values(mut self, params: GameParams) -> Self {
        self.different_tiles = params.different_tiles.to_string();
        self.group_size = params.group_size.to_string();
        self
    }

    pub fn focus(&self) -> ParamField {
        self.focus
    }

    pub fn value(&self, field: ParamField) -> &str {
        match field {
            ParamField::DifferentTiles => &self.different_tiles,
            ParamField::GroupSize => &self.group_size,
        }
    }

    pub fn max_tiles(&self) -> u32 {
        self.max_tiles
    }

    /// Error from the last rejected submit, cleared by the next edit.
    pub fn error(&self) -> Option<&ParamError> {
        self.error.as_ref()
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            ParamField::DifferentTiles => &mut self.different_tiles,
            ParamField::GroupSize => &mut self.group_size,
        }
    }

    pub fn push_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        let field = self.focused_mut();
        if field.chars().count() < MAX_FIELD_LEN {
            field.push(ch);
        }
        self.error = None;
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
        self.error = None;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            ParamField::DifferentTiles => ParamField::GroupSize,
            ParamField::GroupSize => ParamField::DifferentTiles,
        };
    }

    /// Validate both fields. On failure only the stored error changes.
    pub fn submit(&mut self) -> Result<GameParams, ParamError> {
        let result = GameParams::parse(&self.different_tiles, &self.group_size, self.max_tiles);
        match &result {
            Ok(_) => self.error = None,
            Err(e) => {
                log::debug!("settings rejected: {}", e);
                self.error = Some(e.clone());
            }
        }
        result
    }
}
