//! Compiled template representation

/// A compiled message: the parsed node sequence for one message string
pub type Message = Vec<Node>;

/// One node of a compiled message
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text
    Literal(String),
    /// Plain `{name}` interpolation
    Argument(String),
    /// `#` inside a plural arm: the formatted count
    Pound,
    /// `{arg, plural, ...}` or `{arg, selectordinal, ...}`
    Plural(PluralNode),
    /// `{arg, select, ...}`
    Select(SelectNode),
    /// `{arg, number}` with optional style
    Number { arg: String, style: NumberStyle },
    /// `{arg, date}` with a named preset
    Date { arg: String, preset: DateTimePreset },
    /// `{arg, time}` with a named preset
    Time { arg: String, preset: DateTimePreset },
}

/// A plural or ordinal argument with exact-match and category arms
#[derive(Debug, Clone, PartialEq)]
pub struct PluralNode {
    pub arg: String,
    /// true for `selectordinal`, false for `plural`
    pub ordinal: bool,
    /// `=N` arms, matched before any category arm
    pub exact: Vec<(i64, Message)>,
    /// Category arms (`zero`, `one`, `two`, `few`, `many`, `other`)
    pub arms: Vec<(String, Message)>,
}

impl PluralNode {
    /// Find the arm for a CLDR category name
    pub fn arm_for(&self, category: &str) -> Option<&Message> {
        self.arms
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, message)| message)
    }

    /// Find the exact arm for an integral value
    pub fn exact_for(&self, value: i64) -> Option<&Message> {
        self.exact
            .iter()
            .find(|(number, _)| *number == value)
            .map(|(_, message)| message)
    }
}

/// A select argument with arbitrary string arms
#[derive(Debug, Clone, PartialEq)]
pub struct SelectNode {
    pub arg: String,
    /// Arms including the mandatory `other`
    pub arms: Vec<(String, Message)>,
}

impl SelectNode {
    /// Find the arm matching a key, without falling back
    pub fn arm_for(&self, key: &str) -> Option<&Message> {
        self.arms
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, message)| message)
    }
}

/// Styles accepted by a `number` argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle {
    /// Locale-grouped decimal, up to three fraction digits
    Decimal,
    /// Rounded to a whole number
    Integer,
    /// Scaled by 100 and suffixed with the percent sign
    Percent,
    /// Two fraction digits and the locale's currency symbol
    Currency,
}

impl NumberStyle {
    /// Parse a style word from a message
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "integer" => Some(Self::Integer),
            "percent" => Some(Self::Percent),
            "currency" => Some(Self::Currency),
            _ => None,
        }
    }
}

/// Named presets accepted by `date` and `time` arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimePreset {
    Short,
    Medium,
    Long,
    Full,
}

impl DateTimePreset {
    /// Parse a preset word from a message
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            "full" => Some(Self::Full),
            _ => None,
        }
    }
}
