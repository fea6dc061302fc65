//! World game rule set.

use bytestream::ByteStream;

use crate::error::{DecodeError, DecodeResult};

const RULE_TYPE_BOOL: u32 = 1;
const RULE_TYPE_INT: u32 = 2;
const RULE_TYPE_FLOAT: u32 = 3;

/// A single typed rule value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameRuleValue {
    Bool(bool),
    Int(u32),
    Float(f32),
}

impl GameRuleValue {
    const fn type_tag(self) -> u32 {
        match self {
            Self::Bool(_) => RULE_TYPE_BOOL,
            Self::Int(_) => RULE_TYPE_INT,
            Self::Float(_) => RULE_TYPE_FLOAT,
        }
    }
}

/// Named rules in insertion order. Names are case-insensitive and held
/// lowercase.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameRules {
    rules: Vec<(String, GameRuleValue)>,
}

impl GameRules {
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Sets a rule, replacing any existing value under the same name.
    pub fn set(&mut self, name: &str, value: GameRuleValue) {
        let name = name.to_lowercase();
        if let Some(entry) = self.rules.iter_mut().find(|(key, _)| *key == name) {
            entry.1 = value;
        } else {
            self.rules.push((name, value));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<GameRuleValue> {
        let name = name.to_lowercase();
        self.rules
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, GameRuleValue)> {
        self.rules.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

/// Writes the rule set, one typed entry per rule.
pub fn encode_game_rules(stream: &mut ByteStream, rules: &GameRules) {
    stream.write_var_u32(rules.len() as u32);
    for (name, value) in rules.iter() {
        stream.write_string(name);
        stream.write_var_u32(value.type_tag());
        match value {
            GameRuleValue::Bool(flag) => stream.write_bool(flag),
            GameRuleValue::Int(number) => stream.write_var_u32(number),
            GameRuleValue::Float(number) => stream.write_f32_le(number),
        }
    }
}

/// Reads a rule set. A type tag outside 1..=3 is rejected rather than
/// skipped, since its payload width is unknowable and every later byte
/// would be misread.
pub fn decode_game_rules(stream: &mut ByteStream) -> DecodeResult<GameRules> {
    let count = stream.read_var_u32()?;
    let mut rules = GameRules::new();
    for _ in 0..count {
        let name = stream.read_string()?;
        let tag = stream.read_var_u32()?;
        let value = match tag {
            RULE_TYPE_BOOL => GameRuleValue::Bool(stream.read_bool()?),
            RULE_TYPE_INT => GameRuleValue::Int(stream.read_var_u32()?),
            RULE_TYPE_FLOAT => GameRuleValue::Float(stream.read_f32_le()?),
            _ => return Err(DecodeError::UnknownRuleType { tag }),
        };
        rules.set(&name, value);
    }
    Ok(rules)
}
