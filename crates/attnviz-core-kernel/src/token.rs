use anyhow::bail;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Number of tokens the visualizer knows about.
pub const TOKEN_COUNT: usize = 3;

/// One of the fixed identifiers in the toy sequence.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize)]
pub enum Token {
    A,
    B,
    C,
}

impl Token {
    pub const ALL: [Token; TOKEN_COUNT] = [Token::A, Token::B, Token::C];

    #[inline(always)]
    pub const fn index(self) -> usize {
        match self {
            Token::A => 0,
            Token::B => 1,
            Token::C => 2,
        }
    }

    /// Token sitting at `idx` in the canonical A, B, C table.
    /// Anything past the table is not a token.
    pub fn from_index(idx: usize) -> Option<Token> {
        Self::ALL.get(idx).copied()
    }

    pub const fn label(self) -> &'static str {
        match self {
            Token::A => "A",
            Token::B => "B",
            Token::C => "C",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Token {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Token::A),
            "B" | "b" => Ok(Token::B),
            "C" | "c" => Ok(Token::C),
            other => bail!("unknown token '{}', expected one of A, B, C", other),
        }
    }
}

/// Integer weight per token. Every token always has an entry.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
pub struct TokenValues {
    #[serde(rename = "A")]
    a: i64,
    #[serde(rename = "B")]
    b: i64,
    #[serde(rename = "C")]
    c: i64,
}

impl Default for TokenValues {
    fn default() -> Self {
        Self { a: 1, b: 2, c: 3 }
    }
}

impl TokenValues {
    pub const fn new(a: i64, b: i64, c: i64) -> Self {
        Self { a, b, c }
    }

    /// Build a table from whatever pairs are supplied. Tokens that never
    /// show up stay at 0; later pairs overwrite earlier ones.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Token, i64)>,
    {
        let mut values = Self::new(0, 0, 0);
        for (token, value) in pairs {
            values.set(token, value);
        }
        values
    }

    #[inline(always)]
    pub fn get(&self, token: Token) -> i64 {
        match token {
            Token::A => self.a,
            Token::B => self.b,
            Token::C => self.c,
        }
    }

    pub fn set(&mut self, token: Token, value: i64) {
        match token {
            Token::A => self.a = value,
            Token::B => self.b = value,
            Token::C => self.c = value,
        }
    }

    /// Value for a raw token index; indices outside the table resolve to 0.
    #[inline(always)]
    pub fn value_at(&self, idx: usize) -> i64 {
        Token::from_index(idx).map_or(0, |t| self.get(t))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Token, i64)> + '_ {
        Token::ALL.iter().map(move |&t| (t, self.get(t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let v = TokenValues::default();
        assert_eq!(v.get(Token::A), 1);
        assert_eq!(v.get(Token::B), 2);
        assert_eq!(v.get(Token::C), 3);
    }

    #[test]
    fn test_missing_pairs_are_zero() {
        let v = TokenValues::from_pairs([(Token::B, 7)]);
        assert_eq!(v.get(Token::A), 0);
        assert_eq!(v.get(Token::B), 7);
        assert_eq!(v.get(Token::C), 0);
    }

    #[test]
    fn test_value_at_out_of_table() {
        let v = TokenValues::default();
        assert_eq!(v.value_at(2), 3);
        assert_eq!(v.value_at(3), 0);
        assert_eq!(v.value_at(usize::MAX), 0);
    }

    #[test]
    fn test_token_parse() {
        assert_eq!("a".parse::<Token>().unwrap(), Token::A);
        assert_eq!(" C ".parse::<Token>().unwrap(), Token::C);
        assert!("D".parse::<Token>().is_err());
    }
}
