use derive_more::Display;
use fnv::FnvHasher;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use std::hash::Hasher;

/// Seed for the grid's random heights and slopes. Two grids generated from
/// the same seed and grid config are identical, on any platform.
///
/// In a config file, a seed is either a non-negative integer or any text.
/// Text that parses as a `u64` means that integer, so `"42"` and `42` make
/// the same grid. A seed always serializes back out as text, since TOML
/// can't hold a `u64` above `i64::MAX`.
#[derive(Clone, Debug, Display, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SeedInput", into = "String")]
pub enum Seed {
    Int(u64),
    Text(String),
}

impl Seed {
    /// The number the grid RNG starts from. Text is hashed with 64-bit
    /// FNV-1a over its UTF-8 bytes.
    pub fn to_u64(&self) -> u64 {
        match self {
            Self::Int(seed) => *seed,
            Self::Text(text) => {
                let mut hasher = FnvHasher::default();
                hasher.write(text.as_bytes());
                hasher.finish()
            }
        }
    }

    /// A fresh RNG for generating a grid. Tiles draw from it in row-major
    /// order.
    pub fn rng(&self) -> Pcg64 {
        Pcg64::seed_from_u64(self.to_u64())
    }
}

impl Default for Seed {
    /// A random seed, so every default grid is different
    fn default() -> Self {
        Self::Int(rand::random())
    }
}

impl From<u64> for Seed {
    fn from(seed: u64) -> Self {
        Self::Int(seed)
    }
}

impl From<&str> for Seed {
    fn from(seed: &str) -> Self {
        match seed.parse() {
            Ok(seed) => Self::Int(seed),
            Err(_) => Self::Text(seed.into()),
        }
    }
}

impl From<Seed> for String {
    fn from(seed: Seed) -> Self {
        seed.to_string()
    }
}

/// The shapes a seed can take in a config file
#[derive(Deserialize)]
#[serde(untagged)]
enum SeedInput {
    Int(u64),
    Text(String),
}

impl From<SeedInput> for Seed {
    fn from(input: SeedInput) -> Self {
        match input {
            SeedInput::Int(seed) => Self::Int(seed),
            SeedInput::Text(text) => text.as_str().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use serde_test::{
        assert_de_tokens, assert_de_tokens_error, assert_ser_tokens, Token,
    };

    #[test]
    fn test_from_str() {
        assert_eq!(Seed::from("42"), Seed::Int(42));
        assert_eq!(Seed::from("18446744073709551615"), Seed::Int(u64::MAX));
        // Too big for a u64, so it stays text
        assert_eq!(
            Seed::from("18446744073709551616"),
            Seed::Text("18446744073709551616".into())
        );
        assert_eq!(Seed::from("-1"), Seed::Text("-1".into()));
    }

    #[test]
    fn test_to_u64() {
        assert_eq!(Seed::Int(42).to_u64(), 42);
        assert_eq!(Seed::Text("-1".into()).to_u64(), 562962081143836971);
        assert_eq!(
            Seed::Text("isometric".into()).to_u64(),
            10387765534253358122
        );
        assert_eq!(Seed::Text("castle".into()).to_u64(), 15680336857966158073);
    }

    #[test]
    fn test_rng() {
        let draw = |seed: &Seed| seed.rng().gen::<u64>();
        assert_eq!(draw(&"castle".into()), draw(&"castle".into()));
        assert_ne!(draw(&"castle".into()), draw(&"meadow".into()));
        assert_eq!(draw(&42.into()), draw(&"42".into()));
    }

    #[test]
    fn test_serialize() {
        assert_ser_tokens(&Seed::Int(42), &[Token::Str("42")]);
        assert_ser_tokens(
            &Seed::Int(u64::MAX),
            &[Token::Str("18446744073709551615")],
        );
        assert_ser_tokens(
            &Seed::Text("castle".into()),
            &[Token::Str("castle")],
        );
    }

    #[test]
    fn test_deserialize() {
        assert_de_tokens(&Seed::Int(42), &[Token::U8(42)]);
        assert_de_tokens(&Seed::Int(42), &[Token::I64(42)]);
        assert_de_tokens(&Seed::Int(42), &[Token::Str("42")]);
        assert_de_tokens(&Seed::Text("castle".into()), &[Token::Str("castle")]);

        for token in &[Token::I32(-3), Token::F64(1.5), Token::Bool(true)] {
            assert_de_tokens_error::<Seed>(
                &[*token],
                "data did not match any variant of untagged enum SeedInput",
            );
        }
    }
}
