use anyhow::{anyhow, bail};
use rand::RngCore;
use serde::de::Visitor;
use serde_with::{DeserializeAs, DeserializeFromStr, SerializeDisplay};
use std::{fmt::Display, str::FromStr};

/// A currency - some type of money.
#[derive(SerializeDisplay, DeserializeFromStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    INR,
}

impl Currency {
    /// Given a price with a currency symbol and an amount, try to extract a [`Currency`] from the symbol.
    pub fn from_price<S: AsRef<str>>(s: S) -> Option<Self> {
        s.as_ref()
            .split(|c: char| c.is_whitespace() || c.is_numeric() || c == ',' || c == '.')
            .find_map(|s| {
                (!s.is_empty())
                    .then(|| Self::from_abbreviation(s))
                    .flatten()
            })
    }

    /// Given an abbreviation/symbol, try to return the corresponding [`Currency`].
    /// Only considers alphabetic characters - `₹` is filtered out, for example.
    pub fn from_abbreviation<S: AsRef<str>>(s: S) -> Option<Self> {
        match s
            .as_ref()
            .chars()
            .flat_map(char::to_lowercase)
            .filter(|c| c.is_alphabetic())
            .collect::<String>()
            .as_str()
        {
            "" | "rs" | "inr" => Some(Self::INR),
            _ => None,
        }
    }

    /// How many of the smallest unit make up one whole unit (paise per rupee).
    pub fn minor_units(&self) -> u32 {
        match self {
            Self::INR => 100,
        }
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_abbreviation(s) {
            Some(thing) => Ok(thing),
            None => bail!("no such abbreviation"),
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::INR => "INR",
            }
        )
    }
}

/// Convert something like "₹1,200.50" to 1200.5
///
/// A leading currency symbol, whitespace and thousands separators are dropped and
/// whatever is left must be a plain non-negative decimal.
///
/// ## Example
/// ```txt
/// "₹312.03"   -> 312.03
/// "Rs. 312"   -> 312.0
/// "1,200"     -> 1200.0
/// "312.009"   -> 312.009
/// "-50"       -> None
/// "12abc5"    -> None
/// ```
pub(crate) fn parse_rupees<T: AsRef<str>>(s: T) -> Option<f64> {
    let lower = s.as_ref().trim().to_ascii_lowercase();
    let rest = ["₹", "rs.", "rs", "inr"]
        .iter()
        .find_map(|symbol| lower.strip_prefix(*symbol))
        .unwrap_or(lower.as_str());
    let digits = rest
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect::<String>();
    if !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    digits.parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Currency ([`Currency`]), and some amount of it ([`f64`]).
/// Money with no recognisable [`Currency`] is assumed to be INR.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Money(Currency, f64);

impl Money {
    pub fn new(currency: Currency, amount: f64) -> Self {
        Self(currency, amount)
    }

    pub fn currency(&self) -> Currency {
        self.0
    }

    pub fn amount(&self) -> f64 {
        self.1
    }

    /// The amount in the currency's smallest unit, rounded to the nearest whole unit.
    pub fn in_minor_units(&self) -> u64 {
        (self.1 * f64::from(self.0.minor_units())).round().max(0.0) as u64
    }
}

impl FromStr for Money {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cur = Currency::from_price(s).unwrap_or(Currency::INR);
        let price = parse_rupees(s).ok_or_else(|| anyhow!("failed to find price in `{}`", s))?;
        Ok(Self(cur, price))
    }
}

/// Read a price stored as text, the same way the share-food form reads it.
/// Anything [`parse_rupees`] rejects (including `"NaN"` and `"inf"`) is an error.
pub struct Rupees;

impl<'de> DeserializeAs<'de, f64> for Rupees {
    fn deserialize_as<D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct Helper;

        impl<'de> Visitor<'de> for Helper {
            type Value = f64;

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                parse_rupees(v).ok_or_else(|| E::custom(format!("not a price: `{}`", v)))
            }

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a price like \"₹1,200.50\"")
            }
        }

        deserializer.deserialize_str(Helper)
    }
}

/// A wrapped [`reqwest::Client`].
pub struct Client(pub reqwest::Client);

impl Client {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self(
            reqwest::Client::builder()
                .user_agent(concat!("foodshare/", env!("CARGO_PKG_VERSION")))
                .build()?,
        ))
    }
}

/// A random document id, like the ones the backend hands out: `prefix_` followed by 20 hex chars.
pub fn random_id(prefix: &str) -> String {
    let mut bytes = [0u8; 10];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("{}_{}", prefix, hex::encode(bytes))
}

/// `true` when the string is empty or only whitespace.
pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
