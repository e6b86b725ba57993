use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// All currencies accepted by the store API
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Ton,
    Btc,
    Usdt,
    Eur,
    Usd,
    Rub,
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurrencyCode::Ton => write!(f, "TON"),
            CurrencyCode::Btc => write!(f, "BTC"),
            CurrencyCode::Usdt => write!(f, "USDT"),
            CurrencyCode::Eur => write!(f, "EUR"),
            CurrencyCode::Usd => write!(f, "USD"),
            CurrencyCode::Rub => write!(f, "RUB"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown currency code: {0}")]
pub struct UnknownCurrency(pub String);

impl std::str::FromStr for CurrencyCode {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TON" => Ok(CurrencyCode::Ton),
            "BTC" => Ok(CurrencyCode::Btc),
            "USDT" => Ok(CurrencyCode::Usdt),
            "EUR" => Ok(CurrencyCode::Eur),
            "USD" => Ok(CurrencyCode::Usd),
            "RUB" => Ok(CurrencyCode::Rub),
            _ => Err(UnknownCurrency(s.to_string())),
        }
    }
}

/// An amount of money in a given currency.
///
/// `amount` is the gateway's big-decimal string (e.g. `"30.45"`) and is
/// carried verbatim. It is never converted to a float.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyAmount {
    pub currency_code: CurrencyCode,
    pub amount: String,
}

impl MoneyAmount {
    pub fn new(currency_code: CurrencyCode, amount: impl Into<String>) -> Self {
        Self {
            currency_code,
            amount: amount.into(),
        }
    }
}

impl std::fmt::Display for MoneyAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency_code)
    }
}
