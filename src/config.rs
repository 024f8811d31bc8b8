//! Stripe country configuration for the adjacent payout/pricing helpers.
//!
//! Unlike the availability pipeline, lookups here fail loudly: an unknown
//! country code is a configuration error in the caller, not an expected
//! run-time state.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripeCountry {
    /// ISO 3166-1 alpha-2 code.
    pub code: &'static str,
    /// Settlement currency Stripe uses for accounts in this country.
    pub currency: &'static str,
}

pub const STRIPE_COUNTRIES: &[StripeCountry] = &[
    StripeCountry { code: "AU", currency: "AUD" },
    StripeCountry { code: "AT", currency: "EUR" },
    StripeCountry { code: "BE", currency: "EUR" },
    StripeCountry { code: "BG", currency: "BGN" },
    StripeCountry { code: "CA", currency: "CAD" },
    StripeCountry { code: "CH", currency: "CHF" },
    StripeCountry { code: "CY", currency: "EUR" },
    StripeCountry { code: "CZ", currency: "CZK" },
    StripeCountry { code: "DE", currency: "EUR" },
    StripeCountry { code: "DK", currency: "DKK" },
    StripeCountry { code: "EE", currency: "EUR" },
    StripeCountry { code: "ES", currency: "EUR" },
    StripeCountry { code: "FI", currency: "EUR" },
    StripeCountry { code: "FR", currency: "EUR" },
    StripeCountry { code: "GB", currency: "GBP" },
    StripeCountry { code: "GR", currency: "EUR" },
    StripeCountry { code: "HK", currency: "HKD" },
    StripeCountry { code: "IE", currency: "EUR" },
    StripeCountry { code: "IT", currency: "EUR" },
    StripeCountry { code: "JP", currency: "JPY" },
    StripeCountry { code: "LT", currency: "EUR" },
    StripeCountry { code: "LU", currency: "EUR" },
    StripeCountry { code: "LV", currency: "EUR" },
    StripeCountry { code: "MT", currency: "EUR" },
    StripeCountry { code: "MX", currency: "MXN" },
    StripeCountry { code: "NL", currency: "EUR" },
    StripeCountry { code: "NO", currency: "NOK" },
    StripeCountry { code: "NZ", currency: "NZD" },
    StripeCountry { code: "PL", currency: "PLN" },
    StripeCountry { code: "PT", currency: "EUR" },
    StripeCountry { code: "RO", currency: "RON" },
    StripeCountry { code: "SE", currency: "SEK" },
    StripeCountry { code: "SG", currency: "SGD" },
    StripeCountry { code: "SI", currency: "EUR" },
    StripeCountry { code: "SK", currency: "EUR" },
    StripeCountry { code: "US", currency: "USD" },
];

#[derive(Debug)]
pub enum ConfigError {
    UnknownCountry(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::UnknownCountry(code) => {
                write!(f, "country code not found in Stripe configuration: {code}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Look up the Stripe configuration for a country code (case-insensitive).
pub fn stripe_country(code: &str) -> Result<&'static StripeCountry, ConfigError> {
    STRIPE_COUNTRIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code))
        .ok_or_else(|| ConfigError::UnknownCountry(code.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_country_resolves() {
        assert_eq!(stripe_country("US").unwrap().currency, "USD");
        assert_eq!(stripe_country("fi").unwrap().currency, "EUR");
    }

    #[test]
    fn unknown_country_is_an_error() {
        let err = stripe_country("ZZ").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownCountry(_)));
        assert!(err.to_string().contains("ZZ"));
    }
}
