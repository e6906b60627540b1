//! Country name to ISO 3166-1 alpha-2 mapping
//!
//! The table covers the producer regions relevant to deforestation risk:
//! Southeast Asia, South America, and Central, East and Southern Africa.
//!
//! Unmapped names fall back to their first two characters, upper-cased.
//! That fallback is wrong for many countries (e.g. "Austria" gives "AU")
//! and is kept only for compatibility with files already exported.

const COUNTRY_CODES: &[(&str, &str)] = &[
    ("Indonesia", "ID"),
    ("Malaysia", "MY"),
    ("Thailand", "TH"),
    ("Singapore", "SG"),
    ("Philippines", "PH"),
    ("Vietnam", "VN"),
    ("Myanmar", "MM"),
    ("Cambodia", "KH"),
    ("Laos", "LA"),
    ("Brunei", "BN"),
    ("Brazil", "BR"),
    ("Colombia", "CO"),
    ("Peru", "PE"),
    ("Ecuador", "EC"),
    ("Bolivia", "BO"),
    ("Venezuela", "VE"),
    ("Guyana", "GY"),
    ("Suriname", "SR"),
    ("French Guiana", "GF"),
    ("Democratic Republic of the Congo", "CD"),
    ("Central African Republic", "CF"),
    ("Cameroon", "CM"),
    ("Equatorial Guinea", "GQ"),
    ("Gabon", "GA"),
    ("Republic of the Congo", "CG"),
    ("Chad", "TD"),
    ("Sudan", "SD"),
    ("South Sudan", "SS"),
    ("Ethiopia", "ET"),
    ("Kenya", "KE"),
    ("Uganda", "UG"),
    ("Tanzania", "TZ"),
    ("Rwanda", "RW"),
    ("Burundi", "BI"),
    ("Zambia", "ZM"),
    ("Malawi", "MW"),
    ("Mozambique", "MZ"),
    ("Zimbabwe", "ZW"),
    ("Botswana", "BW"),
    ("Namibia", "NA"),
    ("South Africa", "ZA"),
    ("Lesotho", "LS"),
    ("Eswatini", "SZ"),
    ("Madagascar", "MG"),
    ("Mauritius", "MU"),
    ("Seychelles", "SC"),
    ("Comoros", "KM"),
];

/// Look up a country name in the fixed table (exact, case-sensitive)
pub fn lookup_iso2(country_name: &str) -> Option<&'static str> {
    COUNTRY_CODES
        .iter()
        .find(|(name, _)| *name == country_name)
        .map(|(_, code)| *code)
}

/// Map a country name to an ISO 3166-1 alpha-2 code
///
/// # Examples
///
/// ```
/// use whisp::domain::country::to_iso2;
///
/// assert_eq!(to_iso2("Indonesia"), "ID");
/// assert_eq!(to_iso2("Atlantis"), "AT");
/// ```
pub fn to_iso2(country_name: &str) -> String {
    match lookup_iso2(country_name) {
        Some(code) => code.to_string(),
        None => {
            let code: String = country_name.chars().take(2).collect::<String>().to_uppercase();
            tracing::debug!(
                country = %country_name,
                code = %code,
                "Country not in ISO table, using first-two-letters fallback"
            );
            code
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Indonesia", "ID")]
    #[test_case("Democratic Republic of the Congo", "CD")]
    #[test_case("Republic of the Congo", "CG")]
    #[test_case("French Guiana", "GF")]
    #[test_case("South Africa", "ZA")]
    #[test_case("Comoros", "KM")]
    fn test_table_entries(name: &str, code: &str) {
        assert_eq!(to_iso2(name), code);
    }

    #[test_case("Atlantis", "AT")]
    #[test_case("France", "FR")]
    #[test_case("Unknown", "UN")]
    #[test_case("indonesia", "IN" ; "table match is case sensitive")]
    #[test_case("x", "X")]
    #[test_case("", "")]
    #[test_case("Élan", "ÉL")]
    fn test_fallback(name: &str, code: &str) {
        assert_eq!(to_iso2(name), code);
    }

    #[test]
    fn test_table_size_and_codes() {
        assert_eq!(COUNTRY_CODES.len(), 47);
        assert!(COUNTRY_CODES
            .iter()
            .all(|(_, code)| code.len() == 2 && code.chars().all(|c| c.is_ascii_uppercase())));
    }

    #[test]
    fn test_lookup_miss() {
        assert_eq!(lookup_iso2("Atlantis"), None);
    }
}
