/// Rounds to one decimal place, based on the exact decimal value of `value` with ties to even
/// (so `0.15` becomes `0.1`, `-3.25` becomes `-3.2`). Negative zero collapses to `0.0` so it
/// never renders as `-0.0`.
pub fn round_one_decimal(value: f64) -> f64 {
    // float formatting is correctly rounded, unlike scaling by 10 and rounding
    let rounded = format!("{:.1}", value).parse::<f64>().unwrap_or(value);
    if rounded == 0.0 { 0.0 } else { rounded }
}

pub fn one_decimal(value: f64) -> String {
    format!("{:.1}", round_one_decimal(value))
}

/// Partially masked preview of a secret, safe to print in logs.
pub fn mask(secret: &str) -> String {
    const VISIBLE: usize = 4;

    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 2 * VISIBLE {
        let head: String = chars[..VISIBLE].iter().collect();
        let tail: String = chars[chars.len() - VISIBLE..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "****".to_string()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(one_decimal(15.3), "15.3");
        assert_eq!(one_decimal(18.66), "18.7");
        assert_eq!(one_decimal(45.0), "45.0");
        assert_eq!(one_decimal(7.0), "7.0");
    }

    #[test]
    fn ties_and_near_ties_follow_the_exact_decimal_value() {
        assert_eq!(round_one_decimal(-3.25), -3.2);
        assert_eq!(round_one_decimal(0.25), 0.2);
        assert_eq!(round_one_decimal(0.15), 0.1);
        assert_eq!(round_one_decimal(0.35), 0.3);
        assert_eq!(one_decimal(2.45), "2.5");
    }

    #[test]
    fn negative_zero_is_rendered_as_zero() {
        assert_eq!(one_decimal(-0.04), "0.0");
        assert_eq!(round_one_decimal(-0.01).to_string(), "0");
    }

    #[test]
    fn masks_long_secrets() {
        assert_eq!(mask("wx1234567890abcd"), "wx12...abcd");
        assert_eq!(mask("123456789"), "1234...6789");
    }

    #[test]
    fn short_secrets_are_hidden_completely() {
        assert_eq!(mask("12345678"), "****");
        assert_eq!(mask("abc"), "****");
        assert_eq!(mask(""), "****");
    }
}
