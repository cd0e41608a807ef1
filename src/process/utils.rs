// src/process/utils.rs

/// Trim whitespace and drop every thousands separator.
pub fn clean_number(raw: &str) -> String {
    raw.trim().chars().filter(|&c| c != ',').collect()
}

/// Round half away from zero to two decimal places after scaling
/// millions down to billions. Dividing by 10 first keeps the cents digit
/// exact for whole-million inputs.
pub fn millions_to_billions(millions: f64) -> f64 {
    (millions / 10.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_number_strips_separators() {
        assert_eq!(clean_number(" 26,854,599 "), "26854599");
        assert_eq!(clean_number("500"), "500");
        assert_eq!(clean_number("1,234.5"), "1234.5");
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(millions_to_billions(1234.0), 1.23);
        assert_eq!(millions_to_billions(1235.0), 1.24);
        assert_eq!(millions_to_billions(1245.0), 1.25);
        assert_eq!(millions_to_billions(500.0), 0.5);
        assert_eq!(millions_to_billions(26_854_599.0), 26854.6);
        assert_eq!(millions_to_billions(0.0), 0.0);
    }
}
