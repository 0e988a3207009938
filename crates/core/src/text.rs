use unicode_normalization::UnicodeNormalization;

/// Fold text for keyword matching: NFD-decompose, drop combining marks,
/// map `đ`/`Đ` to `d`, lower-case, trim.
///
/// `"Số Cont"` folds to `"so cont"`, `"Cầu đường"` to `"cau duong"`.
pub fn fold(s: &str) -> String {
    let stripped: String = s
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'đ' | 'Đ' => 'd',
            other => other,
        })
        .collect();
    stripped.to_lowercase().trim().to_string()
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_vietnamese_diacritics() {
        assert_eq!(fold("Số Cont"), "so cont");
        assert_eq!(fold("  Ngày vận chuyển "), "ngay van chuyen");
        assert_eq!(fold("Phí cầu đường"), "phi cau duong");
        assert_eq!(fold("THUẾ VAT"), "thue vat");
        assert_eq!(fold("Đơn giá"), "don gia");
    }

    #[test]
    fn only_outer_whitespace_is_trimmed() {
        assert_eq!(fold("  Số  Cont\t"), "so  cont");
    }

    #[test]
    fn ascii_passthrough() {
        assert_eq!(fold("Lift On/Lift Off"), "lift on/lift off");
        assert_eq!(fold(""), "");
    }
}
