use anyhow::{Result, bail};

pub const MAX_PHONE_INPUT_LEN: usize = 32;

/// A Brazilian phone number reduced to its canonical parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPhone {
    pub ddd: String,
    pub local: String,
    pub e164: String,
}

/// Normalizes a Brazilian phone number to `+55` E.164 form. Accepts an
/// optional `+55`/`55` country prefix and the usual punctuation
/// (`(11) 98765-4321`, `11 3456.7890`, ...). Landlines keep 8 local digits,
/// mobiles 9 with a leading `9`.
pub fn normalize_phone(raw: &str) -> Result<NormalizedPhone> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("Invalid phone: empty input");
    }
    if trimmed.len() > MAX_PHONE_INPUT_LEN {
        bail!("Invalid phone: too long");
    }

    let mut digits = String::new();
    for (position, character) in trimmed.chars().enumerate() {
        match character {
            '0'..='9' => digits.push(character),
            '+' if position == 0 => {}
            ' ' | '(' | ')' | '-' | '.' => {}
            _ => bail!("Invalid phone: unexpected character '{}'", character),
        }
    }

    let national = match digits.strip_prefix("55") {
        Some(rest) if rest.len() == 10 || rest.len() == 11 => rest,
        _ => digits.as_str(),
    };

    if national.len() != 10 && national.len() != 11 {
        bail!(
            "Invalid phone: expected 10 or 11 national digits, got {}",
            national.len()
        );
    }

    let (ddd, local) = national.split_at(2);
    validate_ddd(ddd)?;
    validate_local(local)?;

    Ok(NormalizedPhone {
        ddd: ddd.to_string(),
        local: local.to_string(),
        e164: format!("+55{}{}", ddd, local),
    })
}

fn validate_ddd(ddd: &str) -> Result<()> {
    let mut chars = ddd.chars();
    let first = chars.next().unwrap_or('0');
    let second = chars.next().unwrap_or('0');

    // Valid area codes run 11..=99 with a non-zero second digit.
    if first == '0' || second == '0' {
        bail!("Invalid phone: area code {} does not exist", ddd);
    }

    Ok(())
}

fn validate_local(local: &str) -> Result<()> {
    match local.len() {
        8 => Ok(()),
        9 if local.starts_with('9') => Ok(()),
        9 => bail!("Invalid phone: 9-digit numbers must start with 9"),
        _ => bail!("Invalid phone: local part must have 8 or 9 digits"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_punctuated_mobile() {
        let phone = normalize_phone("(11) 98765-4321").unwrap();
        assert_eq!(phone.e164, "+5511987654321");
        assert_eq!(phone.ddd, "11");
        assert_eq!(phone.local, "987654321");
    }

    #[test]
    fn normalizes_landline_with_country_prefix() {
        let phone = normalize_phone("+55 21 3456.7890").unwrap();
        assert_eq!(phone.e164, "+552134567890");
    }

    #[test]
    fn bare_country_prefix_without_plus() {
        let phone = normalize_phone("5511987654321").unwrap();
        assert_eq!(phone.e164, "+5511987654321");
    }

    #[test]
    fn rejects_invalid_area_code() {
        assert!(normalize_phone("(01) 98765-4321").is_err());
        assert!(normalize_phone("(10) 98765-4321").is_err());
    }

    #[test]
    fn rejects_short_local_part() {
        assert!(normalize_phone("11 9876-543").is_err());
    }

    #[test]
    fn rejects_nine_digit_local_not_starting_with_nine() {
        assert!(normalize_phone("11 887654321").is_err());
    }

    #[test]
    fn rejects_letters_and_empty_input() {
        assert!(normalize_phone("call me").is_err());
        assert!(normalize_phone("   ").is_err());
    }
}
