//! Affiliate code rules
//!
//! Pure string functions shared by the sub-code generator (partnership
//! namespace) and the personal code checks (user namespace). Nothing here
//! touches a repository.

/// Delimiters that end the company prefix of a campaign's main code.
const PREFIX_DELIMITERS: [char; 2] = ['-', '_'];

/// Separator between the athlete part and the company part of a sub-code.
pub const SUB_CODE_SEPARATOR: char = '-';

/// Longest personal affiliate code a user may submit or hold.
pub const MAX_AFFILIATE_CODE_LEN: usize = 32;

/// Digits a suggested personal code may append to its base.
pub const MAX_SUGGESTION_SUFFIX_LEN: usize = 3;

/// Uppercase and drop everything outside `A-Z` / `0-9`.
///
/// Idempotent: `normalize_code(&normalize_code(s)) == normalize_code(s)`.
pub fn normalize_code(input: &str) -> String {
    input
        .chars()
        .flat_map(char::to_uppercase)
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Company prefix of a campaign main code: the segment before the first
/// `-` or `_`, uppercased. The whole code is used when no delimiter is
/// present.
pub fn company_short(main_code: &str) -> String {
    main_code
        .split(PREFIX_DELIMITERS)
        .next()
        .unwrap_or_default()
        .to_uppercase()
}

/// Base candidate for an athlete within a campaign: `{ALIAS}-{COMPANY}`.
pub fn base_sub_code(main_code: &str, preferred_alias: &str) -> String {
    format!(
        "{}{}{}",
        normalize_code(preferred_alias),
        SUB_CODE_SEPARATOR,
        company_short(main_code)
    )
}

/// Numbered variant of a base code. Suffix 0 is the base code itself.
pub fn numbered_variant(base: &str, suffix: u32) -> String {
    if suffix == 0 {
        base.to_string()
    } else {
        format!("{base}{suffix}")
    }
}

/// Normalized base for suggested personal codes, cut short enough that a
/// suffix of up to [`MAX_SUGGESTION_SUFFIX_LEN`] digits keeps the result
/// within [`MAX_AFFILIATE_CODE_LEN`].
pub fn suggestion_base(code: &str) -> String {
    let mut base = normalize_code(code);
    // Normalized codes are ASCII, so any index is a char boundary
    base.truncate(MAX_AFFILIATE_CODE_LEN - MAX_SUGGESTION_SUFFIX_LEN);
    base
}
