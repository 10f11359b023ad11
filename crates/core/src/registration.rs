//! Registration number normalisation.
//!
//! Officers and payment apps type plates inconsistently (`abc-123`,
//! `ABC 123`, `ABC123`). Lookups always compare the normalised form.
//!
//! Only ASCII letters are upper-cased. The SQL side of permit lookups applies
//! the same rule with
//! `upper(regexp_replace(.., '[[:space:]-]', '', 'g') COLLATE "C")`, and the
//! `C` collation upper-cases ASCII only; keep the two in sync.

/// Strip whitespace and hyphens and upper-case ASCII letters.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
