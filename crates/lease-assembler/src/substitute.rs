//! Placeholder substitution
//!
//! Replaces `{TOKEN}`, `[TOKEN]` and `${TOKEN}` for the fixed vocabulary in a
//! single left-to-right pass. Substituted values are copied to the output and
//! never rescanned, so a tenant named "{LANDLORD}" stays "{LANDLORD}".
//!
//! Left as written:
//! - bare names (`TENANT` with no brackets)
//! - bracketed names outside the vocabulary (`[PERIOD]`)
//! - unmatched or mismatched delimiters (`{TENANT`, `{TENANT]`)

use crate::token::{Token, TokenMap};

/// Substitute every well-formed placeholder in `body`
pub fn substitute(body: &str, tokens: &TokenMap) -> String {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(pos) = rest.find(['{', '[', '$']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        match match_placeholder(tail) {
            Some((token, consumed)) => {
                out.push_str(tokens.get(token));
                rest = &tail[consumed..];
            }
            None => {
                // All three openers are one byte; copy it and keep scanning
                out.push_str(&tail[..1]);
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);

    out
}

/// Match a placeholder at the start of `input`
///
/// Returns the token and the number of bytes the placeholder occupies.
fn match_placeholder(input: &str) -> Option<(Token, usize)> {
    let (prefix_len, close) = if input.starts_with("${") {
        (2, '}')
    } else if input.starts_with('{') {
        (1, '}')
    } else if input.starts_with('[') {
        (1, ']')
    } else {
        return None;
    };

    let inner = &input[prefix_len..];
    let name_len = inner
        .find(|c: char| !is_token_char(c))
        .unwrap_or(inner.len());
    if name_len == 0 || !inner[name_len..].starts_with(close) {
        return None;
    }

    let token = Token::from_name(&inner[..name_len])?;
    Some((token, prefix_len + name_len + close.len_utf8()))
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_uppercase() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> TokenMap {
        let mut map = TokenMap::empty();
        map.set(Token::Tenant, "Maria Silva");
        map.set(Token::Rent, "1500,00");
        map.set(Token::DueDay, "5");
        map.set(Token::Landlord, "{TENANT}");
        map
    }

    #[test]
    fn test_three_bracket_styles() {
        let out = substitute("{TENANT} / [TENANT] / ${TENANT}", &tokens());
        assert_eq!(out, "Maria Silva / Maria Silva / Maria Silva");
    }

    #[test]
    fn test_bare_token_untouched() {
        let body = "O TENANT paga RENT. PARENTAL";
        assert_eq!(substitute(body, &tokens()), body);
    }

    #[test]
    fn test_spec_example() {
        let out = substitute(
            "O aluguel é de R$ {RENT}, pago até o dia {DUE_DAY}.",
            &tokens(),
        );
        assert_eq!(out, "O aluguel é de R$ 1500,00, pago até o dia 5.");
    }

    #[test]
    fn test_dollar_amount_not_a_placeholder() {
        let out = substitute("R$ 100 e US$ {RENT}", &tokens());
        assert_eq!(out, "R$ 100 e US$ 1500,00");
    }

    #[test]
    fn test_values_not_rescanned() {
        assert_eq!(substitute("[LANDLORD]", &tokens()), "{TENANT}");
    }

    #[test]
    fn test_unknown_and_malformed_left_alone() {
        let body = "[PERIOD] {TENANT {TENANT] [tenant] {} ${ $ [";
        assert_eq!(substitute(body, &tokens()), body);
    }

    #[test]
    fn test_unbound_token_becomes_empty() {
        assert_eq!(substitute("CPF: {GUARANTOR_CPF}.", &tokens()), "CPF: .");
    }

    #[test]
    fn test_multibyte_text_preserved() {
        let out = substitute("LOCATÁRIO {TENANT}, Cláusula ção\nlinha", &tokens());
        assert_eq!(out, "LOCATÁRIO Maria Silva, Cláusula ção\nlinha");
    }

    #[test]
    fn test_nested_brackets() {
        assert_eq!(substitute("{[TENANT]}", &tokens()), "{Maria Silva}");
        assert_eq!(substitute("$[RENT]", &tokens()), "$1500,00");
    }
}
