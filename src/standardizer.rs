// Column-name standardization: ticker -> friendly name, then storage-safe form
use crate::config::TickerAlias;

/// Rewrites column names to their final storage-safe form.
///
/// Each ticker symbol is substituted by its friendly name wherever it occurs
/// inside a composite name (`close_^gspc` -> `close_sp500`). Symbols are
/// applied longest first so a symbol that is a substring of another cannot
/// steal its match. Names are then lowercased and every character outside
/// `[a-zA-Z0-9_]` becomes `_`. The whole operation is idempotent.
pub fn standardize_columns(names: &[String], aliases: &[TickerAlias]) -> Vec<String> {
    let mut ordered: Vec<&TickerAlias> = aliases.iter().collect();
    ordered.sort_by(|a, b| {
        b.symbol
            .len()
            .cmp(&a.symbol.len())
            .then_with(|| a.symbol.cmp(&b.symbol))
    });

    names
        .iter()
        .map(|name| {
            let mut renamed = name.clone();
            for alias in &ordered {
                // Fetched names are already lowercase; match the symbol case-insensitively
                renamed = replace_ignore_ascii_case(&renamed, &alias.symbol, &alias.friendly_name);
            }
            sanitize(&renamed)
        })
        .collect()
}

fn sanitize(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

fn replace_ignore_ascii_case(haystack: &str, needle: &str, replacement: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }

    // ASCII folding keeps byte offsets aligned with the original string
    let lower_haystack = haystack.to_ascii_lowercase();
    let lower_needle = needle.to_ascii_lowercase();

    let mut result = String::with_capacity(haystack.len());
    let mut rest = 0;
    while let Some(pos) = lower_haystack[rest..].find(&lower_needle) {
        let start = rest + pos;
        result.push_str(&haystack[rest..start]);
        result.push_str(replacement);
        rest = start + lower_needle.len();
    }
    result.push_str(&haystack[rest..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases(pairs: &[(&str, &str)]) -> Vec<TickerAlias> {
        pairs
            .iter()
            .map(|(s, f)| TickerAlias {
                symbol: (*s).into(),
                friendly_name: (*f).into(),
            })
            .collect()
    }

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn substitutes_symbol_inside_composite_name() {
        let map = aliases(&[("^GSPC", "sp500"), ("PETR4.SA", "petrobras")]);
        let out = standardize_columns(&names(&["close_^gspc", "open_petr4.sa"]), &map);
        assert_eq!(out, vec!["close_sp500", "open_petrobras"]);
    }

    #[test]
    fn longer_symbol_wins_over_its_prefix() {
        // PETR3.SA must not be half-rewritten by a shorter overlapping symbol
        let map = aliases(&[("PETR3.SA", "petrobras_pn"), ("PETR3.S", "wrong")]);
        let out = standardize_columns(&names(&["close_petr3.sa"]), &map);
        assert_eq!(out, vec!["close_petrobras_pn"]);
    }

    #[test]
    fn sanitizes_special_characters() {
        let map = aliases(&[]);
        let out = standardize_columns(&names(&["close_usdbrl=x", "Close ^BVSP"]), &map);
        assert_eq!(out, vec!["close_usdbrl_x", "close__bvsp"]);
    }

    #[test]
    fn standardization_is_idempotent() {
        let map = aliases(&[("^BVSP", "ibovespa"), ("USDBRL=X", "dolar")]);
        let input = names(&["close_^bvsp", "open_usdbrl=x", "data", "semana_do_mes"]);
        let once = standardize_columns(&input, &map);
        let twice = standardize_columns(&once, &map);
        assert_eq!(once, twice);
    }
}
