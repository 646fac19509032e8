/// Qualifier tokens stripped from the end of names before fuzzy comparison
pub const DEFAULT_QUALIFIER_SUFFIXES: &[&str] = &["final", "release", "ga", "dev", "devel", "libs"];

/// Reduces a package name to the key used by fuzzy matching.
///
/// The name is lowercased and split on `-`, `_`, `.`, `+` and whitespace;
/// trailing qualifier tokens are dropped and the rest is joined with all
/// punctuation removed. `python3-devel`, `Python3_Devel` and `python3` all
/// normalize to `python3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameNormalizer {
    suffixes: Vec<String>,
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}

impl NameNormalizer {
    /// Builds a normalizer with the default qualifiers plus `extra_suffixes`.
    pub fn new<I, S>(extra_suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut suffixes: Vec<String> = DEFAULT_QUALIFIER_SUFFIXES
            .iter()
            .map(|s| s.to_string())
            .collect();
        for suffix in extra_suffixes {
            let suffix = suffix.as_ref().trim().to_lowercase();
            if !suffix.is_empty() && !suffixes.contains(&suffix) {
                suffixes.push(suffix);
            }
        }
        Self { suffixes }
    }

    pub fn normalize(&self, name: &str) -> String {
        let lower = name.to_lowercase();
        let mut tokens: Vec<&str> = lower
            .split(|c: char| matches!(c, '-' | '_' | '.' | '+') || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();

        // keep at least one token so a name made only of qualifiers still has a key
        while tokens.len() > 1 {
            match tokens.last() {
                Some(last) if self.suffixes.iter().any(|s| s == last) => {
                    tokens.pop();
                }
                _ => break,
            }
        }

        tokens
            .concat()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect()
    }
}
