use std::cmp::Ordering;

/// Release qualifiers that carry no ordering information
const IGNORED_QUALIFIERS: &[&str] = &["final", "release"];

/// VersionComparator - total ordering over free-form version strings
///
/// Versions are split on `.` and `-`, lowercased, and stripped of the
/// `final` / `release` qualifiers; tokens left empty are dropped, so
/// `2.1-Final` equals `2.1`. Tokens compare numerically when both parse as
/// integers and lexicographically otherwise. When one token list is a strict
/// prefix of the other, the shorter version is older (`1.0 < 1.0.0`).
///
/// Pre-release tags are not ranked specially: `1.0-rc1` compares as the
/// string `rc1` against whatever token sits in the same position.
pub struct VersionComparator;

impl VersionComparator {
    pub fn compare(a: &str, b: &str) -> Ordering {
        let left = Self::tokenize(a);
        let right = Self::tokenize(b);

        for (l, r) in left.iter().zip(right.iter()) {
            let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
                (Ok(ln), Ok(rn)) => ln.cmp(&rn),
                _ => l.cmp(r),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        left.len().cmp(&right.len())
    }

    /// `current >= minimum`
    pub fn is_at_least(current: &str, minimum: &str) -> bool {
        Self::compare(current, minimum) != Ordering::Less
    }

    fn tokenize(version: &str) -> Vec<String> {
        version
            .split(['.', '-'])
            .map(|token| {
                let mut token = token.trim().to_lowercase();
                for qualifier in IGNORED_QUALIFIERS {
                    token = token.replace(qualifier, "");
                }
                token
            })
            .filter(|token| !token.is_empty())
            .collect()
    }
}
