//! Dominant severity resolution

use chronicle_core::Severity;

/// Reduce a set of severities to the dominant one
///
/// Precedence is `major > minor > patch`. Absent severities neither
/// contribute nor block the rest. Stops at the first `major`.
pub fn resolve<I>(severities: I) -> Option<Severity>
where
    I: IntoIterator<Item = Option<Severity>>,
{
    let mut dominant = None;
    for severity in severities.into_iter().flatten() {
        if severity == Severity::Major {
            return Some(Severity::Major);
        }
        dominant = dominant.max(Some(severity));
    }
    dominant
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_resolves_to_none() {
        assert_eq!(resolve(Vec::new()), None);
        assert_eq!(resolve(vec![None, None]), None);
    }

    #[test]
    fn test_major_dominates() {
        let severities = vec![
            Some(Severity::Patch),
            Some(Severity::Minor),
            Some(Severity::Major),
        ];
        assert_eq!(resolve(severities), Some(Severity::Major));
    }

    #[test]
    fn test_minor_over_patch() {
        let severities = vec![Some(Severity::Patch), Some(Severity::Minor), None];
        assert_eq!(resolve(severities), Some(Severity::Minor));
    }

    #[test]
    fn test_absent_does_not_block() {
        assert_eq!(resolve(vec![None, Some(Severity::Patch)]), Some(Severity::Patch));
    }

    #[test]
    fn test_major_short_circuits() {
        let mut seen = 0;
        let iter = [Some(Severity::Major), Some(Severity::Patch), Some(Severity::Minor)]
            .into_iter()
            .inspect(|_| seen += 1);
        assert_eq!(resolve(iter), Some(Severity::Major));
        assert_eq!(seen, 1);
    }
}
