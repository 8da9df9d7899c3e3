/// A version reduced to three numeric fields. Missing or non-numeric
/// components coerce to 0 so that parsing is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

pub fn parse_version(raw: &str) -> Version {
    let mut parts = raw.trim().split('.');
    let major = numeric_component(parts.next());
    let minor = numeric_component(parts.next());
    let patch = numeric_component(parts.next());
    Version {
        major,
        minor,
        patch,
    }
}

fn numeric_component(part: Option<&str>) -> u64 {
    part.and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(0)
}

/// Answers whether an installed version satisfies a constraint expression.
///
/// Constraint forms, checked by prefix in this order:
/// `^M.m.p` (same major), `~M.m.p` (same major and minor), `>=`, `<=`, `>`,
/// `<` (three-field numeric comparison), then bare or `=`-prefixed exact
/// string match. Total: every input yields a boolean.
pub fn is_compatible(installed: &str, constraint: &str) -> bool {
    let constraint = constraint.trim();
    let current = parse_version(installed);

    if let Some(rest) = constraint.strip_prefix('^') {
        return current.major == parse_version(rest).major;
    }
    if let Some(rest) = constraint.strip_prefix('~') {
        let wanted = parse_version(rest);
        return current.major == wanted.major && current.minor == wanted.minor;
    }
    if let Some(rest) = constraint.strip_prefix(">=") {
        return current >= parse_version(rest);
    }
    if let Some(rest) = constraint.strip_prefix("<=") {
        return current <= parse_version(rest);
    }
    if let Some(rest) = constraint.strip_prefix('>') {
        return current > parse_version(rest);
    }
    if let Some(rest) = constraint.strip_prefix('<') {
        return current < parse_version(rest);
    }

    let exact = constraint.strip_prefix('=').unwrap_or(constraint);
    installed.trim() == exact
}
