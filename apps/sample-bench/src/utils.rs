use anyhow::Context;

/// Parse comma-separated string into vector of usize
pub fn parse_comma_separated(input: &str) -> anyhow::Result<Vec<usize>> {
    input
        .split(',')
        .map(|s| {
            s.trim()
                .parse()
                .with_context(|| format!("Invalid value '{}': must be positive integer", s.trim()))
        })
        .collect()
}

/// Split a comma-separated list of names, dropping empty entries
pub fn parse_names(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
