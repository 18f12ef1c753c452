//! # byon-hostgroups
//!
//! Expansion of host group expressions into explicit host lists.
//!
//! ## Expression Format
//!
//! An expression is a comma separated list of groups. A group is either a
//! single host or a host containing one integer range:
//!
//! ```text
//! cluster-[1-5].example.com, 192.168.0.{4..10}, example.com
//! ```
//!
//! - Ranges are written `{lo..hi}`, `{lo-hi}` or `[lo-hi]` and are inclusive
//! - `lo` must be strictly lower than `hi`
//! - Leading zeros in `lo` set the width of every generated number
//!   (`{004..100}` yields `004`, `005`, ..., `100`)
//! - Whitespace around groups is ignored and empty groups are dropped
//!
//! Expansion preserves order: groups left to right, and each range in
//! ascending order.

mod error;

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

pub use error::HostGroupError;

/// Separator between groups in an expression.
pub const GROUP_SEPARATOR: char = ',';

/// Largest number of hosts a single range may expand to.
pub const MAX_RANGE_SIZE: u32 = 100_000;

static CURLY_BRACKET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(\{([0-9]+)(\.\.|-)([0-9]+)\}).*$").expect("curly range pattern")
});

static SQUARE_BRACKET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(\[([0-9]+)(\.\.|-)([0-9]+)\]).*$").expect("square range pattern")
});

/// Expand one or more comma separated host groups into single hosts.
///
/// Returns an empty list when the expression holds no groups at all.
///
/// # Errors
///
/// Fails on the first group that is malformed or carries an invalid range.
pub fn expand(expression: &str) -> Result<Vec<String>, HostGroupError> {
    let mut hosts = Vec::new();
    for group in split_trim_omit_empty(expression) {
        hosts.extend(expand_group(group)?);
    }

    debug!(expression, host_count = hosts.len(), "Expanded host group expression");
    Ok(hosts)
}

/// Split on the group separator, trim every part and drop the empty ones.
fn split_trim_omit_empty(input: &str) -> impl Iterator<Item = &str> {
    input
        .split(GROUP_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty())
}

/// Expand a single group into its hosts.
fn expand_group(group: &str) -> Result<Vec<String>, HostGroupError> {
    if !has_single_range_or_none(group) {
        return Err(HostGroupError::MalformedRange {
            group: group.to_string(),
        });
    }

    if let Some(captures) = match_range(group) {
        return expand_range(group, &captures);
    }

    if group.contains(['{', '}', '[', ']']) {
        return Err(HostGroupError::invalid_range(
            group,
            "brackets do not enclose a numeric range",
        ));
    }

    if group.is_empty() {
        return Ok(Vec::new());
    }

    Ok(vec![group.to_string()])
}

/// Naive bracket check: counts must match and at most one range may open.
fn has_single_range_or_none(group: &str) -> bool {
    let count = |needle: char| group.chars().filter(|&c| c == needle).count();

    let curly_open = count('{');
    let square_open = count('[');

    curly_open == count('}') && square_open == count(']') && curly_open + square_open <= 1
}

/// Try the curly pattern first, then the square one.
fn match_range(group: &str) -> Option<Captures<'_>> {
    [&*CURLY_BRACKET_PATTERN, &*SQUARE_BRACKET_PATTERN]
        .into_iter()
        .find_map(|pattern| pattern.captures(group))
}

fn expand_range(group: &str, captures: &Captures<'_>) -> Result<Vec<String>, HostGroupError> {
    let block = &captures[1];
    let begin_digits = &captures[2];
    let end_digits = &captures[4];
    let width = begin_digits.len();

    // Bounds are limited to i32::MAX
    let begin = parse_bound(group, begin_digits)?;
    let end = parse_bound(group, end_digits)?;

    if begin >= end {
        return Err(HostGroupError::invalid_range(
            group,
            format!("invalid range {block}: start must be lower than end"),
        ));
    }

    if end - begin >= MAX_RANGE_SIZE {
        return Err(HostGroupError::invalid_range(
            group,
            format!("range {block} expands to more than {MAX_RANGE_SIZE} hosts"),
        ));
    }

    Ok((begin..=end)
        .map(|i| group.replace(block, &format!("{i:0width$}")))
        .collect())
}

fn parse_bound(group: &str, digits: &str) -> Result<u32, HostGroupError> {
    digits
        .parse::<i32>()
        .ok()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            HostGroupError::invalid_range(group, format!("range bound {digits} is too large"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_expands_to(expression: &str, expected: &[&str]) {
        let hosts = expand(expression).unwrap();
        assert_eq!(hosts, expected);
    }

    #[test]
    fn test_expand_group() {
        let hosts = expand("mycluster-{4..100}.example.com").unwrap();

        assert_eq!(hosts.len(), 97);
        assert!(hosts.contains(&"mycluster-4.example.com".to_string()));
        assert!(hosts.contains(&"mycluster-50.example.com".to_string()));
        assert!(hosts.contains(&"mycluster-100.example.com".to_string()));
    }

    #[test]
    fn test_expand_group_with_leading_zeros() {
        let hosts = expand("mycluster-{004..100}.example.com").unwrap();

        assert_eq!(hosts.len(), 97);
        assert_eq!(hosts[0], "mycluster-004.example.com");
        assert!(hosts.contains(&"mycluster-010.example.com".to_string()));
        assert!(hosts.contains(&"mycluster-100.example.com".to_string()));
        assert!(!hosts.contains(&"mycluster-4.example.com".to_string()));
    }

    #[test]
    fn test_bracket_styles_are_equivalent() {
        let expected = ["my-009.example.com", "my-010.example.com", "my-011.example.com"];

        assert_expands_to("my-[009-011].example.com", &expected);
        assert_expands_to("my-{009-011}.example.com", &expected);
        assert_expands_to("my-{009..011}.example.com", &expected);
    }

    #[test]
    fn test_expand_single_host() {
        assert_expands_to("single-host.example.com", &["single-host.example.com"]);
    }

    #[test]
    fn test_expand_empty_and_blank() {
        assert_expands_to("", &[]);
        assert_expands_to("   ", &[]);
        assert_expands_to(" , ,, ", &[]);
    }

    #[test]
    fn test_expand_ip_address_range() {
        assert_expands_to("192.168.0.{5-6}", &["192.168.0.5", "192.168.0.6"]);
    }

    #[test]
    fn test_expand_multiple_groups_with_ranges() {
        assert_expands_to(
            "a-{1..2}.x.com,b-{1..2}.x.com  , c.x.com,,",
            &["a-1.x.com", "a-2.x.com", "b-1.x.com", "b-2.x.com", "c.x.com"],
        );
    }

    #[test]
    fn test_expand_mixed_addresses_and_hostnames() {
        assert_expands_to(
            "192.168.0.{1-2}, a-{1..2}.x.com, c.com,,",
            &["192.168.0.1", "192.168.0.2", "a-1.x.com", "a-2.x.com", "c.com"],
        );
    }

    #[test]
    fn test_range_at_start_of_group() {
        assert_expands_to("[1-3]", &["1", "2", "3"]);
        assert_expands_to("{8..10}-node", &["8-node", "9-node", "10-node"]);
    }

    #[test]
    fn test_two_ranges_are_malformed() {
        let err = expand("my-{1..2}-[5-6].example.com").unwrap_err();
        assert!(err.is_malformed());
        assert_eq!(err.group(), "my-{1..2}-[5-6].example.com");
    }

    #[test]
    fn test_error_names_offending_group() {
        let err = expand("ok.example.com, bad-{3..1}.example.com").unwrap_err();
        assert!(err.is_invalid_range());
        assert_eq!(err.group(), "bad-{3..1}.example.com");
    }

    #[test]
    fn test_bound_overflow_is_invalid_range() {
        let err = expand("n-{1..99999999999999999999999}").unwrap_err();
        assert!(err.is_invalid_range());

        let err = expand("n-{1..2147483648}").unwrap_err();
        assert!(err.is_invalid_range());
    }

    #[test]
    fn test_range_size_limit() {
        let hosts = expand("n-[1-100000]").unwrap();
        assert_eq!(hosts.len(), MAX_RANGE_SIZE as usize);

        let err = expand("n-[0-100000]").unwrap_err();
        assert!(err.is_invalid_range());

        let err = expand("h{0..4294967296}").unwrap_err();
        assert!(err.is_invalid_range());
    }

    #[test]
    fn test_range_does_not_span_lines() {
        let err = expand("a\n[1-2]").unwrap_err();
        assert!(err.is_invalid_range());
    }

    #[test]
    fn test_has_single_range_or_none() {
        assert!(has_single_range_or_none("plain.example.com"));
        assert!(has_single_range_or_none("a-{1..2}"));
        assert!(has_single_range_or_none("a-[1-2]"));
        assert!(!has_single_range_or_none("a-{1..2"));
        assert!(!has_single_range_or_none("a-{1..2}-{3..4}"));
        assert!(!has_single_range_or_none("a-{1-3]"));
    }
}
