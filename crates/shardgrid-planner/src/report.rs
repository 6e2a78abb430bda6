//! Human-readable estimate of the planned groups.

use shardgrid_core::Group;

/// One line per group, weights read as seconds:
///
/// ```text
/// Estimated groups:
/// #1: 3 tests, 01:05
/// ```
pub fn format_estimate(groups: &[Group]) -> String {
    let mut out = String::from("Estimated groups:\n");
    for (i, group) in groups.iter().enumerate() {
        out.push_str(&format!(
            "#{}: {} tests, {}\n",
            i + 1,
            group.len(),
            format_duration(group.size())
        ));
    }
    out
}

/// `MM:SS`, truncated to whole seconds. Hours wrap.
pub fn format_duration(seconds: f64) -> String {
    let secs = seconds as u64;
    format!("{:02}:{:02}", secs / 60 % 60, secs % 60)
}
