// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Recursive tree reports for nested timers.
//!
//! Each node renders one line: padded name, aggregate time in seconds, its
//! share of the *direct* parent's aggregate, call count, mean|std and
//! min|max scaled to milliseconds. Children follow in insertion order with
//! pipe prefixes marking the depth. Percentages are always relative to the
//! immediate enclosing scope, never to the root.

use std::fmt::{self, Display, Write as _};

use serde::{Deserialize, Serialize};

use crate::timer::{Timer, TimerId};

/// Layout knobs for tree reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStyle {
    /// Column width of the name field at depth zero.
    pub name_width: usize,
    /// How many columns the name field shrinks per nesting level, which
    /// visually indents deeper nodes.
    pub indent_step: usize,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            name_width: 30,
            indent_step: 2,
        }
    }
}

impl Timer {
    /// Renders the whole tree with the default [`ReportStyle`].
    pub fn render(&self) -> String {
        self.render_with(&ReportStyle::default())
    }

    /// Renders the whole tree with the given style.
    pub fn render_with(&self, style: &ReportStyle) -> String {
        self.render_node(self.root(), style)
    }

    /// Renders the subtree rooted at `id`. The subtree root gets no
    /// percentage column — there is no enclosing scope to relate it to.
    pub fn render_node(&self, id: TimerId, style: &ReportStyle) -> String {
        let mut out = String::new();
        self.render_into(&mut out, id, style, 0, 0.0);
        out
    }

    fn render_into(
        &self,
        out: &mut String,
        id: TimerId,
        style: &ReportStyle,
        level: usize,
        parent_sum: f64,
    ) {
        let stats = self.stats_at(id);
        let width = style.name_width.saturating_sub(style.indent_step * level);

        if stats.count() < 1 {
            let _ = writeln!(out, "{:<width$}has no sample yet.", stats.name());
            return;
        }

        let _ = write!(out, "{:<width$}", stats.name());
        let _ = write!(out, "{:>8}s  ", fmt_sig3(stats.sum()));
        if parent_sum != 0.0 {
            let share = (100.0 * stats.sum() / parent_sum) as i64;
            let _ = write!(out, "{share:>3}% ");
        } else {
            out.push_str("     ");
        }
        let _ = write!(out, "{:>8}  calls   mean|std: ", stats.count());
        let _ = write!(out, "{:>8} | ", fmt_sig3(1000.0 * stats.mean()));
        let _ = write!(out, "{:<8}  [min|max:  ", fmt_sig3(1000.0 * stats.std()));
        let _ = write!(out, "{:>8} | ", fmt_sig3(1000.0 * stats.min()));
        let _ = writeln!(out, "{:<8}] in ms", fmt_sig3(1000.0 * stats.max()));

        for child in self.children(id) {
            for _ in 0..level {
                out.push_str("| ");
            }
            out.push_str("|-");
            self.render_into(out, child, style, level + 1, stats.sum());
        }
    }
}

impl Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Formats a value with roughly three significant digits, the way the
/// report columns expect: plain decimal in the mid magnitudes, scientific
/// notation far outside them, trailing zeros trimmed.
pub(crate) fn fmt_sig3(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let exponent = value.abs().log10().floor() as i32;
    if !(-4..3).contains(&exponent) {
        return format!("{value:.2e}");
    }

    let decimals = (2 - exponent).max(0) as usize;
    let fixed = format!("{value:.decimals$}");
    if !fixed.contains('.') {
        return fixed;
    }
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Timer;

    /// Builds a tree with hand-fed aggregates so layout assertions are
    /// deterministic (no sleeping).
    fn seeded_tree() -> (Timer, TimerId, TimerId) {
        let mut timer = Timer::new("frame");
        let child = timer.nest("render");
        let grandchild = timer.nest_under(child, "shadows");

        let root = timer.root();
        timer.stats_mut(root).add(0.1);
        timer.stats_mut(root).add(0.1);
        timer.stats_mut(child).add(0.05);
        timer.stats_mut(child).add(0.05);
        timer.stats_mut(grandchild).add(0.025);
        (timer, child, grandchild)
    }

    #[test]
    fn report_shows_share_of_direct_parent() {
        let (timer, _, _) = seeded_tree();
        let text = timer.render();
        let lines: Vec<&str> = text.lines().collect();

        // Root: no percentage column. Child: 0.1 / 0.2 of the root.
        // Grandchild: 0.025 / 0.1 of its *direct* parent, not of the root.
        assert_eq!(lines.len(), 3);
        assert!(!lines[0].contains('%'));
        assert!(lines[1].contains(" 50% "));
        assert!(lines[2].contains(" 25% "));
    }

    #[test]
    fn report_indents_children_with_pipes() {
        let (timer, _, _) = seeded_tree();
        let text = timer.render();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("Timer frame"));
        assert!(lines[1].starts_with("|-Timer render"));
        assert!(lines[2].starts_with("| |-Timer shadows"));
    }

    #[test]
    fn report_lines_carry_counts_and_units() {
        let (timer, _, _) = seeded_tree();
        let text = timer.render();

        assert!(text.contains("calls"));
        assert!(text.contains("mean|std:"));
        assert!(text.contains("[min|max:"));
        assert!(text.contains("in ms"));
        // Root aggregate is 0.2 seconds.
        assert!(text.lines().next().unwrap().contains("0.2s"));
    }

    #[test]
    fn unsampled_root_short_circuits_the_subtree() {
        let mut timer = Timer::new("idle");
        timer.nest("child");

        let text = timer.render();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("has no sample yet"));
        assert!(!text.contains("child"));
    }

    #[test]
    fn zero_parent_sum_omits_the_percentage_column() {
        let mut timer = Timer::new("zero");
        let child = timer.nest("busy");

        // The root has samples, all of them zero-valued, so the child has
        // no denominator to compute a share against.
        let root = timer.root();
        timer.stats_mut(root).add(0.0);
        timer.stats_mut(child).add(0.01);

        let text = timer.render();
        assert!(!text.contains('%'));
        assert!(text.contains("Timer busy"));
    }

    #[test]
    fn subtree_rendering_starts_fresh() {
        let (timer, child, _) = seeded_tree();
        let text = timer.render_node(child, &ReportStyle::default());
        let lines: Vec<&str> = text.lines().collect();

        // The subtree root has no percentage; its own child still does.
        assert!(lines[0].starts_with("Timer render"));
        assert!(!lines[0].contains('%'));
        assert!(lines[1].contains("25%"));
    }

    #[test]
    fn style_controls_name_column_and_indent() {
        let (timer, _, _) = seeded_tree();
        let style = ReportStyle {
            name_width: 40,
            indent_step: 4,
        };
        let text = timer.render_with(&style);
        let lines: Vec<&str> = text.lines().collect();

        let root_name_cols = lines[0].find("s  ").unwrap();
        let child_name_cols = lines[1].trim_start_matches("|-").find("s  ").unwrap();
        assert!(root_name_cols > child_name_cols);
    }

    #[test]
    fn display_matches_render() {
        let (timer, _, _) = seeded_tree();
        assert_eq!(timer.to_string(), timer.render());
    }

    #[test]
    fn fmt_sig3_covers_the_report_magnitudes() {
        assert_eq!(fmt_sig3(0.0), "0");
        assert_eq!(fmt_sig3(2.0), "2");
        assert_eq!(fmt_sig3(0.5), "0.5");
        assert_eq!(fmt_sig3(123.456), "123");
        assert_eq!(fmt_sig3(0.0123), "0.0123");
        assert_eq!(fmt_sig3(12345.0), "1.23e4");
        assert!(fmt_sig3(f64::NAN).contains("NaN"));
    }
}
