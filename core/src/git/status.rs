use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::TaskError;
use crate::output::directory_label;
use crate::palette::{ColorToken, GREEN, RED, RESET};

const BRANCH_MARKER: &str = "## ";
const TRACKING_SEPARATOR: &str = "...";
const BRANCH_WIDTH: usize = 15;
const STATE_WIDTH: usize = 10;

// Compiled once, shared read-only by every worker.
static AHEAD_BEHIND_REGEX: OnceLock<Regex> = OnceLock::new();

fn ahead_behind_regex() -> &'static Regex {
    AHEAD_BEHIND_REGEX
        .get_or_init(|| Regex::new(r"(\[.+\])").expect("AHEAD_BEHIND_REGEX is valid"))
}

/// Condensed view of `git status --branch --porcelain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitStatusSummary {
    pub branch_name: String,
    /// Bracketed upstream marker such as `[ahead 2, behind 1]`.
    pub ahead_behind: Option<String>,
    pub dirty_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirtyState {
    Clean,
    Modified(usize),
}

impl fmt::Display for DirtyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clean => f.write_str("Clean"),
            Self::Modified(n) => write!(f, "{n} modified"),
        }
    }
}

impl GitStatusSummary {
    pub fn dirty_state(&self) -> DirtyState {
        match self.dirty_count {
            0 => DirtyState::Clean,
            n => DirtyState::Modified(n),
        }
    }
}

/// Parse porcelain branch-status output.
///
/// The first non-blank line is the `## branch...upstream [ahead N]` header;
/// every other non-blank line is one changed path.
pub fn parse_status(raw: &str) -> Result<GitStatusSummary, TaskError> {
    let mut lines = raw
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty());

    let branch_info = lines.next().ok_or(TaskError::EmptyStatusOutput)?;
    let dirty_count = lines.count();

    let ahead_behind = ahead_behind_regex()
        .find(branch_info)
        .map(|m| m.as_str().to_string());

    let head = branch_info
        .strip_prefix(BRANCH_MARKER)
        .unwrap_or(branch_info);
    let branch_name = head
        .split(TRACKING_SEPARATOR)
        .next()
        .unwrap_or(head)
        .trim_end()
        .to_string();

    Ok(GitStatusSummary {
        branch_name,
        ahead_behind,
        dirty_count,
    })
}

/// One aligned, colored summary line for a directory (newline included).
pub fn render_status_line(
    directory: &str,
    color: ColorToken,
    summary: &GitStatusSummary,
    dir_width: usize,
) -> String {
    let label = format!("[{}]", directory_label(directory));
    let state = match summary.dirty_state() {
        DirtyState::Clean => format!("{GREEN}{}{RESET}", DirtyState::Clean),
        modified => format!("{RED}{modified}{RESET}"),
    };

    let mut line = format!(
        "{color}{label:<dir_width$}{RESET} {branch:<BRANCH_WIDTH$} {state:<STATE_WIDTH$}",
        branch = summary.branch_name,
    );
    if let Some(ahead_behind) = &summary.ahead_behind {
        line.push(' ');
        line.push_str(ahead_behind);
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_branch_upstream_marker_and_changes() {
        let summary = parse_status("## main...origin/main [ahead 1]\n M file.go\n").unwrap();
        assert_eq!(
            summary,
            GitStatusSummary {
                branch_name: "main".to_string(),
                ahead_behind: Some("[ahead 1]".to_string()),
                dirty_count: 1,
            }
        );
        assert_eq!(summary.dirty_state(), DirtyState::Modified(1));
        assert_eq!(summary.dirty_state().to_string(), "1 modified");
    }

    #[test]
    fn clean_tree_without_upstream_drift() {
        let summary = parse_status("## main...origin/main\n").unwrap();
        assert_eq!(summary.branch_name, "main");
        assert_eq!(summary.ahead_behind, None);
        assert_eq!(summary.dirty_count, 0);
        assert_eq!(summary.dirty_state().to_string(), "Clean");
    }

    #[test]
    fn branch_without_upstream() {
        let summary = parse_status("## feature/login\n?? new.txt\n M a.rs\n\n").unwrap();
        assert_eq!(summary.branch_name, "feature/login");
        assert_eq!(summary.dirty_count, 2);
    }

    #[test]
    fn ahead_and_behind_together() {
        let summary = parse_status("## dev...origin/dev [ahead 2, behind 3]\r\n").unwrap();
        assert_eq!(summary.branch_name, "dev");
        assert_eq!(summary.ahead_behind.as_deref(), Some("[ahead 2, behind 3]"));
    }

    #[test]
    fn blank_output_is_an_error() {
        assert_eq!(parse_status(""), Err(TaskError::EmptyStatusOutput));
        assert_eq!(parse_status("\n  \n\n"), Err(TaskError::EmptyStatusOutput));
    }

    #[test]
    fn renders_aligned_line() {
        let color = Palette::standard().color_for(2);
        let summary = parse_status("## main...origin/main [ahead 1]\n M file.go\n").unwrap();
        let line = render_status_line("/src/api", color, &summary, 25);

        let expected = format!(
            "\x1b[33m{:<25}\x1b[0m {:<15} \x1b[31m1 modified\x1b[0m [ahead 1]\n",
            "[api]", "main"
        );
        assert_eq!(line, expected);
    }

    #[test]
    fn renders_clean_line_without_marker() {
        let color = Palette::standard().color_for(0);
        let summary = parse_status("## main\n").unwrap();
        let line = render_status_line("web", color, &summary, 8);
        assert_eq!(
            line,
            "\x1b[31m[web]   \x1b[0m main            \x1b[32mClean\x1b[0m\n"
        );
    }
}
