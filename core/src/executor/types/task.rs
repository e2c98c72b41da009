use crate::palette::{assign_colors, ColorToken, Palette};

/// One (directory, command) unit of work, consumed by exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub directory: String,
    pub command: String,
    pub color: ColorToken,
    /// Skip the directory unless its checked-out branch contains this.
    pub branch_filter: Option<String>,
}

impl Task {
    pub fn new(
        directory: impl Into<String>,
        command: impl Into<String>,
        color: ColorToken,
    ) -> Self {
        Self {
            directory: directory.into(),
            command: command.into(),
            color,
            branch_filter: None,
        }
    }

    pub fn with_branch_filter(mut self, filter: Option<String>) -> Self {
        self.branch_filter = filter.filter(|f| !f.is_empty());
        self
    }
}

/// Build one task per directory, colored by position.
pub fn build_tasks<S: AsRef<str>>(
    directories: &[S],
    command: &str,
    palette: &Palette,
    branch_filter: Option<&str>,
) -> Vec<Task> {
    let colors = assign_colors(directories, palette);
    directories
        .iter()
        .map(|dir| {
            let dir = dir.as_ref();
            Task::new(dir, command, colors[dir])
                .with_branch_filter(branch_filter.map(str::to_string))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_task_per_directory_in_order() {
        let palette = Palette::standard();
        let dirs = vec!["/a".to_string(), "/b".to_string()];
        let tasks = build_tasks(&dirs, "git pull", &palette, Some("main"));

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].directory, "/a");
        assert_eq!(tasks[1].color, palette.color_for(1));
        assert!(tasks
            .iter()
            .all(|t| t.command == "git pull" && t.branch_filter.as_deref() == Some("main")));
    }

    #[test]
    fn empty_filter_means_no_filter() {
        let task = Task::new("/a", "ls", Palette::standard().color_for(0))
            .with_branch_filter(Some(String::new()));
        assert_eq!(task.branch_filter, None);
    }
}
