/// Tools that print plain output when piped unless told otherwise.
const FLAG_TOOLS: [(&str, &str, &str); 3] = [
    ("ls", "--color", "--color=always"),
    ("grep", "--color", "--color=always"),
    ("git", "-c color", "-c color.status=always"),
];

/// Characters after which the next word starts a new command.
const COMMAND_STARTERS: [char; 4] = [';', '|', '&', '('];

/// Environment that convinces most CLIs to emit ANSI colors into a pipe.
pub fn color_env() -> Vec<(&'static str, &'static str)> {
    vec![
        ("TERM", "xterm-256color"),
        ("COLORTERM", "truecolor"),
        ("FORCE_COLOR", "true"),
        ("CLICOLOR", "1"),
        ("CLICOLOR_FORCE", "1"),
    ]
}

/// Insert color flags after `ls`, `grep` and `git` invocations.
///
/// A tool is only touched when it appears at a command position (first word,
/// first word of a line, or right after `;`, `|`, `&` or `(`, with or without
/// surrounding spaces) and the command does not already carry that tool's
/// color option. Each tool is handled independently and the rewrite is
/// idempotent.
pub fn force_color(command: &str) -> String {
    let mut inserts: Vec<(usize, &str)> = Vec::new();

    for (start, end, at_command_position) in word_spans(command) {
        if !at_command_position {
            continue;
        }
        let word = &command[start..end];
        for (tool, marker, flag) in FLAG_TOOLS {
            if word == tool && !command.contains(marker) {
                inserts.push((end, flag));
            }
        }
    }

    let mut out = String::with_capacity(command.len() + inserts.len() * 24);
    let mut last = 0;
    for (at, flag) in inserts {
        out.push_str(&command[last..at]);
        out.push(' ');
        out.push_str(flag);
        last = at;
    }
    out.push_str(&command[last..]);
    out
}

/// Words of a command line as `(start, end, at_command_position)`.
///
/// Whitespace and the operator characters `; | & ( )` all end a word, so
/// `ls|grep` yields two words.
fn word_spans(s: &str) -> Vec<(usize, usize, bool)> {
    let mut spans = Vec::new();
    let mut start = None;
    let mut at_command_position = true;

    for (i, ch) in s.char_indices() {
        let is_operator = COMMAND_STARTERS.contains(&ch) || ch == ')';
        if !ch.is_whitespace() && !is_operator {
            if start.is_none() {
                start = Some(i);
            }
            continue;
        }
        if let Some(st) = start.take() {
            spans.push((st, i, at_command_position));
            at_command_position = false;
        }
        if ch == '\n' || COMMAND_STARTERS.contains(&ch) {
            at_command_position = true;
        } else if ch == ')' {
            at_command_position = false;
        }
    }
    if let Some(st) = start {
        spans.push((st, s.len(), at_command_position));
    }
    spans
}
