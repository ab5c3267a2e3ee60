/// Raw `{` and `}` counts on one line.
pub fn count_braces(line: &str) -> (usize, usize) {
    let opens = line.matches('{').count();
    let closes = line.matches('}').count();
    (opens, closes)
}

/// Byte index of the first `}` that drives the running brace balance
/// negative, if any.
pub fn unbalanced_close_index(line: &str) -> Option<usize> {
    let mut depth: i64 = 0;
    for (idx, c) in line.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Document-wide balance of one environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentBalance {
    pub begins: usize,
    pub ends: usize,
    /// 1-indexed line of the last `\begin{name}`, if any.
    pub last_begin_line: Option<u32>,
    /// 1-indexed line of the last `\end{name}`, if any.
    pub last_end_line: Option<u32>,
}

/// Counts `\begin{name}` against `\end{name}` across the whole document.
pub fn environment_balance(source_lines: &[&str], name: &str) -> EnvironmentBalance {
    let begin_needle = format!("\\begin{{{}}}", name);
    let end_needle = format!("\\end{{{}}}", name);
    let mut balance = EnvironmentBalance {
        begins: 0,
        ends: 0,
        last_begin_line: None,
        last_end_line: None,
    };
    for (idx, line) in source_lines.iter().enumerate() {
        let begins_here = line.matches(begin_needle.as_str()).count();
        if begins_here > 0 {
            balance.begins += begins_here;
            balance.last_begin_line = Some(idx as u32 + 1);
        }
        let ends_here = line.matches(end_needle.as_str()).count();
        if ends_here > 0 {
            balance.ends += ends_here;
            balance.last_end_line = Some(idx as u32 + 1);
        }
    }
    balance
}
