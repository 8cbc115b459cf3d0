use colored::Colorize;
use timewolf::stdin::PathName;

/// One line of `tz` output: the name and a coloured verdict.
pub(super) fn timezone_verdict(name: &str, valid: bool) -> String {
    let verdict = if valid {
        "valid".green()
    } else {
        "unknown".red()
    };
    format!("{}: {}", name, verdict)
}

pub(super) fn path_name_line(pair: &PathName) -> String {
    format!("{}\t{}", pair.path, pair.name)
}
