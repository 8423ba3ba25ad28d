use colored::Colorize;
use std::io::IsTerminal;

const HEADER_PREFIX: &str = "Weather for ";

/// Print the report, colouring the banner and header only on a terminal.
pub(crate) fn print_report(report: &str) {
    if std::io::stdout().is_terminal() {
        print!("{}", colorize_report(report));
    } else {
        print!("{report}");
    }
    println!();
}

/// Banner lines in bold yellow, the `Weather for ...` line in bold green, the rest untouched.
pub(crate) fn colorize_report(report: &str) -> String {
    let mut out = String::with_capacity(report.len() + 64);
    let mut in_banner = true;

    for line in report.split_inclusive('\n') {
        let (text, newline) = match line.strip_suffix('\n') {
            Some(text) => (text, "\n"),
            None => (line, ""),
        };

        if text.starts_with(HEADER_PREFIX) {
            in_banner = false;
            out.push_str(&text.green().bold().to_string());
        } else if in_banner && !text.is_empty() {
            out.push_str(&text.yellow().bold().to_string());
        } else {
            out.push_str(text);
        }
        out.push_str(newline);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "\n____\n\nWelcome to Weather-GPT! It's 12:00:00 right now!\n____\n\n\
                          Weather for London, GB:\n\nTemperature: 26.85°C\n____\n";

    // Single test: the colour override is process-global.
    #[test]
    fn styles_banner_and_header_only() {
        colored::control::set_override(true);
        let styled = colorize_report(REPORT);
        let banner = "Welcome to Weather-GPT! It's 12:00:00 right now!".yellow().bold().to_string();
        let header = "Weather for London, GB:".green().bold().to_string();

        colored::control::set_override(false);
        let plain = colorize_report(REPORT);
        colored::control::unset_override();

        assert!(styled.contains(&banner), "{styled:?}");
        assert!(styled.contains(&header), "{styled:?}");
        assert!(styled.contains("\nTemperature: 26.85°C\n____\n"), "{styled:?}");
        assert_ne!(styled, REPORT);

        assert_eq!(plain, REPORT);
    }
}
