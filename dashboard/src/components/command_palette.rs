// Command palette: maps typed lines to dashboard actions, fuzzy-matching the
// command name when it is not spelled out.
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use shared::models::{Interval, SeriesType};
use shared::utils::normalize_symbol;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetTicker(String),
    /// `None` saves the current ticker input.
    AddFavorite(Option<String>),
    RemoveFavorite(String),
    SetInterval(Interval),
    SetSeriesType(SeriesType),
    SetTimePeriod(u32),
    Refresh,
    ShowWatchlist,
    Help,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CommandKind {
    Ticker,
    Add,
    Remove,
    Interval,
    Series,
    Period,
    Refresh,
    List,
    Help,
    Quit,
}

#[derive(Clone, Debug)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub usage: &'static str,
    pub description: &'static str,
    kind: CommandKind,
}

static DEFINITIONS: [CommandDefinition; 10] = [
    CommandDefinition { name: "ticker", aliases: &["select"], usage: "ticker <SYMBOL>", description: "Set the ticker input", kind: CommandKind::Ticker },
    CommandDefinition { name: "add", aliases: &["save"], usage: "add [SYMBOL]", description: "Save a ticker (default: the ticker input) to favorites", kind: CommandKind::Add },
    CommandDefinition { name: "remove", aliases: &["rm", "delete"], usage: "remove <SYMBOL>", description: "Remove a ticker from favorites", kind: CommandKind::Remove },
    CommandDefinition { name: "interval", aliases: &[], usage: "interval <daily|weekly|monthly>", description: "Choose the candle interval", kind: CommandKind::Interval },
    CommandDefinition { name: "series", aliases: &["series_type"], usage: "series <close|open|high|low>", description: "Choose the price field", kind: CommandKind::Series },
    CommandDefinition { name: "period", aliases: &["time_period"], usage: "period <DAYS>", description: "Set the SMA time period (single ticker)", kind: CommandKind::Period },
    CommandDefinition { name: "refresh", aliases: &["load"], usage: "refresh", description: "Fetch moving averages", kind: CommandKind::Refresh },
    CommandDefinition { name: "list", aliases: &["favorites"], usage: "list", description: "Show saved tickers", kind: CommandKind::List },
    CommandDefinition { name: "help", aliases: &["?"], usage: "help", description: "Show this help", kind: CommandKind::Help },
    CommandDefinition { name: "quit", aliases: &["exit"], usage: "quit", description: "Leave the dashboard", kind: CommandKind::Quit },
];

pub struct CommandPalette {
    matcher: SkimMatcherV2,
}

impl Default for CommandPalette {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandPalette {
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default(),
        }
    }

    pub fn definitions(&self) -> &'static [CommandDefinition] {
        &DEFINITIONS
    }

    /// Exact name or alias first, then the best fuzzy match on the name.
    fn resolve(&self, word: &str) -> Option<&'static CommandDefinition> {
        let word = word.to_lowercase();
        if let Some(def) = DEFINITIONS
            .iter()
            .find(|def| def.name == word || def.aliases.contains(&word.as_str()))
        {
            return Some(def);
        }

        let mut scored: Vec<(i64, &'static CommandDefinition)> = DEFINITIONS
            .iter()
            .filter_map(|def| self.matcher.fuzzy_match(def.name, &word).map(|score| (score, def)))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().next().map(|(_, def)| def)
    }

    pub fn parse(&self, line: &str) -> Result<Command, String> {
        let mut parts = line.split_whitespace();
        let word = parts.next().ok_or_else(|| "Type a command, or 'help'.".to_string())?;
        let arg = parts.next();

        let def = self
            .resolve(word)
            .ok_or_else(|| format!("Unknown command '{}'. Type 'help' for the list.", word))?;
        tracing::debug!(input = %word, command = def.name, "Resolved command");

        let missing = || format!("Usage: {}", def.usage);
        match def.kind {
            CommandKind::Ticker => {
                let symbol = arg.and_then(normalize_symbol).ok_or_else(missing)?;
                Ok(Command::SetTicker(symbol))
            }
            CommandKind::Add => Ok(Command::AddFavorite(arg.map(str::to_string))),
            CommandKind::Remove => {
                let symbol = arg.and_then(normalize_symbol).ok_or_else(missing)?;
                Ok(Command::RemoveFavorite(symbol))
            }
            CommandKind::Interval => {
                let interval = arg.ok_or_else(missing)?.parse::<Interval>()?;
                Ok(Command::SetInterval(interval))
            }
            CommandKind::Series => {
                let series_type = arg.ok_or_else(missing)?.parse::<SeriesType>()?;
                Ok(Command::SetSeriesType(series_type))
            }
            CommandKind::Period => {
                let raw = arg.ok_or_else(missing)?;
                match raw.parse::<u32>() {
                    Ok(period) if period > 0 => Ok(Command::SetTimePeriod(period)),
                    _ => Err(format!("Invalid time period: '{}'. Expected a positive number of days", raw)),
                }
            }
            CommandKind::Refresh => Ok(Command::Refresh),
            CommandKind::List => Ok(Command::ShowWatchlist),
            CommandKind::Help => Ok(Command::Help),
            CommandKind::Quit => Ok(Command::Exit),
        }
    }

    pub fn help_lines(&self) -> Vec<String> {
        DEFINITIONS
            .iter()
            .map(|def| format!("  {:<34} {}", def.usage, def.description))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_names_and_aliases() {
        let palette = CommandPalette::new();
        assert_eq!(palette.parse("refresh").unwrap(), Command::Refresh);
        assert_eq!(palette.parse("LOAD").unwrap(), Command::Refresh);
        assert_eq!(palette.parse("exit").unwrap(), Command::Exit);
        assert_eq!(palette.parse("save").unwrap(), Command::AddFavorite(None));
    }

    #[test]
    fn test_fuzzy_names() {
        let palette = CommandPalette::new();
        assert_eq!(palette.parse("refr").unwrap(), Command::Refresh);
        assert_eq!(palette.parse("ser high").unwrap(), Command::SetSeriesType(SeriesType::High));
    }

    #[test]
    fn test_arguments() {
        let palette = CommandPalette::new();
        assert_eq!(palette.parse("ticker msft").unwrap(), Command::SetTicker("MSFT".to_string()));
        assert_eq!(palette.parse("add nvda").unwrap(), Command::AddFavorite(Some("nvda".to_string())));
        assert_eq!(palette.parse("remove tsla").unwrap(), Command::RemoveFavorite("TSLA".to_string()));
        assert_eq!(palette.parse("interval weekly").unwrap(), Command::SetInterval(Interval::Weekly));
        assert_eq!(palette.parse("period 200").unwrap(), Command::SetTimePeriod(200));
    }

    #[test]
    fn test_rejections() {
        let palette = CommandPalette::new();
        assert!(palette.parse("").is_err());
        assert!(palette.parse("xyz").unwrap_err().starts_with("Unknown command"));
        assert_eq!(palette.parse("remove").unwrap_err(), "Usage: remove <SYMBOL>");
        assert!(palette.parse("interval hourly").unwrap_err().starts_with("Invalid interval"));
        assert!(palette.parse("period 0").is_err());
        assert!(palette.parse("period soon").is_err());
    }

    #[test]
    fn test_help_lists_every_command() {
        let palette = CommandPalette::new();
        assert_eq!(palette.help_lines().len(), palette.definitions().len());
    }
}
