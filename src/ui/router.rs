#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Dashboard,
    Scripts,
    Software,
    Perks,
    Member,
    Config,
    Forum,
    Console,
    Help,
}

impl Screen {
    /// Screens reachable from the menu, in digit order.
    pub const MENU: [Screen; 8] = [
        Screen::Dashboard,
        Screen::Scripts,
        Screen::Software,
        Screen::Perks,
        Screen::Member,
        Screen::Config,
        Screen::Forum,
        Screen::Console,
    ];

    pub fn from_digit(digit: char) -> Option<Screen> {
        let index = digit.to_digit(10)?.checked_sub(1)? as usize;
        Self::MENU.get(index).cloned()
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Scripts => "Scripts",
            Screen::Software => "Software",
            Screen::Perks => "Perks",
            Screen::Member => "Member",
            Screen::Config => "Config",
            Screen::Forum => "Forum",
            Screen::Console => "Console",
            Screen::Help => "Help",
        }
    }

    /// Key in `settings.features` that can switch this screen off.
    pub fn feature(&self) -> Option<&'static str> {
        match self {
            Screen::Scripts => Some("scripts"),
            Screen::Software => Some("software"),
            Screen::Perks => Some("perks"),
            Screen::Member => Some("member"),
            Screen::Config => Some("config"),
            Screen::Forum => Some("forum"),
            Screen::Console => Some("console"),
            Screen::Dashboard | Screen::Help => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_digit() {
        assert_eq!(Screen::from_digit('1'), Some(Screen::Dashboard));
        assert_eq!(Screen::from_digit('8'), Some(Screen::Console));
        assert_eq!(Screen::from_digit('0'), None);
        assert_eq!(Screen::from_digit('9'), None);
        assert_eq!(Screen::from_digit('x'), None);
    }
}
