use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub primary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
    pub text: Color,
    pub selected: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            muted: Color::DarkGray,
            text: Color::White,
            selected: Color::Cyan,
        }
    }
}

/// Names accepted in `settings.theme`, in cycling order.
pub const THEMES: &[&str] = &["default", "constellation"];

impl Theme {
    pub fn named(name: &str) -> Self {
        match name {
            "constellation" => Self {
                primary: Color::Rgb(0xe0, 0xb0, 0xff),
                success: Color::Rgb(0xb0, 0xe0, 0xe6),
                warning: Color::Yellow,
                error: Color::LightRed,
                muted: Color::Rgb(0x6a, 0x4a, 0x8a),
                text: Color::Rgb(0xb0, 0xe0, 0xe6),
                selected: Color::Rgb(0x8a, 0x2b, 0xe2),
            },
            _ => Self::default(),
        }
    }

    pub fn next_name(current: &str) -> &'static str {
        let index = THEMES.iter().position(|t| *t == current).unwrap_or(0);
        THEMES[(index + 1) % THEMES.len()]
    }

    pub fn primary_style(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selected)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }
}
