use ratatui::style::Color;

// Backgrounds
pub const BG_DARK: Color = Color::Rgb(14, 17, 22);
pub const BG_BAR: Color = Color::Rgb(20, 24, 31);
pub const BG_SURFACE: Color = Color::Rgb(24, 29, 38);
pub const BG_HIGHLIGHT: Color = Color::Rgb(36, 44, 58);

// Accent
pub const ACCENT: Color = Color::Rgb(129, 140, 248);

// Text
pub const TEXT: Color = Color::Rgb(226, 232, 240);
pub const TEXT_DIM: Color = Color::Rgb(148, 163, 184);
pub const TEXT_MUTED: Color = Color::Rgb(90, 100, 120);

// Semantic
pub const GREEN: Color = Color::Rgb(52, 211, 153);
pub const BLUE: Color = Color::Rgb(96, 165, 250);
pub const RED: Color = Color::Rgb(248, 113, 113);
pub const YELLOW: Color = Color::Rgb(251, 191, 36);
pub const CYAN: Color = Color::Rgb(103, 232, 249);
pub const MAGENTA: Color = Color::Rgb(232, 121, 249);
