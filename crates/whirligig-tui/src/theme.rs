use ratatui::style::Color;

/// Colors used by the carousel view
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg0: Color,
    pub bg2: Color,
    pub fg0: Color,
    pub grey0: Color,
    pub grey2: Color,

    /// Border of the active slide
    pub accent: Color,
    /// Status flags while a transition runs
    pub warning: Color,
    /// Status flags while the user scrolls
    pub info: Color,

    /// Cycled through for slide fills
    pub slides: [Color; 4],
}

impl Theme {
    pub fn slide_color(&self, index: usize) -> Color {
        self.slides[index % self.slides.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Material Dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
            info: Color::Rgb(0x7d, 0xae, 0xa3),
            slides: [
                Color::Rgb(0xea, 0x69, 0x62),
                Color::Rgb(0xd8, 0xa6, 0x57),
                Color::Rgb(0xa9, 0xb6, 0x65),
                Color::Rgb(0xd3, 0x86, 0x9b),
            ],
        }
    }
}
