//! # Menu Screen
//!
//! Title screen with the start and quit options.

use super::{ScreenCommand, ScreenKind};
use crate::{draw_option_list, InputSnapshot, Rgba, Surface};

/// Choices on the title screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Start,
    Quit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 2] = [MenuOption::Start, MenuOption::Quit];

    pub fn label(self) -> &'static str {
        match self {
            MenuOption::Start => "Start Game",
            MenuOption::Quit => "Quit",
        }
    }
}

/// The title screen.
///
/// Navigation is level-detected: holding a direction moves the cursor one
/// entry per tick until it stops at either end.
#[derive(Debug, Default)]
pub struct MenuScreen {
    selected: usize,
    visits: u32,
}

impl MenuScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts the cursor back on the first option.
    pub fn init(&mut self) {
        self.selected = 0;
        self.visits += 1;
    }

    pub fn update(&mut self, input: InputSnapshot) -> ScreenCommand {
        if input.up && self.selected > 0 {
            self.selected -= 1;
        }
        if input.down && self.selected < MenuOption::ALL.len() - 1 {
            self.selected += 1;
        }

        if !input.confirm {
            return ScreenCommand::Stay;
        }

        match self.selected_option() {
            MenuOption::Start => ScreenCommand::Switch(ScreenKind::Overworld),
            MenuOption::Quit => ScreenCommand::Quit,
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear(Rgba::BLACK);
        surface.draw_text("Pokemon Emerald", 50.0, 75.0, 32.0, Rgba::YELLOW);

        let labels: Vec<&str> = MenuOption::ALL.iter().map(|option| option.label()).collect();
        draw_option_list(surface, &labels, self.selected, (120.0, 120.0), 24.0, 20.0, Rgba::WHITE);
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_option(&self) -> MenuOption {
        MenuOption::ALL[self.selected]
    }

    /// Number of times the menu has been entered.
    pub fn visits(&self) -> u32 {
        self.visits
    }
}
