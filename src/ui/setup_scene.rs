use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::constants::{
    AMERICAN_WIN_PROB, FAIR_WIN_PROB, MIN_INITIAL_BALANCE, MIN_INITIAL_BET, MIN_SIM_COUNT,
    MIN_TABLE_LIMIT, ROULETTE_WIN_PROB,
};
use crate::sim::SimConfig;

const FIELD_COUNT: usize = 5;
const FIELD_LABELS: [&str; FIELD_COUNT] = [
    "Initial Balance",
    "Base Bet",
    "Table Limit",
    "Bettors",
    "Win Probability",
];

/// Parameter entry form shown before a batch runs.
///
/// Values are edited as text and parsed on every keystroke, so the
/// validation line always reflects what is on screen.
pub struct SetupScreen {
    pub inputs: [String; FIELD_COUNT],
    pub selected: usize,
    pub validation_error: Option<String>,
}

impl SetupScreen {
    /// Starts the form pre-filled from a config, usually the defaults.
    pub fn new(config: &SimConfig) -> Self {
        let mut screen = Self {
            inputs: [
                format_amount(config.initial_balance),
                format_amount(config.initial_bet),
                format_amount(config.table_limit),
                config.num_runs.to_string(),
                format!("{:.4}", config.win_prob),
            ],
            selected: 0,
            validation_error: None,
        };
        screen.validate();
        screen
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(1), // Spacer
                Constraint::Length(5), // Fields
                Constraint::Length(1), // Spacer
                Constraint::Length(4), // Rules
                Constraint::Length(2), // Validation
                Constraint::Min(0),    // Filler
                Constraint::Length(3), // Controls
            ])
            .split(area);

        // Title
        let title = Paragraph::new("Martingale Simulator")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        // One line per field, cursor underscore on the selected one
        let field_lines: Vec<Line> = (0..FIELD_COUNT)
            .map(|i| {
                let marker = if i == self.selected { "> " } else { "  " };
                let value = if i == self.selected {
                    format!("{}_", self.inputs[i])
                } else {
                    self.inputs[i].clone()
                };
                let style = if i == self.selected {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(Span::styled(
                    format!("{}{:<16} {}", marker, format!("{}:", FIELD_LABELS[i]), value),
                    style,
                ))
            })
            .collect();
        f.render_widget(Paragraph::new(field_lines), chunks[2]);

        // Rules
        let rules = vec![
            Line::from("• Digits and a decimal point; Up/Down or Tab switches fields"),
            Line::from("• Probability presets: [E]uropean 18/37   [A]merican 18/38   [F]air 1/2"),
            Line::from("• Wagers double after every loss and reset to the base bet on a win"),
        ];
        let rules_widget = Paragraph::new(rules).style(Style::default().fg(Color::Gray));
        f.render_widget(rules_widget, chunks[4]);

        // Validation feedback
        let validation_text = if let Some(error) = &self.validation_error {
            Line::from(Span::styled(
                format!("✗ {}", error),
                Style::default().fg(Color::Red),
            ))
        } else {
            Line::from(Span::styled(
                "✓ Parameters are valid",
                Style::default().fg(Color::Green),
            ))
        };
        f.render_widget(Paragraph::new(validation_text), chunks[5]);

        // Controls
        let controls = Paragraph::new("[Enter] Run Simulation    [Esc] Quit")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(controls, chunks[7]);
    }

    pub fn handle_char_input(&mut self, c: char) {
        if c.is_ascii_digit() || c == '.' {
            self.inputs[self.selected].push(c);
            self.validate();
        } else {
            self.apply_preset(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        self.inputs[self.selected].pop();
        self.validate();
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % FIELD_COUNT;
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + FIELD_COUNT - 1) % FIELD_COUNT;
    }

    /// Letter shortcuts drop a known win probability into the form.
    fn apply_preset(&mut self, c: char) {
        let prob = match c.to_ascii_lowercase() {
            'e' => ROULETTE_WIN_PROB,
            'a' => AMERICAN_WIN_PROB,
            'f' => FAIR_WIN_PROB,
            _ => return,
        };
        self.inputs[4] = format!("{:.4}", prob);
        self.validate();
    }

    pub fn validate(&mut self) {
        self.validation_error = self.validate_fields().err();
    }

    pub fn is_valid(&self) -> bool {
        self.validation_error.is_none()
    }

    fn validate_fields(&self) -> Result<(), String> {
        let balance = parse_field(&self.inputs[0], FIELD_LABELS[0])?;
        if balance < MIN_INITIAL_BALANCE {
            return Err(format!(
                "Initial balance must be at least {}",
                MIN_INITIAL_BALANCE
            ));
        }

        let bet = parse_field(&self.inputs[1], FIELD_LABELS[1])?;
        if bet < MIN_INITIAL_BET {
            return Err(format!("Base bet must be at least {}", MIN_INITIAL_BET));
        }

        let limit = parse_field(&self.inputs[2], FIELD_LABELS[2])?;
        if limit < MIN_TABLE_LIMIT {
            return Err(format!("Table limit must be at least {}", MIN_TABLE_LIMIT));
        }

        let runs: u32 = self.inputs[3]
            .trim()
            .parse()
            .map_err(|_| "Bettors must be a whole number".to_string())?;
        if runs < MIN_SIM_COUNT {
            return Err(format!("Bettors must be at least {}", MIN_SIM_COUNT));
        }

        let prob = parse_field(&self.inputs[4], FIELD_LABELS[4])?;
        // The form never sets a round cap, so a probability of exactly 1
        // would hand the core a run with no reachable stop condition.
        if prob <= 0.0 || prob >= 1.0 {
            return Err("Win probability must be strictly between 0 and 1".to_string());
        }

        Ok(())
    }

    /// Builds the batch config from the form. Call once the form validates;
    /// unparseable fields fall back to the defaults.
    pub fn config(&self) -> SimConfig {
        let defaults = SimConfig::default();
        SimConfig {
            initial_balance: self.inputs[0]
                .trim()
                .parse()
                .unwrap_or(defaults.initial_balance),
            initial_bet: self.inputs[1].trim().parse().unwrap_or(defaults.initial_bet),
            table_limit: self.inputs[2].trim().parse().unwrap_or(defaults.table_limit),
            num_runs: self.inputs[3].trim().parse().unwrap_or(defaults.num_runs),
            win_prob: self.inputs[4].trim().parse().unwrap_or(defaults.win_prob),
            ..defaults
        }
    }
}

fn parse_field(input: &str, label: &str) -> Result<f64, String> {
    input
        .trim()
        .parse()
        .map_err(|_| format!("{} must be a number", label))
}

/// Whole amounts print without a fraction, others keep two places.
fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let screen = SetupScreen::new(&SimConfig::default());
        assert!(screen.is_valid());
        assert_eq!(screen.inputs[0], "1000");
        assert_eq!(screen.inputs[4], "0.4865");
    }

    #[test]
    fn test_emptied_field_invalidates() {
        let mut screen = SetupScreen::new(&SimConfig::default());
        screen.selected = 1;
        for _ in 0..10 {
            screen.handle_backspace();
        }
        assert!(!screen.is_valid());
        assert!(screen.validation_error.as_deref().unwrap().contains("Base Bet"));
    }

    #[test]
    fn test_double_decimal_point_rejected() {
        let mut screen = SetupScreen::new(&SimConfig::default());
        screen.selected = 0;
        screen.handle_char_input('.');
        screen.handle_char_input('5');
        screen.handle_char_input('.');
        assert!(!screen.is_valid());
    }

    #[test]
    fn test_probability_bounds() {
        let mut screen = SetupScreen::new(&SimConfig::default());
        screen.inputs[4] = "0".to_string();
        screen.validate();
        assert!(!screen.is_valid());

        screen.inputs[4] = "1.5".to_string();
        screen.validate();
        assert!(!screen.is_valid());

        screen.inputs[4] = "0.9999".to_string();
        screen.validate();
        assert!(screen.is_valid());
    }

    #[test]
    fn test_certain_win_probability_is_rejected() {
        // A bettor who cannot lose never reaches a stop condition, and
        // form configs carry no round cap, so exactly 1 must not pass.
        let mut screen = SetupScreen::new(&SimConfig::default());
        screen.inputs[4] = "1.0".to_string();
        screen.validate();
        assert!(!screen.is_valid());
        assert!(screen
            .validation_error
            .as_deref()
            .unwrap()
            .contains("strictly between 0 and 1"));
        assert_eq!(screen.config().max_rounds, None);
    }

    #[test]
    fn test_selection_wraps_both_ways() {
        let mut screen = SetupScreen::new(&SimConfig::default());
        screen.select_prev();
        assert_eq!(screen.selected, FIELD_COUNT - 1);
        screen.select_next();
        assert_eq!(screen.selected, 0);
    }

    #[test]
    fn test_preset_shortcut_sets_probability() {
        let mut screen = SetupScreen::new(&SimConfig::default());
        screen.handle_char_input('f');
        assert_eq!(screen.inputs[4], "0.5000");
        screen.handle_char_input('a');
        assert_eq!(screen.inputs[4], "0.4737");
    }

    #[test]
    fn test_config_round_trip() {
        let mut screen = SetupScreen::new(&SimConfig::default());
        screen.inputs[0] = "250.5".to_string();
        screen.inputs[1] = "2".to_string();
        screen.inputs[2] = "64".to_string();
        screen.inputs[3] = "3".to_string();
        screen.inputs[4] = "0.5".to_string();
        screen.validate();
        assert!(screen.is_valid());

        let config = screen.config();
        assert_eq!(config.initial_balance, 250.5);
        assert_eq!(config.initial_bet, 2.0);
        assert_eq!(config.table_limit, 64.0);
        assert_eq!(config.num_runs, 3);
        assert_eq!(config.win_prob, 0.5);
    }
}
