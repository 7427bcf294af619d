// TUI widget modules for each screen panel.

pub mod loading;
pub mod quit_confirm;
pub mod roster_form;
pub mod score_compare;
pub mod status_bar;
pub mod team_card;
