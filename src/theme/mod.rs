use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

pub mod catppuccin;
pub mod glyphs;
pub mod gruvbox;
pub mod nord;
pub mod palette;

pub use palette::{dim_color, Palette};

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub border: Style,
    pub border_focus: Style,

    pub graph_node_wc: Style,
    pub graph_node_mutable: Style,
    pub graph_node_immutable: Style,
    pub graph_node_conflict: Style,
    pub graph_node_trunk: Style,
    pub graph_node_root: Style,
    pub graph_line: Style,
    pub graph_lanes: Vec<Style>,

    pub change_id_mutable: Style,
    pub change_id_immutable: Style,
    pub change_id_wc: Style,
    pub change_id_prefix: Style,
    pub commit_id_prefix: Style,
    pub bookmark: Style,
    pub git_head: Style,

    pub diff_header: Style,
    pub diff_add: Style,
    pub diff_remove: Style,
    pub diff_hunk: Style,
    pub diff_hunk_flash: Style,
    pub diff_context: Style,
    pub diff_modify: Style,
    pub diff_conflict: Style,

    pub author: Style,
    pub timestamp: Style,
    pub commit_id_dim: Style,

    pub status_info: Style,
    pub status_warn: Style,
    pub status_error: Style,

    pub header_logo: Style,
    pub header_repo: Style,
    pub header_branch: Style,
    pub header_stats: Style,
    pub header_active: Style,
    pub header_item: Style,
    pub header: Style,

    pub footer_segment_key: Style,
    pub footer_segment_val: Style,
    pub footer_group_name: Style,
    pub footer: Style,

    pub highlight: Style,
    pub list_selected: Style,
    pub list_item: Style,
    pub dimmed: Style,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteType {
    #[default]
    CatppuccinMocha,
    Nord,
    Gruvbox,
}

impl PaletteType {
    /// Accepts the config spelling (`catppuccinmocha`) as well as the
    /// shorter `catppuccin`, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "catppuccinmocha" | "catppuccin" | "mocha" => Some(PaletteType::CatppuccinMocha),
            "nord" => Some(PaletteType::Nord),
            "gruvbox" => Some(PaletteType::Gruvbox),
            _ => None,
        }
    }
}

impl Theme {
    #[must_use]
    pub fn from_palette_type(t: PaletteType) -> Self {
        match t {
            PaletteType::CatppuccinMocha => Self::from_palette(&catppuccin::CATPPUCCIN_MOCHA),
            PaletteType::Nord => Self::from_palette(&nord::NORD),
            PaletteType::Gruvbox => Self::from_palette(&gruvbox::GRUVBOX),
        }
    }

    #[must_use]
    pub fn from_palette(p: &Palette) -> Self {
        let dim = |c: Color| fg(c).add_modifier(Modifier::DIM);

        Self {
            border: fg(p.surface2),
            border_focus: fg(p.blue),

            graph_node_wc: bold(p.blue),
            graph_node_mutable: bold(p.mauve),
            graph_node_immutable: bold(p.overlay1),
            graph_node_conflict: bold(p.red),
            graph_node_trunk: bold(p.peach),
            graph_node_root: dim(p.overlay0),
            graph_line: fg(p.overlay0),
            graph_lanes: [p.red, p.green, p.yellow, p.blue, p.mauve, p.teal, p.peach]
                .into_iter()
                .map(fg)
                .collect(),

            change_id_mutable: bold(p.mauve),
            change_id_immutable: bold(p.overlay1),
            change_id_wc: bold(p.blue),
            change_id_prefix: bold(p.pink),
            commit_id_prefix: bold(p.sapphire),
            bookmark: bold(p.green),
            git_head: fg(p.flamingo).add_modifier(Modifier::ITALIC),
            author: bold(p.peach),
            timestamp: dim(p.subtext0),
            commit_id_dim: dim(p.surface2),

            diff_header: bold(p.blue),
            diff_add: fg(p.green),
            diff_remove: fg(p.red),
            diff_hunk: fg(p.teal),
            diff_hunk_flash: bold(p.teal).bg(dim_color(p.teal, 0.25)),
            diff_context: fg(p.text),
            diff_modify: fg(p.yellow),
            diff_conflict: bold(p.red),

            status_info: badge(p.blue, p.crust),
            status_warn: badge(p.yellow, p.crust),
            status_error: badge(p.red, p.crust),

            header_logo: badge(p.blue, p.crust),
            header_repo: badge(p.surface1, p.text),
            header_branch: badge(p.mauve, p.crust),
            header_stats: fg(p.subtext1).bg(p.surface0),
            header_active: badge(p.green, p.crust),
            header_item: fg(p.text).bg(p.surface0),
            header: fg(p.text).bg(p.base),

            footer_segment_key: badge(p.surface0, p.blue),
            footer_segment_val: fg(p.text).bg(p.base),
            footer_group_name: dim(p.subtext0),
            footer: fg(p.subtext0).bg(p.crust),

            highlight: Style::default().bg(p.surface0).add_modifier(Modifier::BOLD),
            list_selected: badge(p.blue, p.crust),
            list_item: fg(p.text),
            dimmed: dim(p.overlay0),
        }
    }
}

fn fg(color: Color) -> Style {
    Style::default().fg(color)
}

fn bold(color: Color) -> Style {
    fg(color).add_modifier(Modifier::BOLD)
}

/// Bold text on a filled background, for header and status segments.
fn badge(bg: Color, text: Color) -> Style {
    bold(text).bg(bg)
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_palette_type(PaletteType::CatppuccinMocha)
    }
}
