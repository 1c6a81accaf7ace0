use crate::app::config::GraphStyle;
use crate::app::ui;
use crate::domain::graph_layout::{simple_symbol, GraphRenderer, GraphSymbol, BLANK};
use crate::domain::models::{FileStatus, Revision};
use crate::domain::prefix::{format_with_prefix, UniquePrefixIndex};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, Row, StatefulWidget, Table, TableState},
};

pub struct RevisionGraph<'a> {
    pub revisions: &'a [Revision],
    pub theme: &'a Theme,
    pub show_diffs: bool,
    pub selected_file_index: Option<usize>,
    pub graph_style: GraphStyle,
    pub trunk_bookmark: &'a str,
    pub change_id_prefixes: &'a UniquePrefixIndex,
    pub commit_id_prefixes: &'a UniquePrefixIndex,
}

/// Graph text for one revision: the node line split around its symbol and
/// the connector repeated on every following line of the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphCells {
    pub before: String,
    pub symbol: GraphSymbol,
    pub after: String,
    pub connector: String,
}

impl GraphCells {
    fn width(&self) -> usize {
        let node = self.before.chars().count() + 2 + self.after.chars().count();
        node.max(self.connector.chars().count())
    }
}

/// Lays out the whole list in display order with a fresh renderer.
#[must_use]
pub fn layout_graph(revisions: &[Revision], style: GraphStyle) -> Vec<GraphCells> {
    match style {
        GraphStyle::Full => {
            let mut renderer = GraphRenderer::new();
            revisions
                .iter()
                .map(|rev| {
                    let placed = renderer.place_revision(rev);
                    GraphCells {
                        before: placed.before,
                        symbol: placed.symbol,
                        after: placed.after,
                        connector: renderer.connector_line(),
                    }
                })
                .collect()
        }
        GraphStyle::Simple => {
            let last = revisions.len().saturating_sub(1);
            revisions
                .iter()
                .enumerate()
                .map(|(i, rev)| {
                    let (symbol, connector) = simple_symbol(rev, i == last);
                    GraphCells {
                        before: String::new(),
                        symbol,
                        after: String::new(),
                        connector: connector.to_string(),
                    }
                })
                .collect()
        }
    }
}

impl RevisionGraph<'_> {
    /// Colors each two-character column with its lane color.
    fn lane_spans(&self, text: &str, first_char: usize) -> Vec<Span<'static>> {
        let lanes = &self.theme.graph_lanes;
        text.chars()
            .enumerate()
            .map(|(i, c)| {
                let s = c.to_string();
                if s == BLANK {
                    Span::raw(s)
                } else if lanes.is_empty() {
                    Span::styled(s, self.theme.graph_line)
                } else {
                    let column = (first_char + i) / 2;
                    Span::styled(s, lanes[column % lanes.len()])
                }
            })
            .collect()
    }

    fn node_span(&self, rev: &Revision, symbol: GraphSymbol) -> Span<'static> {
        if rev.has_bookmark(self.trunk_bookmark) && !rev.is_working_copy {
            return Span::styled("◆", self.theme.graph_node_trunk);
        }
        let style = match symbol {
            GraphSymbol::WorkingCopy => self.theme.graph_node_wc,
            GraphSymbol::Root => self.theme.graph_node_root,
            GraphSymbol::Revision if rev.has_conflict => self.theme.graph_node_conflict,
            GraphSymbol::Revision if rev.is_immutable => self.theme.graph_node_immutable,
            GraphSymbol::Revision => self.theme.graph_node_mutable,
        };
        Span::styled(symbol.glyph(), style)
    }

    fn metadata_line(&self, rev: &Revision) -> Line<'static> {
        let change_id = rev.change_id_short();
        if rev.is_root {
            return Line::from(vec![
                Span::styled("~ ", self.theme.graph_node_root),
                Span::styled(change_id.to_string(), self.theme.dimmed),
            ]);
        }

        let tail_style = if rev.is_working_copy {
            self.theme.change_id_wc
        } else if rev.is_immutable {
            self.theme.change_id_immutable
        } else {
            self.theme.change_id_mutable
        };
        let mut spans = format_with_prefix(
            change_id,
            self.change_id_prefixes.prefix_len(change_id),
            self.theme.change_id_prefix,
            tail_style,
        );
        spans.push(Span::raw(" "));
        spans.push(Span::styled(rev.author.clone(), self.theme.author));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(rev.timestamp.clone(), self.theme.timestamp));
        spans.push(Span::raw(" "));
        if rev.is_git_head {
            spans.push(Span::styled("git_head()", self.theme.git_head));
            spans.push(Span::raw(" "));
        }
        for bookmark in &rev.bookmarks {
            spans.push(Span::styled(bookmark.clone(), self.theme.bookmark));
            spans.push(Span::raw(" "));
        }
        let commit_id = rev.commit_id_short();
        spans.extend(format_with_prefix(
            commit_id,
            self.commit_id_prefixes.prefix_len(commit_id),
            self.theme.commit_id_prefix,
            self.theme.commit_id_dim,
        ));
        for workspace in &rev.workspaces {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!("{workspace}@"), self.theme.change_id_wc));
        }
        if rev.has_conflict {
            spans.push(Span::styled(" conflict", self.theme.diff_conflict));
        }
        Line::from(spans)
    }

    fn description_line(&self, rev: &Revision) -> Line<'static> {
        match rev.summary() {
            "" => Line::from(Span::styled("(no description)", self.theme.timestamp)),
            summary => Line::from(summary.to_string()),
        }
    }

    fn file_lines(&self, rev: &Revision) -> Vec<Line<'static>> {
        rev.changed_files
            .iter()
            .enumerate()
            .map(|(i, file)| {
                let style = if self.selected_file_index == Some(i) {
                    self.theme.list_selected
                } else {
                    match file.status {
                        FileStatus::Added => self.theme.diff_add,
                        FileStatus::Modified => self.theme.diff_modify,
                        FileStatus::Deleted => self.theme.diff_remove,
                        FileStatus::Conflicted => self.theme.diff_conflict,
                    }
                };
                Line::from(Span::styled(
                    format!("{} {}", file.status.marker(), file.path),
                    style,
                ))
            })
            .collect()
    }
}

impl StatefulWidget for RevisionGraph<'_> {
    type State = TableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut TableState) {
        let cells = layout_graph(self.revisions, self.graph_style);
        let graph_width = cells.iter().map(GraphCells::width).max().unwrap_or(0) + 1;

        let rows: Vec<Row> = self
            .revisions
            .iter()
            .zip(&cells)
            .enumerate()
            .map(|(i, (rev, graph))| {
                let is_selected = state.selected() == Some(i);
                let row_height = ui::calculate_row_height(rev, is_selected, self.show_diffs);

                let before_len = graph.before.chars().count();
                let mut node = self.lane_spans(&graph.before, 0);
                node.push(self.node_span(rev, graph.symbol));
                node.push(Span::raw(" "));
                node.extend(self.lane_spans(&graph.after, before_len + 2));

                let mut graph_lines = vec![Line::from(node)];
                for _ in 1..row_height {
                    graph_lines.push(Line::from(self.lane_spans(&graph.connector, 0)));
                }

                let mut detail_lines = vec![self.metadata_line(rev), self.description_line(rev)];
                if is_selected && self.show_diffs {
                    detail_lines.extend(self.file_lines(rev));
                }

                Row::new(vec![Cell::from(graph_lines), Cell::from(detail_lines)])
                    .height(row_height)
                    .style(Style::default())
            })
            .collect();

        let width = u16::try_from(graph_width).unwrap_or(u16::MAX);
        let table = Table::new(rows, [Constraint::Length(width), Constraint::Min(0)])
            .row_highlight_style(self.theme.highlight)
            .highlight_symbol(" ");

        StatefulWidget::render(table, area, buf, state);
    }
}
