//! Interactive terminal renderer.
//!
//! Calls are recorded into a [`Figure`]; `show` paints it on a braille
//! canvas in the alternate screen and blocks until the window is closed.

use super::call::{Directive, DrawCall, Trace};
use super::figure::Figure;
use super::geometry::{self, Bounds, BoxStats};
use super::palette::{self, Dash};
use super::theme::{Theme, ThemeColors};
use super::Renderer;
use crate::error::{PlotError, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Context, Line as Segment},
        Block, Borders, Paragraph,
    },
    Frame, Terminal,
};
use std::f64::consts::TAU;
use std::io::{self, IsTerminal, Write};
use tracing::{debug, info, warn};
use unicode_width::UnicodeWidthStr;

/// Sub-segments per polyline segment, the unit dash patterns count in.
const DASH_PIECES: usize = 8;
const X_TICKS: usize = 6;
const Y_TICKS: usize = 5;
const KDE_POINTS: usize = 60;
const VIOLIN_HALF_WIDTH: f64 = 0.4;
const BOX_HALF_WIDTH: f64 = 0.25;
const PIE_EXTENT: f64 = 1.4;
const SIDE_PANEL_MAX_WIDTH: u16 = 30;

/// Renders into the terminal's alternate screen.
#[derive(Debug)]
pub struct TerminalRenderer {
    figure: Figure,
    theme: Theme,
}

impl TerminalRenderer {
    /// Create a renderer with the given color theme.
    pub fn new(theme: Theme) -> Self {
        Self {
            figure: Figure::new(),
            theme,
        }
    }

    /// The figure recorded so far.
    pub fn figure(&self) -> &Figure {
        &self.figure
    }
}

impl Renderer for TerminalRenderer {
    fn draw(&mut self, call: DrawCall) -> Result<()> {
        self.figure.draw(call)
    }

    fn apply(&mut self, directive: Directive) -> Result<()> {
        self.figure.apply(directive)
    }

    fn show(&mut self) -> Result<()> {
        self.figure.show()?;
        if !io::stdout().is_terminal() {
            return Err(PlotError::Terminal(
                "standard output is not a terminal; rerun with --headless".to_string(),
            ));
        }
        info!(
            theme = self.theme.name(),
            calls = self.figure.calls().len(),
            "Opening plot window"
        );

        enable_raw_mode()?;
        let _restore = RestoreGuard::new(io::stdout());
        execute!(io::stdout(), EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        let colors = ThemeColors::from_theme(self.theme);
        let res = run(&mut terminal, &self.figure, &colors);
        let cursor = terminal.show_cursor().map_err(PlotError::from);
        res.and(cursor)
    }
}

/// Leaves raw mode and the alternate screen when dropped, including on
/// early returns from a failed setup.
struct RestoreGuard<W: Write> {
    out: W,
}

impl<W: Write> RestoreGuard<W> {
    fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Drop for RestoreGuard<W> {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            warn!(error = %err, "Failed to leave raw mode");
        }
        if let Err(err) = execute!(self.out, LeaveAlternateScreen) {
            warn!(error = %err, "Failed to leave alternate screen");
        }
    }
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    figure: &Figure,
    colors: &ThemeColors,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, figure, colors))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => {
                    debug!("Closing plot window");
                    return Ok(());
                }
                _ => {}
            }
        }
    }
}

/// Paint the whole figure into the frame.
fn draw(f: &mut Frame<'_>, figure: &Figure, colors: &ThemeColors) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    let legend = if figure.legend() {
        legend_items(figure, colors)
    } else {
        Vec::new()
    };
    let side_width = side_panel_width(&legend, figure.colorbar());

    let plot_area = if side_width > 0 {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(side_width)])
            .split(chunks[0]);
        draw_side_panel(f, cols[1], figure, &legend, colors);
        cols[0]
    } else {
        chunks[0]
    };

    draw_plot(f, plot_area, figure, colors);
    draw_footer(f, chunks[1], colors);
}

/// Terminal color of a color token under the theme.
fn ink(token: &str, colors: &ThemeColors) -> Color {
    match token {
        "black" => colors.text,
        _ => palette::color(token),
    }
}

fn legend_items(figure: &Figure, colors: &ThemeColors) -> Vec<(String, Color)> {
    let mut items: Vec<(String, Color)> = figure
        .legend_entries()
        .into_iter()
        .map(|(label, token)| (label.to_string(), ink(token, colors)))
        .collect();
    if let Some(DrawCall::Pie { values, labels, .. }) = figure.last_pie() {
        items.extend(
            labels
                .iter()
                .take(values.len())
                .enumerate()
                .map(|(i, label)| (label.clone(), ink(palette::cycle_color(i), colors))),
        );
    }
    items
}

fn side_panel_width(legend: &[(String, Color)], colorbar: Option<&str>) -> u16 {
    let legend_width = legend
        .iter()
        .map(|(label, _)| label.width() + 6)
        .max()
        .unwrap_or(0);
    let colorbar_width = colorbar.map(|label| label.width().max(8) + 4).unwrap_or(0);
    let width = legend_width.max(colorbar_width) as u16;
    width.min(SIDE_PANEL_MAX_WIDTH)
}

fn hexbin_max_count(figure: &Figure) -> usize {
    figure
        .calls()
        .iter()
        .filter_map(|call| match call {
            DrawCall::Hexbin { x, y, grid_size, .. } => {
                Some(geometry::hexbin(x, y, *grid_size).max_count())
            }
            _ => None,
        })
        .max()
        .unwrap_or(0)
}

fn draw_side_panel(
    f: &mut Frame<'_>,
    area: Rect,
    figure: &Figure,
    legend: &[(String, Color)],
    colors: &ThemeColors,
) {
    let legend_height = if legend.is_empty() {
        0
    } else {
        (legend.len() as u16 + 2).min(area.height)
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(legend_height), Constraint::Min(0)])
        .split(area);

    if !legend.is_empty() {
        let lines: Vec<Line<'_>> = legend
            .iter()
            .map(|(label, color)| {
                Line::from(vec![
                    Span::styled("━━ ", Style::default().fg(*color)),
                    Span::styled(label.as_str(), Style::default().fg(colors.text)),
                ])
            })
            .collect();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border))
            .title(" Legend ")
            .title_style(Style::default().fg(colors.heading));
        f.render_widget(
            Paragraph::new(lines)
                .block(block)
                .style(Style::default().bg(colors.bg)),
            rows[0],
        );
    }

    if let Some(label) = figure.colorbar() {
        draw_colorbar(f, rows[1], label, hexbin_max_count(figure), colors);
    }
}

fn draw_colorbar(f: &mut Frame<'_>, area: Rect, label: &str, max: usize, colors: &ThemeColors) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .title(format!(" {label} "))
        .title_style(Style::default().fg(colors.heading));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let steps = inner.height.saturating_sub(1).max(1) as f64;
    let lines: Vec<Line<'_>> = (0..inner.height)
        .map(|row| {
            let t = 1.0 - row as f64 / steps;
            let mut spans = vec![Span::styled("███", Style::default().fg(palette::blues(t)))];
            if row == 0 {
                spans.push(Span::styled(
                    format!(" {max}"),
                    Style::default().fg(colors.text),
                ));
            } else if row + 1 == inner.height {
                spans.push(Span::styled(" 0", Style::default().fg(colors.text)));
            }
            Line::from(spans)
        })
        .collect();
    f.render_widget(
        Paragraph::new(lines).style(Style::default().bg(colors.bg)),
        inner,
    );
}

fn draw_footer(f: &mut Frame<'_>, area: Rect, colors: &ThemeColors) {
    let footer = Paragraph::new(" q/Esc/Enter: close")
        .style(Style::default().fg(colors.status_fg).bg(colors.status_bg));
    f.render_widget(footer, area);
}

fn draw_plot(f: &mut Frame<'_>, area: Rect, figure: &Figure, colors: &ThemeColors) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg))
        .title_alignment(Alignment::Center);
    if !figure.title().is_empty() {
        block = block.title(Span::styled(
            format!(" {} ", figure.title()),
            Style::default()
                .fg(colors.heading)
                .add_modifier(Modifier::BOLD),
        ));
    }
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width < 8 || inner.height < 4 {
        return;
    }

    match figure.bounds() {
        Some(bounds) => draw_cartesian(f, inner, figure, bounds, colors),
        None => draw_pie_canvas(f, inner, figure, colors),
    }
}

/// Categorical X positions and labels for box and violin plots.
fn category_ticks(figure: &Figure) -> Option<Vec<(f64, String)>> {
    figure.calls().iter().find_map(|call| match call {
        DrawCall::Box { groups, labels } => Some(
            (0..groups.len())
                .map(|i| {
                    let label = labels.get(i).cloned().unwrap_or_else(|| (i + 1).to_string());
                    ((i + 1) as f64, label)
                })
                .collect(),
        ),
        DrawCall::Violin { groups, .. } => Some(
            (0..groups.len())
                .map(|i| ((i + 1) as f64, (i + 1).to_string()))
                .collect(),
        ),
        _ => None,
    })
}

fn draw_cartesian(
    f: &mut Frame<'_>,
    area: Rect,
    figure: &Figure,
    bounds: Bounds,
    colors: &ThemeColors,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let y_ticks: Vec<(f64, String)> = geometry::ticks(bounds.y[0], bounds.y[1], Y_TICKS)
        .into_iter()
        .map(|t| (t, format_axis_label(t)))
        .collect();
    let tick_width = y_ticks
        .iter()
        .map(|(_, label)| label.width())
        .max()
        .unwrap_or(0) as u16
        + 1;

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(tick_width), Constraint::Min(1)])
        .split(rows[1]);
    let canvas_area = body[1];
    let bounds = if figure.equal_aspect() {
        fit_aspect(bounds, canvas_area)
    } else {
        bounds
    };

    let x_ticks: Vec<(f64, String)> = category_ticks(figure).unwrap_or_else(|| {
        geometry::ticks(bounds.x[0], bounds.x[1], X_TICKS)
            .into_iter()
            .map(|t| (t, format_axis_label(t)))
            .collect()
    });

    let label_style = Style::default().fg(colors.label);
    f.render_widget(
        Paragraph::new(figure.y_label()).style(label_style),
        rows[0],
    );
    f.render_widget(
        Paragraph::new(figure.x_label())
            .style(label_style)
            .alignment(Alignment::Center),
        rows[3],
    );

    let text_style = Style::default().fg(colors.text);
    let buf = f.buffer_mut();
    for (value, label) in &y_ticks {
        let Some(row) = to_cell(*value, bounds.y, canvas_area.height) else {
            continue;
        };
        let y = canvas_area.bottom() - 1 - row;
        let text = format!("{:>width$}", label, width = (tick_width - 1) as usize);
        buf.set_string(body[0].x, y, text, text_style);
    }
    for (value, label) in &x_ticks {
        let Some(col) = to_cell(*value, bounds.x, canvas_area.width) else {
            continue;
        };
        let width = label.width() as u16;
        let centre = canvas_area.x + col;
        let right_limit = rows[2].right().saturating_sub(width);
        let x = centre
            .saturating_sub(width / 2)
            .clamp(rows[2].x, right_limit.max(rows[2].x));
        buf.set_string(x, rows[2].y, label, text_style);
    }

    let res = Resolution::new(bounds, canvas_area);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(colors.bg)
        .x_bounds(bounds.x)
        .y_bounds(bounds.y)
        .paint(|ctx| {
            if figure.grid() {
                paint_grid(ctx, bounds, &x_ticks, &y_ticks, colors.grid);
                ctx.layer();
            }
            for call in figure.calls() {
                paint_call(ctx, call, &res, colors);
            }
        });
    f.render_widget(canvas, canvas_area);
}

fn draw_pie_canvas(f: &mut Frame<'_>, area: Rect, figure: &Figure, colors: &ThemeColors) {
    let bounds = fit_aspect(
        Bounds {
            x: [-PIE_EXTENT, PIE_EXTENT],
            y: [-PIE_EXTENT, PIE_EXTENT],
        },
        area,
    );
    let res = Resolution::new(bounds, area);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(colors.bg)
        .x_bounds(bounds.x)
        .y_bounds(bounds.y)
        .paint(|ctx| {
            if let Some(pie) = figure.last_pie() {
                paint_call(ctx, pie, &res, colors);
            }
        });
    f.render_widget(canvas, area);
}

/// Cell offset of `value` along an axis of `cells` cells, if inside.
fn to_cell(value: f64, [lo, hi]: [f64; 2], cells: u16) -> Option<u16> {
    if cells == 0 || hi <= lo || value < lo || value > hi {
        return None;
    }
    let offset = ((value - lo) / (hi - lo) * (cells - 1) as f64).round();
    Some(offset as u16)
}

/// Widen `bounds` so one data unit spans the same distance on screen along
/// both axes. Cells are taken to be twice as tall as they are wide.
fn fit_aspect(bounds: Bounds, area: Rect) -> Bounds {
    let width = area.width.max(1) as f64;
    let height = area.height.max(1) as f64 * 2.0;
    let x_span = bounds.x[1] - bounds.x[0];
    let y_span = bounds.y[1] - bounds.y[0];
    let scale = (x_span / width).max(y_span / height);
    let cx = (bounds.x[0] + bounds.x[1]) / 2.0;
    let cy = (bounds.y[0] + bounds.y[1]) / 2.0;
    let (half_w, half_h) = (scale * width / 2.0, scale * height / 2.0);
    Bounds {
        x: [cx - half_w, cx + half_w],
        y: [cy - half_h, cy + half_h],
    }
}

/// Data size of one braille dot.
#[derive(Debug, Clone, Copy)]
struct Resolution {
    bounds: Bounds,
    dx: f64,
    dy: f64,
}

impl Resolution {
    fn new(bounds: Bounds, area: Rect) -> Self {
        let dx = (bounds.x[1] - bounds.x[0]) / (area.width.max(1) as f64 * 2.0);
        let dy = (bounds.y[1] - bounds.y[0]) / (area.height.max(1) as f64 * 4.0);
        Self {
            bounds,
            dx: dx.max(f64::MIN_POSITIVE),
            dy: dy.max(f64::MIN_POSITIVE),
        }
    }
}

fn segment(ctx: &mut Context<'_>, (x1, y1): (f64, f64), (x2, y2): (f64, f64), color: Color) {
    ctx.draw(&Segment {
        x1,
        y1,
        x2,
        y2,
        color,
    });
}

fn paint_grid(
    ctx: &mut Context<'_>,
    bounds: Bounds,
    x_ticks: &[(f64, String)],
    y_ticks: &[(f64, String)],
    color: Color,
) {
    for (x, _) in x_ticks {
        segment(ctx, (*x, bounds.y[0]), (*x, bounds.y[1]), color);
    }
    for (y, _) in y_ticks {
        segment(ctx, (bounds.x[0], *y), (bounds.x[1], *y), color);
    }
}

fn polyline(ctx: &mut Context<'_>, points: &[(f64, f64)], dash: Dash, color: Color) {
    let mut piece = 0;
    for pair in points.windows(2) {
        let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
        for step in 0..DASH_PIECES {
            if dash.keeps(piece) {
                let t0 = step as f64 / DASH_PIECES as f64;
                let t1 = (step + 1) as f64 / DASH_PIECES as f64;
                segment(
                    ctx,
                    (x1 + (x2 - x1) * t0, y1 + (y2 - y1) * t0),
                    (x1 + (x2 - x1) * t1, y1 + (y2 - y1) * t1),
                    color,
                );
            }
            piece += 1;
        }
    }
}

fn markers(ctx: &mut Context<'_>, points: &[(f64, f64)], glyph: &'static str, color: Color) {
    for &(x, y) in points {
        if x.is_finite() && y.is_finite() {
            ctx.print(x, y, Span::styled(glyph, Style::default().fg(color)));
        }
    }
}

/// Fill `[x0, x1] x [y0, y1]` with vertical strokes one dot apart.
fn fill_rect(
    ctx: &mut Context<'_>,
    res: &Resolution,
    [x0, x1]: [f64; 2],
    [y0, y1]: [f64; 2],
    color: Color,
) {
    let lo = x0.min(x1).max(res.bounds.x[0]);
    let hi = x0.max(x1).min(res.bounds.x[1]);
    if hi < lo {
        return;
    }
    let columns = ((hi - lo) / res.dx).ceil() as usize;
    for i in 0..=columns {
        let x = (lo + i as f64 * res.dx).min(hi);
        segment(ctx, (x, y0), (x, y1), color);
    }
}

fn paint_trace_line(
    ctx: &mut Context<'_>,
    trace: &Trace,
    path: &[(f64, f64)],
    line_style: &str,
    marker: &str,
    colors: &ThemeColors,
) {
    let color = ink(trace.color, colors);
    polyline(ctx, path, Dash::from_token(line_style), color);
    markers(ctx, &trace.points(), palette::marker_glyph(marker), color);
}

fn paint_call(ctx: &mut Context<'_>, call: &DrawCall, res: &Resolution, colors: &ThemeColors) {
    match call {
        DrawCall::Line {
            trace,
            line_style,
            marker,
        } => paint_trace_line(ctx, trace, &trace.points(), line_style, marker, colors),
        DrawCall::Step {
            trace,
            line_style,
            marker,
        } => {
            let path = geometry::mid_steps(&trace.points());
            paint_trace_line(ctx, trace, &path, line_style, marker, colors);
        }
        DrawCall::Scatter(trace) => {
            markers(ctx, &trace.points(), "●", ink(trace.color, colors));
        }
        DrawCall::Bar { trace, width } => {
            let color = ink(trace.color, colors);
            for (x, y) in trace.points() {
                fill_rect(ctx, res, [x - width / 2.0, x + width / 2.0], [0.0, y], color);
            }
        }
        DrawCall::Histogram {
            values,
            bins,
            alpha,
            color,
            ..
        } => {
            let edge = ink(color, colors);
            let fill = palette::blend(edge, colors.bg, *alpha);
            for bin in geometry::histogram(values, *bins) {
                let height = bin.count as f64;
                fill_rect(ctx, res, [bin.lo, bin.hi], [0.0, height], fill);
                segment(ctx, (bin.lo, height), (bin.hi, height), edge);
            }
        }
        DrawCall::Area { trace, alpha } => {
            let edge = ink(trace.color, colors);
            let fill = palette::blend(edge, colors.bg, *alpha);
            let points = trace.points();
            for pair in points.windows(2) {
                paint_area_segment(ctx, res, pair[0], pair[1], fill);
            }
            polyline(ctx, &points, Dash::Solid, edge);
        }
        DrawCall::Box { groups, .. } => {
            for (i, group) in groups.iter().enumerate() {
                if let Some(stats) = BoxStats::from_values(group) {
                    paint_box(ctx, (i + 1) as f64, &stats, colors);
                }
            }
        }
        DrawCall::Violin { groups, show_means } => {
            for (i, group) in groups.iter().enumerate() {
                paint_violin(ctx, (i + 1) as f64, group, *show_means, res, colors);
            }
        }
        DrawCall::Hexbin {
            x,
            y,
            grid_size,
            colormap,
        } => {
            let cmap = palette::colormap(colormap).unwrap_or(palette::blues);
            let grid = geometry::hexbin(x, y, *grid_size);
            let max = grid.max_count().max(1) as f64;
            for cell in &grid.cells {
                let color = cmap(cell.count as f64 / max);
                paint_hexagon(ctx, res, (cell.x, cell.y), grid.dx / 2.0, grid.dy / 3.0, color);
            }
        }
        DrawCall::Pie {
            values,
            labels,
            autopct,
        } => paint_pie(ctx, res, values, labels, autopct, colors),
    }
}

fn paint_area_segment(
    ctx: &mut Context<'_>,
    res: &Resolution,
    (xa, ya): (f64, f64),
    (xb, yb): (f64, f64),
    color: Color,
) {
    if !(xa.is_finite() && xb.is_finite() && ya.is_finite() && yb.is_finite()) {
        return;
    }
    let ((x0, y0), (x1, y1)) = if xa <= xb {
        ((xa, ya), (xb, yb))
    } else {
        ((xb, yb), (xa, ya))
    };
    let columns = ((x1 - x0) / res.dx).ceil() as usize;
    for i in 0..=columns {
        let x = (x0 + i as f64 * res.dx).min(x1);
        let t = if x1 > x0 { (x - x0) / (x1 - x0) } else { 0.0 };
        segment(ctx, (x, 0.0), (x, y0 + (y1 - y0) * t), color);
    }
}

fn paint_box(ctx: &mut Context<'_>, position: f64, stats: &BoxStats, colors: &ThemeColors) {
    let (left, right) = (position - BOX_HALF_WIDTH, position + BOX_HALF_WIDTH);
    let outline = colors.text;

    segment(ctx, (left, stats.q1), (right, stats.q1), outline);
    segment(ctx, (left, stats.q3), (right, stats.q3), outline);
    segment(ctx, (left, stats.q1), (left, stats.q3), outline);
    segment(ctx, (right, stats.q1), (right, stats.q3), outline);
    segment(
        ctx,
        (left, stats.median),
        (right, stats.median),
        palette::color("orange"),
    );

    let cap = BOX_HALF_WIDTH / 2.0;
    segment(ctx, (position, stats.q1), (position, stats.whisker_lo), outline);
    segment(ctx, (position, stats.q3), (position, stats.whisker_hi), outline);
    segment(
        ctx,
        (position - cap, stats.whisker_lo),
        (position + cap, stats.whisker_lo),
        outline,
    );
    segment(
        ctx,
        (position - cap, stats.whisker_hi),
        (position + cap, stats.whisker_hi),
        outline,
    );

    let outliers: Vec<(f64, f64)> = stats.outliers.iter().map(|&v| (position, v)).collect();
    markers(ctx, &outliers, "o", outline);
}

fn paint_violin(
    ctx: &mut Context<'_>,
    position: f64,
    group: &[f64],
    show_means: bool,
    res: &Resolution,
    colors: &ThemeColors,
) {
    let body = palette::color("blue");
    let density = geometry::kde(group, KDE_POINTS);
    let peak = density.iter().map(|(_, d)| *d).fold(0.0, f64::max);
    if peak <= 0.0 {
        return;
    }
    let scale = VIOLIN_HALF_WIDTH / peak;
    let fill = palette::blend(body, colors.bg, 0.6);
    for pair in density.windows(2) {
        let ((ya, da), (yb, db)) = (pair[0], pair[1]);
        let rows = ((yb - ya) / res.dy).ceil().max(1.0) as usize;
        for i in 0..=rows {
            let t = i as f64 / rows as f64;
            let y = ya + (yb - ya) * t;
            let half = (da + (db - da) * t) * scale;
            segment(ctx, (position - half, y), (position + half, y), fill);
        }
    }
    if let [(only, d)] = density.as_slice() {
        let half = d * scale;
        segment(ctx, (position - half, *only), (position + half, *only), fill);
    }

    let (Some(&(lo, _)), Some(&(hi, _))) = (density.first(), density.last()) else {
        return;
    };
    let cap = VIOLIN_HALF_WIDTH / 4.0;
    segment(ctx, (position, lo), (position, hi), body);
    segment(ctx, (position - cap, lo), (position + cap, lo), body);
    segment(ctx, (position - cap, hi), (position + cap, hi), body);
    if show_means {
        if let Some(mean) = geometry::mean(group) {
            segment(ctx, (position - cap, mean), (position + cap, mean), body);
        }
    }
}

/// Fill a pointy-top hexagon centred at `(cx, cy)` with horizontal strokes.
fn paint_hexagon(
    ctx: &mut Context<'_>,
    res: &Resolution,
    (cx, cy): (f64, f64),
    half_width: f64,
    half_height: f64,
    color: Color,
) {
    let rows = ((2.0 * half_height) / res.dy).ceil().max(1.0) as usize;
    for i in 0..=rows {
        let offset = -half_height + 2.0 * half_height * i as f64 / rows as f64;
        let shoulder = half_height / 2.0;
        let half = if offset.abs() <= shoulder {
            half_width
        } else {
            half_width * (half_height - offset.abs()) / shoulder
        };
        segment(ctx, (cx - half, cy + offset), (cx + half, cy + offset), color);
    }
}

fn paint_pie(
    ctx: &mut Context<'_>,
    res: &Resolution,
    values: &[f64],
    labels: &[String],
    autopct: &str,
    colors: &ThemeColors,
) {
    let wedges = geometry::pie_wedges(values);
    // One radial stroke per dot along the rim
    let angle_step = res.dx.min(res.dy).max(TAU / 3600.0);
    for (i, wedge) in wedges.iter().enumerate() {
        let color = ink(palette::cycle_color(i), colors);
        let strokes = ((wedge.end - wedge.start) / angle_step).ceil() as usize;
        for k in 0..=strokes {
            let angle = (wedge.start + k as f64 * angle_step).min(wedge.end);
            segment(ctx, (0.0, 0.0), (angle.cos(), angle.sin()), color);
        }
    }

    ctx.layer();
    let text = Style::default().fg(colors.text);
    for (i, wedge) in wedges.iter().enumerate() {
        if wedge.fraction <= 0.0 {
            continue;
        }
        let angle = wedge.mid_angle();
        let pct = format_pct(autopct, wedge.fraction * 100.0);
        print_centred(ctx, res, (0.6 * angle.cos(), 0.6 * angle.sin()), pct, text);
        if let Some(label) = labels.get(i) {
            let (x, y) = (1.15 * angle.cos(), 1.15 * angle.sin());
            let shift = if x < 0.0 {
                label.width() as f64 * res.dx * 2.0
            } else {
                0.0
            };
            ctx.print(x - shift, y, Span::styled(label.clone(), text));
        }
    }
}

fn print_centred(
    ctx: &mut Context<'_>,
    res: &Resolution,
    (x, y): (f64, f64),
    text: String,
    style: Style,
) {
    let half = text.width() as f64 * res.dx;
    ctx.print(x - half, y, Span::styled(text, style));
}

/// Expand a printf-style percentage format such as `%1.1f%%`.
fn format_pct(autopct: &str, pct: f64) -> String {
    let precision = autopct
        .split('.')
        .nth(1)
        .and_then(|rest| rest.split('f').next())
        .and_then(|digits| digits.parse::<usize>().ok())
        .unwrap_or(1);
    format!("{:.*}%", precision, pct)
}

/// Format axis label with smart precision.
fn format_axis_label(val: f64) -> String {
    if !val.is_finite() {
        return "?".to_string();
    }
    let abs_val = val.abs();
    if abs_val == 0.0 {
        "0".to_string()
    } else if !(1e-2..1e5).contains(&abs_val) {
        format!("{:.1e}", val)
    } else if abs_val >= 100.0 {
        format!("{:.0}", val)
    } else if abs_val >= 1.0 {
        format!("{:.1}", val)
    } else {
        format!("{:.2}", val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn screen(figure: &Figure, theme: Theme) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let colors = ThemeColors::from_theme(theme);
        terminal.draw(|f| draw(f, figure, &colors)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn restore_guard_leaves_alternate_screen_on_drop() {
        let mut out = Vec::new();
        {
            let _restore = RestoreGuard::new(&mut out);
        }
        assert_eq!(String::from_utf8(out).unwrap(), "\x1b[?1049l");
    }

    fn line_figure() -> Figure {
        let mut figure = Figure::new();
        figure
            .draw(DrawCall::Line {
                trace: Trace {
                    x: vec![1.0, 2.0, 3.0],
                    y: vec![10.0, 20.0, 30.0],
                    color: "red",
                    label: "Revenue".into(),
                },
                line_style: "--",
                marker: "s",
            })
            .unwrap();
        figure.apply(Directive::Title("Quarterly".into())).unwrap();
        figure.apply(Directive::XLabel("quarter".into())).unwrap();
        figure.apply(Directive::Legend).unwrap();
        figure.apply(Directive::Grid).unwrap();
        figure
    }

    #[test]
    fn paints_title_labels_and_legend() {
        let text = screen(&line_figure(), Theme::Dark);
        assert!(text.contains("Quarterly"));
        assert!(text.contains("quarter"));
        assert!(text.contains("Legend"));
        assert!(text.contains("Revenue"));
        assert!(text.contains("■"));
        assert!(text.contains("q/Esc/Enter: close"));
    }

    #[test]
    fn paints_pie_percentages() {
        let mut figure = Figure::new();
        figure
            .draw(DrawCall::Pie {
                values: vec![1.0, 3.0],
                labels: vec!["low".into(), "high".into()],
                autopct: "%1.1f%%",
            })
            .unwrap();
        figure.apply(Directive::EqualAspect).unwrap();
        let text = screen(&figure, Theme::Light);
        assert!(text.contains("25.0%"));
        assert!(text.contains("75.0%"));
        assert!(text.contains("high"));
    }

    #[test]
    fn paints_box_categories_and_colorbar() {
        let mut figure = Figure::new();
        figure
            .draw(DrawCall::Box {
                groups: vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
                labels: vec!["north".into(), "south".into()],
            })
            .unwrap();
        let text = screen(&figure, Theme::Dark);
        assert!(text.contains("north"));
        assert!(text.contains("south"));

        let mut figure = Figure::new();
        figure
            .draw(DrawCall::Hexbin {
                x: vec![0.0, 1.0, 1.0],
                y: vec![0.0, 1.0, 1.0],
                grid_size: 30,
                colormap: "Blues",
            })
            .unwrap();
        figure.apply(Directive::Colorbar("Counts".into())).unwrap();
        let text = screen(&figure, Theme::Dark);
        assert!(text.contains("Counts"));
    }

    #[test]
    fn tiny_area_draws_nothing_inside() {
        let mut terminal = Terminal::new(TestBackend::new(6, 3)).unwrap();
        let colors = ThemeColors::from_theme(Theme::Dark);
        terminal
            .draw(|f| draw(f, &line_figure(), &colors))
            .unwrap();
    }

    #[test]
    fn pct_format_follows_precision() {
        assert_eq!(format_pct("%1.1f%%", 12.345), "12.3%");
        assert_eq!(format_pct("%.0f%%", 12.7), "13%");
        assert_eq!(format_pct("%d", 7.0), "7.0%");
    }

    #[test]
    fn aspect_fit_matches_cell_shape() {
        let fitted = fit_aspect(
            Bounds {
                x: [-1.0, 1.0],
                y: [-1.0, 1.0],
            },
            Rect::new(0, 0, 40, 10),
        );
        // 40 cells wide, 20 half-cells tall: X covers twice the span of Y
        assert!((fitted.x[1] - fitted.x[0] - 4.0).abs() < 1e-9);
        assert!((fitted.y[1] - fitted.y[0] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn axis_labels() {
        assert_eq!(format_axis_label(0.0), "0");
        assert_eq!(format_axis_label(2.5), "2.5");
        assert_eq!(format_axis_label(150.0), "150");
        assert_eq!(format_axis_label(0.25), "0.25");
        assert_eq!(format_axis_label(f64::NAN), "?");
    }
}
