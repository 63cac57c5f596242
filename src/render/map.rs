//! Top-down map of the world: X runs left to right, Z top to bottom.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use poi_navigator::{PointOfInterest, Vec3};

use super::colors::{category_color_for_mode, ColorMode, AVATAR_COLOR, TEXT_MUTED};
use super::symbols::{category_symbol, facing_symbol, AVATAR};

/// World units kept around the outermost point
const MARGIN: f64 = 2.0;

/// Smallest world span shown on either axis
const MIN_SPAN: f64 = 10.0;

/// Maps world X/Z onto terminal cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl MapProjection {
    /// Smallest view holding every position, padded by `MARGIN`
    pub fn fit<'a>(positions: impl IntoIterator<Item = &'a Vec3>) -> Self {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for p in positions {
            bounds = Some(match bounds {
                None => (p.x, p.x, p.z, p.z),
                Some((min_x, max_x, min_z, max_z)) => {
                    (min_x.min(p.x), max_x.max(p.x), min_z.min(p.z), max_z.max(p.z))
                }
            });
        }

        let (min_x, max_x, min_z, max_z) = bounds.unwrap_or((0.0, 0.0, 0.0, 0.0));
        let (min_x, max_x) = widen(min_x - MARGIN, max_x + MARGIN);
        let (min_z, max_z) = widen(min_z - MARGIN, max_z + MARGIN);
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// Cell for a world position, clamped into `width` x `height`
    pub fn to_terminal(&self, position: &Vec3, width: u16, height: u16) -> (u16, u16) {
        if width == 0 || height == 0 {
            return (0, 0);
        }
        let nx = ((position.x - self.min_x) / (self.max_x - self.min_x)).clamp(0.0, 1.0);
        let nz = ((position.z - self.min_z) / (self.max_z - self.min_z)).clamp(0.0, 1.0);
        let col = (nx * (width - 1) as f64).round() as u16;
        let row = (nz * (height - 1) as f64).round() as u16;
        (col.min(width - 1), row.min(height - 1))
    }
}

fn widen(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    if span >= MIN_SPAN {
        return (min, max);
    }
    let pad = (MIN_SPAN - span) / 2.0;
    (min - pad, max + pad)
}

/// Map widget: border, labelled points and the avatar
pub struct MapWidget<'a> {
    points: &'a [PointOfInterest],
    avatar: Option<Vec3>,
    yaw: f64,
    highlighted: Option<&'a str>,
    use_unicode: bool,
    color_mode: ColorMode,
}

impl<'a> MapWidget<'a> {
    pub fn new(points: &'a [PointOfInterest]) -> Self {
        Self {
            points,
            avatar: None,
            yaw: 0.0,
            highlighted: None,
            use_unicode: true,
            color_mode: ColorMode::default(),
        }
    }

    pub fn avatar(mut self, position: Option<Vec3>, yaw: f64) -> Self {
        self.avatar = position;
        self.yaw = yaw;
        self
    }

    /// Draw this point's label in bold
    pub fn highlighted(mut self, id: Option<&'a str>) -> Self {
        self.highlighted = id;
        self
    }

    pub fn use_unicode(mut self, use_unicode: bool) -> Self {
        self.use_unicode = use_unicode;
        self
    }

    pub fn color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 3 {
            return;
        }

        let border_style = Style::default().fg(Color::Rgb(40, 40, 50));
        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_char('─').set_style(border_style);
            buf[(x, area.y + area.height - 1)]
                .set_char('─')
                .set_style(border_style);
        }
        for y in area.y..area.y + area.height {
            buf[(area.x, y)].set_char('│').set_style(border_style);
            buf[(area.x + area.width - 1, y)]
                .set_char('│')
                .set_style(border_style);
        }
        buf[(area.x, area.y)].set_char('┌').set_style(border_style);
        buf[(area.x + area.width - 1, area.y)]
            .set_char('┐')
            .set_style(border_style);
        buf[(area.x, area.y + area.height - 1)]
            .set_char('└')
            .set_style(border_style);
        buf[(area.x + area.width - 1, area.y + area.height - 1)]
            .set_char('┘')
            .set_style(border_style);

        let inner_width = area.width - 2;
        let inner_height = area.height - 2;
        let inner_right = area.x + 1 + inner_width;

        let projection = MapProjection::fit(
            self.points
                .iter()
                .map(|p| &p.position)
                .chain(self.avatar.as_ref()),
        );

        for point in self.points {
            let (col, row) = projection.to_terminal(&point.position, inner_width, inner_height);
            let x = area.x + 1 + col;
            let y = area.y + 1 + row;

            let color = category_color_for_mode(point.category, self.color_mode);
            let glyph = category_symbol(point.category).render(self.use_unicode);
            buf[(x, y)].set_char(glyph).set_style(Style::default().fg(color));

            // Label to the right of the glyph, cut at the border
            let mut label_style = Style::default().fg(TEXT_MUTED);
            if self.highlighted == Some(point.id.as_str()) {
                label_style = label_style.fg(color).add_modifier(Modifier::BOLD);
            }
            let label_x = x + 2;
            if label_x < inner_right {
                let room = (inner_right - label_x) as usize;
                buf.set_stringn(label_x, y, point.display_name(), room, label_style);
            }
        }

        if let Some(avatar) = self.avatar {
            let (col, row) = projection.to_terminal(&avatar, inner_width, inner_height);
            let x = area.x + 1 + col;
            let y = area.y + 1 + row;
            let style = Style::default()
                .fg(AVATAR_COLOR)
                .add_modifier(Modifier::BOLD);
            buf[(x, y)].set_char(AVATAR.render(self.use_unicode)).set_style(style);
            if x + 1 < inner_right {
                buf[(x + 1, y)]
                    .set_char(facing_symbol(self.yaw).render(self.use_unicode))
                    .set_style(style);
            }
        }
    }
}
