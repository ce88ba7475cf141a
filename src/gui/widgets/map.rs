use iced::{
    Color, Pixels, Point, Rectangle, Renderer, Theme,
    widget::canvas::{self, Frame, Geometry, Path, Stroke, Text},
};
use iced_core::mouse::Cursor;

use crate::{
    core::map::{MarkerKind, Scene},
    gui::widgets::to_iced_color,
};

/// The canvas has a fixed size so clicks can be resolved against the
/// scene without a layout round trip.
pub const MAP_WIDTH: f32 = 720.0;
pub const MAP_HEIGHT: f32 = 440.0;

const BACKGROUND: Color = Color::from_rgb8(0xE8, 0xEE, 0xE4);
const OFFICE_RADIUS: f32 = 9.0;
const GUARD_RADIUS: f32 = 7.0;

/// Draws a [`Scene`]: geofence circles first, markers and labels on top.
pub struct MapCanvas<'a> {
    pub scene: &'a Scene,
}

impl<Message> canvas::Program<Message> for MapCanvas<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), BACKGROUND);

        let (width, height) = (bounds.width as f64, bounds.height as f64);
        let to_point = |(x, y): (f64, f64)| Point::new(x as f32, y as f32);

        for circle in self.scene.circles() {
            let Some((center, radius)) = self.scene.circle_on_canvas(circle, width, height) else {
                continue;
            };
            let (center, radius) = (to_point(center), radius as f32);
            let color = to_iced_color(circle.color);
            let path = Path::circle(center, radius);
            frame.fill(&path, Color { a: 0.15, ..color });
            frame.stroke(&path, Stroke::default().with_color(color).with_width(2.0));
        }

        for (_, marker) in self.scene.markers() {
            let center = to_point(self.scene.project(marker.position, width, height));
            if !(0.0..=bounds.width).contains(&center.x) || !(0.0..=bounds.height).contains(&center.y)
            {
                continue;
            }
            let radius = match marker.kind {
                MarkerKind::Office => OFFICE_RADIUS,
                MarkerKind::Guard { .. } => GUARD_RADIUS,
            };
            let path = Path::circle(center, radius);
            frame.fill(&path, to_iced_color(marker.color));
            frame.stroke(&path, Stroke::default().with_color(Color::WHITE).with_width(2.0));
            frame.fill_text(Text {
                content: marker.label.clone(),
                position: Point::new(center.x + radius + 3.0, center.y - 7.0),
                color: Color::BLACK,
                size: Pixels(12.0),
                ..Text::default()
            });
        }

        vec![frame.into_geometry()]
    }
}
