//! Conversion of core paint descriptions into tiny-skia types.

use kurbo::{BezPath, PathEl};
use richmaps_core::shapes::{ColorStop, LineCap, LineJoin, SerializableColor, Shader};
use richmaps_core::StrokePaint;
use tiny_skia::{GradientStop, LinearGradient, PathBuilder, RadialGradient, SpreadMode, Transform};

pub(crate) fn color(color: SerializableColor) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn point(p: kurbo::Point) -> tiny_skia::Point {
    tiny_skia::Point::from_xy(p.x as f32, p.y as f32)
}

fn stops(stops: &[ColorStop]) -> Vec<GradientStop> {
    stops
        .iter()
        .map(|s| GradientStop::new(s.offset.clamp(0.0, 1.0), color(s.color)))
        .collect()
}

/// Build a tiny-skia shader. Degenerate gradients fall back to their first stop color.
pub(crate) fn shader(shader: &Shader) -> tiny_skia::Shader<'static> {
    let gradient = match shader {
        Shader::Solid { color: c } => return tiny_skia::Shader::SolidColor(color(*c)),
        Shader::LinearGradient { start, end, stops: s } => LinearGradient::new(
            point(*start),
            point(*end),
            stops(s),
            SpreadMode::Pad,
            Transform::identity(),
        ),
        Shader::RadialGradient {
            center,
            radius,
            stops: s,
        } => RadialGradient::new(
            point(*center),
            point(*center),
            *radius as f32,
            stops(s),
            SpreadMode::Pad,
            Transform::identity(),
        ),
    };

    gradient.unwrap_or_else(|| {
        let fallback = match shader {
            Shader::LinearGradient { stops, .. } | Shader::RadialGradient { stops, .. } => stops
                .first()
                .map(|s| s.color)
                .unwrap_or(SerializableColor::transparent()),
            Shader::Solid { color } => *color,
        };
        log::warn!("degenerate gradient, painting solid color instead");
        tiny_skia::Shader::SolidColor(color(fallback))
    })
}

/// Stroke geometry for a paint. Invalid dash patterns are dropped.
pub(crate) fn stroke(paint: &StrokePaint) -> tiny_skia::Stroke {
    let dash = paint.dash.as_ref().and_then(|d| {
        let dash = d
            .is_valid()
            .then(|| tiny_skia::StrokeDash::new(d.intervals.clone(), d.phase))
            .flatten();
        if dash.is_none() {
            log::warn!("ignoring invalid dash pattern {:?}", d.intervals);
        }
        dash
    });

    tiny_skia::Stroke {
        width: paint.width.max(0.0),
        line_cap: match paint.cap {
            LineCap::Butt => tiny_skia::LineCap::Butt,
            LineCap::Round => tiny_skia::LineCap::Round,
            LineCap::Square => tiny_skia::LineCap::Square,
        },
        line_join: match paint.join {
            LineJoin::Miter => tiny_skia::LineJoin::Miter,
            LineJoin::Round => tiny_skia::LineJoin::Round,
            LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
        },
        dash,
        ..tiny_skia::Stroke::default()
    }
}

/// Convert a kurbo path. Returns `None` for paths tiny-skia considers empty.
pub(crate) fn path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// A two-point line path.
pub(crate) fn line(from: kurbo::Point, to: kurbo::Point) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(from.x as f32, from.y as f32);
    pb.line_to(to.x as f32, to.y as f32);
    pb.finish()
}
