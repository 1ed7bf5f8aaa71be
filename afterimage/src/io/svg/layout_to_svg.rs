use svg::Document;
use svg::node::element::{Group, Rectangle, Text, Title};

use crate::analysis::ShapeInfo;
use crate::entities::PlacedRect;
use crate::geometry::Shape;
use crate::geometry::primitives::Rect;
use crate::io::svg::svg_util;
use crate::io::svg::svg_util::SvgDrawOptions;

/// Draws a shape together with the rectangles placed inside it.
///
/// `canvas` is the full frame (e.g. the mask dimensions); when absent the view box is fitted around the shape.
/// Interior samples are only drawn when `info` is provided and enabled in the `options`.
pub fn collage_to_svg(
    shape: &Shape,
    info: Option<&ShapeInfo>,
    placed: &[PlacedRect],
    canvas: Option<Rect>,
    options: SvgDrawOptions,
    title: &str,
) -> Document {
    let theme = &options.theme;
    let vbox = canvas
        .or_else(|| shape.bbox().map(|b| b.scale(1.10)))
        .unwrap_or(Rect {
            x_min: 0.0,
            y_min: 0.0,
            x_max: 1.0,
            y_max: 1.0,
        });
    let stroke_width =
        f32::min(vbox.width(), vbox.height()) * 0.001 * theme.stroke_width_multiplier;

    let canvas_group = Group::new().set("id", "canvas").add(
        svg_util::data_to_path(
            svg_util::rect_data(&vbox),
            &[("fill", &*format!("{}", theme.canvas_fill))],
        ),
    );

    //draw contours, main one filled
    let contour_group = {
        let mut group = Group::new().set("id", "contours");
        let main = shape.main_contour();
        for (i, contour) in shape.contours().iter().enumerate() {
            let is_main = main.is_some_and(|m| std::ptr::eq(m, contour));
            if !is_main && !options.secondary_contours {
                continue;
            }
            let style = match is_main {
                true => vec![
                    ("fill", format!("{}", theme.body_fill)),
                    ("stroke", "black".to_string()),
                    ("stroke-width", format!("{}", 2.0 * stroke_width)),
                ],
                false => vec![
                    ("fill", "none".to_string()),
                    ("stroke", "black".to_string()),
                    ("stroke-width", format!("{stroke_width}")),
                    ("stroke-dasharray", format!("{}", 5.0 * stroke_width)),
                ],
            };
            let style = style.iter().map(|(k, v)| (*k, v.as_str())).collect::<Vec<_>>();
            group = group.add(
                svg_util::data_to_path(svg_util::contour_data(contour), &style).add(Title::new(
                    format!(
                        "contour #{i}, {} points{}",
                        contour.number_of_points(),
                        if is_main { " (main)" } else { "" }
                    ),
                )),
            );
        }
        group
    };

    //draw samples (if enabled)
    let sample_group = match (options.samples, info) {
        (true, Some(info)) => {
            let max_space = info
                .samples
                .iter()
                .map(|s| s.local_space)
                .fold(f32::EPSILON, f32::max);
            let group = info.samples.iter().fold(
                Group::new().set("id", "samples"),
                |group, s| {
                    group.add(svg_util::point(
                        s.point,
                        theme.sample_fill,
                        1.5 * stroke_width,
                        s.local_space / max_space,
                    ))
                },
            );
            Some(group)
        }
        _ => None,
    };

    //draw placed rectangles
    let rect_group = placed
        .iter()
        .enumerate()
        .fold(Group::new().set("id", "placed_rects"), |group, (i, p)| {
            let fill = match p.image {
                Some(_) => theme.image_rect_fill,
                None => theme.rect_fill,
            };
            let image_label = p
                .image
                .map_or("none".to_string(), |img| format!("{}", img.id));
            group.add(
                Rectangle::new()
                    .set("x", p.x())
                    .set("y", p.y())
                    .set("width", p.width())
                    .set("height", p.height())
                    .set("fill", format!("{fill}"))
                    .set("fill-opacity", 0.85)
                    .set("stroke", "black")
                    .set("stroke-width", stroke_width)
                    .add(Title::new(format!(
                        "rect #{i}, image: {image_label}, {:.1}x{:.1} at ({:.1}, {:.1}), aspect: {:.3}",
                        p.width(),
                        p.height(),
                        p.x(),
                        p.y(),
                        p.aspect_ratio
                    ))),
            )
        });

    let label = {
        let font_size = f32::min(vbox.width(), vbox.height()) * 0.025;
        Text::new(format!("{} rects | {title}", placed.len()))
            .set("x", vbox.x_min + font_size)
            .set("y", vbox.y_min + 1.5 * font_size)
            .set("font-size", font_size)
            .set("font-family", "monospace")
            .set("font-weight", "500")
            .set("fill", "white")
    };

    let mut document = Document::new()
        .set(
            "viewBox",
            (vbox.x_min, vbox.y_min, vbox.width(), vbox.height()),
        )
        .add(canvas_group)
        .add(contour_group);
    if let Some(sample_group) = sample_group {
        document = document.add(sample_group);
    }
    document.add(rect_group).add(label)
}
