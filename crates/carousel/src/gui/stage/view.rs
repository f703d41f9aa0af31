use super::model::Stage;
use super::{FONT_FACE, MIN_QUAD_AREA};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use glam::{Vec2, Vec3};
use orbit::card::{CARD_ASPECT, ERROR_FONT_SIZE, ERROR_TEXT};
use orbit::overlay::{IMAGE_OFFSET, IMAGE_SCALE, LABEL_FONT_SIZE, LABEL_OFFSET, OverlayFrame};
use orbit::sector::LABEL_FONT_SIZE as SECTOR_FONT_SIZE;
use orbit::{Card, CardVisual, Projector, Sector};
use palette::Srgba;

/// Source rectangle `(x, y, w, h)` that fills a quad of `aspect` without
/// distortion, centered, then widened by `1 / zoom`.
pub fn cover_crop(width: f64, height: f64, aspect: f64, zoom: f64) -> (f64, f64, f64, f64) {
    let (mut w, mut h) = if width / height > aspect {
        (height * aspect, height)
    } else {
        (width, width / aspect)
    };
    if zoom > 0.0 {
        w /= zoom;
        h /= zoom;
    }
    ((width - w) / 2.0, (height - h) / 2.0, w, h)
}

fn quad_area(quad: &[Vec2; 4]) -> f64 {
    let (ex, ey) = (quad[1] - quad[0], quad[3] - quad[0]);
    ex.perp_dot(ey).abs() as f64
}

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn quad_path(cr: &Context, quad: &[Vec2; 4]) {
    cr.move_to(quad[0].x as f64, quad[0].y as f64);
    for p in &quad[1..] {
        cr.line_to(p.x as f64, p.y as f64);
    }
    cr.close_path();
}

/// Maps a cover-cropped `pixbuf` onto `quad` (top-left, top-right,
/// bottom-right, bottom-left) with an affine fit.
fn draw_image_quad(
    cr: &Context,
    pixbuf: &Pixbuf,
    quad: &[Vec2; 4],
    aspect: f64,
    zoom: f64,
) -> Result<(), cairo::Error> {
    if quad_area(quad) < MIN_QUAD_AREA {
        return Ok(());
    }
    let (cx, cy, cw, ch) = cover_crop(
        pixbuf.width() as f64,
        pixbuf.height() as f64,
        aspect,
        zoom,
    );
    let (ex, ey) = (quad[1] - quad[0], quad[3] - quad[0]);

    cr.save()?;
    quad_path(cr, quad);
    cr.clip();
    cr.transform(cairo::Matrix::new(
        ex.x as f64 / cw,
        ex.y as f64 / cw,
        ey.x as f64 / ch,
        ey.y as f64 / ch,
        quad[0].x as f64,
        quad[0].y as f64,
    ));
    cr.set_source_pixbuf(pixbuf, -cx, -cy);
    cr.paint()?;
    cr.restore()
}

fn draw_text(
    cr: &Context,
    text: &str,
    at: Vec2,
    size: f64,
    centered: bool,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    if size < 1.0 {
        return Ok(());
    }
    set_color(cr, color);
    cr.select_font_face(FONT_FACE, cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(size);
    let ext = cr.text_extents(text)?;
    let x = if centered {
        at.x as f64 - ext.width() / 2.0
    } else {
        at.x as f64
    };
    cr.move_to(x, at.y as f64 + ext.height() / 2.0);
    cr.show_text(text)
}

enum Drawable<'a> {
    Card {
        card: &'a Card,
        quad: [Vec2; 4],
        center: Vec3,
    },
    Label {
        sector: &'a Sector,
        at: Vec3,
    },
}

impl Drawable<'_> {
    fn depth(&self) -> f32 {
        match self {
            Self::Card { center, .. } => center.z,
            Self::Label { at, .. } => at.z,
        }
    }

    fn draw(
        &self,
        cr: &Context,
        stage: &Stage,
        projector: &Projector,
        colors: &ThemeColors,
    ) -> Result<(), cairo::Error> {
        match self {
            Self::Card { card, quad, center } => match card.visual() {
                CardVisual::Image => match stage.texture(card.resource()) {
                    Some(pixbuf) => draw_image_quad(cr, pixbuf, quad, CARD_ASPECT as f64, 1.0),
                    None => Ok(()),
                },
                CardVisual::Loading => {
                    if quad_area(quad) < MIN_QUAD_AREA {
                        return Ok(());
                    }
                    set_color(cr, colors.placeholder);
                    quad_path(cr, quad);
                    cr.fill()
                }
                CardVisual::Error => draw_text(
                    cr,
                    ERROR_TEXT,
                    center.truncate(),
                    (ERROR_FONT_SIZE * projector.pixels_per_unit(center.z)) as f64,
                    true,
                    colors.error,
                ),
            },
            Self::Label { sector, at } => draw_text(
                cr,
                &sector.label(),
                at.truncate(),
                (SECTOR_FONT_SIZE * projector.pixels_per_unit(at.z)) as f64,
                true,
                colors.label,
            ),
        }
    }
}

fn collect<'a>(stage: &'a Stage, projector: &Projector) -> Vec<Drawable<'a>> {
    let scene = &stage.scene;
    let mut drawables: Vec<Drawable<'a>> = Vec::new();

    for sector in scene.sectors() {
        if let Some(at) = projector.project(scene.label_position(sector)) {
            drawables.push(Drawable::Label { sector, at });
        }
        for card in sector.cards() {
            let corners = scene.card_corners(sector, card);
            let center = scene.card_matrix(sector, card).transform_point3(Vec3::ZERO);
            let (Some(quad), Some(center)) = (
                corners
                    .iter()
                    .map(|&c| projector.project(c).map(|p| p.truncate()))
                    .collect::<Option<Vec<_>>>(),
                projector.project(center),
            ) else {
                continue;
            };
            let Ok(quad) = <[Vec2; 4]>::try_from(quad) else {
                continue;
            };
            drawables.push(Drawable::Card { card, quad, center });
        }
    }

    // far to near
    drawables.sort_by(|a, b| b.depth().total_cmp(&a.depth()));
    drawables
}

fn draw_overlay(
    cr: &Context,
    stage: &Stage,
    overlay: &OverlayFrame,
    projector: &Projector,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let scene = &stage.scene;
    let origin = scene.root_matrix().transform_point3(Vec3::ZERO);
    let (right, up) = scene.camera().basis();
    let billboard = |offset: Vec3| origin + right * offset.x + up * offset.y;

    if overlay.image_visible
        && let Some(pixbuf) = stage.texture(&overlay.image)
    {
        let center = billboard(IMAGE_OFFSET);
        let (half_w, half_h) = (right * IMAGE_SCALE.x / 2.0, up * IMAGE_SCALE.y / 2.0);
        let corners = [
            center - half_w + half_h,
            center + half_w + half_h,
            center + half_w - half_h,
            center - half_w - half_h,
        ];
        let projected = corners
            .iter()
            .map(|&c| projector.project(c).map(|p| p.truncate()))
            .collect::<Option<Vec<_>>>()
            .and_then(|q| <[Vec2; 4]>::try_from(q).ok());
        if let Some(quad) = projected {
            let aspect = (IMAGE_SCALE.x / IMAGE_SCALE.y) as f64;
            draw_image_quad(cr, pixbuf, &quad, aspect, overlay.zoom as f64)?;
        }
    }

    if let Some(at) = projector.project(billboard(LABEL_OFFSET)) {
        draw_text(
            cr,
            &overlay.label,
            at.truncate(),
            (LABEL_FONT_SIZE * projector.pixels_per_unit(at.z)) as f64,
            false,
            colors.label,
        )?;
    }
    Ok(())
}

pub fn draw(cr: &Context, stage: &Stage, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.background);
    cr.paint()?;

    if stage.viewport.x <= 0.0 || stage.viewport.y <= 0.0 {
        return Ok(());
    }
    let projector = Projector::new(stage.scene.camera(), stage.viewport);

    for drawable in collect(stage, &projector) {
        drawable.draw(cr, stage, &projector, colors)?;
    }

    if let Some(overlay) = stage.scene.overlay() {
        draw_overlay(cr, stage, overlay, &projector, colors)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_crop_wide_quad() {
        let (x, y, w, h) = cover_crop(100.0, 100.0, 2.0, 1.0);
        assert_eq!((x, y, w, h), (0.0, 25.0, 100.0, 50.0));
    }

    #[test]
    fn test_cover_crop_tall_quad() {
        let (x, y, w, h) = cover_crop(200.0, 100.0, 0.5, 1.0);
        assert_eq!((x, y, w, h), (75.0, 0.0, 50.0, 100.0));
    }

    #[test]
    fn test_cover_crop_zoom_out_widens() {
        let (x, y, w, h) = cover_crop(100.0, 100.0, 2.0, 0.8);
        assert!((w - 125.0).abs() < 1e-9);
        assert!((h - 62.5).abs() < 1e-9);
        assert!((x + 12.5).abs() < 1e-9);
        assert!((y - 18.75).abs() < 1e-9);
    }

    #[test]
    fn test_edge_on_quad_has_no_area() {
        let quad = [Vec2::ZERO, Vec2::new(0.0, 10.0), Vec2::new(0.0, 20.0), Vec2::ZERO];
        assert!(quad_area(&quad) < MIN_QUAD_AREA);
    }
}
