use super::{
    HUB_RADIUS, LABEL_DISC_RADIUS, Layout, POCKET_FONT_SIZE, POCKET_TEXT_RADIUS, RIM_WIDTH,
    STOPPER_HEIGHT, STOPPER_WIDTH,
};
use crate::config::LabelConfig;
use crate::gui::assets::Textures;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::PI;
use wheelkit::segment::{POCKET_ARC, face_layout};
use wheelkit::{Label, Phase, Wheel};

/// Everything besides the wheel model that a frame needs.
pub struct Visuals<'a> {
    pub textures: Option<&'a Textures>,
    pub colors: &'a ThemeColors,
    pub label: &'a LabelConfig,
}

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Degrees clockwise from the stopper to cairo's angle convention.
fn to_cairo_angle(degrees: f64) -> f64 {
    degrees.to_radians() - PI / 2.0
}

struct FaceRenderer<'a> {
    layout: &'a Layout,
    angle: f64,
    colors: &'a ThemeColors,
}

impl<'a> FaceRenderer<'a> {
    fn new(layout: &'a Layout, angle: f64, colors: &'a ThemeColors) -> Self {
        Self {
            layout,
            angle,
            colors,
        }
    }

    fn draw(&self, cr: &Context, texture: Option<&Pixbuf>) -> Result<(), cairo::Error> {
        cr.save()?;
        cr.translate(self.layout.center.x, self.layout.center.y);
        cr.rotate(self.angle.to_radians());
        let drawn = match texture {
            Some(pixbuf) => self.draw_texture(cr, pixbuf),
            None => self.draw_pockets(cr),
        };
        cr.restore()?;
        drawn
    }

    fn draw_texture(&self, cr: &Context, pixbuf: &Pixbuf) -> Result<(), cairo::Error> {
        // fit texture width to the face diameter
        let scale = self.layout.face_radius() * 2.0 / pixbuf.width() as f64;
        cr.scale(scale, scale);
        cr.set_source_pixbuf(
            pixbuf,
            -pixbuf.width() as f64 / 2.0,
            -pixbuf.height() as f64 / 2.0,
        );
        cr.paint()
    }

    fn draw_pockets(&self, cr: &Context) -> Result<(), cairo::Error> {
        let radius = self.layout.face_radius();
        let half = POCKET_ARC / 2.0;

        for segment in face_layout() {
            let offset = segment.face_offset();
            set_color(cr, self.colors.segment(segment.color));
            cr.move_to(0.0, 0.0);
            cr.arc(
                0.0,
                0.0,
                radius,
                to_cairo_angle(offset - half),
                to_cairo_angle(offset + half),
            );
            cr.close_path();
            cr.fill()?;
        }

        set_color(cr, self.colors.rim);
        cr.set_line_width(RIM_WIDTH * self.layout.scale);
        cr.arc(0.0, 0.0, radius, 0.0, 2.0 * PI);
        cr.stroke()?;
        cr.arc(0.0, 0.0, HUB_RADIUS * self.layout.scale, 0.0, 2.0 * PI);
        cr.fill()?;

        self.draw_numbers(cr)
    }

    fn draw_numbers(&self, cr: &Context) -> Result<(), cairo::Error> {
        set_color(cr, self.colors.pocket_text);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(POCKET_FONT_SIZE * self.layout.scale);

        for segment in face_layout() {
            let text = segment.number.to_string();
            let Ok(ext) = cr.text_extents(&text) else {
                continue;
            };
            cr.save()?;
            cr.rotate(segment.face_offset().to_radians());
            cr.move_to(
                -ext.width() / 2.0,
                -POCKET_TEXT_RADIUS * self.layout.scale + ext.height() / 2.0,
            );
            cr.show_text(&text)?;
            cr.restore()?;
        }
        Ok(())
    }
}

fn draw_stopper(
    cr: &Context,
    layout: &Layout,
    texture: Option<&Pixbuf>,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let tip = layout.stopper_anchor();

    if let Some(pixbuf) = texture {
        // anchored at its bottom center
        let scale = STOPPER_WIDTH * layout.scale / pixbuf.width() as f64;
        cr.save()?;
        cr.translate(tip.x, tip.y);
        cr.scale(scale, scale);
        cr.set_source_pixbuf(
            pixbuf,
            -pixbuf.width() as f64 / 2.0,
            -pixbuf.height() as f64,
        );
        cr.paint()?;
        return cr.restore();
    }

    let (w, h) = (STOPPER_WIDTH * layout.scale, STOPPER_HEIGHT * layout.scale);
    set_color(cr, colors.stopper);
    cr.move_to(tip.x - w / 2.0, tip.y - h);
    cr.line_to(tip.x + w / 2.0, tip.y - h);
    cr.line_to(tip.x, tip.y + h * 0.25);
    cr.close_path();
    cr.fill()
}

fn draw_label(
    cr: &Context,
    layout: &Layout,
    label: Label,
    config: &LabelConfig,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let (cx, cy) = (layout.center.x, layout.center.y);

    set_color(cr, colors.label_disc);
    cr.arc(cx, cy, LABEL_DISC_RADIUS * layout.scale, 0.0, 2.0 * PI);
    cr.fill()?;

    let text = label.text();
    set_color(cr, colors.segment(label.color));
    cr.select_font_face(&config.font, cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(config.size * layout.scale);
    if let Ok(ext) = cr.text_extents(&text) {
        cr.move_to(
            cx - ext.width() / 2.0 - ext.x_bearing(),
            cy - ext.height() / 2.0 - ext.y_bearing(),
        );
        cr.show_text(&text)?;
    }
    Ok(())
}

pub fn draw(
    cr: &Context,
    wheel: &Wheel,
    layout: &Layout,
    visuals: &Visuals,
) -> Result<(), cairo::Error> {
    // nothing is built until the assets have arrived
    if matches!(wheel.phase(), Phase::Loading | Phase::Destroyed) {
        return Ok(());
    }

    let textures = visuals.textures;
    FaceRenderer::new(layout, wheel.angle(), visuals.colors)
        .draw(cr, textures.and_then(|t| t.face.as_ref()))?;
    draw_stopper(
        cr,
        layout,
        textures.and_then(|t| t.stopper.as_ref()),
        visuals.colors,
    )?;
    draw_label(cr, layout, wheel.label(), visuals.label, visuals.colors)
}
