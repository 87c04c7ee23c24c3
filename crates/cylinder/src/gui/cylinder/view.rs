use super::model::State;
use super::{DISABLED_ALPHA, FONT_SIZE, ITEM_PADDING_EM};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use drum::geometry::Origin;
use drum::{Clock, SlotView};
use palette::Srgba;

struct SlotRenderer<'a> {
    view: &'a SlotView,
    label: &'a str,
    hovered: bool,
}

impl<'a> SlotRenderer<'a> {
    fn new(view: &'a SlotView, label: &'a str, hovered: bool) -> Self {
        Self {
            view,
            label,
            hovered,
        }
    }

    fn draw<C: Clock>(
        &self,
        cr: &Context,
        state: &State<C>,
        colors: &ThemeColors,
    ) -> Result<(), cairo::Error> {
        let item_height = state.item_height();
        let style = self.view.style;

        // rotateX seen head-on: the slot folds towards its pivot edge
        let squash = style.tilt_deg.to_radians().cos();
        if squash <= f64::EPSILON {
            return Ok(());
        }
        let pivot = match self.view.origin {
            Origin::BottomRight => item_height / 2.0,
            Origin::TopRight => -item_height / 2.0,
            Origin::Center => 0.0,
        };
        let x = state.center.x + style.lateral_em * FONT_SIZE;
        let y = state.center.y + self.view.position * item_height;

        cr.save()?;
        cr.translate(x, y + pivot);
        cr.scale(1.0, squash);
        cr.translate(0.0, -pivot);

        if self.hovered {
            self.draw_hover(cr, item_height, colors)?;
        }
        self.draw_text(cr, colors.text, style.opacity)?;
        cr.restore()
    }

    fn draw_hover(
        &self,
        cr: &Context,
        item_height: f64,
        colors: &ThemeColors,
    ) -> Result<(), cairo::Error> {
        let width = match cr.text_extents(self.label) {
            Ok(ext) => ext.width(),
            Err(_) => item_height,
        } + 2.0 * ITEM_PADDING_EM * FONT_SIZE;

        let (r, g, b, a) = colors.hovered.into_components();
        cr.set_source_rgba(r, g, b, a * self.view.style.opacity);
        cr.rectangle(-width / 2.0, -item_height / 2.0, width, item_height);
        cr.fill()
    }

    fn draw_text(&self, cr: &Context, color: Srgba<f64>, opacity: f64) -> Result<(), cairo::Error> {
        let (r, g, b, a) = color.into_components();
        cr.set_source_rgba(r, g, b, a * opacity);
        if let Ok(ext) = cr.text_extents(self.label) {
            cr.move_to(-ext.width() / 2.0 - ext.x_bearing(), ext.height() / 2.0);
            cr.show_text(self.label)?;
        }
        Ok(())
    }
}

pub fn draw<C: Clock>(
    cr: &Context,
    state: &State<C>,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let frame = state.picker.frame();

    // dim the whole drum while disabled
    if frame.disabled {
        cr.push_group();
    }

    draw_selection_band(cr, state, colors)?;

    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(FONT_SIZE);

    for view in &frame.slots {
        let Some(label) = view.item.and_then(|i| state.picker.items().get(i)) else {
            continue;
        };
        if !view.style.is_visible() {
            continue;
        }
        let hovered = !frame.disabled && state.hover == Some(view.physical);
        SlotRenderer::new(view, label, hovered).draw(cr, state, colors)?;
    }

    if frame.disabled {
        cr.pop_group_to_source()?;
        cr.paint_with_alpha(DISABLED_ALPHA)?;
    }
    Ok(())
}

fn draw_selection_band<C: Clock>(
    cr: &Context,
    state: &State<C>,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let item_height = state.item_height();
    let (r, g, b, a) = colors.selection.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.rectangle(
        0.0,
        state.center.y - item_height / 2.0,
        state.width,
        item_height,
    );
    cr.fill()
}
