use std::f32::consts::{
    FRAC_PI_2,
    TAU,
};

use eframe::egui::{
    self,
    epaint::Mesh,
    Align2,
    FontId,
    Pos2,
    Shape,
    Stroke,
};

use super::theme::{
    with_alpha,
    Theme,
};
use crate::core::chart::ChartData;

const CHART_HEIGHT: f32 = 320.0;
const LABEL_MARGIN: f32 = 36.0;
const RINGS: usize = 5;

/// One chart per record. The panel drops it and builds a new one whenever a
/// new record arrives, so nothing from the previous dataset is ever drawn.
pub struct RadarChart {
    data: ChartData,
    normalized: Vec<f32>,
}

impl RadarChart {
    pub fn new(data: ChartData) -> Self {
        let normalized = data.normalized();
        Self { data, normalized }
    }

    pub fn data(&self) -> &ChartData {
        &self.data
    }

    pub fn show(&self, ui: &mut egui::Ui, theme: &Theme) {
        if self.data.points.is_empty() {
            ui.label(theme.label(ui.ctx(), "No numeric attributes to chart."));
            return;
        }

        if !self.data.is_drawable() {
            self.show_bars(ui, theme);
            return;
        }

        let palette = theme.palette(ui.ctx()).clone();
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), CHART_HEIGHT),
            egui::Sense::hover(),
        );
        let painter = ui.painter_at(rect);

        let center = rect.center();
        let radius = (rect.width().min(rect.height()) / 2.0 - LABEL_MARGIN).max(10.0);
        let count = self.data.points.len();
        let spoke = |i: usize, scale: f32| -> Pos2 {
            let angle = -FRAC_PI_2 + TAU * i as f32 / count as f32;
            center + egui::vec2(angle.cos(), angle.sin()) * radius * scale
        };

        let grid = Stroke::new(1.0, with_alpha(palette.comment, 120));
        for ring in 1..=RINGS {
            let scale = ring as f32 / RINGS as f32;
            painter.add(Shape::closed_line((0..count).map(|i| spoke(i, scale)).collect(), grid));
        }

        for (i, point) in self.data.points.iter().enumerate() {
            painter.line_segment([center, spoke(i, 1.0)], grid);
            painter.text(
                spoke(i, 1.0 + LABEL_MARGIN / 2.0 / radius),
                Align2::CENTER_CENTER,
                &point.axis,
                FontId::proportional(12.0),
                palette.foreground,
            );
        }

        let outline: Vec<Pos2> =
            self.normalized.iter().enumerate().map(|(i, scale)| spoke(i, *scale)).collect();

        // Fan from the centre: the dataset polygon is star-shaped, not convex.
        let fill = with_alpha(palette.pink, 60);
        let mut mesh = Mesh::default();
        mesh.colored_vertex(center, fill);
        for pos in &outline {
            mesh.colored_vertex(*pos, fill);
        }
        for i in 0..count as u32 {
            mesh.add_triangle(0, i + 1, (i + 1) % count as u32 + 1);
        }
        painter.add(Shape::mesh(mesh));

        painter.add(Shape::closed_line(outline.clone(), Stroke::new(1.5, palette.pink)));
        for pos in &outline {
            painter.circle_filled(*pos, 3.0, palette.pink);
        }

        painter.text(
            rect.left_top() + egui::vec2(4.0, 4.0),
            Align2::LEFT_TOP,
            format!("max {}", self.data.ceiling),
            FontId::proportional(10.0),
            palette.comment,
        );

        response.on_hover_ui(|ui| {
            ui.label(egui::RichText::new(&self.data.label).strong());
            for point in &self.data.points {
                ui.label(format!("{}: {}", point.axis, point.value));
            }
        });
    }

    fn show_bars(&self, ui: &mut egui::Ui, theme: &Theme) {
        let color = theme.palette(ui.ctx()).pink;
        for (point, scale) in self.data.points.iter().zip(&self.normalized) {
            ui.add(
                egui::ProgressBar::new(*scale)
                    .fill(color)
                    .text(format!("{}: {}", point.axis, point.value)),
            );
        }
    }
}
