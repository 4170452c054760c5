use eframe::egui::{
    self,
    containers,
};

use super::theme::{
    Palette,
    Theme,
};
use crate::{
    core::CatalogKind,
    settings::SettingsData,
};

pub enum TopBarAction {
    SwitchCatalog(CatalogKind),
    SetDarkMode(bool),
}

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        settings: &SettingsData,
        theme: &Theme,
        busy: bool,
    ) -> Option<TopBarAction> {
        let mut action = None;
        let palette = theme.palette(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.separator();

                for kind in CatalogKind::ALL {
                    let selected = settings.active_catalog == kind;
                    if ui.selectable_label(selected, kind.label()).clicked() && !selected {
                        action = Some(TopBarAction::SwitchCatalog(kind));
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let icon = if settings.dark_mode { "☀" } else { "🌙" };
                    if ui.button(icon).on_hover_text("Toggle dark mode").clicked() {
                        action = Some(TopBarAction::SetDarkMode(!settings.dark_mode));
                    }

                    let (color, tooltip) = status_indicator(palette, busy);
                    ui.small(egui::RichText::new("●").color(color)).on_hover_text(tooltip);
                });
            });
        });

        action
    }
}

fn status_indicator(palette: &Palette, busy: bool) -> (egui::Color32, &'static str) {
    if busy {
        (palette.orange, "Fetching")
    } else {
        (palette.green, "Idle")
    }
}
