use std::{
    path::{
        Path,
        PathBuf,
    },
    sync::Arc,
    time::Duration,
};

use eframe::egui;

use super::{
    catalog_panel::CatalogPanel,
    message_overlay::MessageOverlay,
    theme::{
        set_theme,
        Theme,
    },
    top_bar::{
        TopBar,
        TopBarAction,
    },
};
use crate::{
    core::{
        state::Settlement,
        tasks::{
            TaskManager,
            TaskResult,
        },
        CatalogKind,
        Selection,
        ZukanError,
    },
    persistence::save_json,
    settings::{
        SettingsData,
        SETTINGS_FILE,
    },
};

/// Tried in order when no font is configured; the first readable one is used
/// as a fallback for Japanese names.
const CJK_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "C:\\Windows\\Fonts\\YuGothM.ttc",
    "C:\\Windows\\Fonts\\msgothic.ttc",
];

pub struct ZukanApp {
    settings: SettingsData,
    theme: Theme,
    panels: Vec<CatalogPanel>,
    message_overlay: MessageOverlay,
    task_manager: TaskManager,
}

impl ZukanApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: SettingsData,
    ) -> Result<Self, ZukanError> {
        let mut task_manager = TaskManager::new(settings.request_timeout())?;

        let ctx = cc.egui_ctx.clone();
        task_manager.set_notifier(move || ctx.request_repaint());

        egui_extras::install_image_loaders(&cc.egui_ctx);
        setup_fonts(&cc.egui_ctx, settings.font_path.as_deref());

        let theme = Theme::dracula();
        set_theme(&cc.egui_ctx, &theme);
        apply_dark_mode(&cc.egui_ctx, settings.dark_mode);

        Ok(Self {
            settings,
            theme,
            panels: CatalogKind::ALL.into_iter().map(CatalogPanel::new).collect(),
            message_overlay: MessageOverlay::new(),
            task_manager,
        })
    }

    fn panel_mut(&mut self, kind: CatalogKind) -> Option<&mut CatalogPanel> {
        self.panels.iter_mut().find(|panel| panel.kind() == kind)
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        tracing::trace!(task = result.task_type(), "task result");

        match result {
            TaskResult::RecordFetched { catalog, generation, result } => {
                let Some(panel) = self.panel_mut(catalog) else {
                    return;
                };

                match panel.settle(generation, result) {
                    Settlement::Applied => {
                        tracing::info!(?catalog, generation, "record updated");
                    }
                    Settlement::Failed | Settlement::Stale => {}
                }
            }
        }
    }

    fn handle_top_bar_action(&mut self, ctx: &egui::Context, action: TopBarAction) {
        match action {
            TopBarAction::SwitchCatalog(kind) => {
                self.settings.active_catalog = kind;
            }
            TopBarAction::SetDarkMode(dark_mode) => {
                self.settings.dark_mode = dark_mode;
                apply_dark_mode(ctx, dark_mode);
            }
        }
        self.save_settings();
    }

    fn save_settings(&self) {
        if let Err(e) = save_json(&self.settings, SETTINGS_FILE) {
            tracing::warn!(error = %e, "failed to save settings");
        }
    }
}

impl eframe::App for ZukanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for result in self.task_manager.poll_results() {
            self.handle_task_result(result);
        }

        let active = self.settings.active_catalog;
        let busy = self.panels.iter().any(|panel| panel.is_busy());

        if let Some(action) = TopBar::show(ctx, &self.settings, &self.theme, busy) {
            self.handle_top_bar_action(ctx, action);
        }

        let Self { settings, theme, panels, message_overlay, task_manager } = self;
        let Some(panel) = panels.iter_mut().find(|panel| panel.kind() == active) else {
            return;
        };

        panel.ensure_started(task_manager, settings);

        let refresh =
            egui::CentralPanel::default().show(ctx, |ui| panel.show(ui, theme, settings)).inner;
        if refresh {
            panel.request(task_manager, settings, Selection::Random);
        }

        let state = panel.state();
        if state.busy && state.record.is_none() {
            message_overlay.set_message(format!("Loading {}...", active.label().to_lowercase()));
        } else {
            message_overlay.clear_message();
        }
        message_overlay.show(ctx, theme);

        if busy {
            // Keeps the spinner moving even if no input arrives.
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

fn apply_dark_mode(ctx: &egui::Context, dark_mode: bool) {
    ctx.set_theme(if dark_mode { egui::Theme::Dark } else { egui::Theme::Light });
}

fn setup_fonts(ctx: &egui::Context, configured: Option<&Path>) {
    let candidates: Vec<PathBuf> = match configured {
        Some(path) => vec![path.to_path_buf()],
        None => CJK_FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
    };

    let Some((path, bytes)) =
        candidates.iter().find_map(|path| std::fs::read(path).ok().map(|bytes| (path, bytes)))
    else {
        tracing::warn!("no CJK font found; localized names may not render");
        return;
    };

    tracing::info!(path = %path.display(), "using CJK fallback font");

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert("cjk".to_owned(), Arc::new(egui::FontData::from_owned(bytes)));

    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts.families.entry(family).or_default().push("cjk".to_owned());
    }

    ctx.set_fonts(fonts);
}
