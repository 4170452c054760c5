use std::sync::Arc;

use eframe::egui;
use tokio::sync::watch;

use super::{
    radar_chart::RadarChart,
    theme::Theme,
};
use crate::{
    catalog::character::MAX_RARITY_TIER,
    core::{
        chart::ChartData,
        state::{
            Settlement,
            ViewState,
            ViewStore,
        },
        tasks::{
            types::RecordResult,
            TaskManager,
        },
        CatalogKind,
        DisplayRecord,
        Selection,
    },
    settings::SettingsData,
};

const IMAGE_SIZE: f32 = 192.0;

/// One catalog's view: the state store, a subscription to it, and the chart
/// built for the record currently shown.
pub struct CatalogPanel {
    kind: CatalogKind,
    store: ViewStore,
    state: watch::Receiver<Arc<ViewState>>,
    chart: Option<(u64, RadarChart)>,
    started: bool,
}

impl CatalogPanel {
    pub fn new(kind: CatalogKind) -> Self {
        let store = ViewStore::new();
        let state = store.subscribe();
        Self { kind, store, state, chart: None, started: false }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn state(&self) -> Arc<ViewState> {
        self.store.snapshot()
    }

    pub fn is_busy(&self) -> bool {
        self.state().busy
    }

    /// Starts a fetch cycle. Ignored while one is already in flight.
    pub fn request(
        &mut self,
        tasks: &TaskManager,
        settings: &SettingsData,
        selection: Selection,
    ) -> Option<u64> {
        if self.is_busy() {
            tracing::debug!(catalog = ?self.kind, "fetch already in flight");
            return None;
        }

        let generation = self.store.begin();
        tasks.fetch_record(self.kind, selection, generation, settings.clone());
        Some(generation)
    }

    /// First fetch when the panel is shown for the first time.
    pub fn ensure_started(&mut self, tasks: &TaskManager, settings: &SettingsData) {
        if self.started {
            return;
        }
        self.started = true;
        self.request(tasks, settings, initial_selection(self.kind, settings));
    }

    pub fn settle(&mut self, generation: u64, result: RecordResult) -> Settlement {
        self.store.settle(generation, result)
    }

    /// Rebuilds the chart when the subscription reports a record from a new
    /// cycle. The old chart is dropped, never updated in place.
    pub fn sync_chart(&mut self, settings: &SettingsData) {
        if !self.state.has_changed().unwrap_or(false) {
            return;
        }

        let state = self.state.borrow_and_update().clone();
        let Some(record) = &state.record else {
            return;
        };

        let current = self.chart.as_ref().map(|(generation, _)| *generation);
        if current != Some(state.record_generation) {
            let data = ChartData::from_record(record, chart_ceiling(self.kind, settings));
            self.chart = Some((state.record_generation, RadarChart::new(data)));
        }
    }

    pub fn chart(&self) -> Option<&RadarChart> {
        self.chart.as_ref().map(|(_, chart)| chart)
    }

    /// Draws the panel. Returns true when the refresh button was pressed.
    pub fn show(&mut self, ui: &mut egui::Ui, theme: &Theme, settings: &SettingsData) -> bool {
        self.sync_chart(settings);
        let state = self.state();

        let mut refresh = false;
        ui.horizontal(|ui| {
            let label = if state.busy { "Loading..." } else { self.kind.refresh_label() };
            if ui.add_enabled(!state.busy, egui::Button::new(label)).clicked() {
                refresh = true;
            }
            if state.busy {
                ui.add(egui::Spinner::new());
            }

            if let Some(updated_at) = state.updated_at {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(format!("Updated {}", updated_at.format("%H:%M:%S")));
                });
            }
        });

        ui.separator();

        match &state.record {
            Some(record) => {
                egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                    show_record(ui, theme, record);
                    ui.add_space(12.0);
                    if let Some(chart) = self.chart() {
                        chart.show(ui, theme);
                    }
                });
            }
            None if state.busy => {}
            None => {
                ui.label(theme.label(ui.ctx(), "Nothing loaded yet."));
            }
        }

        refresh
    }
}

pub fn initial_selection(kind: CatalogKind, settings: &SettingsData) -> Selection {
    match kind {
        CatalogKind::Creature => Selection::Random,
        CatalogKind::Character => match &settings.character.initial_character {
            Some(name) if !name.trim().is_empty() => Selection::Forced(name.trim().to_string()),
            _ => Selection::Random,
        },
    }
}

fn chart_ceiling(kind: CatalogKind, settings: &SettingsData) -> f32 {
    match kind {
        CatalogKind::Creature => settings.chart_ceiling,
        CatalogKind::Character => MAX_RARITY_TIER as f32,
    }
}

fn show_record(ui: &mut egui::Ui, theme: &Theme, record: &DisplayRecord) {
    ui.heading(theme.heading(ui.ctx(), &record.display_name));
    if record.display_name != record.name {
        ui.label(theme.label(ui.ctx(), &record.name));
    }

    ui.add_space(6.0);

    ui.horizontal_top(|ui| {
        if let Some(url) = &record.image_url {
            ui.add(
                egui::Image::new(url.as_str())
                    .max_size(egui::vec2(IMAGE_SIZE, IMAGE_SIZE))
                    .maintain_aspect_ratio(true),
            );
        }

        egui::Grid::new(("facts", &record.id)).num_columns(2).spacing([12.0, 4.0]).show(
            ui,
            |ui| {
                for fact in &record.facts {
                    ui.label(theme.label(ui.ctx(), &fact.label));
                    ui.label(&fact.value);
                    ui.end_row();
                }
            },
        );
    });

    for section in &record.sections {
        ui.add_space(8.0);
        ui.strong(&section.title);
        for entry in &section.entries {
            ui.horizontal_wrapped(|ui| {
                ui.label("•");
                ui.label(&entry.display).on_hover_text(&entry.key);
                if let Some(detail) = &entry.detail {
                    ui.weak(detail);
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        thread,
        time::{
            Duration,
            Instant,
        },
    };

    use serde_json::json;

    use super::*;
    use crate::{
        core::{
            fetch::testing::FakeFetcher,
            tasks::TaskResult,
        },
        settings::CharacterCatalogSettings,
    };

    fn settings() -> SettingsData {
        SettingsData {
            character: CharacterCatalogSettings {
                base_url: "https://nikke.test".to_string(),
                initial_character: Some("anis".to_string()),
            },
            ..Default::default()
        }
    }

    fn manager() -> TaskManager {
        let fetcher = FakeFetcher::new().with(
            "https://nikke.test/characters/anis",
            json!({
                "name": "Anis", "rarity": "SR", "element": "Electric", "weapon": "RL",
                "class": "Supporter", "skills": [{ "name": "Burst", "description": "" }],
                "images": { "full": "https://img.test/anis.png" }
            }),
        );
        TaskManager::with_fetcher(Arc::new(fetcher)).unwrap()
    }

    fn next_result(tasks: &mut TaskManager) -> TaskResult {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(result) = tasks.poll_results().pop() {
                return result;
            }
            assert!(Instant::now() < deadline, "no task result arrived");
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_initial_selection() {
        let settings = settings();
        assert_eq!(initial_selection(CatalogKind::Creature, &settings), Selection::Random);
        assert_eq!(
            initial_selection(CatalogKind::Character, &settings),
            Selection::Forced("anis".to_string())
        );

        let mut blank = settings.clone();
        blank.character.initial_character = Some("  ".to_string());
        assert_eq!(initial_selection(CatalogKind::Character, &blank), Selection::Random);
    }

    #[test]
    fn test_request_is_gated_while_busy() {
        let tasks = manager();
        let mut panel = CatalogPanel::new(CatalogKind::Character);
        let settings = settings();

        assert_eq!(panel.request(&tasks, &settings, Selection::Forced("anis".into())), Some(1));
        assert!(panel.is_busy());
        assert_eq!(panel.request(&tasks, &settings, Selection::Random), None);
    }

    #[test]
    fn test_settled_record_rebuilds_chart() {
        let mut tasks = manager();
        let mut panel = CatalogPanel::new(CatalogKind::Character);
        let settings = settings();

        panel.ensure_started(&tasks, &settings);
        let TaskResult::RecordFetched { generation, result, .. } = next_result(&mut tasks);
        assert_eq!(panel.settle(generation, result), Settlement::Applied);

        panel.sync_chart(&settings);
        let chart = panel.chart().expect("chart built for the new record");
        assert_eq!(chart.data().label, "Anis");
        assert_eq!(chart.data().ceiling, MAX_RARITY_TIER as f32);
        assert!(!panel.is_busy());

        // A failed cycle keeps both the record and its chart
        panel.request(&tasks, &settings, Selection::Forced("missing".into()));
        let TaskResult::RecordFetched { generation, result, .. } = next_result(&mut tasks);
        assert_eq!(panel.settle(generation, result), Settlement::Failed);

        panel.sync_chart(&settings);
        assert_eq!(panel.state().record.as_ref().unwrap().name, "Anis");
        assert_eq!(panel.chart().unwrap().data().label, "Anis");
        assert!(!panel.is_busy());
    }
}
