use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
    time::Duration,
};

use tokio::runtime::Runtime;

use super::TaskResult;
use crate::{
    core::{
        fetch::JsonFetcher,
        http::CatalogClient,
        pipeline::build_display_record,
        CatalogKind,
        Selection,
        ZukanError,
    },
    settings::SettingsData,
};

type Notifier = Arc<dyn Fn() + Send + Sync>;

/// Runs fetch cycles off the UI thread and queues their outcomes for
/// [`TaskManager::poll_results`].
pub struct TaskManager {
    runtime: Arc<Runtime>,
    fetcher: Arc<dyn JsonFetcher>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    notifier: Option<Notifier>,
}

impl TaskManager {
    pub fn new(timeout: Duration) -> Result<Self, ZukanError> {
        let client = CatalogClient::new(timeout)?;
        Self::with_fetcher(Arc::new(client))
    }

    pub fn with_fetcher(fetcher: Arc<dyn JsonFetcher>) -> Result<Self, ZukanError> {
        let runtime = Arc::new(Runtime::new()?);
        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, fetcher, receiver, sender, notifier: None })
    }

    /// Called after every queued result, e.g. to wake the UI.
    pub fn set_notifier(&mut self, notifier: impl Fn() + Send + Sync + 'static) {
        self.notifier = Some(Arc::new(notifier));
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>, Option<Notifier>) {
        (self.sender.clone(), self.runtime.clone(), self.notifier.clone())
    }

    pub fn fetch_record(
        &self,
        catalog: CatalogKind,
        selection: Selection,
        generation: u64,
        settings: SettingsData,
    ) {
        let (sender, runtime, notifier) = self.task_context();
        let fetcher = Arc::clone(&self.fetcher);

        tracing::info!(?catalog, ?selection, generation, "starting fetch cycle");

        thread::spawn(move || {
            let result = runtime.block_on(async {
                build_display_record(fetcher.as_ref(), &settings, catalog, &selection).await
            });

            let _ = sender.send(TaskResult::RecordFetched { catalog, generation, result });

            if let Some(notify) = notifier {
                notify();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use serde_json::json;

    use super::*;
    use crate::{
        core::fetch::testing::FakeFetcher,
        settings::CharacterCatalogSettings,
    };

    fn wait_for_results(manager: &mut TaskManager, count: usize) -> Vec<TaskResult> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut results = Vec::new();
        while results.len() < count && Instant::now() < deadline {
            results.extend(manager.poll_results());
            thread::sleep(Duration::from_millis(10));
        }
        results
    }

    fn settings() -> SettingsData {
        SettingsData {
            character: CharacterCatalogSettings {
                base_url: "https://nikke.test".to_string(),
                initial_character: None,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_fetch_record_reports_generation() {
        let fetcher = FakeFetcher::new().with(
            "https://nikke.test/characters/anis",
            json!({
                "name": "Anis", "rarity": "SR", "element": "Electric", "weapon": "RL",
                "class": "Supporter", "skills": [], "images": {}
            }),
        );
        let mut manager = TaskManager::with_fetcher(Arc::new(fetcher)).unwrap();

        manager.fetch_record(
            CatalogKind::Character,
            Selection::Forced("anis".to_string()),
            3,
            settings(),
        );

        let results = wait_for_results(&mut manager, 1);
        assert_eq!(results.len(), 1);
        match &results[0] {
            TaskResult::RecordFetched { catalog, generation, result } => {
                assert_eq!(*catalog, CatalogKind::Character);
                assert_eq!(*generation, 3);
                assert_eq!(result.as_ref().unwrap().name, "Anis");
            }
        }
    }

    #[test]
    fn test_fetch_failure_is_reported_not_panicked() {
        let mut manager = TaskManager::with_fetcher(Arc::new(FakeFetcher::new())).unwrap();

        manager.fetch_record(CatalogKind::Character, Selection::Random, 1, settings());

        let results = wait_for_results(&mut manager, 1);
        match &results[..] {
            [TaskResult::RecordFetched { result, .. }] => assert!(result.is_err()),
            other => panic!("Expected one result, got {:?}", other),
        }
    }

    #[test]
    fn test_notifier_runs_after_result() {
        use std::sync::atomic::{
            AtomicUsize,
            Ordering,
        };

        let counter = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&counter);

        let mut manager = TaskManager::with_fetcher(Arc::new(FakeFetcher::new())).unwrap();
        manager.set_notifier(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        manager.fetch_record(CatalogKind::Character, Selection::Random, 1, settings());
        wait_for_results(&mut manager, 1);

        let deadline = Instant::now() + Duration::from_secs(5);
        while counter.load(Ordering::SeqCst) == 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
