use std::sync::{Arc, RwLock};

use time::OffsetDateTime;

use crate::core::cache::ViewCache;
use crate::core::config::Settings;
use crate::core::time::Clock;
use crate::db::models::Corpus;
use crate::schemas::analytics::AnalyticsView;
use crate::schemas::leaderboard::LeaderboardView;
use crate::services::analytics::filters::{AnalyticsFilter, LeaderboardFilter};

/// Cache key: corpus generation, filter tuple and `as_of` truncated to the minute.
pub(crate) type AnalyticsKey = (u64, AnalyticsFilter, OffsetDateTime);
pub(crate) type LeaderboardKey = (u64, LeaderboardFilter, OffsetDateTime);

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    clock: Arc<dyn Clock>,
    corpus: RwLock<LoadedCorpus>,
    analytics: ViewCache<AnalyticsKey, AnalyticsView>,
    leaderboard: ViewCache<LeaderboardKey, LeaderboardView>,
}

#[derive(Clone)]
pub(crate) struct LoadedCorpus {
    pub(crate) generation: u64,
    pub(crate) corpus: Arc<Corpus>,
}

impl AppState {
    pub(crate) fn new(settings: Settings, corpus: Corpus, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(InnerState {
                settings,
                clock,
                corpus: RwLock::new(LoadedCorpus { generation: 1, corpus: Arc::new(corpus) }),
                analytics: ViewCache::new(),
                leaderboard: ViewCache::new(),
            }),
        }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    /// The single "now" for one request, read once and handed to the pipeline untouched.
    pub(crate) fn now(&self) -> OffsetDateTime {
        self.inner.clock.now()
    }

    pub(crate) fn corpus(&self) -> LoadedCorpus {
        self.inner.corpus.read().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    /// Swaps in a freshly fetched corpus and drops every cached view.
    pub(crate) fn replace_corpus(&self, corpus: Corpus) -> u64 {
        let generation = {
            let mut loaded =
                self.inner.corpus.write().unwrap_or_else(|poisoned| poisoned.into_inner());
            loaded.generation += 1;
            loaded.corpus = Arc::new(corpus);
            loaded.generation
        };
        self.inner.analytics.clear();
        self.inner.leaderboard.clear();
        generation
    }

    pub(crate) fn analytics_cache(&self) -> &ViewCache<AnalyticsKey, AnalyticsView> {
        &self.inner.analytics
    }

    pub(crate) fn leaderboard_cache(&self) -> &ViewCache<LeaderboardKey, LeaderboardView> {
        &self.inner.leaderboard
    }
}
