//! View state and the controller that drives it.
//!
//! All transient UI state lives in one [`ViewState`] owned by a [`Browser`].
//! User actions and AI completions arrive as [`Event`]s; applying an event
//! mutates the state deterministically and may yield an [`Effect`], an AI
//! request for the caller to run (inline or on a worker). Running an effect
//! produces the resolution event that is fed back through
//! [`Browser::dispatch`].
//!
//! Each AI feature moves `Idle -> Loading -> Idle` (with or without a stored
//! result). A trigger while the feature is loading is ignored. Failures are
//! logged and leave the previously stored result untouched.

use miette::Diagnostic;
use thiserror::Error;

use crate::gateway::{AiGateway, AiResult};
use crate::model::{Category, CategoryFilter, Document, TrainingRoadmap};
use crate::query;
use crate::store::DocumentStore;

/// Actions rejected before any request is issued.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum ViewError {
    #[error("no document is open")]
    #[diagnostic(
        code(lumina::view::nothing_selected),
        help("Open a document before asking for a summary.")
    )]
    NothingSelected,

    #[error("unknown document \"{id}\"")]
    #[diagnostic(
        code(lumina::view::unknown_document),
        help("List document ids with `lumina list`.")
    )]
    UnknownDocument { id: String },

    #[error("roadmap topic is empty")]
    #[diagnostic(
        code(lumina::view::empty_topic),
        help("Enter a focus area, e.g. \"Onboarding for Senior Engineers\".")
    )]
    EmptyTopic,
}

/// Loading phase of one AI feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    /// Not loading, and a result from an earlier request is held.
    Ready,
}

/// Inputs to the controller.
#[derive(Debug)]
pub enum Event {
    SetCategory(CategoryFilter),
    SetSearch(String),
    ToggleSidebar,
    CloseSidebar,
    /// Open the detail viewer for a document id.
    Select(String),
    CloseViewer,
    /// Summarize the document open in the viewer.
    Summarize,
    GenerateRoadmap { topic: String },
    /// Outcome of a summary request issued from viewer session `viewer`.
    SummaryResolved {
        viewer: u64,
        document_id: String,
        result: AiResult<String>,
    },
    RoadmapResolved(AiResult<TrainingRoadmap>),
}

/// An outbound AI request produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Summarize `document`; `viewer` is the viewer session that asked.
    Summarize { document: Document, viewer: u64 },
    GenerateRoadmap {
        topic: String,
        documents: Vec<Document>,
    },
}

impl Effect {
    /// Perform the request and wrap the outcome as a resolution event.
    ///
    /// Blocks for the duration of the network call.
    pub fn run(self, gateway: &AiGateway) -> Event {
        match self {
            Effect::Summarize { document, viewer } => Event::SummaryResolved {
                result: gateway.summarize(&document),
                viewer,
                document_id: document.id,
            },
            Effect::GenerateRoadmap { topic, documents } => {
                Event::RoadmapResolved(gateway.generate_roadmap(&topic, &documents))
            }
        }
    }
}

/// Transient UI state. One instance per session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    category: CategoryFilter,
    search: String,
    /// Ids of the visible documents; `None` until the first query runs.
    visible: Option<Vec<String>>,
    selected: Option<Document>,
    /// Viewer session counter. Bumped when the viewer closes or opens on a
    /// different document; summary resolutions from older sessions are dropped.
    viewer: u64,
    sidebar_open: bool,
    summarizing: bool,
    /// Summary for the open document.
    summary: Option<String>,
    generating: bool,
    roadmap: Option<TrainingRoadmap>,
}

impl ViewState {
    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Visible ids in store order, or `None` if no query has run yet.
    pub fn visible_ids(&self) -> Option<&[String]> {
        self.visible.as_deref()
    }

    pub fn selected(&self) -> Option<&Document> {
        self.selected.as_ref()
    }

    /// Current viewer session.
    pub fn viewer(&self) -> u64 {
        self.viewer
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn roadmap(&self) -> Option<&TrainingRoadmap> {
        self.roadmap.as_ref()
    }

    pub fn summary_phase(&self) -> Phase {
        phase(self.summarizing, self.summary.is_some())
    }

    pub fn roadmap_phase(&self) -> Phase {
        phase(self.generating, self.roadmap.is_some())
    }

    /// The roadmap generator is shown only while browsing the Roadmap category.
    pub fn roadmap_panel_visible(&self) -> bool {
        self.category == CategoryFilter::Only(Category::Roadmap)
    }
}

fn phase(loading: bool, has_result: bool) -> Phase {
    match (loading, has_result) {
        (true, _) => Phase::Loading,
        (false, true) => Phase::Ready,
        (false, false) => Phase::Idle,
    }
}

/// Owns the document store and the view state; applies events.
#[derive(Debug, Clone)]
pub struct Browser {
    store: DocumentStore,
    state: ViewState,
}

impl Browser {
    /// A browser with default state. No query has run yet.
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store,
            state: ViewState::default(),
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Recompute the visible set from the current category and search text.
    pub fn refresh(&mut self) {
        let ids = query::filter(self.store.documents(), self.state.category, &self.state.search)
            .into_iter()
            .map(|d| d.id.clone())
            .collect();
        self.state.visible = Some(ids);
    }

    /// The visible documents, or `None` if no query has run yet.
    pub fn visible(&self) -> Option<Vec<&Document>> {
        self.state
            .visible
            .as_ref()
            .map(|ids| ids.iter().filter_map(|id| self.store.get(id)).collect())
    }

    /// Apply one event. Returns the AI request to run, if the event started one.
    pub fn dispatch(&mut self, event: Event) -> Result<Option<Effect>, ViewError> {
        match event {
            Event::SetCategory(category) => {
                self.state.category = category;
                self.state.sidebar_open = false;
                self.refresh();
            }
            Event::SetSearch(search) => {
                self.state.search = search;
                self.refresh();
            }
            Event::ToggleSidebar => {
                self.state.sidebar_open = !self.state.sidebar_open;
            }
            Event::CloseSidebar => {
                self.state.sidebar_open = false;
            }
            Event::Select(id) => {
                let doc = self
                    .store
                    .get(&id)
                    .cloned()
                    .ok_or(ViewError::UnknownDocument { id })?;
                if self.state.selected.as_ref().map(|d| &d.id) != Some(&doc.id) {
                    self.state.viewer += 1;
                    self.state.summary = None;
                    self.state.summarizing = false;
                }
                self.state.selected = Some(doc);
            }
            Event::CloseViewer => {
                self.state.viewer += 1;
                self.state.selected = None;
                self.state.summary = None;
                self.state.summarizing = false;
            }
            Event::Summarize => {
                let doc = self.state.selected.clone().ok_or(ViewError::NothingSelected)?;
                if self.state.summarizing {
                    tracing::debug!(document = %doc.id, "summary already in flight, ignoring");
                    return Ok(None);
                }
                self.state.summarizing = true;
                return Ok(Some(Effect::Summarize {
                    document: doc,
                    viewer: self.state.viewer,
                }));
            }
            Event::GenerateRoadmap { topic } => {
                if topic.trim().is_empty() {
                    return Err(ViewError::EmptyTopic);
                }
                if self.state.generating {
                    tracing::debug!(topic = %topic, "roadmap already in flight, ignoring");
                    return Ok(None);
                }
                self.state.generating = true;
                self.state.roadmap = None;
                return Ok(Some(Effect::GenerateRoadmap {
                    topic,
                    documents: self.store.documents().to_vec(),
                }));
            }
            Event::SummaryResolved {
                viewer,
                document_id,
                result,
            } => {
                self.resolve_summary(viewer, document_id, result);
            }
            Event::RoadmapResolved(result) => {
                self.state.generating = false;
                match result {
                    Ok(roadmap) => self.state.roadmap = Some(roadmap),
                    Err(e) => tracing::warn!(error = %e, "roadmap generation failed"),
                }
            }
        }
        Ok(None)
    }

    fn resolve_summary(&mut self, viewer: u64, document_id: String, result: AiResult<String>) {
        let open = self.state.selected.as_ref().map(|d| d.id.as_str());
        if viewer != self.state.viewer || open != Some(document_id.as_str()) {
            if let Err(e) = &result {
                tracing::warn!(document = %document_id, error = %e, "summary failed");
            }
            tracing::debug!(
                document = %document_id,
                viewer,
                current = self.state.viewer,
                "dropping summary from a closed viewer"
            );
            return;
        }
        self.state.summarizing = false;
        match result {
            Ok(text) => self.state.summary = Some(text),
            Err(e) => tracing::warn!(document = %document_id, error = %e, "summary failed"),
        }
    }
}
