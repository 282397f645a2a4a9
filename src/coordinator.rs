//! Category switching.
//!
//! A switch bumps the request counter and loads the target category on a
//! blocking task. Finished loads come back through a channel tagged with
//! their request id, and the display thread commits only the one whose id
//! still equals the counter. Anything older lost the race and is dropped,
//! whatever order the workers finish in.

use std::sync::Arc;

use log::{debug, info};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::catalog::Category;
use crate::ring::{Rotation, SlideshowRing};
use crate::state::LoadingState;

pub type RequestId = u64;

/// Produces the slides of one category. Runs on a worker thread and must not
/// touch display state.
pub trait CategoryLoader: Send + Sync + 'static {
    type Item: Send + 'static;

    fn load(&self, category: &Category) -> Vec<Self::Item>;
}

struct LoadResult<T> {
    request: RequestId,
    category: usize,
    items: Vec<T>,
}

pub struct Coordinator<L: CategoryLoader> {
    loader: Arc<L>,
    categories: Vec<Category>,
    runtime: Handle,

    counter: RequestId,
    state: LoadingState,
    selected: usize,
    displayed: Option<usize>,
    ring: SlideshowRing<L::Item>,

    results_tx: UnboundedSender<LoadResult<L::Item>>,
    results_rx: UnboundedReceiver<LoadResult<L::Item>>,
    workers: Vec<JoinHandle<()>>,
    discarded: u64,
}

impl<L: CategoryLoader> Coordinator<L> {
    pub fn new(loader: L, categories: Vec<Category>, runtime: Handle) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            loader: Arc::new(loader),
            categories,
            runtime,
            counter: 0,
            state: LoadingState::Idle,
            selected: 0,
            displayed: None,
            ring: SlideshowRing::default(),
            results_tx,
            results_rx,
            workers: Vec::new(),
            discarded: 0,
        }
    }

    /// Starts loading the category at `index` (wrapped into range) and
    /// supersedes every earlier request. Returns `None` if there are no
    /// categories at all.
    pub fn switch_to(&mut self, index: usize) -> Option<RequestId> {
        if self.categories.is_empty() {
            return None;
        }
        let index = index % self.categories.len();

        self.counter += 1;
        let request = self.counter;
        self.selected = index;

        // Anything already queued belongs to an older request.
        while self.results_rx.try_recv().is_ok() {
            self.discarded += 1;
        }

        let loader = Arc::clone(&self.loader);
        let category = self.categories[index].clone();
        let results_tx = self.results_tx.clone();
        info!(
            "Loading category {} {:?} ({}) as request {}",
            category.id,
            category.name,
            category.directory.display(),
            request
        );

        let worker = self.runtime.spawn_blocking(move || {
            let items = loader.load(&category);
            // A closed channel means the coordinator is gone.
            let _ = results_tx.send(LoadResult {
                request,
                category: index,
                items,
            });
        });
        self.workers.retain(|worker| !worker.is_finished());
        self.workers.push(worker);

        self.state = LoadingState::Loading;
        Some(request)
    }

    pub fn next_category(&mut self) -> Option<RequestId> {
        self.switch_to(self.selected + 1)
    }

    pub fn previous_category(&mut self) -> Option<RequestId> {
        let count = self.categories.len().max(1);
        self.switch_to((self.selected + count - 1) % count)
    }

    /// Rotates the displayed ring. Refused while a switch is pending, since
    /// the ring on screen is about to be replaced. Returns whether the slide
    /// on screen changed.
    pub fn rotate(&mut self, rotation: Rotation) -> bool {
        if self.state == LoadingState::Loading {
            debug!("Ignoring {:?} rotation while loading", rotation);
            return false;
        }
        self.ring.rotate(rotation);
        self.ring.len() > 1
    }

    /// Drains finished loads without blocking. Commits the current request's
    /// result if it is among them and returns its id.
    pub fn poll(&mut self) -> Option<RequestId> {
        let mut committed = None;

        while let Ok(result) = self.results_rx.try_recv() {
            if result.request == self.counter && self.state == LoadingState::Loading {
                info!(
                    "Request {} committed: {} slides for {:?}",
                    result.request,
                    result.items.len(),
                    self.categories[result.category].name
                );
                self.ring = SlideshowRing::new(result.items);
                self.displayed = Some(result.category);
                self.state = LoadingState::Idle;
                committed = Some(result.request);
            } else {
                debug!(
                    "Discarding stale request {} (current is {})",
                    result.request, self.counter
                );
                self.discarded += 1;
            }
        }

        if committed.is_some() {
            self.workers.retain(|worker| !worker.is_finished());
        }
        committed
    }

    /// Aborts workers that have not started yet. Running ones finish and
    /// their results are discarded as stale.
    pub fn abort_pending(&mut self) {
        for worker in self.workers.drain(..) {
            worker.abort();
        }
    }

    pub fn state(&self) -> LoadingState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadingState::Loading
    }

    pub fn current(&self) -> Option<&L::Item> {
        self.ring.current()
    }

    pub fn ring(&self) -> &SlideshowRing<L::Item> {
        &self.ring
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The category the user asked for last; may still be loading.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The category whose slides are in the ring.
    pub fn displayed(&self) -> Option<usize> {
        self.displayed
    }

    pub fn request_id(&self) -> RequestId {
        self.counter
    }

    pub fn discarded(&self) -> u64 {
        self.discarded
    }
}

impl<L: CategoryLoader> Drop for Coordinator<L> {
    fn drop(&mut self) {
        self.abort_pending();
    }
}
