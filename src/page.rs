//! In-memory page surface: widget containers and the lines rendered into them.
//!
//! A [`Document`] owns a flat list of [`Container`] elements, each carrying a
//! class list and attributes. Containers are cheap handles; clones refer to
//! the same element.

use crate::script::LineKind;
use crate::sink::LineSink;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an element, stable for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

/// A line appended under a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub kind: LineKind,
    pub text: String,
}

impl RenderedLine {
    /// Class attribute of the line element.
    pub fn class_name(&self) -> &'static str {
        self.kind.class()
    }
}

#[derive(Debug)]
struct ContainerInner {
    classes: Vec<String>,
    attributes: HashMap<String, String>,
    lines: Vec<RenderedLine>,
    attached: bool,
}

/// Handle to one element on the page.
#[derive(Debug, Clone)]
pub struct Container {
    id: ElementId,
    inner: Arc<Mutex<ContainerInner>>,
}

impl Container {
    /// Create a detached element with the given classes. It becomes attached
    /// once inserted into a [`Document`].
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: ElementId(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed)),
            inner: Arc::new(Mutex::new(ContainerInner {
                classes: classes.into_iter().map(Into::into).collect(),
                attributes: HashMap::new(),
                lines: Vec::new(),
                attached: false,
            })),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.lock().attributes.insert(name.into(), value.into());
        self
    }

    fn lock(&self) -> MutexGuard<'_, ContainerInner> {
        // Every write leaves the lines consistent; poisoning is harmless.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.lock().classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.lock().attributes.get(name).cloned()
    }

    pub fn is_attached(&self) -> bool {
        self.lock().attached
    }

    /// Remove the element from the page. Rendered lines stay as they were.
    pub fn detach(&self) {
        self.lock().attached = false;
    }

    /// Snapshot of the rendered lines.
    pub fn lines(&self) -> Vec<RenderedLine> {
        self.lock().lines.clone()
    }

    pub fn line_count(&self) -> usize {
        self.lock().lines.len()
    }

    /// Text of every rendered line, in order.
    pub fn texts(&self) -> Vec<String> {
        self.lock().lines.iter().map(|l| l.text.clone()).collect()
    }

    fn set_attached(&self, attached: bool) {
        self.lock().attached = attached;
    }
}

impl LineSink for Container {
    fn is_attached(&self) -> bool {
        Container::is_attached(self)
    }

    fn append_line(&mut self, kind: LineKind) {
        let mut inner = self.lock();
        if inner.attached {
            inner.lines.push(RenderedLine {
                kind,
                text: String::new(),
            });
        }
    }

    fn reveal(&mut self, prefix: &str) {
        let mut inner = self.lock();
        if !inner.attached {
            return;
        }
        if let Some(line) = inner.lines.last_mut() {
            line.text.clear();
            line.text.push_str(prefix);
        }
    }

    fn clear(&mut self) {
        let mut inner = self.lock();
        if inner.attached {
            inner.lines.clear();
        }
    }
}

/// The page: every element that can host a widget.
#[derive(Debug, Default)]
pub struct Document {
    elements: Vec<Container>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `element` into the page and return a handle to it.
    pub fn insert(&mut self, element: Container) -> Container {
        element.set_attached(true);
        self.elements.push(element.clone());
        element
    }

    /// Detach `element` and drop it from the page.
    pub fn remove(&mut self, element: &Container) {
        element.detach();
        self.elements.retain(|e| e.id() != element.id());
    }

    /// Every attached element carrying `class`, in insertion order.
    pub fn query_class(&self, class: &str) -> Vec<Container> {
        self.elements
            .iter()
            .filter(|e| e.is_attached() && e.has_class(class))
            .cloned()
            .collect()
    }

    /// Page teardown: every element is detached.
    pub fn teardown(&mut self) {
        for element in self.elements.drain(..) {
            element.detach();
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
