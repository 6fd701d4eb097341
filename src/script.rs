//! Script definitions: the ordered command/output lines one playback cycle replays.

use anyhow::{Result, anyhow};
use std::sync::Arc;
use std::time::Duration;
use LineKind::{Command, Output};

/// Whether a scripted line is something the "user" typed or something the
/// program printed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Command,
    Output,
}

impl LineKind {
    /// The class attached to a rendered line of this kind.
    pub fn class(self) -> &'static str {
        match self {
            LineKind::Command => "terminal-command",
            LineKind::Output => "terminal-output",
        }
    }
}

/// One scripted line: its kind, its text, and how long to pause once it is
/// fully typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDescriptor {
    kind: LineKind,
    text: String,
    delay: Duration,
}

impl LineDescriptor {
    /// Create a descriptor. Fails if `text` is empty.
    pub fn new(kind: LineKind, text: impl Into<String>, delay_ms: u64) -> Result<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(anyhow!("Line text must not be empty"));
        }
        Ok(Self {
            kind,
            text,
            delay: Duration::from_millis(delay_ms),
        })
    }

    pub fn command(text: impl Into<String>, delay_ms: u64) -> Result<Self> {
        Self::new(LineKind::Command, text, delay_ms)
    }

    pub fn output(text: impl Into<String>, delay_ms: u64) -> Result<Self> {
        Self::new(LineKind::Output, text, delay_ms)
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Pause after the line has been fully revealed.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of characters the typing renderer reveals for this line.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// An immutable, ordered list of lines. Cloning shares the same storage, so
/// every instance replaying the same script reads one copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    lines: Arc<[LineDescriptor]>,
}

impl Script {
    /// Build a script from its lines. Fails if `lines` is empty.
    pub fn new(lines: Vec<LineDescriptor>) -> Result<Self> {
        if lines.is_empty() {
            return Err(anyhow!("Script must contain at least one line"));
        }
        Ok(Self {
            lines: lines.into(),
        })
    }

    /// Build a script from `(kind, text, delay_ms)` tuples.
    pub fn from_entries(entries: &[(LineKind, &str, u64)]) -> Result<Self> {
        let lines = entries
            .iter()
            .enumerate()
            .map(|(i, (kind, text, delay_ms))| {
                LineDescriptor::new(*kind, *text, *delay_ms)
                    .map_err(|e| anyhow!("Invalid script line {}: {}", i + 1, e))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(lines)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false: a script has at least one line.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LineDescriptor> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> &[LineDescriptor] {
        &self.lines
    }
}

const GITPOOL: &[(LineKind, &str, u64)] = &[
    (Command, "$ gitpool start", 1000),
    (Output, "🚀 GitPool daemon started", 500),
    (Command, "$ gitpool add my-app ~/repos/my-app --max 8", 1500),
    (Output, "✅ Repository added to pool", 500),
    (Command, "$ gitpool claim my-app --branch feature-xyz", 1500),
    (Output, "a91b6fc1-1234-5678-90ab-cdef12345678", 300),
    (
        Output,
        "/home/user/.gitpool/worktrees/my-app/a91b6fc1-1234-5678-90ab-cdef12345678",
        300,
    ),
    (Command, "$ cd $WORKTREE_PATH && echo \"Ready to work! ⚡\"", 1500),
    (Output, "Ready to work! ⚡", 500),
];

const QUICKSTART: &[(LineKind, &str, u64)] = &[
    (Command, "$ git clone https://example.com/acme/site.git", 400),
    (Output, "Cloning into 'site'... done.", 800),
    (Command, "$ cd site && make serve", 400),
    (Output, "Serving on http://localhost:8080", 2000),
];

/// Name of the script used when none is requested.
pub const DEFAULT_SCRIPT: &str = "gitpool";

type ScriptFn = fn() -> Result<Script>;

fn gitpool() -> Result<Script> {
    Script::from_entries(GITPOOL)
}

fn quickstart() -> Result<Script> {
    Script::from_entries(QUICKSTART)
}

static REGISTRY: &[(&str, ScriptFn)] = &[("gitpool", gitpool), ("quickstart", quickstart)];

/// Look up a built-in script by name.
pub fn builtin(name: &str) -> Result<Script> {
    REGISTRY
        .iter()
        .find(|(script_name, _)| *script_name == name)
        .map(|(_, build)| build())
        .unwrap_or_else(|| Err(anyhow!("Unknown script: {}", name)))
}

/// Names of every built-in script, in registry order.
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(name, _)| *name)
}

/// The script every widget plays unless it asks for another one.
pub fn default_script() -> Result<Script> {
    builtin(DEFAULT_SCRIPT)
}
