//! [`InstanceManager`] — finds terminal widgets on a page and gives each one
//! its own player.

use crate::config::{PlaybackConfig, SCRIPT_ATTRIBUTE, TERMINAL_CLASS};
use crate::controller::PlaybackController;
use crate::page::{Container, Document, ElementId};
use crate::player::{PlaybackEnd, Player};
use crate::script::{self, Script};
use anyhow::Result;
use std::collections::HashMap;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Starts and tracks one independent player task per terminal widget.
///
/// Tasks are spawned on the current tokio runtime, so [`start`](Self::start)
/// must be called from within one. Dropping the manager aborts every task.
pub struct InstanceManager {
    config: PlaybackConfig,
    script: Script,
    bound: HashMap<ElementId, JoinHandle<PlaybackEnd>>,
}

impl InstanceManager {
    /// Manage widgets that play `script` unless they name another one.
    pub fn new(config: PlaybackConfig, script: Script) -> Self {
        Self {
            config,
            script,
            bound: HashMap::new(),
        }
    }

    /// Default timing and the default built-in script.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(PlaybackConfig::default(), script::default_script()?))
    }

    /// Scan `document` for terminal widgets and start a player for every one
    /// not already playing. Returns how many players were started.
    ///
    /// Bindings whose player has finished are dropped first, so a widget that
    /// was detached and later inserted again gets a fresh player.
    pub fn start(&mut self, document: &Document) -> usize {
        self.bound.retain(|id, handle| {
            let live = !handle.is_finished();
            if !live {
                debug!(element = ?id, "dropping finished player");
            }
            live
        });

        let containers = document.query_class(TERMINAL_CLASS);
        if containers.is_empty() {
            debug!("no terminal widgets on the page");
            return 0;
        }

        let mut started = 0;
        for container in containers {
            if self.bound.contains_key(&container.id()) {
                debug!(element = ?container.id(), "widget already playing");
                continue;
            }
            self.spawn(container);
            started += 1;
        }
        info!(started, total = self.bound.len(), "terminal widgets started");
        started
    }

    fn spawn(&mut self, container: Container) {
        let id = container.id();
        let script = self.script_for(&container);
        let controller = PlaybackController::new(script, &self.config);
        let player = Player::new(controller, container, &self.config);
        self.bound.insert(id, tokio::spawn(player.run()));
    }

    fn script_for(&self, container: &Container) -> Script {
        let Some(name) = container.attribute(SCRIPT_ATTRIBUTE) else {
            return self.script.clone();
        };
        match script::builtin(&name) {
            Ok(script) => script,
            Err(e) => {
                warn!(element = ?container.id(), "{e}, using the default script");
                self.script.clone()
            }
        }
    }

    /// Whether a player was started for `id` and has not been shut down or
    /// pruned after finishing.
    pub fn is_bound(&self, id: ElementId) -> bool {
        self.bound.contains_key(&id)
    }

    /// Number of players still running.
    pub fn running(&self) -> usize {
        self.bound.values().filter(|h| !h.is_finished()).count()
    }

    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }

    /// Page teardown: abort every player and forget all bindings.
    pub fn shutdown(&mut self) {
        for (id, handle) in self.bound.drain() {
            debug!(element = ?id, "aborting player");
            handle.abort();
        }
    }
}

impl Drop for InstanceManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}
