//! Modules: owners of a fixed, name-keyed collection of tasks
//!
//! A module wraps a kernel-state value `S` (the concrete algorithm's
//! internals, scratch buffers included) and the tasks built around it. The
//! task set is fixed after construction; `clone()` produces a structurally
//! identical, fully independent replica — the sole mechanism for thread-level
//! parallelism in this design. No shared mutable state remains between a
//! module and its clones.

use std::ops::{Index, IndexMut};

use crate::error::{Error, Result};
use crate::task::Task;

/// Owner of a kernel state and the named tasks operating on it.
pub struct Module<S> {
    name: String,
    state: S,
    tasks: Vec<Task<S>>,
}

impl<S> Module<S> {
    /// Build a module around a kernel-state value.
    pub fn new(name: impl Into<String>, state: S) -> Self {
        Self {
            name: name.into(),
            state,
            tasks: Vec::new(),
        }
    }

    /// Module name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The kernel state handed to every codelet invocation.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Mutable access to the kernel state (driver-side reconfiguration
    /// between calls; never during an in-flight `exec`).
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Register a new named task and return it for construction (sockets,
    /// timers, codelet).
    #[tracing::instrument(skip(self))]
    pub fn create_task(&mut self, name: &str) -> Result<&mut Task<S>> {
        if self.tasks.iter().any(|t| t.name() == name) {
            return Err(Error::DuplicateTask {
                module: self.name.clone(),
                name: name.to_string(),
            });
        }
        tracing::debug!(module = %self.name, task = name, "task_created");
        self.tasks.push(Task::new(name.to_string()));
        Ok(self.tasks.last_mut().unwrap_or_else(|| unreachable!()))
    }

    /// The tasks, in creation order.
    pub fn tasks(&self) -> &[Task<S>] {
        &self.tasks
    }

    /// Look up a task by name.
    pub fn task(&self, name: &str) -> Result<&Task<S>> {
        self.tasks
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| Error::TaskNotFound {
                module: self.name.clone(),
                name: name.to_string(),
            })
    }

    /// Look up a task by name, mutably.
    pub fn task_mut(&mut self, name: &str) -> Result<&mut Task<S>> {
        let module = self.name.clone();
        self.tasks
            .iter_mut()
            .find(|t| t.name() == name)
            .ok_or(Error::TaskNotFound {
                module,
                name: name.to_string(),
            })
    }

    /// Execute a task by name against this module's kernel state.
    pub fn exec(&mut self, name: &str) -> Result<i32> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.name() == name)
            .ok_or_else(|| Error::TaskNotFound {
                module: self.name.clone(),
                name: name.to_string(),
            })?;
        let Self { state, tasks, .. } = self;
        tasks[idx].exec(state)
    }

    /// Zero the statistics of every task.
    pub fn reset(&mut self) {
        for task in &mut self.tasks {
            task.reset();
        }
    }
}

/// Deep clone: kernel state cloned, every task cloned with fresh buffers and
/// zeroed statistics. Safe to call from a single controlling thread before
/// concurrent execution begins; never while an `exec` is in flight on the
/// source.
impl<S: Clone> Clone for Module<S> {
    fn clone(&self) -> Self {
        tracing::debug!(module = %self.name, n_tasks = self.tasks.len(), "module_cloned");
        Self {
            name: self.name.clone(),
            state: self.state.clone(),
            tasks: self.tasks.to_vec(),
        }
    }
}

/// `module["task"]` sugar. Panics on an unknown name; use
/// [`Module::task`] for a recoverable lookup.
impl<S> Index<&str> for Module<S> {
    type Output = Task<S>;

    fn index(&self, name: &str) -> &Task<S> {
        self.task(name).unwrap_or_else(|e| panic!("{e}"))
    }
}

/// `module["task"]` sugar, mutable. Panics on an unknown name; use
/// [`Module::task_mut`] for a recoverable lookup.
impl<S> IndexMut<&str> for Module<S> {
    fn index_mut(&mut self, name: &str) -> &mut Task<S> {
        self.task_mut(name).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<S> std::fmt::Debug for Module<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field("tasks", &self.tasks)
            .finish()
    }
}
