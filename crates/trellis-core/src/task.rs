//! Tasks: one computational kernel behind a uniform socket contract
//!
//! A task owns an ordered set of [`Socket`]s, a codelet bound exactly once at
//! construction, execution statistics, and per-task debug configuration.
//! `exec()` is synchronous and runs to completion on the calling thread; a
//! task instance is never executed reentrantly. Thread-level parallelism
//! comes from cloning the owning module, never from sharing a task.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::data::Sample;
use crate::error::{Error, Result};
use crate::socket::{Socket, SocketDirection};
use crate::stats::TaskStats;

/// The kernel bound to a task: receives the owning module's kernel state and
/// the task itself, returns a status code (0 = success; nonzero = a
/// kernel-defined soft failure the engine does not interpret).
pub type Codelet<S> = Arc<dyn Fn(&mut S, &mut Task<S>) -> Result<i32> + Send + Sync>;

/// Per-task debug trace configuration.
///
/// Debug dumps are a diagnostic side channel, not part of the functional
/// contract. Kept per task (never process-global) so module clones stay
/// independent.
#[derive(Debug, Clone)]
pub struct DebugConfig {
    /// Render socket contents around each `exec()` call.
    pub enabled: bool,
    /// Hexadecimal rendering instead of decimal.
    pub hex: bool,
    /// Maximum elements rendered per frame; `None` renders the whole frame.
    pub limit: Option<usize>,
    /// Decimal precision for real-typed sockets.
    pub precision: usize,
    /// Maximum frames rendered per socket; `None` renders all.
    pub frame_max: Option<usize>,
    /// Elements per frame in dumps; `None` treats the socket as one frame.
    pub frame_size: Option<usize>,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            hex: false,
            limit: None,
            precision: 5,
            frame_max: None,
            frame_size: None,
        }
    }
}

/// A unit of computation: sockets + codelet + statistics + debug config.
pub struct Task<S> {
    name: String,
    autoalloc: bool,
    stats_enabled: bool,
    fast: bool,
    debug: DebugConfig,
    sockets: Vec<Socket>,
    codelet: Option<Codelet<S>>,
    /// Last input socket written through `bind`/`fill`, for ordering
    /// diagnostics in pipeline drivers.
    last_input_socket: Option<usize>,
    stats: TaskStats,
}

impl<S> Task<S> {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            autoalloc: true,
            stats_enabled: true,
            fast: false,
            debug: DebugConfig::default(),
            sockets: Vec::new(),
            codelet: None,
            last_input_socket: None,
            stats: TaskStats::new(),
        }
    }

    /// Task name, unique within its module.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of successful `exec()` calls since construction or `reset()`.
    pub fn n_calls(&self) -> u64 {
        self.stats.n_calls()
    }

    /// Read-only execution statistics.
    pub fn stats(&self) -> &TaskStats {
        &self.stats
    }

    /// Zero all statistics and timers. Socket bindings are untouched.
    pub fn reset(&mut self) {
        self.stats.reset();
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Enable or disable engine-side buffer allocation. Enabling allocates
    /// every socket that is still unbound.
    pub fn set_autoalloc(&mut self, autoalloc: bool) {
        self.autoalloc = autoalloc;
        if autoalloc {
            for socket in &mut self.sockets {
                socket.allocate();
            }
        }
    }

    /// Enable or disable duration aggregation. The call counter always runs.
    pub fn set_stats(&mut self, stats: bool) {
        self.stats_enabled = stats;
    }

    /// Skip the executability precondition check in `exec()`.
    pub fn set_fast(&mut self, fast: bool) {
        self.fast = fast;
    }

    /// Enable or disable debug dumps of socket contents around `exec()`.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug.enabled = debug;
    }

    /// Render debug dumps in hexadecimal.
    pub fn set_debug_hex(&mut self, hex: bool) {
        self.debug.hex = hex;
    }

    /// Cap the elements rendered per frame in debug dumps.
    pub fn set_debug_limit(&mut self, limit: Option<usize>) {
        self.debug.limit = limit;
    }

    /// Decimal precision for real-typed sockets in debug dumps.
    pub fn set_debug_precision(&mut self, precision: usize) {
        self.debug.precision = precision;
    }

    /// Cap the frames rendered per socket in debug dumps.
    pub fn set_debug_frame_max(&mut self, frame_max: Option<usize>) {
        self.debug.frame_max = frame_max;
    }

    /// Elements per frame in debug dumps (`None` = whole socket).
    pub fn set_debug_frame_size(&mut self, frame_size: Option<usize>) {
        self.debug.frame_size = frame_size;
    }

    pub fn is_autoalloc(&self) -> bool {
        self.autoalloc
    }

    pub fn is_stats(&self) -> bool {
        self.stats_enabled
    }

    pub fn is_fast(&self) -> bool {
        self.fast
    }

    pub fn is_debug(&self) -> bool {
        self.debug.enabled
    }

    pub fn is_debug_hex(&self) -> bool {
        self.debug.hex
    }

    /// The full debug configuration.
    pub fn debug_config(&self) -> &DebugConfig {
        &self.debug
    }

    // ------------------------------------------------------------------
    // Construction: sockets, codelet, timers
    // ------------------------------------------------------------------

    /// Declare an input socket of `n_elmts` elements of type `T`.
    pub fn create_socket_in<T: Sample>(&mut self, name: &str, n_elmts: usize) -> Result<usize> {
        self.create_socket::<T>(name, SocketDirection::In, n_elmts, false)
    }

    /// Declare an input/output socket of `n_elmts` elements of type `T`.
    pub fn create_socket_in_out<T: Sample>(&mut self, name: &str, n_elmts: usize) -> Result<usize> {
        self.create_socket::<T>(name, SocketDirection::InOut, n_elmts, false)
    }

    /// Declare an output socket of `n_elmts` elements of type `T`.
    pub fn create_socket_out<T: Sample>(&mut self, name: &str, n_elmts: usize) -> Result<usize> {
        self.create_socket::<T>(name, SocketDirection::Out, n_elmts, false)
    }

    /// Declare an output socket that carries the codelet's per-call status
    /// code rather than frame data. Written by the engine after each
    /// successful `exec()`.
    pub fn create_socket_out_status(&mut self, name: &str) -> Result<usize> {
        self.create_socket::<i32>(name, SocketDirection::Out, 1, true)
    }

    fn create_socket<T: Sample>(
        &mut self,
        name: &str,
        direction: SocketDirection,
        n_elmts: usize,
        status: bool,
    ) -> Result<usize> {
        if self.codelet.is_some() {
            return Err(Error::TaskSealed {
                task: self.name.clone(),
            });
        }
        if n_elmts == 0 {
            return Err(Error::EmptySocket {
                task: self.name.clone(),
                name: name.to_string(),
            });
        }
        if self.sockets.iter().any(|s| s.name() == name) {
            return Err(Error::DuplicateSocket {
                task: self.name.clone(),
                name: name.to_string(),
            });
        }

        let mut socket = Socket::new::<T>(name, direction, n_elmts, status);
        if self.autoalloc {
            socket.allocate();
        }
        tracing::debug!(
            task = %self.name,
            socket = name,
            direction = %direction,
            n_elmts,
            kind = %socket.kind(),
            "socket_created"
        );
        self.sockets.push(socket);
        Ok(self.sockets.len() - 1)
    }

    /// Bind the kernel. May be called exactly once; the socket set is sealed
    /// from this point on.
    pub fn create_codelet<F>(&mut self, codelet: F) -> Result<()>
    where
        F: Fn(&mut S, &mut Task<S>) -> Result<i32> + Send + Sync + 'static,
    {
        if self.codelet.is_some() {
            return Err(Error::CodeletRebound {
                task: self.name.clone(),
            });
        }
        self.codelet = Some(Arc::new(codelet));
        Ok(())
    }

    /// Register a named sub-phase timer slot. Returns the timer id the
    /// codelet passes to [`update_timer`](Self::update_timer).
    pub fn register_timer(&mut self, key: &str) -> Result<usize> {
        self.stats
            .register_timer(key.to_string())
            .ok_or_else(|| Error::DuplicateTimer {
                task: self.name.clone(),
                name: key.to_string(),
            })
    }

    /// Accumulate a phase duration. Codelets call this around each phase
    /// they want measured.
    pub fn update_timer(&mut self, id: usize, duration: Duration) -> Result<()> {
        if self.stats.update_timer(id, duration) {
            Ok(())
        } else {
            Err(Error::TimerNotFound {
                task: self.name.clone(),
                id,
            })
        }
    }

    // ------------------------------------------------------------------
    // Socket access
    // ------------------------------------------------------------------

    /// The ordered socket set.
    pub fn sockets(&self) -> &[Socket] {
        &self.sockets
    }

    fn socket_index(&self, name: &str) -> Result<usize> {
        self.sockets
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| Error::SocketNotFound {
                task: self.name.clone(),
                name: name.to_string(),
            })
    }

    /// Look up a socket declaration by name.
    pub fn socket(&self, name: &str) -> Result<&Socket> {
        self.sockets
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| Error::SocketNotFound {
                task: self.name.clone(),
                name: name.to_string(),
            })
    }

    /// Attach an externally built buffer to a socket. Ownership moves in;
    /// [`unbind`](Self::unbind) returns it. The declared element count never
    /// changes: a wrong-length buffer is rejected.
    pub fn bind<T: Sample>(&mut self, name: &str, buffer: Vec<T>) -> Result<()> {
        let idx = self.socket_index(name)?;
        let task = self.name.clone();
        self.sockets[idx].bind(&task, buffer)?;
        if self.sockets[idx].direction().is_input() {
            self.last_input_socket = Some(idx);
        }
        Ok(())
    }

    /// Detach and return a socket's buffer.
    pub fn unbind<T: Sample>(&mut self, name: &str) -> Result<Vec<T>> {
        let idx = self.socket_index(name)?;
        let task = self.name.clone();
        self.sockets[idx].unbind(&task)
    }

    /// Allow a self-allocated socket to be rebound through [`bind`](Self::bind).
    pub fn set_rebindable(&mut self, name: &str, rebindable: bool) -> Result<()> {
        let idx = self.socket_index(name)?;
        self.sockets[idx].set_rebindable(rebindable);
        Ok(())
    }

    /// Typed read view of a socket's buffer.
    pub fn data<T: Sample>(&self, name: &str) -> Result<&[T]> {
        let socket = self.socket(name)?;
        socket.as_slice(&self.name)
    }

    /// Typed write view of a socket's buffer.
    pub fn data_mut<T: Sample>(&mut self, name: &str) -> Result<&mut [T]> {
        let idx = self.socket_index(name)?;
        let task = self.name.clone();
        self.sockets[idx].as_mut_slice(&task)
    }

    /// Copy `src` into a socket's buffer (driver-side input loading).
    pub fn fill<T: Sample>(&mut self, name: &str, src: &[T]) -> Result<()> {
        let idx = self.socket_index(name)?;
        let n_elmts = self.sockets[idx].n_elmts();
        if src.len() != n_elmts {
            return Err(Error::SizeMismatch {
                name: name.to_string(),
                expected: n_elmts,
                actual: src.len(),
            });
        }
        let task = self.name.clone();
        self.sockets[idx].as_mut_slice::<T>(&task)?.copy_from_slice(src);
        if self.sockets[idx].direction().is_input() {
            self.last_input_socket = Some(idx);
        }
        Ok(())
    }

    /// Copy a socket's buffer out (driver-side result readback).
    pub fn read<T: Sample>(&self, name: &str) -> Result<Vec<T>> {
        Ok(self.data::<T>(name)?.to_vec())
    }

    /// Whether `name` is the input socket most recently written through
    /// `bind`/`fill`.
    pub fn is_last_input_socket(&self, name: &str) -> bool {
        self.last_input_socket
            .and_then(|idx| self.sockets.get(idx))
            .is_some_and(|s| s.name() == name)
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Whether `exec()` would pass its precondition check: the codelet is
    /// bound and every socket has a buffer.
    pub fn can_exec(&self) -> bool {
        self.blocking_reason().is_none()
    }

    fn blocking_reason(&self) -> Option<String> {
        if self.codelet.is_none() {
            return Some("no codelet bound".to_string());
        }
        self.sockets
            .iter()
            .find(|s| !s.is_bound())
            .map(|s| format!("socket '{}' is unbound", s.name()))
    }

    /// Run the codelet against `state`.
    ///
    /// Returns the codelet's status code: 0 for success, nonzero for a
    /// kernel-defined soft failure the caller must interpret. A hard failure
    /// (`Err`) propagates after the in-flight call's statistics are
    /// discarded — nothing is partially committed.
    pub fn exec(&mut self, state: &mut S) -> Result<i32> {
        let codelet = match &self.codelet {
            Some(c) => Arc::clone(c),
            None => {
                return Err(Error::CodeletMissing {
                    task: self.name.clone(),
                })
            }
        };

        if !self.fast {
            if let Some(reason) = self.blocking_reason() {
                return Err(Error::NotExecutable {
                    task: self.name.clone(),
                    reason,
                });
            }
        }

        if self.debug.enabled {
            self.trace_sockets("in");
        }

        let status = if self.stats_enabled {
            let start = Instant::now();
            let status = codelet(state, self)?;
            let duration = start.elapsed();
            self.stats.record(duration);
            tracing::trace!(
                task = %self.name,
                duration_us = duration.as_micros() as u64,
                status,
                "task_executed"
            );
            status
        } else {
            let status = codelet(state, self)?;
            self.stats.record_untimed();
            status
        };

        self.write_status_sockets(status)?;

        if self.debug.enabled {
            self.trace_sockets("out");
        }

        Ok(status)
    }

    fn write_status_sockets(&mut self, code: i32) -> Result<()> {
        let task = self.name.clone();
        for socket in &mut self.sockets {
            if socket.is_status() {
                socket.as_mut_slice::<i32>(&task)?[0] = code;
            }
        }
        Ok(())
    }

    fn trace_sockets(&self, phase: &str) {
        for socket in &self.sockets {
            let relevant = match phase {
                "in" => socket.direction().is_input(),
                _ => socket.direction().is_output(),
            };
            if !relevant {
                continue;
            }
            tracing::debug!(
                task = %self.name,
                socket = %socket.name(),
                direction = %socket.direction(),
                phase,
                data = %self.render_socket(socket),
                "socket_dump"
            );
        }
    }

    fn render_socket(&self, socket: &Socket) -> String {
        let n_elmts = socket.n_elmts();
        let frame_size = match self.debug.frame_size {
            Some(size) if size > 0 => size,
            _ => n_elmts,
        };

        let mut frames = Vec::new();
        let mut start = 0usize;
        let mut index = 0usize;
        while start < n_elmts {
            if let Some(max) = self.debug.frame_max {
                if index >= max {
                    frames.push("...".to_string());
                    break;
                }
            }
            let frame_end = (start + frame_size).min(n_elmts);
            let shown_end = match self.debug.limit {
                Some(limit) => (start + limit).min(frame_end),
                None => frame_end,
            };
            let mut rendered =
                socket.render_range(self.debug.hex, self.debug.precision, start, shown_end);
            if shown_end < frame_end {
                rendered.push_str(", ...");
            }
            frames.push(format!("f{index}: {rendered}"));
            start = frame_end;
            index += 1;
        }
        frames.join(" | ")
    }
}

/// Structural clone: same sockets/flags/codelet logic, fresh zeroed
/// autoalloc buffers, unbound external sockets, zeroed statistics. Never
/// aliases the source's buffers.
impl<S> Clone for Task<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            autoalloc: self.autoalloc,
            stats_enabled: self.stats_enabled,
            fast: self.fast,
            debug: self.debug.clone(),
            sockets: self.sockets.iter().map(Socket::clone_structure).collect(),
            codelet: self.codelet.clone(),
            last_input_socket: None,
            stats: self.stats.fresh(),
        }
    }
}

impl<S> std::fmt::Debug for Task<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("sockets", &self.sockets)
            .field("codelet", &self.codelet.is_some())
            .field("n_calls", &self.stats.n_calls())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copy_task() -> Task<()> {
        let mut task = Task::<()>::new("copy".to_string());
        task.create_socket_in::<i32>("X", 8).unwrap();
        task.create_socket_out::<i32>("Y", 8).unwrap();
        task.create_codelet(|_state, task| {
            let x = task.read::<i32>("X")?;
            task.data_mut::<i32>("Y")?.copy_from_slice(&x);
            Ok(0)
        })
        .unwrap();
        task
    }

    #[test]
    fn test_exec_copies_and_counts() {
        let mut task = copy_task();
        task.fill("X", &[1i32, 2, 3, 4, 5, 6, 7, 8]).unwrap();

        let status = task.exec(&mut ()).unwrap();
        assert_eq!(status, 0);
        assert_eq!(task.read::<i32>("Y").unwrap(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(task.n_calls(), 1);

        task.exec(&mut ()).unwrap();
        assert_eq!(task.n_calls(), 2);
        assert!(task.stats().duration_min() <= task.stats().duration_avg());
        assert!(task.stats().duration_avg() <= task.stats().duration_max());
    }

    #[test]
    fn test_duplicate_socket_leaves_set_unchanged() {
        let mut task = Task::<()>::new("decode".to_string());
        task.create_socket_in::<f32>("Y_N", 16).unwrap();
        let err = task.create_socket_in::<f32>("Y_N", 16).unwrap_err();
        assert!(matches!(err, Error::DuplicateSocket { .. }));
        assert_eq!(task.sockets().len(), 1);
        assert_eq!(task.sockets()[0].name(), "Y_N");
    }

    #[test]
    fn test_zero_sized_socket_rejected() {
        let mut task = Task::<()>::new("t".to_string());
        assert!(matches!(
            task.create_socket_in::<f32>("Y_N", 0).unwrap_err(),
            Error::EmptySocket { .. }
        ));
    }

    #[test]
    fn test_socket_creation_sealed_after_codelet() {
        let mut task = Task::<()>::new("t".to_string());
        task.create_socket_in::<i32>("X", 4).unwrap();
        task.create_codelet(|_, _| Ok(0)).unwrap();
        assert!(matches!(
            task.create_socket_out::<i32>("Y", 4).unwrap_err(),
            Error::TaskSealed { .. }
        ));
    }

    #[test]
    fn test_codelet_bound_once() {
        let mut task = Task::<()>::new("t".to_string());
        task.create_codelet(|_, _| Ok(0)).unwrap();
        assert!(matches!(
            task.create_codelet(|_, _| Ok(0)).unwrap_err(),
            Error::CodeletRebound { .. }
        ));
    }

    #[test]
    fn test_can_exec_requires_bound_sockets_and_codelet() {
        let mut task = Task::<()>::new("t".to_string());
        task.set_autoalloc(false);
        task.create_socket_in::<i32>("X", 4).unwrap();
        assert!(!task.can_exec()); // no codelet, no buffer

        task.create_codelet(|_, _| Ok(0)).unwrap();
        assert!(!task.can_exec()); // input still unbound

        task.bind("X", vec![0i32; 4]).unwrap();
        assert!(task.can_exec());
    }

    #[test]
    fn test_exec_not_executable() {
        let mut task = Task::<()>::new("t".to_string());
        task.set_autoalloc(false);
        task.create_socket_in::<i32>("X", 4).unwrap();
        task.create_codelet(|_, _| Ok(0)).unwrap();
        assert!(matches!(
            task.exec(&mut ()).unwrap_err(),
            Error::NotExecutable { .. }
        ));
    }

    #[test]
    fn test_soft_failure_code_passes_through() {
        let mut task = Task::<()>::new("t".to_string());
        task.create_codelet(|_, _| Ok(42)).unwrap();
        assert_eq!(task.exec(&mut ()).unwrap(), 42);
        assert_eq!(task.n_calls(), 1);
    }

    #[test]
    fn test_hard_failure_discards_inflight_stats() {
        let mut task = Task::<u32>::new("t".to_string());
        task.create_codelet(|attempts, _| {
            *attempts += 1;
            if *attempts == 1 {
                Err(Error::ZeroWidth)
            } else {
                Ok(0)
            }
        })
        .unwrap();

        let mut attempts = 0u32;
        assert!(task.exec(&mut attempts).is_err());
        assert_eq!(task.n_calls(), 0);
        assert_eq!(task.stats().duration_total(), Duration::ZERO);

        assert_eq!(task.exec(&mut attempts).unwrap(), 0);
        assert_eq!(task.n_calls(), 1);
    }

    #[test]
    fn test_reset_zeroes_stats() {
        let mut task = copy_task();
        task.exec(&mut ()).unwrap();
        task.reset();
        assert_eq!(task.n_calls(), 0);
        assert_eq!(task.stats().duration_total(), Duration::ZERO);
        assert_eq!(task.stats().duration_min(), Duration::ZERO);
        assert_eq!(task.stats().duration_max(), Duration::ZERO);
    }

    #[test]
    fn test_status_socket_carries_return_code() {
        let mut task = Task::<()>::new("t".to_string());
        task.create_socket_out_status("status").unwrap();
        task.create_codelet(|_, _| Ok(7)).unwrap();
        task.exec(&mut ()).unwrap();
        assert_eq!(task.read::<i32>("status").unwrap(), vec![7]);
    }

    #[test]
    fn test_timers_accumulate_independently_of_total() {
        let mut task = Task::<()>::new("t".to_string());
        let load = task.register_timer("load").unwrap();
        let compute = task.register_timer("compute").unwrap();
        task.create_codelet(move |_, task| {
            task.update_timer(load, Duration::from_micros(3))?;
            task.update_timer(compute, Duration::from_micros(11))?;
            Ok(0)
        })
        .unwrap();

        task.exec(&mut ()).unwrap();
        task.exec(&mut ()).unwrap();

        let timers = task.stats().timers();
        assert_eq!(timers[load].n_calls(), 2);
        assert_eq!(timers[load].total(), Duration::from_micros(6));
        assert_eq!(timers[compute].total(), Duration::from_micros(22));
    }

    #[test]
    fn test_duplicate_timer_rejected() {
        let mut task = Task::<()>::new("t".to_string());
        task.register_timer("load").unwrap();
        assert!(matches!(
            task.register_timer("load").unwrap_err(),
            Error::DuplicateTimer { .. }
        ));
    }

    #[test]
    fn test_last_input_socket_tracking() {
        let mut task = Task::<()>::new("t".to_string());
        task.create_socket_in::<i32>("A", 2).unwrap();
        task.create_socket_in::<i32>("B", 2).unwrap();

        task.fill("A", &[1, 2]).unwrap();
        assert!(task.is_last_input_socket("A"));
        task.fill("B", &[3, 4]).unwrap();
        assert!(task.is_last_input_socket("B"));
        assert!(!task.is_last_input_socket("A"));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut task = copy_task();
        task.fill("X", &[9i32; 8]).unwrap();
        task.exec(&mut ()).unwrap();

        let mut clone = task.clone();
        assert_eq!(clone.n_calls(), 0);
        // Fresh zeroed buffers in the clone.
        assert_eq!(clone.read::<i32>("X").unwrap(), vec![0; 8]);

        clone.fill("X", &[1i32; 8]).unwrap();
        clone.exec(&mut ()).unwrap();
        assert_eq!(task.read::<i32>("X").unwrap(), vec![9; 8]);
        assert_eq!(task.n_calls(), 1);
        assert_eq!(clone.n_calls(), 1);
    }

    #[test]
    fn test_render_socket_respects_limits() {
        let mut task = Task::<()>::new("t".to_string());
        task.create_socket_in::<i32>("X", 8).unwrap();
        task.fill("X", &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        task.set_debug_frame_size(Some(4));
        task.set_debug_limit(Some(2));

        let socket = task.socket("X").unwrap();
        let rendered = task.render_socket(socket);
        assert_eq!(rendered, "f0: 1, 2, ... | f1: 5, 6, ...");

        task.set_debug_frame_max(Some(1));
        let socket = task.socket("X").unwrap();
        let rendered = task.render_socket(socket);
        assert_eq!(rendered, "f0: 1, 2, ... | ...");
    }
}
