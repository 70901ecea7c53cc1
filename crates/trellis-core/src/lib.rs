//! # trellis-core - Task Execution Engine
//!
//! Runtime for composing and executing fine-grained numeric-processing units
//! ("tasks") inside a channel-coding / digital-communication simulation
//! pipeline. Each task wraps one computational kernel (e.g. "decode one
//! batch of frames") behind a uniform contract of typed input/output sockets,
//! timing instrumentation, and SIMD-lane-aware wave batching.
//!
//! ## Architecture
//!
//! ```text
//! Module<S>                  owner of kernel state S and named tasks
//!   └── Task<S>              sockets + codelet + stats + debug config
//!         ├── Socket         typed, fixed-size, directioned data port
//!         ├── TaskStats      call counter, durations, sub-phase timers
//!         └── codelet        Fn(&mut S, &mut Task<S>) -> Result<i32>
//!
//! WavePlan / WaveScratch     frame count → fixed-width SIMD waves
//! ```
//!
//! A pipeline driver executes tasks in dependency order; each codelet reads
//! its input sockets, applies the wave scheduler to cover every logical
//! frame at the kernel's compiled SIMD width, writes its output sockets, and
//! feeds the task's timers. Thread-level parallelism is whole-module
//! cloning: every clone owns its buffers and statistics, so clones run on
//! independent threads with no shared mutable state.
//!
//! ## Example
//!
//! ```
//! use trellis_core::{Module, WaveScratch};
//!
//! # fn main() -> trellis_core::Result<()> {
//! struct Negate {
//!     waves: WaveScratch<f32, f32>,
//! }
//!
//! let state = Negate { waves: WaveScratch::new(4, 1, 1)? };
//! let mut module = Module::new("negate", state);
//!
//! let task = module.create_task("negate")?;
//! task.create_socket_in::<f32>("X_N", 6)?;
//! task.create_socket_out::<f32>("Y_N", 6)?;
//! task.create_codelet(|state: &mut Negate, task| {
//!     let x = task.read::<f32>("X_N")?;
//!     let y = task.data_mut::<f32>("Y_N")?;
//!     // 6 frames against width 4: one full wave, one padded wave.
//!     state.waves.run(6, &x, y, |src, dst, _first| {
//!         for (d, s) in dst.iter_mut().zip(src) {
//!             *d = -s;
//!         }
//!         Ok(())
//!     })?;
//!     Ok(0)
//! })?;
//!
//! module["negate"].fill("X_N", &[1.0f32, -2.0, 3.0, -4.0, 5.0, -6.0])?;
//! module.exec("negate")?;
//! assert_eq!(
//!     module["negate"].read::<f32>("Y_N")?,
//!     vec![-1.0, 2.0, -3.0, 4.0, -5.0, 6.0]
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`module`] - Named task collections with deep cloning
//! - [`task`] - Task construction and synchronous execution
//! - [`socket`] - Typed, directioned data ports
//! - [`stats`] - Call counters, duration aggregates, sub-phase timers
//! - [`wave`] - Wave batching against a fixed SIMD width
//! - [`data`] - Admissible socket element types
//! - [`error`] - Error taxonomy

pub mod data;
pub mod error;
pub mod module;
pub mod socket;
pub mod stats;
pub mod task;
pub mod wave;

// Re-export primary types
pub use data::{DataKind, Sample};
pub use error::{Error, Result};
pub use module::Module;
pub use socket::{Socket, SocketDirection};
pub use stats::{TaskStats, TimerStats};
pub use task::{Codelet, DebugConfig, Task};
pub use wave::{Wave, WavePlan, WaveScratch};
