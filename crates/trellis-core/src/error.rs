//! Error types for the task execution engine

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or executing tasks
///
/// Construction-time errors (duplicate names, zero-sized sockets, sealed
/// tasks) are detected eagerly and never retried. Binding errors
/// ([`UnboundSocket`](Error::UnboundSocket), [`SizeMismatch`](Error::SizeMismatch),
/// [`TypeMismatch`](Error::TypeMismatch)) indicate caller-sequencing bugs,
/// not runtime conditions to recover from. Kernel soft failures are NOT
/// errors: they travel as nonzero `Ok` status codes and stay opaque to the
/// engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Socket name already used on this task
    #[error("duplicate socket '{name}' on task '{task}'")]
    DuplicateSocket { task: String, name: String },

    /// Task name already used on this module
    #[error("duplicate task '{name}' on module '{module}'")]
    DuplicateTask { module: String, name: String },

    /// Timer key already registered on this task
    #[error("duplicate timer '{name}' on task '{task}'")]
    DuplicateTimer { task: String, name: String },

    /// Socket declared with zero elements
    #[error("socket '{name}' on task '{task}' declared with zero elements")]
    EmptySocket { task: String, name: String },

    /// Zero logical frames handed to the wave scheduler
    #[error("cannot schedule zero frames onto waves of width {width}")]
    EmptyWave { width: usize },

    /// SIMD width of zero frames per wave
    #[error("wave width must be at least one frame")]
    ZeroWidth,

    /// Socket creation after the codelet was bound
    #[error("task '{task}' already has a codelet; its socket set is sealed")]
    TaskSealed { task: String },

    /// Second codelet bound to the same task
    #[error("codelet on task '{task}' may only be bound once")]
    CodeletRebound { task: String },

    /// Execution attempted with no codelet bound
    #[error("task '{task}' has no codelet bound")]
    CodeletMissing { task: String },

    /// Socket read or written before being allocated or bound
    #[error("socket '{name}' on task '{task}' is not bound to any buffer")]
    UnboundSocket { task: String, name: String },

    /// Buffer or slice length disagrees with the declared element count
    #[error("size mismatch on '{name}': expected {expected} elements, got {actual}")]
    SizeMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Typed access under the wrong element type
    #[error("type mismatch on socket '{name}': expected {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Rebinding a self-allocated socket that was not marked rebindable
    #[error("socket '{name}' on task '{task}' already owns its buffer and is not rebindable")]
    AlreadyAllocated { task: String, name: String },

    /// Task lookup failure
    #[error("no task named '{name}' on module '{module}'")]
    TaskNotFound { module: String, name: String },

    /// Socket lookup failure
    #[error("no socket named '{name}' on task '{task}'")]
    SocketNotFound { task: String, name: String },

    /// Timer id out of range
    #[error("no timer with id {id} on task '{task}'")]
    TimerNotFound { task: String, id: usize },

    /// Precondition check failed at `exec()` time
    #[error("task '{task}' is not executable: {reason}")]
    NotExecutable { task: String, reason: String },
}
