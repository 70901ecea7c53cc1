//! Named, directioned, typed data ports attached to tasks
//!
//! A socket either owns its buffer (allocated zeroed when its task runs with
//! `autoalloc`) or is bound lazily by the pipeline driver. Buffers are stored
//! type-erased (`Box<dyn Any>` holding a `Vec<T>`); the element type is pinned
//! at creation through a [`DataKind`] tag plus monomorphized alloc/render
//! hooks, so cloning and debug dumps work without knowing `T` at the call
//! site.
//!
//! Sockets never synchronize: thread safety comes from never sharing a
//! socket's buffer across concurrently executing task instances (each module
//! clone gets its own).

use std::any::Any;

use bytemuck::Zeroable;

use crate::data::{DataKind, Sample};
use crate::error::{Error, Result};

/// Data flow direction of a socket, seen from its task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketDirection {
    /// Read by the codelet.
    In,
    /// Read and overwritten by the codelet.
    InOut,
    /// Written by the codelet.
    Out,
}

impl SocketDirection {
    /// True for `In` and `InOut`.
    pub fn is_input(&self) -> bool {
        matches!(self, SocketDirection::In | SocketDirection::InOut)
    }

    /// True for `InOut` and `Out`.
    pub fn is_output(&self) -> bool {
        matches!(self, SocketDirection::InOut | SocketDirection::Out)
    }
}

impl std::fmt::Display for SocketDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SocketDirection::In => "in",
            SocketDirection::InOut => "in_out",
            SocketDirection::Out => "out",
        };
        f.write_str(s)
    }
}

type ErasedBuffer = Box<dyn Any + Send + Sync>;

fn alloc_zeroed<T: Sample>(n_elmts: usize) -> ErasedBuffer {
    Box::new(vec![T::zeroed(); n_elmts])
}

fn render_range_of<T: Sample>(
    data: &(dyn Any + Send + Sync),
    hex: bool,
    precision: usize,
    start: usize,
    end: usize,
) -> String {
    match data.downcast_ref::<Vec<T>>() {
        Some(v) => {
            let end = end.min(v.len());
            let start = start.min(end);
            v[start..end]
                .iter()
                .map(|x| x.render(hex, precision))
                .collect::<Vec<_>>()
                .join(", ")
        }
        None => "<type error>".to_string(),
    }
}

/// A named, directioned, fixed-size data port on a task.
///
/// `n_elmts` is fixed at creation; rebinding never changes it.
pub struct Socket {
    name: String,
    direction: SocketDirection,
    n_elmts: usize,
    kind: DataKind,
    /// Out socket that carries the codelet's per-call status code.
    status: bool,
    rebindable: bool,
    /// Buffer was allocated by the engine (as opposed to bound by a driver).
    self_allocated: bool,
    data: Option<ErasedBuffer>,
    alloc: fn(usize) -> ErasedBuffer,
    render: fn(&(dyn Any + Send + Sync), bool, usize, usize, usize) -> String,
}

impl Socket {
    pub(crate) fn new<T: Sample>(
        name: impl Into<String>,
        direction: SocketDirection,
        n_elmts: usize,
        status: bool,
    ) -> Self {
        Self {
            name: name.into(),
            direction,
            n_elmts,
            kind: T::KIND,
            status,
            rebindable: false,
            self_allocated: false,
            data: None,
            alloc: alloc_zeroed::<T>,
            render: render_range_of::<T>,
        }
    }

    /// Socket name, unique within its task.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Data flow direction.
    pub fn direction(&self) -> SocketDirection {
        self.direction
    }

    /// Declared element count.
    pub fn n_elmts(&self) -> usize {
        self.n_elmts
    }

    /// Element type tag.
    pub fn kind(&self) -> DataKind {
        self.kind
    }

    /// Whether a buffer is currently allocated or bound.
    pub fn is_bound(&self) -> bool {
        self.data.is_some()
    }

    /// Whether this Out socket carries the codelet's status code.
    pub fn is_status(&self) -> bool {
        self.status
    }

    /// Whether a self-allocated buffer may be replaced through `bind`.
    pub fn is_rebindable(&self) -> bool {
        self.rebindable
    }

    pub(crate) fn set_rebindable(&mut self, rebindable: bool) {
        self.rebindable = rebindable;
    }

    /// Allocate the owned buffer if none is present yet.
    pub(crate) fn allocate(&mut self) {
        if self.data.is_none() {
            self.data = Some((self.alloc)(self.n_elmts));
            self.self_allocated = true;
        }
    }

    pub(crate) fn bind<T: Sample>(&mut self, task: &str, buffer: Vec<T>) -> Result<()> {
        self.check_kind::<T>()?;
        if buffer.len() != self.n_elmts {
            return Err(Error::SizeMismatch {
                name: self.name.clone(),
                expected: self.n_elmts,
                actual: buffer.len(),
            });
        }
        if self.self_allocated && !self.rebindable {
            return Err(Error::AlreadyAllocated {
                task: task.to_string(),
                name: self.name.clone(),
            });
        }
        self.data = Some(Box::new(buffer));
        self.self_allocated = false;
        Ok(())
    }

    pub(crate) fn unbind<T: Sample>(&mut self, task: &str) -> Result<Vec<T>> {
        self.check_kind::<T>()?;
        let boxed = self.data.take().ok_or_else(|| Error::UnboundSocket {
            task: task.to_string(),
            name: self.name.clone(),
        })?;
        match boxed.downcast::<Vec<T>>() {
            Ok(v) => {
                self.self_allocated = false;
                Ok(*v)
            }
            Err(original) => {
                // Unreachable after check_kind; restore rather than lose the buffer.
                self.data = Some(original);
                Err(Error::TypeMismatch {
                    name: self.name.clone(),
                    expected: self.kind.name(),
                    actual: T::KIND.name(),
                })
            }
        }
    }

    pub(crate) fn as_slice<T: Sample>(&self, task: &str) -> Result<&[T]> {
        self.check_kind::<T>()?;
        let data = self.data.as_deref().ok_or_else(|| Error::UnboundSocket {
            task: task.to_string(),
            name: self.name.clone(),
        })?;
        match data.downcast_ref::<Vec<T>>() {
            Some(v) => Ok(v.as_slice()),
            None => Err(Error::TypeMismatch {
                name: self.name.clone(),
                expected: self.kind.name(),
                actual: T::KIND.name(),
            }),
        }
    }

    pub(crate) fn as_mut_slice<T: Sample>(&mut self, task: &str) -> Result<&mut [T]> {
        self.check_kind::<T>()?;
        let name = self.name.clone();
        let kind = self.kind;
        let data = self.data.as_deref_mut().ok_or_else(|| Error::UnboundSocket {
            task: task.to_string(),
            name: name.clone(),
        })?;
        match data.downcast_mut::<Vec<T>>() {
            Some(v) => Ok(v.as_mut_slice()),
            None => Err(Error::TypeMismatch {
                name,
                expected: kind.name(),
                actual: T::KIND.name(),
            }),
        }
    }

    /// Render elements `[start, end)` for a debug dump.
    pub(crate) fn render_range(
        &self,
        hex: bool,
        precision: usize,
        start: usize,
        end: usize,
    ) -> String {
        match &self.data {
            Some(d) => (self.render)(&**d, hex, precision, start, end),
            None => "<unbound>".to_string(),
        }
    }

    /// Structural copy for module cloning: same declaration, fresh zeroed
    /// buffer when the source owned one, unbound otherwise. Never aliases the
    /// source's memory.
    pub(crate) fn clone_structure(&self) -> Self {
        let data = self.self_allocated.then(|| (self.alloc)(self.n_elmts));
        Self {
            name: self.name.clone(),
            direction: self.direction,
            n_elmts: self.n_elmts,
            kind: self.kind,
            status: self.status,
            rebindable: self.rebindable,
            self_allocated: self.self_allocated,
            data,
            alloc: self.alloc,
            render: self.render,
        }
    }

    fn check_kind<T: Sample>(&self) -> Result<()> {
        if T::KIND != self.kind {
            return Err(Error::TypeMismatch {
                name: self.name.clone(),
                expected: self.kind.name(),
                actual: T::KIND.name(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for Socket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Socket")
            .field("name", &self.name)
            .field("direction", &self.direction)
            .field("n_elmts", &self.n_elmts)
            .field("kind", &self.kind)
            .field("bound", &self.is_bound())
            .finish()
    }
}
