//! Element types admissible on task sockets
//!
//! Socket buffers are stored type-erased so that one task can mix bit,
//! integer, and real sockets. Every admissible element type carries a
//! [`DataKind`] tag captured at socket creation; typed access re-checks the
//! tag before downcasting, turning a wrong-type read into a recoverable
//! [`Error::TypeMismatch`](crate::Error::TypeMismatch) instead of garbage.

use bytemuck::Pod;

/// Runtime tag for a socket's element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl DataKind {
    /// Human-readable type name, used in error messages and debug dumps.
    pub fn name(&self) -> &'static str {
        match self {
            DataKind::I8 => "i8",
            DataKind::U8 => "u8",
            DataKind::I16 => "i16",
            DataKind::U16 => "u16",
            DataKind::I32 => "i32",
            DataKind::U32 => "u32",
            DataKind::I64 => "i64",
            DataKind::U64 => "u64",
            DataKind::F32 => "f32",
            DataKind::F64 => "f64",
        }
    }

    /// Element size in bytes.
    pub fn size_bytes(&self) -> usize {
        match self {
            DataKind::I8 | DataKind::U8 => 1,
            DataKind::I16 | DataKind::U16 => 2,
            DataKind::I32 | DataKind::U32 | DataKind::F32 => 4,
            DataKind::I64 | DataKind::U64 | DataKind::F64 => 8,
        }
    }
}

impl std::fmt::Display for DataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Element type admissible on a socket.
///
/// `Pod` gives zeroed allocation and byte-level reinterpretation; the render
/// hook feeds the per-task debug dumps (hexadecimal or fixed-precision
/// decimal, per the task's debug configuration).
pub trait Sample: Pod + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// The runtime tag matching `Self`.
    const KIND: DataKind;

    /// Render one element for a debug dump.
    ///
    /// `precision` only affects real types; `hex` renders integers in
    /// hexadecimal and reals through their bit pattern.
    fn render(&self, hex: bool, precision: usize) -> String;
}

macro_rules! impl_sample_int {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Sample for $ty {
                const KIND: DataKind = DataKind::$kind;

                fn render(&self, hex: bool, _precision: usize) -> String {
                    if hex {
                        format!("{:#x}", self)
                    } else {
                        format!("{}", self)
                    }
                }
            }
        )*
    };
}

impl_sample_int! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
}

impl Sample for f32 {
    const KIND: DataKind = DataKind::F32;

    fn render(&self, hex: bool, precision: usize) -> String {
        if hex {
            format!("{:#010x}", self.to_bits())
        } else {
            format!("{:.*}", precision, self)
        }
    }
}

impl Sample for f64 {
    const KIND: DataKind = DataKind::F64;

    fn render(&self, hex: bool, precision: usize) -> String {
        if hex {
            format!("{:#018x}", self.to_bits())
        } else {
            format!("{:.*}", precision, self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(DataKind::F32.name(), "f32");
        assert_eq!(DataKind::U8.name(), "u8");
        assert_eq!(format!("{}", DataKind::I64), "i64");
    }

    #[test]
    fn test_kind_sizes() {
        assert_eq!(DataKind::I8.size_bytes(), 1);
        assert_eq!(DataKind::U16.size_bytes(), 2);
        assert_eq!(DataKind::F32.size_bytes(), 4);
        assert_eq!(DataKind::F64.size_bytes(), 8);
    }

    #[test]
    fn test_kind_constants() {
        assert_eq!(<i32 as Sample>::KIND, DataKind::I32);
        assert_eq!(<f64 as Sample>::KIND, DataKind::F64);
        assert_eq!(<u8 as Sample>::KIND, DataKind::U8);
    }

    #[test]
    fn test_int_render() {
        assert_eq!(42i32.render(false, 5), "42");
        assert_eq!(255u8.render(true, 5), "0xff");
        assert_eq!((-1i16).render(false, 0), "-1");
    }

    #[test]
    fn test_real_render() {
        assert_eq!(1.5f32.render(false, 3), "1.500");
        assert_eq!((-0.25f64).render(false, 2), "-0.25");
        // 1.0f32 == 0x3f800000
        assert_eq!(1.0f32.render(true, 0), "0x3f800000");
    }
}
