//! Wave batching: mapping a logical frame count onto fixed-width SIMD waves
//!
//! Kernels are compiled for a fixed SIMD width `W` (frames absorbed per
//! vector instruction), but the frame count `F` handed to a task is
//! arbitrary. [`WavePlan`] decomposes `F` into `F / W` full waves plus an
//! optional padded wave for the `F % W` remainder; [`WaveScratch`] drives a
//! kernel over that decomposition, routing the remainder through
//! construction-time scratch buffers so the kernel is ALWAYS invoked at
//! exactly width `W` — never a partial vector, never a narrow-width kernel
//! variant.
//!
//! Full waves run against the true input/output memory at
//! `wave * W * stride` offsets with no copying. The padded wave copies only
//! the valid input prefix into scratch, runs the kernel at full width (the
//! scratch tail holds stale content whose results are discarded), and copies
//! only the valid output prefix back.

use crate::data::Sample;
use crate::error::{Error, Result};

/// Decomposition of a logical frame count into fixed-width waves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavePlan {
    frames: usize,
    width: usize,
    full_waves: usize,
    remainder: usize,
}

impl WavePlan {
    /// Decompose `frames` logical frames into waves of `width` frames.
    ///
    /// Zero frames is a configuration error, not a zero-wave no-op.
    pub fn new(frames: usize, width: usize) -> Result<Self> {
        if width == 0 {
            return Err(Error::ZeroWidth);
        }
        if frames == 0 {
            return Err(Error::EmptyWave { width });
        }
        Ok(Self {
            frames,
            width,
            full_waves: frames / width,
            remainder: frames % width,
        })
    }

    /// Logical frame count.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// SIMD width (frames per wave).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of waves running against true memory with no copying.
    pub fn full_waves(&self) -> usize {
        self.full_waves
    }

    /// Frames left over for the padded wave (zero when width-aligned).
    pub fn remainder(&self) -> usize {
        self.remainder
    }

    /// Total wave count, padded wave included.
    pub fn n_waves(&self) -> usize {
        self.full_waves + usize::from(self.remainder > 0)
    }

    /// Iterate the waves in execution order.
    pub fn waves(&self) -> impl Iterator<Item = Wave> + '_ {
        let full = self.full_waves;
        let width = self.width;
        let remainder = self.remainder;
        (0..self.n_waves()).map(move |index| {
            let padded = index == full;
            Wave {
                index,
                frame_offset: index * width,
                valid_frames: if padded { remainder } else { width },
                padded,
            }
        })
    }
}

/// One kernel invocation covering up to `width` logical frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wave {
    /// Position in execution order.
    pub index: usize,
    /// First logical frame covered by this wave.
    pub frame_offset: usize,
    /// Frames whose results are kept (`width`, or the remainder on the
    /// padded wave).
    pub valid_frames: usize,
    /// Whether this wave runs through the scratch buffers.
    pub padded: bool,
}

/// Scratch-backed wave driver for a fixed-width kernel.
///
/// Scratch buffers are sized once, at construction (one full wave per data
/// direction), and reused across calls without reallocation. A `WaveScratch`
/// is private to the task instance whose codelet owns it; module cloning
/// clones the kernel state and with it the scratch.
#[derive(Debug, Clone)]
pub struct WaveScratch<I: Sample, O: Sample> {
    width: usize,
    in_stride: usize,
    out_stride: usize,
    scratch_in: Vec<I>,
    scratch_out: Vec<O>,
}

impl<I: Sample, O: Sample> WaveScratch<I, O> {
    /// Build a driver for kernels of SIMD width `width`, reading
    /// `in_stride` input elements and writing `out_stride` output elements
    /// per frame. A stride of zero disables that side (see
    /// [`run_in`](Self::run_in) / [`run_out`](Self::run_out)).
    pub fn new(width: usize, in_stride: usize, out_stride: usize) -> Result<Self> {
        if width == 0 {
            return Err(Error::ZeroWidth);
        }
        Ok(Self {
            width,
            in_stride,
            out_stride,
            scratch_in: vec![bytemuck::Zeroable::zeroed(); width * in_stride],
            scratch_out: vec![bytemuck::Zeroable::zeroed(); width * out_stride],
        })
    }

    /// SIMD width the kernel is invoked at.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Drive an input+output kernel over `frames` logical frames.
    ///
    /// The kernel receives exactly `width * in_stride` input elements,
    /// `width * out_stride` output elements, and the first logical frame id
    /// of the wave. On the padded wave only the first `remainder` frames of
    /// input are loaded and only the first `remainder` frames of output are
    /// stored; the kernel may read the stale tail but its results there are
    /// discarded.
    pub fn run<K>(&mut self, frames: usize, input: &[I], output: &mut [O], mut kernel: K) -> Result<()>
    where
        K: FnMut(&[I], &mut [O], usize) -> Result<()>,
    {
        let plan = WavePlan::new(frames, self.width)?;
        self.check_len("input", input.len(), frames * self.in_stride)?;
        self.check_len("output", output.len(), frames * self.out_stride)?;

        let in_wave = self.width * self.in_stride;
        let out_wave = self.width * self.out_stride;

        for w in 0..plan.full_waves() {
            kernel(
                &input[w * in_wave..(w + 1) * in_wave],
                &mut output[w * out_wave..(w + 1) * out_wave],
                w * self.width,
            )?;
        }

        if plan.remainder() > 0 {
            let first = plan.full_waves() * self.width;
            let valid_in = plan.remainder() * self.in_stride;
            let valid_out = plan.remainder() * self.out_stride;

            self.scratch_in[..valid_in]
                .copy_from_slice(&input[first * self.in_stride..first * self.in_stride + valid_in]);

            kernel(&self.scratch_in, &mut self.scratch_out, first)?;

            output[first * self.out_stride..first * self.out_stride + valid_out]
                .copy_from_slice(&self.scratch_out[..valid_out]);
        }

        Ok(())
    }

    /// Drive an input-only kernel (e.g. a monitor or sink) over `frames`
    /// logical frames. Only the valid input prefix is copied on the padded
    /// wave; nothing is copied back.
    pub fn run_in<K>(&mut self, frames: usize, input: &[I], mut kernel: K) -> Result<()>
    where
        K: FnMut(&[I], usize) -> Result<()>,
    {
        let plan = WavePlan::new(frames, self.width)?;
        self.check_len("input", input.len(), frames * self.in_stride)?;

        let in_wave = self.width * self.in_stride;

        for w in 0..plan.full_waves() {
            kernel(&input[w * in_wave..(w + 1) * in_wave], w * self.width)?;
        }

        if plan.remainder() > 0 {
            let first = plan.full_waves() * self.width;
            let valid_in = plan.remainder() * self.in_stride;
            self.scratch_in[..valid_in]
                .copy_from_slice(&input[first * self.in_stride..first * self.in_stride + valid_in]);
            kernel(&self.scratch_in, first)?;
        }

        Ok(())
    }

    /// Drive an output-only kernel (e.g. a source) over `frames` logical
    /// frames. The padded wave writes into scratch and only the valid output
    /// prefix is copied out.
    pub fn run_out<K>(&mut self, frames: usize, output: &mut [O], mut kernel: K) -> Result<()>
    where
        K: FnMut(&mut [O], usize) -> Result<()>,
    {
        let plan = WavePlan::new(frames, self.width)?;
        self.check_len("output", output.len(), frames * self.out_stride)?;

        let out_wave = self.width * self.out_stride;

        for w in 0..plan.full_waves() {
            kernel(&mut output[w * out_wave..(w + 1) * out_wave], w * self.width)?;
        }

        if plan.remainder() > 0 {
            let first = plan.full_waves() * self.width;
            let valid_out = plan.remainder() * self.out_stride;
            kernel(&mut self.scratch_out, first)?;
            output[first * self.out_stride..first * self.out_stride + valid_out]
                .copy_from_slice(&self.scratch_out[..valid_out]);
        }

        Ok(())
    }

    fn check_len(&self, name: &str, actual: usize, expected: usize) -> Result<()> {
        if actual != expected {
            return Err(Error::SizeMismatch {
                name: name.to_string(),
                expected,
                actual,
            });
        }
        Ok(())
    }
}
