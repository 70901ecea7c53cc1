//! Integration tests for the task engine driven the way a decoder module
//! uses it: two task variants around one kernel state, wave batching inside
//! the codelets, sub-phase timers, and driver-side socket binding.

use std::time::Instant;

use trellis_core::{Error, Module, WaveScratch};

/// Kernel state of a toy "truncation decoder": every frame carries `n`
/// symbols of which the first `k` are information symbols.
#[derive(Clone)]
struct DecoderState {
    k: usize,
    n: usize,
    frames: usize,
    waves_decode: WaveScratch<i32, i32>,
    waves_coded: WaveScratch<i32, i32>,
}

/// Build a module with "decode" (N -> K) and "decode_coded" (N -> N) tasks,
/// mirroring the two socket layouts a real decoder exposes.
fn build_decoder(k: usize, n: usize, frames: usize, width: usize) -> trellis_core::Result<Module<DecoderState>> {
    let state = DecoderState {
        k,
        n,
        frames,
        waves_decode: WaveScratch::new(width, n, k)?,
        waves_coded: WaveScratch::new(width, n, n)?,
    };
    let mut module = Module::new("decoder", state);

    let task = module.create_task("decode")?;
    task.create_socket_in::<i32>("Y_N", n * frames)?;
    task.create_socket_out::<i32>("V_K", k * frames)?;
    let t_load = task.register_timer("load")?;
    let t_decode = task.register_timer("decode")?;
    let t_store = task.register_timer("store")?;
    task.create_codelet(move |state: &mut DecoderState, task| {
        let start = Instant::now();
        let y = task.read::<i32>("Y_N")?;
        task.update_timer(t_load, start.elapsed())?;

        let start = Instant::now();
        let mut v = vec![0i32; state.k * state.frames];
        let (k, n) = (state.k, state.n);
        state.waves_decode.run(state.frames, &y, &mut v, |src, dst, _first| {
            for f in 0..src.len() / n {
                dst[f * k..(f + 1) * k].copy_from_slice(&src[f * n..f * n + k]);
            }
            Ok(())
        })?;
        task.update_timer(t_decode, start.elapsed())?;

        let start = Instant::now();
        task.data_mut::<i32>("V_K")?.copy_from_slice(&v);
        task.update_timer(t_store, start.elapsed())?;
        Ok(0)
    })?;

    let task = module.create_task("decode_coded")?;
    task.create_socket_in::<i32>("Y_N", n * frames)?;
    task.create_socket_out::<i32>("V_N", n * frames)?;
    task.create_codelet(move |state: &mut DecoderState, task| {
        let y = task.read::<i32>("Y_N")?;
        let mut v = vec![0i32; state.n * state.frames];
        state.waves_coded.run(state.frames, &y, &mut v, |src, dst, _first| {
            dst.copy_from_slice(src);
            Ok(())
        })?;
        task.data_mut::<i32>("V_N")?.copy_from_slice(&v);
        Ok(0)
    })?;

    Ok(module)
}

#[test]
fn test_decode_extracts_information_symbols() -> trellis_core::Result<()> {
    let _ = trellis_tracing::init_from_env();

    // 6 frames of 4 symbols against width 4: one full wave, one padded wave.
    let mut module = build_decoder(2, 4, 6, 4)?;

    let y: Vec<i32> = (0..24).collect();
    module["decode"].fill("Y_N", &y)?;
    assert_eq!(module.exec("decode")?, 0);

    // First 2 symbols of every 4-symbol frame survive.
    let expected: Vec<i32> = vec![0, 1, 4, 5, 8, 9, 12, 13, 16, 17, 20, 21];
    assert_eq!(module["decode"].read::<i32>("V_K")?, expected);
    Ok(())
}

#[test]
fn test_decode_coded_identity_ragged() -> trellis_core::Result<()> {
    let mut module = build_decoder(2, 4, 6, 4)?;

    let y: Vec<i32> = (100..124).collect();
    module["decode_coded"].fill("Y_N", &y)?;
    module.exec("decode_coded")?;
    assert_eq!(module["decode_coded"].read::<i32>("V_N")?, y);
    Ok(())
}

#[test]
fn test_stats_accumulate_across_calls() -> trellis_core::Result<()> {
    let mut module = build_decoder(2, 4, 6, 4)?;
    module["decode"].fill("Y_N", &vec![1i32; 24])?;

    let mut previous_total = std::time::Duration::ZERO;
    for call in 1..=5u64 {
        module.exec("decode")?;
        let stats = module["decode"].stats();
        assert_eq!(stats.n_calls(), call);
        assert!(stats.duration_total() >= previous_total);
        assert!(stats.duration_min() <= stats.duration_avg());
        assert!(stats.duration_avg() <= stats.duration_max());
        previous_total = stats.duration_total();
    }

    // Every registered phase fired once per call.
    let stats = module["decode"].stats();
    for timer in stats.timers() {
        assert_eq!(timer.n_calls(), 5, "timer '{}'", timer.name());
        assert!(timer.min() <= timer.max());
    }
    assert_eq!(stats.timers().len(), 3);
    Ok(())
}

#[test]
fn test_reset_zeroes_stats_keeps_bindings() -> trellis_core::Result<()> {
    let mut module = build_decoder(2, 4, 6, 4)?;
    module["decode"].fill("Y_N", &vec![3i32; 24])?;
    module.exec("decode")?;

    module["decode"].reset();
    let stats = module["decode"].stats();
    assert_eq!(stats.n_calls(), 0);
    assert_eq!(stats.duration_total(), std::time::Duration::ZERO);
    assert_eq!(stats.duration_min(), std::time::Duration::ZERO);
    assert_eq!(stats.duration_max(), std::time::Duration::ZERO);
    for timer in stats.timers() {
        assert_eq!(timer.n_calls(), 0);
    }

    // Bindings survive: the task is still executable.
    assert!(module["decode"].can_exec());
    assert_eq!(module.exec("decode")?, 0);
    Ok(())
}

#[test]
fn test_driver_side_binding_lifecycle() -> trellis_core::Result<()> {
    // Without autoalloc, the driver supplies every buffer.
    let mut module = Module::new("modem", ());
    let task = module.create_task("modulate")?;
    task.set_autoalloc(false);
    task.create_socket_in::<u8>("U_K", 8)?;
    task.create_socket_out::<f32>("X_N", 8)?;
    task.create_codelet(|_, task| {
        let bits = task.read::<u8>("U_K")?;
        for (x, b) in task.data_mut::<f32>("X_N")?.iter_mut().zip(&bits) {
            *x = 1.0 - 2.0 * f32::from(*b);
        }
        Ok(0)
    })?;

    assert!(!module["modulate"].can_exec());
    assert!(matches!(
        module.exec("modulate").unwrap_err(),
        Error::NotExecutable { .. }
    ));

    module["modulate"].bind("U_K", vec![0u8, 1, 0, 1, 1, 0, 0, 1])?;
    assert!(module["modulate"].is_last_input_socket("U_K"));
    assert!(!module["modulate"].can_exec()); // output still unbound

    module["modulate"].bind("X_N", vec![0.0f32; 8])?;
    assert!(module["modulate"].can_exec());
    module.exec("modulate")?;

    let x = module["modulate"].unbind::<f32>("X_N")?;
    assert_eq!(x, vec![1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0]);
    Ok(())
}

#[test]
fn test_bind_size_and_type_checked() -> trellis_core::Result<()> {
    let mut module = Module::new("modem", ());
    let task = module.create_task("modulate")?;
    task.set_autoalloc(false);
    task.create_socket_in::<u8>("U_K", 8)?;
    task.create_codelet(|_, _| Ok(0))?;

    assert!(matches!(
        module["modulate"].bind("U_K", vec![0u8; 4]).unwrap_err(),
        Error::SizeMismatch { expected: 8, actual: 4, .. }
    ));
    assert!(matches!(
        module["modulate"].bind("U_K", vec![0i32; 8]).unwrap_err(),
        Error::TypeMismatch { .. }
    ));
    assert!(matches!(
        module["modulate"].bind("U_X", vec![0u8; 8]).unwrap_err(),
        Error::SocketNotFound { .. }
    ));
    Ok(())
}

#[test]
fn test_status_socket_reports_soft_failure() -> trellis_core::Result<()> {
    let mut module = Module::new("sync", 0u32);
    let task = module.create_task("detect")?;
    task.create_socket_in::<f32>("Y_N", 4)?;
    task.create_socket_out_status("status")?;
    task.create_codelet(|misses: &mut u32, task| {
        let y = task.read::<f32>("Y_N")?;
        if y.iter().all(|v| v.abs() < 0.5) {
            *misses += 1;
            Ok(1) // soft failure: no frame detected, caller's call
        } else {
            Ok(0)
        }
    })?;

    module["detect"].fill("Y_N", &[0.1f32, 0.2, 0.0, 0.1])?;
    assert_eq!(module.exec("detect")?, 1);
    assert_eq!(module["detect"].read::<i32>("status")?, vec![1]);
    assert_eq!(module["detect"].n_calls(), 1);

    module["detect"].fill("Y_N", &[0.9f32, 0.2, 0.0, 0.1])?;
    assert_eq!(module.exec("detect")?, 0);
    assert_eq!(module["detect"].read::<i32>("status")?, vec![0]);
    assert_eq!(*module.state(), 1);
    Ok(())
}

#[test]
fn test_fast_mode_skips_precondition() -> trellis_core::Result<()> {
    let mut module = Module::new("m", ());
    let task = module.create_task("t")?;
    task.set_autoalloc(false);
    task.create_socket_in::<i32>("X", 4)?;
    task.create_codelet(|_, _| Ok(0))?;
    task.set_fast(true);

    // The check is skipped; the codelet itself never touches the unbound
    // socket, so the call goes through.
    assert_eq!(module.exec("t")?, 0);
    Ok(())
}

#[test]
fn test_debug_dump_configuration_is_per_task() -> trellis_core::Result<()> {
    let mut module = build_decoder(2, 4, 6, 4)?;
    let task = module.task_mut("decode")?;
    task.set_debug(true);
    task.set_debug_hex(true);
    task.set_debug_limit(Some(4));
    task.set_debug_precision(3);
    task.set_debug_frame_max(Some(2));
    task.set_debug_frame_size(Some(4));

    assert!(module["decode"].is_debug());
    assert!(module["decode"].is_debug_hex());
    // The sibling task keeps its own configuration.
    assert!(!module["decode_coded"].is_debug());

    // The clone inherits the flags but stays independently adjustable.
    let mut clone = module.clone();
    assert!(clone["decode"].is_debug());
    clone.task_mut("decode")?.set_debug(false);
    assert!(module["decode"].is_debug());

    // Dumps render through tracing; the call itself must stay functional.
    module["decode"].fill("Y_N", &(0..24).collect::<Vec<i32>>())?;
    assert_eq!(module.exec("decode")?, 0);
    Ok(())
}
