//! Minimal modem chain on top of the task engine: BPSK modulation and
//! hard-decision demodulation as two tasks around one kernel state, with wave
//! batching and per-phase timers.
//!
//! Run with debug dumps:
//!
//! ```text
//! TRELLIS_TRACING_DIRECTIVES=trellis_core=debug cargo run --example bpsk_chain
//! ```

use std::time::Instant;

use trellis_core::{Module, WaveScratch};

#[derive(Clone)]
struct ModemState {
    frames: usize,
    frame_size: usize,
    waves_mod: WaveScratch<u8, f32>,
    waves_demod: WaveScratch<f32, u8>,
}

fn build_modem(frames: usize, frame_size: usize, width: usize) -> trellis_core::Result<Module<ModemState>> {
    let state = ModemState {
        frames,
        frame_size,
        waves_mod: WaveScratch::new(width, frame_size, frame_size)?,
        waves_demod: WaveScratch::new(width, frame_size, frame_size)?,
    };
    let mut module = Module::new("bpsk", state);

    // modulate: bit b -> symbol 1 - 2b
    let task = module.create_task("modulate")?;
    task.create_socket_in::<u8>("U_K", frames * frame_size)?;
    task.create_socket_out::<f32>("X_N", frames * frame_size)?;
    let t_load = task.register_timer("load")?;
    let t_compute = task.register_timer("compute")?;
    let t_store = task.register_timer("store")?;
    task.create_codelet(move |state: &mut ModemState, task| {
        let start = Instant::now();
        let bits = task.read::<u8>("U_K")?;
        task.update_timer(t_load, start.elapsed())?;

        let start = Instant::now();
        let mut symbols = vec![0.0f32; state.frames * state.frame_size];
        state.waves_mod.run(state.frames, &bits, &mut symbols, |src, dst, _| {
            for (x, b) in dst.iter_mut().zip(src) {
                *x = 1.0 - 2.0 * f32::from(*b);
            }
            Ok(())
        })?;
        task.update_timer(t_compute, start.elapsed())?;

        let start = Instant::now();
        task.data_mut::<f32>("X_N")?.copy_from_slice(&symbols);
        task.update_timer(t_store, start.elapsed())?;
        Ok(0)
    })?;

    // demodulate: symbol sign -> bit
    let task = module.create_task("demodulate")?;
    task.create_socket_in::<f32>("Y_N", frames * frame_size)?;
    task.create_socket_out::<u8>("V_K", frames * frame_size)?;
    task.create_codelet(move |state: &mut ModemState, task| {
        let y = task.read::<f32>("Y_N")?;
        let mut bits = vec![0u8; state.frames * state.frame_size];
        state.waves_demod.run(state.frames, &y, &mut bits, |src, dst, _| {
            for (v, y) in dst.iter_mut().zip(src) {
                *v = u8::from(*y < 0.0);
            }
            Ok(())
        })?;
        task.data_mut::<u8>("V_K")?.copy_from_slice(&bits);
        Ok(0)
    })?;

    Ok(module)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    trellis_tracing::init_from_env()?;

    // 6 frames of 8 bits against a width-4 kernel: the last wave is padded.
    let frames = 6;
    let frame_size = 8;
    let mut modem = build_modem(frames, frame_size, 4)?;

    let bits: Vec<u8> = (0..frames * frame_size).map(|i| ((i * 7 + 3) % 5 > 2) as u8).collect();
    modem["modulate"].fill("U_K", &bits)?;

    for _ in 0..1000 {
        modem.exec("modulate")?;
        let symbols = modem["modulate"].read::<f32>("X_N")?;
        modem["demodulate"].fill("Y_N", &symbols)?;
        modem.exec("demodulate")?;
    }

    let recovered = modem["demodulate"].read::<u8>("V_K")?;
    assert_eq!(recovered, bits, "noiseless chain must round-trip");
    tracing::info!(frames, frame_size, "bpsk chain round-tripped");

    println!("task        calls      total        avg   timers");
    for task in modem.tasks() {
        let stats = task.stats();
        let timers: Vec<String> = stats
            .timers()
            .iter()
            .map(|t| format!("{}={:?}", t.name(), t.total()))
            .collect();
        println!(
            "{:<12}{:>5}{:>11?}{:>11?}   {}",
            task.name(),
            stats.n_calls(),
            stats.duration_total(),
            stats.duration_avg(),
            timers.join(" ")
        );
    }

    Ok(())
}
