//! Entropy estimation from resource consumption
//!
//! Boltzmann-style proxy: microstates are counted from the byte states of
//! the field buffer and the number of computational paths, then normalized
//! into [0, 1].

/// Normalized entropy estimate for a field backed by `memory_bytes` of
/// buffer and `cpu_cycles` of cycle budget
pub fn entropy_estimate(memory_bytes: usize, cpu_cycles: u64) -> f64 {
    if memory_bytes == 0 && cpu_cycles == 0 {
        return 0.0;
    }

    // ln W over byte microstates, scaled down to stay in a usable range
    let ln_w_memory = if memory_bytes > 0 {
        memory_bytes as f64 * 256.0f64.ln() / 1.0e6
    } else {
        0.0
    };

    // Computational paths contribute logarithmically
    let ln_w_cycles = if cpu_cycles > 0 {
        (cpu_cycles as f64).ln()
    } else {
        0.0
    };

    ((ln_w_memory + ln_w_cycles) / 100.0).clamp(0.0, 1.0)
}
