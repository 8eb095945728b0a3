// ABOUTME: Run options and their translation into runtime CLI flags.
// ABOUTME: Out-of-range values are clamped; mismatched units are silently dropped.

use std::collections::BTreeMap;

/// Unit for memory and swap limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryUnit {
    B,
    KB,
    MB,
    GB,
    TB,
}

impl MemoryUnit {
    /// Units the runtime accepts for `--memory`.
    fn valid_for_memory(self) -> bool {
        matches!(self, MemoryUnit::MB | MemoryUnit::GB | MemoryUnit::TB)
    }

    /// Units the runtime accepts for `--memory-swap`.
    fn valid_for_swap(self) -> bool {
        true
    }
}

impl std::fmt::Display for MemoryUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let unit = match self {
            MemoryUnit::B => "B",
            MemoryUnit::KB => "KB",
            MemoryUnit::MB => "MB",
            MemoryUnit::GB => "GB",
            MemoryUnit::TB => "TB",
        };
        write!(f, "{unit}")
    }
}

/// Configuration for starting a container. All fields are optional.
///
/// A limit flag is emitted only when both its value and a unit from that
/// limit's recognized set are present; anything else is silently ignored
/// rather than erroring. Negative limits are coerced to zero, swappiness
/// is clamped to [0, 100], and the core count is clamped to
/// [0, host logical core count].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Memory limit value, paired with `memory_unit`.
    pub memory: Option<i64>,
    /// Unit for the memory limit; honored for MB, GB, and TB.
    pub memory_unit: Option<MemoryUnit>,
    /// Swap limit value, paired with `swap_unit`.
    pub swap: Option<i64>,
    /// Unit for the swap limit; any unit is honored.
    pub swap_unit: Option<MemoryUnit>,
    /// Swappiness, clamped to [0, 100].
    pub swappiness: Option<i64>,
    /// CPU core count, clamped to [0, host logical core count].
    pub cpus: Option<f64>,
    /// Single inbound/outbound port pair, emitted verbatim.
    pub port: Option<(u16, u16)>,
    /// Environment variables; ordered so flag emission is deterministic.
    pub env: BTreeMap<String, String>,
    /// Pass `--rm` so the runtime removes the container on exit.
    pub auto_remove: bool,
}

impl RunOptions {
    /// Translate into CLI flags, in a fixed option order.
    pub fn to_flags(&self) -> Vec<String> {
        let mut flags = Vec::new();

        if let (Some(value), Some(unit)) = (self.memory, self.memory_unit)
            && unit.valid_for_memory()
        {
            flags.push(format!("--memory={}{}", value.max(0), unit));
        }

        if let (Some(value), Some(unit)) = (self.swap, self.swap_unit)
            && unit.valid_for_swap()
        {
            flags.push(format!("--memory-swap={}{}", value.max(0), unit));
        }

        if let Some(swappiness) = self.swappiness {
            flags.push(format!("--memory-swappiness={}", swappiness.clamp(0, 100)));
        }

        if let Some(cpus) = self.cpus
            && cpus.is_finite()
        {
            let host_cores = num_cpus::get() as f64;
            flags.push(format!("--cpus={}", cpus.clamp(0.0, host_cores)));
        }

        if let Some((inbound, outbound)) = self.port {
            flags.push("--expose".into());
            flags.push(format!("{inbound}:{outbound}"));
        }

        for (key, value) in &self.env {
            flags.push("--env".into());
            flags.push(format!("{key}={value}"));
        }

        if self.auto_remove {
            flags.push("--rm".into());
        }

        flags
    }
}
