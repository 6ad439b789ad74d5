//! Aggregate statistics over completed events

use fissim_core::FissionEvent;

/// Summary statistics computed from a slice of events
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EventStatistics {
    pub event_count: usize,
    pub mean_q_value: f64,
    pub stddev_q_value: f64,
    pub mean_kinetic_energy: f64,
    pub mean_light_mass: f64,
    pub mean_heavy_mass: f64,
    pub mean_alpha_energy: f64,
    pub energy_conserved_count: usize,
    pub momentum_conserved_count: usize,
}

impl EventStatistics {
    /// Compute statistics over the given events; empty input yields zeros
    pub fn from_events(events: &[FissionEvent]) -> Self {
        if events.is_empty() {
            return EventStatistics::default();
        }
        let n = events.len() as f64;

        let mut stats = EventStatistics {
            event_count: events.len(),
            ..EventStatistics::default()
        };
        for e in events {
            stats.mean_q_value += e.q_value;
            stats.mean_kinetic_energy += e.total_kinetic_energy;
            stats.mean_light_mass += e.light.mass;
            stats.mean_heavy_mass += e.heavy.mass;
            stats.mean_alpha_energy += e.alpha.kinetic_energy;
            stats.energy_conserved_count += e.energy_conserved as usize;
            stats.momentum_conserved_count += e.momentum_conserved as usize;
        }
        stats.mean_q_value /= n;
        stats.mean_kinetic_energy /= n;
        stats.mean_light_mass /= n;
        stats.mean_heavy_mass /= n;
        stats.mean_alpha_energy /= n;

        let variance = events
            .iter()
            .map(|e| {
                let d = e.q_value - stats.mean_q_value;
                d * d
            })
            .sum::<f64>()
            / n;
        stats.stddev_q_value = variance.sqrt();

        stats
    }

    /// Fraction of events passing both conservation checks
    pub fn conservation_rate(&self) -> f64 {
        if self.event_count == 0 {
            return 1.0;
        }
        self.energy_conserved_count.min(self.momentum_conserved_count) as f64
            / self.event_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::EventGenerator;
    use fissim_core::EngineConfig;

    fn events(n: usize) -> Vec<FissionEvent> {
        let mut gen = EventGenerator::seeded(EngineConfig::default(), 3);
        (0..n).map(|_| gen.generate(235.0, 6.5).unwrap()).collect()
    }

    #[test]
    fn test_empty_slice() {
        let stats = EventStatistics::from_events(&[]);
        assert_eq!(stats.event_count, 0);
        assert_eq!(stats.mean_q_value, 0.0);
        assert_eq!(stats.conservation_rate(), 1.0);
    }

    #[test]
    fn test_fixed_q_value_has_zero_spread() {
        let stats = EventStatistics::from_events(&events(50));
        assert!((stats.mean_q_value - 206.5).abs() < 1e-9);
        assert!(stats.stddev_q_value < 1e-9);
    }

    #[test]
    fn test_all_generated_events_conserve() {
        let stats = EventStatistics::from_events(&events(50));
        assert_eq!(stats.energy_conserved_count, 50);
        assert_eq!(stats.momentum_conserved_count, 50);
        assert_eq!(stats.conservation_rate(), 1.0);
    }

    #[test]
    fn test_heavy_mean_exceeds_light_mean() {
        let stats = EventStatistics::from_events(&events(200));
        assert!(stats.mean_heavy_mass > stats.mean_light_mass);
    }
}
