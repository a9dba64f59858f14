// src/simulation/results.rs
use crate::core::BitId;
use std::collections::BTreeMap;
use std::fmt;

/// Measurement counts from a shot-based simulation.
///
/// Each outcome lists the measured output bits in the circuit's decode order.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    outputs: Vec<BitId>,
    counts: BTreeMap<Vec<bool>, usize>,
    shots: usize,
}

impl SimulationResult {
    pub(crate) fn new(outputs: Vec<BitId>, counts: BTreeMap<Vec<bool>, usize>, shots: usize) -> Self {
        Self { outputs, counts, shots }
    }

    /// Bits that were measured, in outcome order.
    pub fn outputs(&self) -> &[BitId] {
        &self.outputs
    }

    /// Number of shots taken.
    pub fn shots(&self) -> usize {
        self.shots
    }

    /// All observed outcomes with their counts.
    pub fn counts(&self) -> &BTreeMap<Vec<bool>, usize> {
        &self.counts
    }

    /// How often `outcome` was observed (0 if never).
    pub fn count(&self, outcome: &[bool]) -> usize {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    /// The most frequently observed outcome. Ties go to the lowest outcome.
    pub fn most_frequent(&self) -> Option<&[bool]> {
        self.counts
            .iter()
            .fold(None, |best: Option<(&Vec<bool>, usize)>, (outcome, n)| match best {
                Some((_, best_n)) if best_n >= *n => best,
                _ => Some((outcome, *n)),
            })
            .map(|(outcome, _)| outcome.as_slice())
    }

    /// Returns `true` if every shot produced the same outcome.
    pub fn is_deterministic(&self) -> bool {
        self.counts.len() == 1
    }
}

fn bitstring(outcome: &[bool]) -> String {
    outcome.iter().map(|b| if *b { '1' } else { '0' }).collect()
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results ({} shots):", self.shots)?;
        if self.counts.is_empty() {
            writeln!(f, "  No outcomes were recorded.")?;
        } else {
            let labels: Vec<String> = self.outputs.iter().map(|b| b.to_string()).collect();
            writeln!(f, "  Outcomes [{}]:", labels.join(" "))?;
            for (outcome, n) in &self.counts {
                writeln!(f, "    {}: {}", bitstring(outcome), n)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_frequent_and_ties() {
        let mut counts = BTreeMap::new();
        counts.insert(vec![false, true], 3);
        counts.insert(vec![true, false], 5);
        let result = SimulationResult::new(vec![BitId(12), BitId(13)], counts, 8);
        assert_eq!(result.most_frequent(), Some(&[true, false][..]));
        assert!(!result.is_deterministic());
        assert_eq!(result.count(&[true, true]), 0);

        let mut tied = BTreeMap::new();
        tied.insert(vec![true], 2);
        tied.insert(vec![false], 2);
        let result = SimulationResult::new(vec![BitId(0)], tied, 4);
        assert_eq!(result.most_frequent(), Some(&[false][..]));
    }

    #[test]
    fn test_display_lists_outcomes() {
        let mut counts = BTreeMap::new();
        counts.insert(vec![true, false], 1024);
        let result = SimulationResult::new(vec![BitId(12), BitId(13)], counts, 1024);
        let text = result.to_string();
        assert!(text.contains("1024 shots"));
        assert!(text.contains("[q12 q13]"));
        assert!(text.contains("10: 1024"));
    }

    #[test]
    fn test_empty_result() {
        let result = SimulationResult::new(vec![], BTreeMap::new(), 0);
        assert_eq!(result.most_frequent(), None);
        assert!(result.to_string().contains("No outcomes"));
    }
}
