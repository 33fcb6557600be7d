// gridloc_sim/src/simulation/core/agent.rs

//! Ground truth: an agent that really moves over the color map and produces
//! the noisy readings a filter is later run on.

use gridloc_core::prelude::{ColorMap, Displacement, FilterParams, Label};
use rand::seq::SliceRandom;
use rand_distr::{Bernoulli, Distribution as _};
use tracing::{debug, trace};

use crate::error::SimError;
use crate::simulation::core::prng::SimulationRng;

/// Where the simulated agent's commands come from.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandSource {
    /// Replay a fixed command list.
    Scripted(Vec<Displacement>),
    /// Draw `steps` commands uniformly from the named moves.
    Random { steps: usize },
}

/// The true state of the agent plus the noise processes that act on it.
#[derive(Debug, Clone)]
pub struct SimulatedAgent<'a> {
    map: &'a ColorMap,
    position: (usize, usize),
    alphabet: Vec<Label>,
    move_dist: Bernoulli,
    sense_dist: Bernoulli,
}

impl<'a> SimulatedAgent<'a> {
    pub fn new(
        map: &'a ColorMap,
        params: &FilterParams,
        start: (usize, usize),
    ) -> Result<Self, SimError> {
        params.validate()?;
        if map.label_at(start.0, start.1).is_none() {
            return Err(SimError::Scenario(format!(
                "start cell {start:?} lies outside the {} map",
                map.shape()
            )));
        }
        let bernoulli =
            |p: f64| Bernoulli::new(p).map_err(|e| SimError::Scenario(e.to_string()));
        Ok(Self {
            map,
            position: start,
            alphabet: map.alphabet(),
            move_dist: bernoulli(params.p_move)?,
            sense_dist: bernoulli(params.sensor_right)?,
        })
    }

    pub fn position(&self) -> (usize, usize) {
        self.position
    }

    /// Attempts `command`. Returns whether the move was actually executed.
    pub fn execute(&mut self, command: Displacement, rng: &mut SimulationRng) -> bool {
        if !self.move_dist.sample(&mut rng.0) {
            return false;
        }
        let (row, col) = self.position;
        self.position = self
            .map
            .shape()
            .wrap(row as i64 + command.d_row, col as i64 + command.d_col);
        true
    }

    /// Reads the color under the agent. A wrong reading is drawn uniformly from
    /// the other labels of the map; on a single-color map every reading is right.
    pub fn sense(&self, rng: &mut SimulationRng) -> Label {
        let (row, col) = self.position;
        let truth = self.map.label_at(row, col).cloned().unwrap_or_default();
        if self.sense_dist.sample(&mut rng.0) {
            return truth;
        }
        let wrong: Vec<&Label> = self.alphabet.iter().filter(|l| **l != truth).collect();
        wrong
            .choose(&mut rng.0)
            .map(|l| (*l).clone())
            .unwrap_or(truth)
    }
}

/// The outcome of a simulated run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedRun {
    pub motions: Vec<Displacement>,
    pub measurements: Vec<Label>,
    /// True cell after each step.
    pub trajectory: Vec<(usize, usize)>,
}

impl SimulatedRun {
    pub fn final_cell(&self) -> Option<(usize, usize)> {
        self.trajectory.last().copied()
    }
}

/// Drives a [`SimulatedAgent`] through every command: move, then read, once per step.
pub fn simulate(
    map: &ColorMap,
    params: &FilterParams,
    start: (usize, usize),
    commands: CommandSource,
    rng: &mut SimulationRng,
) -> Result<SimulatedRun, SimError> {
    let mut agent = SimulatedAgent::new(map, params, start)?;

    let motions = match commands {
        CommandSource::Scripted(motions) => motions,
        CommandSource::Random { steps } => (0..steps)
            .map(|_| match Displacement::NAMED.choose(&mut rng.0) {
                Some((_, d)) => *d,
                None => Displacement::STAY,
            })
            .collect(),
    };

    let mut run = SimulatedRun {
        motions: Vec::with_capacity(motions.len()),
        measurements: Vec::with_capacity(motions.len()),
        trajectory: Vec::with_capacity(motions.len()),
    };
    for command in motions {
        let moved = agent.execute(command, rng);
        let reading = agent.sense(rng);
        trace!(%command, moved, position = ?agent.position(), %reading, "simulated step");
        run.motions.push(command);
        run.measurements.push(reading);
        run.trajectory.push(agent.position());
    }

    debug!(
        steps = run.motions.len(),
        final_cell = ?run.final_cell(),
        "Simulated ground-truth run."
    );
    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> ColorMap {
        ColorMap::parse_rows(&["RGGRR", "RRGRR", "RRGGR", "RRRRR"]).unwrap()
    }

    #[test]
    fn test_same_seed_same_run() {
        let map = map();
        let params = FilterParams::new(0.7, 0.8).unwrap();
        let run = |seed| {
            let mut rng = SimulationRng::from_seed(seed);
            simulate(&map, &params, (0, 0), CommandSource::Random { steps: 25 }, &mut rng).unwrap()
        };
        assert_eq!(run(7), run(7));
        assert_eq!(run(7).motions.len(), 25);
    }

    #[test]
    fn test_noise_free_agent_follows_commands_and_reads_truth() {
        let map = map();
        let params = FilterParams::new(1.0, 1.0).unwrap();
        let mut rng = SimulationRng::from_seed(0);
        let run = simulate(
            &map,
            &params,
            (3, 4),
            CommandSource::Scripted(vec![Displacement::RIGHT, Displacement::DOWN, Displacement::UP]),
            &mut rng,
        )
        .unwrap();
        assert_eq!(run.trajectory, vec![(3, 0), (0, 0), (3, 0)]);
        let expected: Vec<Label> = run
            .trajectory
            .iter()
            .map(|(r, c)| map.label_at(*r, *c).unwrap().clone())
            .collect();
        assert_eq!(run.measurements, expected);
    }

    #[test]
    fn test_stuck_agent_never_moves() {
        let map = map();
        let params = FilterParams::new(1.0, 0.0).unwrap();
        let mut rng = SimulationRng::from_seed(3);
        let run = simulate(&map, &params, (1, 2), CommandSource::Random { steps: 10 }, &mut rng)
            .unwrap();
        assert!(run.trajectory.iter().all(|cell| *cell == (1, 2)));
        assert!(run.measurements.iter().all(|l| l.as_str() == "G"));
    }

    #[test]
    fn test_always_wrong_sensor_reports_the_other_color() {
        let map = map();
        let params = FilterParams::new(0.0, 0.0).unwrap();
        let mut rng = SimulationRng::from_seed(11);
        let agent = SimulatedAgent::new(&map, &params, (0, 1)).unwrap();
        for _ in 0..20 {
            assert_eq!(agent.sense(&mut rng), Label::from("R"));
        }
    }

    #[test]
    fn test_single_color_map_always_reads_its_color() {
        let map = ColorMap::parse_rows(&["BB", "BB"]).unwrap();
        let params = FilterParams::new(0.0, 1.0).unwrap();
        let mut rng = SimulationRng::from_seed(5);
        let run = simulate(&map, &params, (1, 1), CommandSource::Random { steps: 8 }, &mut rng)
            .unwrap();
        assert!(run.measurements.iter().all(|l| l.as_str() == "B"));
    }

    #[test]
    fn test_start_outside_map_is_rejected() {
        let map = map();
        let params = FilterParams::new(0.7, 0.8).unwrap();
        assert!(matches!(
            SimulatedAgent::new(&map, &params, (0, 5)),
            Err(SimError::Scenario(_))
        ));
    }
}
